//! Invariants over arbitrary interleavings of samples, frames and buttons

use proptest::prelude::*;

use head_goal::Settings;
use head_goal::consts::WIN_THRESHOLD;
use head_goal::platform::scripted::face_at;
use head_goal::sim::{BallPhysics, Field, GamePhase, GameState, TickInput, sample, tick};

#[derive(Debug, Clone)]
enum Step {
    /// Estimation result: a face at this eye midpoint, or none detected
    Sample(Option<f32>),
    /// Display frame after this many milliseconds
    Frame(f64),
    Replay,
    Quit,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => prop::option::weighted(0.9, 0.0f32..640.0).prop_map(Step::Sample),
        12 => (1.0f64..400.0).prop_map(Step::Frame),
        1 => Just(Step::Replay),
        1 => Just(Step::Quit),
    ]
}

fn new_game() -> GameState {
    GameState::new(Field::new(640.0, 480.0), &Settings::default())
}

proptest! {
    #[test]
    fn prop_game_invariants_hold(steps in prop::collection::vec(step(), 1..400)) {
        let mut state = new_game();
        let mut now = 0.0;
        let mut pending = TickInput::default();
        let center_y = state.snapshot().ball_pos.y;

        for step in steps {
            match step {
                Step::Sample(x) => {
                    let live = state.accepts_input();
                    let faces: Vec<_> = x.map(face_at).into_iter().collect();
                    let outcome = sample(&mut state, &faces);
                    // Estimates are discarded whenever the ball is not live
                    prop_assert_eq!(outcome.is_some(), live);
                }
                Step::Replay => pending.replay = true,
                Step::Quit => pending.quit = true,
                Step::Frame(dt) => {
                    now += dt;
                    let input = std::mem::take(&mut pending);
                    let before = state.snapshot();
                    let report = tick(&mut state, &input, now);
                    let after = state.snapshot();

                    prop_assert_eq!(after.ball_pos.y, center_y);
                    prop_assert!(after.score.player <= WIN_THRESHOLD);
                    prop_assert!(after.score.opponent <= WIN_THRESHOLD);

                    if input.replay {
                        prop_assert_eq!(after.score.player, 0);
                        prop_assert_eq!(after.score.opponent, 0);
                        prop_assert_eq!(after.phase, GamePhase::ResetPause);
                        prop_assert!(report.goal.is_none());
                        continue;
                    }

                    // Scores never decrease, and a goal credits exactly one side
                    prop_assert!(after.score.player >= before.score.player);
                    prop_assert!(after.score.opponent >= before.score.opponent);
                    let gained = (after.score.player - before.score.player)
                        + (after.score.opponent - before.score.opponent);
                    prop_assert_eq!(gained, u32::from(report.goal.is_some()));

                    if !report.advanced {
                        prop_assert_eq!(after.ball_pos, before.ball_pos);
                    }
                    if let GamePhase::GameOver { .. } = before.phase {
                        prop_assert_eq!(after.phase, before.phase);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_ball_stays_on_field(deltas in prop::collection::vec(-30.0f32..30.0, 1..300)) {
        let mut physics = BallPhysics::new(Field::new(640.0, 480.0));
        for delta in deltas {
            physics.advance(delta);
            let ball = physics.ball();
            prop_assert!(ball.pos().x - ball.radius() >= 0.0);
            prop_assert!(ball.pos().x + ball.radius() <= 640.0);
        }
    }
}
