//! Head Goal entry point
//!
//! On the web the game is started from `wasm_main`. Natively there is no
//! camera, so a scripted head plays one match and the result is printed as
//! JSON.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    head_goal::platform::web::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames before the headless match is abandoned (five minutes at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const MAX_HEADLESS_FRAMES: u64 = 60 * 60 * 5;

/// Usage: `head-goal [settings.json] [seed]`
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    use head_goal::Settings;
    use head_goal::platform::scripted::{HeadScript, ScriptedFaces, run_headless};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Head Goal (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load_from(std::path::Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed: {}", e);
            return ExitCode::FAILURE;
        }
        None => 0,
    };

    let mut faces = ScriptedFaces::new(HeadScript::default(), seed);
    let run = run_headless(&settings, &mut faces, MAX_HEADLESS_FRAMES);

    match serde_json::to_string_pretty(&run) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize run: {}", e);
            ExitCode::FAILURE
        }
    }
}
