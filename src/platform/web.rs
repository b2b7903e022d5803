//! Browser wiring
//!
//! Owns the DOM handles, the camera stream, the landmark model and the two
//! scheduled tasks: the frame loop (requestAnimationFrame) and the sampler
//! (a timeout chain). Both tasks share one `Rc<RefCell<Game>>` and never
//! hold its borrow across an await.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Document, Element, HtmlCanvasElement, HtmlElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints,
};

use crate::consts::FACE_MESH_POINTS;
use crate::error::TrackingError;
use crate::renderer::{CanvasRenderer, build_scene};
use crate::settings::Settings;
use crate::sim::{
    FaceLandmarks, Field, GameState, Overlay, Snapshot, TickInput, TrackerStatus, sample, tick,
};

const BALL_IMAGE: &str = "football.png";
/// Values per landmark in `scaledMesh` (x, y, z)
const MESH_STRIDE: usize = 3;

#[wasm_bindgen]
extern "C" {
    /// Model object resolved by `facemesh.load()`
    type FaceMeshModel;

    #[wasm_bindgen(catch, js_namespace = facemesh, js_name = load)]
    fn load_facemesh() -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, method, js_name = estimateFaces)]
    fn estimate_faces(this: &FaceMeshModel, input: &HtmlVideoElement) -> Result<Promise, JsValue>;
}

/// Page elements the game writes to
struct Dom {
    overlay: Option<HtmlElement>,
    message: Option<Element>,
    loading: Option<HtmlElement>,
    loading_text: Option<String>,
}

impl Dom {
    fn lookup(document: &Document) -> Self {
        let loading: Option<HtmlElement> = element(document, "loadingMessage");
        let loading_text = loading.as_ref().and_then(|el| el.text_content());
        Self {
            overlay: element(document, "overlay"),
            message: document.get_element_by_id("message"),
            loading,
            loading_text,
        }
    }
}

/// Game instance holding all browser-side state
struct Game {
    state: GameState,
    input: TickInput,
    renderer: Option<CanvasRenderer>,
    dom: Dom,
    loop_running: bool,
    // Last values pushed to the DOM
    shown_overlay: Option<Overlay>,
    shown_tracker: Option<TrackerStatus>,
}

impl Game {
    fn new(state: GameState, renderer: Option<CanvasRenderer>, dom: Dom) -> Self {
        Self {
            state,
            input: TickInput::default(),
            renderer,
            dom,
            loop_running: false,
            shown_overlay: None,
            shown_tracker: None,
        }
    }

    /// One display frame: tick, draw, sync overlays
    fn frame(&mut self, time: f64) {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, time);

        let snapshot = self.state.snapshot();
        if let Some(renderer) = &self.renderer {
            renderer.draw(&build_scene(&snapshot));
        }
        self.sync_dom(&snapshot);
    }

    fn sync_dom(&mut self, snapshot: &Snapshot) {
        if self.shown_overlay != Some(snapshot.overlay) {
            // "GOAL!" is drawn on the canvas; only the end-of-match card is DOM
            match snapshot.overlay {
                Overlay::GameOver { winner } => {
                    if let Some(message) = &self.dom.message {
                        message.set_text_content(Some(winner.win_message()));
                    }
                    set_visible(self.dom.overlay.as_ref(), true);
                }
                Overlay::Goal | Overlay::None => set_visible(self.dom.overlay.as_ref(), false),
            }
            self.shown_overlay = Some(snapshot.overlay);
        }

        if self.shown_tracker != Some(snapshot.tracker) {
            let tracker = snapshot.tracker;
            if let Some(loading) = &self.dom.loading {
                let text = tracker
                    .notice()
                    .map(str::to_string)
                    .or_else(|| self.dom.loading_text.clone());
                loading.set_text_content(text.as_deref());
            }
            set_visible(
                self.dom.loading.as_ref(),
                tracker.shows_loading() || tracker.notice().is_some(),
            );
            self.shown_tracker = Some(tracker);
        }
    }
}

pub async fn run() {
    console_error_panic_hook::set_once();

    // The logger accepts everything; the max level below does the filtering
    if console_log::init_with_level(log::Level::Trace).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::set_max_level(log::LevelFilter::Info);

    let settings = Settings::load();
    let level = settings.log_level().unwrap_or(log::Level::Info);
    log::set_max_level(level.to_level_filter());

    log::info!("Head Goal starting...");

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document; nothing to attach to");
        return;
    };
    let Some(canvas) = element::<HtmlCanvasElement>(&document, "gameCanvas") else {
        log::error!("#gameCanvas missing");
        return;
    };

    // Field is fixed at load time
    let field = Field::new(canvas.width() as f32, canvas.height() as f32);
    let renderer = match CanvasRenderer::new(&canvas, BALL_IMAGE) {
        Ok(renderer) => Some(renderer),
        Err(e) => {
            log::error!("Canvas renderer unavailable: {:?}", e);
            None
        }
    };

    let state = GameState::new(field, &settings);
    let game = Rc::new(RefCell::new(Game::new(state, renderer, Dom::lookup(&document))));
    log::info!("Field {}x{}", field.width, field.height);

    setup_buttons(&document, game.clone());
    start_frame_loop(game.clone());

    let Some(video) = element::<HtmlVideoElement>(&document, "playerVideo") else {
        log::error!("#playerVideo missing; head tracking disabled");
        game.borrow_mut()
            .state
            .set_tracker_status(TrackerStatus::CameraUnavailable);
        return;
    };

    match start_tracking(&video).await {
        Ok(model) => {
            game.borrow_mut().state.set_tracker_status(TrackerStatus::Ready);
            spawn_local(run_sampler(game, model, video, settings));
        }
        Err(err) => {
            log::warn!("{}", err);
            let status = match err {
                TrackingError::CameraUnavailable(_) => TrackerStatus::CameraUnavailable,
                _ => TrackerStatus::ModelUnavailable,
            };
            game.borrow_mut().state.set_tracker_status(status);
        }
    }
}

/// Start the per-frame callback. Calling it again while it runs does nothing.
fn start_frame_loop(game: Rc<RefCell<Game>>) {
    {
        let mut g = game.borrow_mut();
        if g.loop_running {
            log::debug!("Frame loop already running");
            return;
        }
        g.loop_running = true;
    }
    request_animation_frame(game);
}

fn request_animation_frame(game: Rc<RefCell<Game>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(game, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
    game.borrow_mut().frame(time);
    request_animation_frame(game);
}

/// Replay and quit only set one-shot inputs; the running loop consumes them
fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
    on_click(document, "replayButton", game.clone(), |g| g.input.replay = true);
    on_click(document, "quitButton", game, |g| g.input.quit = true);
}

fn on_click(document: &Document, id: &str, game: Rc<RefCell<Game>>, action: fn(&mut Game)) {
    let Some(btn) = document.get_element_by_id(id) else {
        log::warn!("#{} not found", id);
        return;
    };
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
        action(&mut game.borrow_mut());
    });
    let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Load the landmark model, then open the camera
async fn start_tracking(video: &HtmlVideoElement) -> Result<FaceMeshModel, TrackingError> {
    let model = load_model().await?;
    log::info!("Face mesh model loaded");
    start_camera(video).await?;
    log::info!("Camera stream started");
    Ok(model)
}

async fn load_model() -> Result<FaceMeshModel, TrackingError> {
    let failed = |e: JsValue| TrackingError::ModelLoad(describe(&e));
    let promise = load_facemesh().map_err(failed)?;
    let model = JsFuture::from(promise).await.map_err(failed)?;
    Ok(model.unchecked_into())
}

async fn start_camera(video: &HtmlVideoElement) -> Result<(), TrackingError> {
    let unavailable = |e: JsValue| TrackingError::CameraUnavailable(describe(&e));
    let window = web_sys::window()
        .ok_or_else(|| TrackingError::CameraUnavailable("no window".to_string()))?;
    let devices = window.navigator().media_devices().map_err(unavailable)?;

    let video_constraints = js_sys::Object::new();
    Reflect::set(&video_constraints, &"facingMode".into(), &"user".into()).map_err(unavailable)?;
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video_constraints);

    let request = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(unavailable)?;
    let stream: MediaStream = JsFuture::from(request).await.map_err(unavailable)?.unchecked_into();
    video.set_src_object(Some(&stream));
    JsFuture::from(video.play().map_err(unavailable)?)
        .await
        .map_err(unavailable)?;
    Ok(())
}

/// Sampler task: one estimation per interval, only while the ball is live.
/// A slow estimation pushes the next one back; samples never overlap.
async fn run_sampler(
    game: Rc<RefCell<Game>>,
    model: FaceMeshModel,
    video: HtmlVideoElement,
    settings: Settings,
) {
    log::info!("Sampling faces every {} ms", settings.sample_interval_ms);
    loop {
        let _ = JsFuture::from(delay(settings.sample_interval_ms)).await;
        if !game.borrow().state.accepts_input() {
            continue;
        }
        match estimate(&model, &video, settings.estimation_timeout_ms).await {
            Ok(faces) => {
                sample(&mut game.borrow_mut().state, &faces);
            }
            Err(err) => log::warn!("{}", err),
        }
    }
}

async fn estimate(
    model: &FaceMeshModel,
    video: &HtmlVideoElement,
    timeout_ms: Option<u32>,
) -> Result<Vec<FaceLandmarks>, TrackingError> {
    let failed = |e: JsValue| TrackingError::Estimation(describe(&e));
    let mut pending = model.estimate_faces(video).map_err(failed)?;
    if let Some(ms) = timeout_ms {
        // The timer resolves with `undefined`, which no prediction list is
        pending = Promise::race(&Array::of2(&pending, &delay(ms)));
    }

    let predictions = JsFuture::from(pending).await.map_err(failed)?;
    if predictions.is_undefined() {
        return Err(TrackingError::EstimationTimeout(timeout_ms.unwrap_or_default()));
    }
    parse_predictions(&predictions)
}

/// Read `[{ scaledMesh: [[x, y, z], ...] }, ...]`
fn parse_predictions(predictions: &JsValue) -> Result<Vec<FaceLandmarks>, TrackingError> {
    let malformed = |what: &str| TrackingError::MalformedPrediction(what.to_string());
    if !Array::is_array(predictions) {
        return Err(malformed("predictions are not an array"));
    }

    Array::from(predictions)
        .iter()
        .map(|prediction| {
            let mesh = Reflect::get(&prediction, &"scaledMesh".into())
                .map_err(|_| malformed("missing scaledMesh"))?;
            if !Array::is_array(&mesh) {
                return Err(malformed("scaledMesh is not an array"));
            }

            let mut flat = Vec::with_capacity(FACE_MESH_POINTS * MESH_STRIDE);
            for point in Array::from(&mesh).iter() {
                let point = Array::from(&point);
                for axis in 0..MESH_STRIDE as u32 {
                    // Missing z is tolerated; x and y are required
                    match point.get(axis).as_f64() {
                        Some(v) => flat.push(v as f32),
                        None if axis >= 2 => flat.push(0.0),
                        None => return Err(malformed("landmark is not [x, y, z]")),
                    }
                }
            }
            FaceLandmarks::from_flat(&flat, MESH_STRIDE).ok_or_else(|| malformed("empty mesh"))
        })
        .collect()
}

/// Promise resolving with `undefined` after `ms`
fn delay(ms: u32) -> Promise {
    Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout);
        }
    })
}

fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

fn set_visible(el: Option<&HtmlElement>, visible: bool) {
    if let Some(el) = el {
        let display = if visible { "block" } else { "none" };
        let _ = el.style().set_property("display", display);
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
