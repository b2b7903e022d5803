//! Rendering module
//!
//! Scenes are built as plain draw lists and executed by the 2D canvas
//! backend in the browser.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCmd, TextAlign, TextCmd, build_scene};
