//! Platform abstraction layer
//!
//! - `web`: browser wiring (camera, landmark model, frame loop, sampler, DOM)
//! - `scripted`: synthetic face source and headless runner for native builds

pub mod scripted;

#[cfg(target_arch = "wasm32")]
pub mod web;
