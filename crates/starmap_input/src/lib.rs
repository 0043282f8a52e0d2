//! Star map input handling
//!
//! This crate turns raw mouse input into orbit camera motion and clicks.

mod orbit_controller;

pub use orbit_controller::{CameraControl, Click, OrbitController};
