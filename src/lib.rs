//! Star map viewer and editor
//!
//! Library half of the `starmap` binary: configuration, the editor state
//! machine, key mapping, the egui overlay and the window/GPU systems.

pub mod config;
pub mod editor;
pub mod input;
pub mod systems;
pub mod ui;
