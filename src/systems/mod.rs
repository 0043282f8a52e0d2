//! Application systems
//!
//! Window, GPU and overlay plumbing kept out of main.rs.

mod render;
mod ui;
mod window;

pub use render::{RenderError, RenderSystem};
pub use ui::{OverlayFrame, UiSystem};
pub use window::{WindowError, WindowSystem};
