//! Input handling module
//!
//! Provides input mapping from raw keyboard events to editor actions.

mod input_mapper;

pub use input_mapper::{EditorAction, InputMapper};
