//! Map editing
//!
//! Selection, lane editing, system placement, prompts and the detail panel.

mod panel;
mod prompt;
mod state;

pub use panel::{PanelState, PanelView, PANEL_WIDTH};
pub use prompt::{EditMode, Prompt, PromptKind};
pub use state::{Editor, PickContext};
