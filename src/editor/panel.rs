//! Side panel state
//!
//! The panel shows one system's details, either read-only or as an edit form.

use starmap_core::{DetailEdit, SystemDetails};

/// Panel width in logical pixels
pub const PANEL_WIDTH: f32 = 360.0;

/// What the panel body shows
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    Read,
    Edit(DetailEdit),
}

/// An open panel
#[derive(Debug, Clone)]
pub struct PanelState {
    pub system_id: String,
    pub details: SystemDetails,
    pub view: PanelView,
}

impl PanelState {
    pub fn read(system_id: impl Into<String>, details: SystemDetails) -> Self {
        Self {
            system_id: system_id.into(),
            details,
            view: PanelView::Read,
        }
    }

    /// Open straight into the edit form, prefilled from `details`
    pub fn edit(system_id: impl Into<String>, system_name: &str, details: SystemDetails) -> Self {
        let form = DetailEdit::from_details(system_name, &details);
        Self {
            system_id: system_id.into(),
            details,
            view: PanelView::Edit(form),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.view, PanelView::Edit(_))
    }

    pub fn form_mut(&mut self) -> Option<&mut DetailEdit> {
        match &mut self.view {
            PanelView::Edit(form) => Some(form),
            PanelView::Read => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starmap_core::generate_details;

    #[test]
    fn test_edit_prefills_form() {
        let details = generate_details("SOL");
        let mut panel = PanelState::edit("SOL", "Sol", details.clone());
        assert!(panel.is_editing());
        let form = panel.form_mut().unwrap();
        assert_eq!(form.system_name, "Sol");
        assert_eq!(form.planets.len(), details.planets.len());
    }

    #[test]
    fn test_read_has_no_form() {
        let mut panel = PanelState::read("SOL", generate_details("SOL"));
        assert!(!panel.is_editing());
        assert!(panel.form_mut().is_none());
    }
}
