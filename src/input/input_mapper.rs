//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to editor actions like ToggleLaneMode, ExportMap, etc.
//! Mouse drags and clicks are NOT mapped here - they go through the OrbitController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Toggle lane editing (E key)
    ToggleLaneMode,
    /// Toggle system placement (A key)
    ToggleAddMode,
    /// Open the detail panel for the selection (Enter)
    OpenPanel,
    /// Remove every lane (C key, lane mode only)
    ClearLanes,
    /// Restore the lanes from the loaded file (R key, lane mode only)
    RestoreLanes,
    /// Write the map document to the export directory (X key, lane mode only)
    ExportMap,
    /// Close the top-most prompt or panel, else exit (Escape)
    Dismiss,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Reset camera to its starting orbit (Home key)
    ResetCamera,
}

/// Maps raw keyboard events to editor actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Lane-editing keys only map while lane mode is on.
    pub fn map_keyboard(key: KeyCode, state: ElementState, lane_mode: bool) -> Option<EditorAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::KeyE => Some(EditorAction::ToggleLaneMode),
            KeyCode::KeyA => Some(EditorAction::ToggleAddMode),
            KeyCode::Enter | KeyCode::NumpadEnter => Some(EditorAction::OpenPanel),
            KeyCode::KeyC if lane_mode => Some(EditorAction::ClearLanes),
            KeyCode::KeyR if lane_mode => Some(EditorAction::RestoreLanes),
            KeyCode::KeyX if lane_mode => Some(EditorAction::ExportMap),
            KeyCode::Escape => Some(EditorAction::Dismiss),
            KeyCode::KeyF => Some(EditorAction::ToggleFullscreen),
            KeyCode::Home => Some(EditorAction::ResetCamera),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_toggles() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyE, ElementState::Pressed, false),
            Some(EditorAction::ToggleLaneMode)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyA, ElementState::Pressed, true),
            Some(EditorAction::ToggleAddMode)
        );
    }

    #[test]
    fn test_lane_keys_need_lane_mode() {
        for key in [KeyCode::KeyC, KeyCode::KeyR, KeyCode::KeyX] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed, false);
            assert_eq!(action, None, "Key {:?} should not be mapped outside lane mode", key);
        }
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyC, ElementState::Pressed, true),
            Some(EditorAction::ClearLanes)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyR, ElementState::Pressed, true),
            Some(EditorAction::RestoreLanes)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyX, ElementState::Pressed, true),
            Some(EditorAction::ExportMap)
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Released, false);
        assert_eq!(action, None);
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::Enter, ElementState::Pressed, false),
            Some(EditorAction::OpenPanel)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed, false),
            Some(EditorAction::Dismiss)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyF, ElementState::Pressed, false),
            Some(EditorAction::ToggleFullscreen)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::Home, ElementState::Pressed, false),
            Some(EditorAction::ResetCamera)
        );
    }

    #[test]
    fn test_unmapped_keys() {
        for key in [KeyCode::KeyW, KeyCode::KeyS, KeyCode::Space] {
            assert_eq!(InputMapper::map_keyboard(key, ElementState::Pressed, true), None);
        }
    }
}
