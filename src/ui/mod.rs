//! egui overlay
//!
//! Everything drawn on top of the map: HUD, hover tooltip, side panel and
//! prompts. Widgets act on the [`Editor`] directly.

mod hologram;
mod hud;
mod panel;
mod prompt;

use egui::Color32;

use crate::editor::Editor;

pub use hologram::paint_hologram;
pub use hud::mode_label;

pub(crate) const PANEL_FILL: Color32 = Color32::from_rgba_premultiplied(10, 14, 18, 230);
pub(crate) const BORDER: Color32 = Color32::from_rgb(0x24, 0x31, 0x43);
pub(crate) const TEXT: Color32 = Color32::from_rgb(0xe8, 0xf0, 0xff);
pub(crate) const ERROR: Color32 = Color32::from_rgb(0xff, 0x8a, 0x8a);

/// Dark style matching the map background
pub fn install_style(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = PANEL_FILL;
    visuals.window_fill = PANEL_FILL;
    visuals.window_stroke = egui::Stroke::new(1.0, BORDER);
    visuals.override_text_color = Some(TEXT);
    ctx.set_visuals(visuals);
}

/// Draw the whole overlay for one frame
///
/// `cursor` is the pointer position in egui points, if it is over the window.
pub fn draw_overlay(ctx: &egui::Context, editor: &mut Editor, cursor: Option<egui::Pos2>) {
    hud::draw_hud(ctx, editor);
    panel::draw_panel(ctx, editor);
    if editor.prompt().is_none() {
        hud::draw_tooltip(ctx, editor, cursor);
    }
    prompt::draw_prompt(ctx, editor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use starmap_core::{AccessGate, DetailCache, Galaxy, StarMapDocument};

    fn editor() -> Editor {
        Editor::new(
            Galaxy::from_document(StarMapDocument::builtin()),
            DetailCache::in_memory(),
            AccessGate::new("pw"),
            std::env::temp_dir(),
        )
    }

    fn run_frame(editor: &mut Editor, cursor: Option<egui::Pos2>) {
        let ctx = egui::Context::default();
        install_style(&ctx);
        let _ = ctx.run(egui::RawInput::default(), |ctx| draw_overlay(ctx, editor, cursor));
    }

    #[test]
    fn test_overlay_draws_without_panel() {
        let mut editor = editor();
        editor.set_hovered(Some("SOL".to_string()));
        run_frame(&mut editor, Some(egui::pos2(100.0, 100.0)));
        assert!(editor.panel().is_none());
    }

    #[test]
    fn test_overlay_draws_panel_and_prompt() {
        let mut editor = editor();
        editor.open_panel("SOL");
        run_frame(&mut editor, None);
        assert!(editor.panel().is_some());

        editor.toggle_lane_mode();
        assert!(editor.prompt().is_some(), "locked gate asks for a password");
        run_frame(&mut editor, None);
        assert!(editor.prompt().is_some(), "prompt stays open without input");
    }
}
