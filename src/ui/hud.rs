//! Mode HUD and hover tooltip

use egui::{Align2, Id};

use crate::editor::{EditMode, Editor};

/// `"Lanes: ON (E)"`
pub fn mode_label(name: &str, on: bool, key: &str) -> String {
    format!("{}: {} ({})", name, if on { "ON" } else { "OFF" }, key)
}

fn hud_frame(style: &egui::Style) -> egui::Frame {
    egui::Frame::window(style)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .shadow(egui::Shadow::NONE)
}

pub(super) fn draw_hud(ctx: &egui::Context, editor: &mut Editor) {
    egui::Area::new(Id::new("hud"))
        .anchor(Align2::LEFT_TOP, [10.0, 10.0])
        .show(ctx, |ui| {
            hud_frame(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(mode_label("Lanes", editor.lane_mode(), "E"));
                    ui.weak("|");
                    ui.label(mode_label("Add System", editor.add_mode(), "A"));
                    if ui.button("Add System").clicked() && !editor.add_mode() {
                        editor.enter_mode(EditMode::AddSystem);
                    }
                    if editor.gate().is_gated() {
                        ui.weak("|");
                        if editor.gate().is_unlocked() {
                            if ui.button("Lock").clicked() {
                                editor.lock();
                            }
                        } else {
                            ui.label("Locked");
                        }
                    }
                });

                if editor.lane_mode() {
                    ui.weak("Click two systems to toggle a lane. Middle-click deletes one.");
                    ui.weak("C clear, R restore, X export");
                    if let Some(a) = editor.pick_a() {
                        let title = editor.system_title(a);
                        ui.label(format!("Lane from {}", title));
                    }
                }
                if let Some(status) = editor.status() {
                    ui.weak(status);
                }
            });
        });
}

pub(super) fn draw_tooltip(ctx: &egui::Context, editor: &Editor, cursor: Option<egui::Pos2>) {
    let (Some(id), Some(pos)) = (editor.hovered(), cursor) else {
        return;
    };
    let title = editor.system_title(id);
    egui::Area::new(Id::new("hover_tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(pos + egui::vec2(12.0, 12.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.strong(title);
                ui.small(id);
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_label() {
        assert_eq!(mode_label("Lanes", true, "E"), "Lanes: ON (E)");
        assert_eq!(mode_label("Add System", false, "A"), "Add System: OFF (A)");
    }
}
