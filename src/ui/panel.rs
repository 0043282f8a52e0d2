//! System side panel

use egui::{Align, Layout, RichText};
use starmap_core::{DetailEdit, HologramLayout, PlanetType, StarKind, SystemDetails, SystemRecord};

use super::hologram::paint_hologram;
use crate::editor::{Editor, PanelView, PANEL_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelAction {
    Generate,
    Edit,
    Close,
    Save,
    Cancel,
    ExportDetails,
    ExportHologram,
}

pub(super) fn draw_panel(ctx: &egui::Context, editor: &mut Editor) {
    let Some(id) = editor.panel().map(|p| p.system_id.clone()) else {
        return;
    };
    let title = editor.system_title(&id);
    let record = editor.galaxy().system(&id).cloned();
    let Some(panel) = editor.panel_mut() else {
        return;
    };

    let mut action = None;
    egui::SidePanel::right("system_panel")
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong(&title);
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        action = Some(PanelAction::Close);
                    }
                    if ui.button("Edit").clicked() {
                        action = Some(PanelAction::Edit);
                    }
                    if ui.button("Generate/Load").clicked() {
                        action = Some(PanelAction::Generate);
                    }
                });
            });
            ui.separator();

            egui::TopBottomPanel::bottom("system_panel_footer").show_inside(ui, |ui| {
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui.button("Export").clicked() {
                        action = Some(PanelAction::ExportDetails);
                    }
                    if ui.button("Export Hologram").clicked() {
                        action = Some(PanelAction::ExportHologram);
                    }
                });
            });

            egui::ScrollArea::vertical().show(ui, |ui| match &mut panel.view {
                PanelView::Read => read_body(ui, &id, record.as_ref(), &panel.details),
                PanelView::Edit(form) => {
                    if let Some(a) = edit_body(ui, &id, form) {
                        action = Some(a);
                    }
                }
            });
        });

    match action {
        Some(PanelAction::Generate) => editor.panel_generate(),
        Some(PanelAction::Edit) => editor.panel_edit(),
        Some(PanelAction::Close) => editor.close_panel(),
        Some(PanelAction::Save) => editor.panel_save(),
        Some(PanelAction::Cancel) => editor.panel_cancel(),
        Some(PanelAction::ExportDetails) => {
            editor.export_details();
        }
        Some(PanelAction::ExportHologram) => {
            editor.export_hologram();
        }
        None => {}
    }
}

fn field(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.strong(format!("{}:", label));
        ui.label(value);
    });
}

fn read_body(ui: &mut egui::Ui, id: &str, record: Option<&SystemRecord>, details: &SystemDetails) {
    field(ui, "ID", id);
    let name = record
        .and_then(|r| r.name.as_deref())
        .filter(|n| !n.is_empty())
        .unwrap_or("(unnamed)");
    field(ui, "Name", name);
    field(ui, "Star", details.star.kind.label());
    field(ui, "Version", &details.version);
    if let Some(tags) = record.and_then(|r| r.tags.as_ref()) {
        field(ui, "Tags", &tags.join(", "));
    }

    ui.add_space(8.0);
    ui.strong(format!("Planets ({})", details.planets.len()));
    if details.planets.is_empty() {
        ui.label(RichText::new("No planets generated yet. Click Generate/Load.").italics());
    }
    for (i, planet) in details.planets.iter().enumerate() {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            let name = if planet.name.is_empty() {
                format!("Planet {}", i + 1)
            } else {
                planet.name.clone()
            };
            ui.strong(format!("{} ({})", name, planet.planet_type));
            let orbit = planet
                .semi_major_au
                .map(|au| au.to_string())
                .unwrap_or_else(|| "?".to_string());
            ui.label(format!("Orbit: {} AU", orbit));
            if !planet.notes.is_empty() {
                ui.weak(&planet.notes);
            }
        });
    }

    ui.add_space(8.0);
    egui::CollapsingHeader::new("Hologram")
        .default_open(true)
        .show(ui, |ui| paint_hologram(ui, &HologramLayout::from_details(details)));
}

fn edit_body(ui: &mut egui::Ui, id: &str, form: &mut DetailEdit) -> Option<PanelAction> {
    let mut action = None;

    egui::Grid::new("system_edit_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.strong("ID");
            ui.label(id);
            ui.end_row();

            ui.strong("Name");
            ui.text_edit_singleline(&mut form.system_name);
            ui.end_row();

            ui.strong("Star");
            egui::ComboBox::from_id_salt("star_kind")
                .selected_text(form.star_kind.label())
                .show_ui(ui, |ui| {
                    for kind in StarKind::ALL {
                        let label = kind.to_string();
                        ui.selectable_value(&mut form.star_kind, kind, label);
                    }
                });
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.strong(format!("Planets ({})", form.planets.len()));
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("+ Add Planet").clicked() {
                form.add_planet();
            }
        });
    });

    let mut remove = None;
    for (i, planet) in form.planets.iter_mut().enumerate() {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.strong(format!("#{}", i + 1));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("Remove").clicked() {
                        remove = Some(i);
                    }
                });
            });
            egui::Grid::new(("planet_row", i))
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.strong("Name");
                    ui.text_edit_singleline(&mut planet.name);
                    ui.end_row();

                    ui.strong("Type");
                    egui::ComboBox::from_id_salt(("planet_type", i))
                        .selected_text(planet.planet_type.label())
                        .show_ui(ui, |ui| {
                            for kind in PlanetType::ALL {
                                let label = kind.to_string();
                                ui.selectable_value(&mut planet.planet_type, kind, label);
                            }
                        });
                    ui.end_row();

                    ui.strong("Orbit (AU)");
                    ui.text_edit_singleline(&mut planet.semi_major_au);
                    ui.end_row();

                    ui.strong("Notes");
                    ui.text_edit_singleline(&mut planet.notes);
                    ui.end_row();
                });
        });
    }
    if let Some(i) = remove {
        form.remove_planet(i);
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui.button("Save").clicked() {
            action = Some(PanelAction::Save);
        }
        if ui.button("Cancel").clicked() {
            action = Some(PanelAction::Cancel);
        }
    });

    action
}
