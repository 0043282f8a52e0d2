//! Editor state machine
//!
//! Owns the galaxy and detail cache and turns clicks, keys and UI buttons into
//! edits. Nothing here touches the window or the GPU; callers read the dirty
//! flags on the galaxy to know when to rebuild geometry.

use std::fs;
use std::path::{Path, PathBuf};

use starmap_core::{file_safe, AccessGate, DetailCache, Galaxy, HologramLayout, LaneEdit, SystemDetails};
use starmap_input::Click;
use starmap_math::{unproject_to_plane_z0, Mat4, Viewport};
use starmap_render::{find_nearest_lane, find_nearest_system, LANE_PICK_RADIUS, SYSTEM_PICK_RADIUS};
use winit::event::MouseButton;

use super::panel::{PanelState, PanelView};
use super::prompt::{EditMode, Prompt, PromptKind};
use crate::input::EditorAction;

/// Camera state needed to pick under the cursor
#[derive(Debug, Clone, Copy)]
pub struct PickContext {
    pub mvp: Mat4,
    pub viewport: Viewport,
    pub system_radius: f32,
    pub lane_radius: f32,
}

impl PickContext {
    pub fn new(mvp: Mat4, viewport: Viewport) -> Self {
        Self {
            mvp,
            viewport,
            system_radius: SYSTEM_PICK_RADIUS,
            lane_radius: LANE_PICK_RADIUS,
        }
    }

    /// Builder: set the pick radii in pixels
    pub fn with_radii(mut self, system_radius: f32, lane_radius: f32) -> Self {
        self.system_radius = system_radius;
        self.lane_radius = lane_radius;
        self
    }

    fn nearest_system(&self, galaxy: &Galaxy, x: f32, y: f32) -> Option<String> {
        find_nearest_system(galaxy, (x, y), self.mvp, self.viewport, self.system_radius)
    }
}

/// Star map editor
pub struct Editor {
    galaxy: Galaxy,
    details: DetailCache,
    gate: AccessGate,
    export_dir: PathBuf,

    lane_mode: bool,
    add_mode: bool,
    /// First endpoint of a lane being drawn
    pick_a: Option<String>,
    selected: Option<String>,
    hovered: Option<String>,

    prompt: Option<Prompt>,
    panel: Option<PanelState>,
    /// Last user-facing outcome, shown in the HUD
    status: Option<String>,
}

impl Editor {
    pub fn new(galaxy: Galaxy, details: DetailCache, gate: AccessGate, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            galaxy,
            details,
            gate,
            export_dir: export_dir.into(),

            lane_mode: false,
            add_mode: false,
            pick_a: None,
            selected: None,
            hovered: None,

            prompt: None,
            panel: None,
            status: None,
        }
    }

    pub fn galaxy(&self) -> &Galaxy {
        &self.galaxy
    }

    pub fn galaxy_mut(&mut self) -> &mut Galaxy {
        &mut self.galaxy
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn lane_mode(&self) -> bool {
        self.lane_mode
    }

    pub fn add_mode(&self) -> bool {
        self.add_mode
    }

    pub fn pick_a(&self) -> Option<&str> {
        self.pick_a.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn set_hovered(&mut self, id: Option<String>) {
        self.hovered = id;
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn prompt_mut(&mut self) -> Option<&mut Prompt> {
        self.prompt.as_mut()
    }

    pub fn panel(&self) -> Option<&PanelState> {
        self.panel.as_ref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut PanelState> {
        self.panel.as_mut()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Title for a system: its name, else its id
    pub fn system_title(&self, id: &str) -> String {
        self.galaxy
            .system(id)
            .map(|s| s.display_name().to_string())
            .unwrap_or_else(|| id.to_string())
    }

    // --- modes ---

    /// Toggle lane editing; entering it turns add mode off
    pub fn toggle_lane_mode(&mut self) {
        if self.lane_mode {
            self.set_mode(EditMode::Lanes, false);
        } else {
            self.enter_mode(EditMode::Lanes);
        }
    }

    /// Toggle system placement; entering it turns lane mode off
    pub fn toggle_add_mode(&mut self) {
        if self.add_mode {
            self.set_mode(EditMode::AddSystem, false);
        } else {
            self.enter_mode(EditMode::AddSystem);
        }
    }

    /// Enter a mode, asking for the password first when locked
    pub fn enter_mode(&mut self, mode: EditMode) {
        if self.gate.is_unlocked() {
            self.set_mode(mode, true);
        } else {
            self.prompt = Some(Prompt::password(mode));
        }
    }

    fn set_mode(&mut self, mode: EditMode, on: bool) {
        match mode {
            EditMode::Lanes => {
                self.lane_mode = on;
                if on {
                    self.add_mode = false;
                } else {
                    self.pick_a = None;
                }
                log::info!("Lane editing: {}", if on { "ON" } else { "OFF" });
            }
            EditMode::AddSystem => {
                self.add_mode = on;
                if on {
                    self.lane_mode = false;
                    self.pick_a = None;
                }
                log::info!("Add system mode: {}", if on { "ON" } else { "OFF" });
            }
        }
    }

    /// Lock editing again and leave both modes
    pub fn lock(&mut self) {
        self.gate.lock();
        if self.gate.is_gated() {
            self.lane_mode = false;
            self.add_mode = false;
            self.pick_a = None;
        }
    }

    // --- keyboard ---

    /// Apply a mapped key action
    ///
    /// Window-level actions (fullscreen, camera reset) are not the editor's
    /// concern and are ignored here. Returns false only for `Dismiss` with
    /// nothing left to close.
    pub fn apply_action(&mut self, action: EditorAction) -> bool {
        match action {
            EditorAction::ToggleLaneMode => self.toggle_lane_mode(),
            EditorAction::ToggleAddMode => self.toggle_add_mode(),
            EditorAction::OpenPanel => self.open_selected_panel(),
            EditorAction::ClearLanes if self.lane_mode => self.galaxy.clear_lanes(),
            EditorAction::RestoreLanes if self.lane_mode => self.galaxy.restore_lanes(),
            EditorAction::ExportMap if self.lane_mode => {
                self.export_map();
            }
            EditorAction::Dismiss => return self.dismiss(),
            _ => {}
        }
        true
    }

    /// Close the prompt, else the panel. False when nothing was open.
    pub fn dismiss(&mut self) -> bool {
        if self.prompt.is_some() {
            self.cancel_prompt();
            true
        } else if self.panel.is_some() {
            self.close_panel();
            true
        } else {
            false
        }
    }

    // --- mouse ---

    /// Handle a click on the map
    ///
    /// The second click of a double click runs single-click handling first,
    /// then the double-click action. Clicks are ignored while a prompt is open.
    pub fn handle_click(&mut self, click: Click, pick: &PickContext) {
        if self.prompt.is_some() {
            return;
        }
        match click.button {
            MouseButton::Left => {
                self.click(click.x, click.y, pick);
                if click.double {
                    self.double_click(click.x, click.y, pick);
                }
            }
            MouseButton::Middle if self.lane_mode => self.delete_lane_near(click.x, click.y, pick),
            _ => {}
        }
    }

    fn click(&mut self, x: f32, y: f32, pick: &PickContext) {
        let nearest = pick.nearest_system(&self.galaxy, x, y);

        if self.lane_mode {
            let Some(id) = nearest else {
                return;
            };
            match self.pick_a.take() {
                None => self.pick_a = Some(id),
                Some(a) => match self.galaxy.toggle_lane(&a, &id) {
                    Some(LaneEdit::Added(lane)) => self.status = Some(format!("Added lane {}", lane)),
                    Some(LaneEdit::Removed(lane)) => self.status = Some(format!("Removed lane {}", lane)),
                    None => log::debug!("Ignored lane {} -> {}", a, id),
                },
            }
            return;
        }

        if self.add_mode {
            if nearest.is_some() {
                self.selected = nearest;
                return;
            }
            let Some(world) = unproject_to_plane_z0(x, y, pick.mvp, pick.viewport) else {
                return;
            };
            self.prompt = Some(Prompt::new_system(world, self.galaxy.next_default_name()));
            return;
        }

        if nearest.is_some() {
            self.selected = nearest;
        }
    }

    fn double_click(&mut self, x: f32, y: f32, pick: &PickContext) {
        let Some(id) = pick.nearest_system(&self.galaxy, x, y) else {
            return;
        };
        if self.selected.as_deref() == Some(id.as_str()) {
            self.open_panel(&id);
            return;
        }
        let current = self.system_title(&id);
        self.prompt = Some(Prompt::rename(id, current));
    }

    fn delete_lane_near(&mut self, x: f32, y: f32, pick: &PickContext) {
        match find_nearest_lane(&self.galaxy, (x, y), pick.mvp, pick.viewport, pick.lane_radius) {
            Some(lane) => {
                self.galaxy.remove_lane(&lane);
                self.status = Some(format!("Deleted lane {}", lane));
            }
            None => log::info!("No lane near cursor to delete"),
        }
    }

    // --- prompts ---

    /// Act on the open prompt's input
    pub fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        match prompt.kind {
            PromptKind::NewSystem { world } => {
                let id = self.galaxy.add_system_at(world, &prompt.input);
                self.selected = Some(id.clone());
                let details = self.details.ensure(&id);
                let name = self.system_title(&id);
                self.panel = Some(PanelState::edit(id, &name, details));
            }
            PromptKind::Rename { id } => {
                self.galaxy.rename(&id, &prompt.input);
            }
            PromptKind::Password { then } => {
                if self.gate.unlock(&prompt.input) {
                    self.set_mode(then, true);
                } else {
                    self.prompt = Some(Prompt {
                        kind: PromptKind::Password { then },
                        input: String::new(),
                        error: Some("Wrong password".to_string()),
                    });
                }
            }
        }
    }

    /// Close the prompt without acting on it
    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    // --- panel ---

    /// Open the panel in read mode for a system, generating details if needed
    pub fn open_panel(&mut self, id: &str) {
        let details = self.details.ensure(id);
        self.panel = Some(PanelState::read(id, details));
    }

    fn open_selected_panel(&mut self) {
        if let Some(id) = self.selected.clone() {
            self.open_panel(&id);
        }
    }

    /// "Generate/Load": show the selection's details
    pub fn panel_generate(&mut self) {
        self.open_selected_panel();
    }

    /// "Edit": open the selection's details as a form
    pub fn panel_edit(&mut self) {
        let Some(id) = self.selected.clone() else {
            return;
        };
        let details = self.details.ensure(&id);
        let name = self
            .galaxy
            .system(&id)
            .and_then(|s| s.name.clone())
            .unwrap_or_default();
        self.panel = Some(PanelState::edit(id, &name, details));
    }

    /// Save the form: store the merged details and apply the name
    pub fn panel_save(&mut self) {
        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        let PanelView::Edit(form) = std::mem::replace(&mut panel.view, PanelView::Read) else {
            return;
        };
        let id = panel.system_id.clone();
        let name = form.trimmed_name().map(str::to_string);

        let existing = self.details.cached(&id);
        let details = form.apply(&id, existing);
        self.details.store(&id, &details);
        panel.details = details;

        if let Some(name) = name {
            self.galaxy.rename(&id, &name);
        }
        log::info!("Saved details for {}", id);
    }

    /// Leave the form without saving
    pub fn panel_cancel(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            panel.view = PanelView::Read;
        }
    }

    pub fn close_panel(&mut self) {
        self.panel = None;
    }

    /// Details shown for a system in the panel, if that panel is open
    pub fn panel_details(&self) -> Option<&SystemDetails> {
        self.panel.as_ref().map(|p| &p.details)
    }

    // --- exports ---

    /// Write the selection's stored details to the export directory
    pub fn export_details(&mut self) -> Option<PathBuf> {
        let id = self.selected.clone()?;
        let path = self.details.export(&id, &self.export_dir);
        self.status = Some(match &path {
            Some(p) => format!("Exported {}", p.display()),
            None => format!("No stored details for {}", id),
        });
        path
    }

    /// Write the open panel's hologram as `system_{id}_hologram.svg`, with the
    /// id made filename-safe
    pub fn export_hologram(&mut self) -> Option<PathBuf> {
        let panel = self.panel.as_ref()?;
        let id = panel.system_id.clone();
        let svg = HologramLayout::from_details(&panel.details).to_svg(&self.system_title(&id));
        let path = self.export_dir.join(format!("system_{}_hologram.svg", file_safe(&id)));
        match fs::write(&path, svg) {
            Ok(()) => {
                log::info!("Exported hologram for {} to {}", id, path.display());
                self.status = Some(format!("Exported {}", path.display()));
                Some(path)
            }
            Err(e) => {
                log::warn!("Failed to export hologram for {}: {}", id, e);
                self.status = Some(format!("Hologram export failed: {}", e));
                None
            }
        }
    }

    /// Write the current map as `systems.json` in the export directory
    pub fn export_map(&mut self) -> Option<PathBuf> {
        let doc = self.galaxy.to_document();
        let path = self.export_dir.join("systems.json");
        match doc.save(&path) {
            Ok(()) => {
                log::info!(
                    "Exported {} lanes, {} systems to {}",
                    doc.lanes.len(),
                    doc.systems.len(),
                    path.display()
                );
                self.status = Some(format!("Exported {}", path.display()));
                Some(path)
            }
            Err(e) => {
                log::warn!("Failed to export map: {}", e);
                self.status = Some(format!("Map export failed: {}", e));
                None
            }
        }
    }
}
