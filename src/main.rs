//! Star Map - interactive star map viewer and editor
//!
//! Shows the systems of a `systems.json` document in an orbitable 3D view,
//! with lane editing, system placement and generated system details.

use std::path::PathBuf;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use starmap::config::AppConfig;
use starmap::editor::{Editor, PickContext};
use starmap::input::{EditorAction, InputMapper};
use starmap::systems::{RenderError, RenderSystem, UiSystem, WindowSystem};
use starmap_core::{AccessGate, DetailCache, DirtyFlags, Galaxy, StarMapDocument, StarMapValidator};
use starmap_input::{CameraControl, OrbitController};
use starmap_render::{collect_halos, find_nearest_system, OrbitCamera, StarGeometry};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window_system: Option<WindowSystem>,
    render_system: Option<RenderSystem>,
    ui_system: Option<UiSystem>,
    /// Map, details and edit state
    editor: Editor,
    camera: OrbitCamera,
    controller: OrbitController,
    /// Halo animation clock
    started: Instant,
}

impl App {
    fn new(config: AppConfig, systems_path: PathBuf) -> Self {
        let doc = StarMapDocument::load_or_default(&systems_path);
        StarMapValidator::log_warnings(&doc);

        let galaxy = Galaxy::from_document(doc);
        log::info!(
            "Loaded {} systems and {} lanes from {}",
            galaxy.len(),
            galaxy.lane_count(),
            systems_path.display()
        );

        let details = DetailCache::open_or_memory(config.data.resolved_detail_dir());
        let gate = AccessGate::new(config.editor.password.clone());
        let editor = Editor::new(galaxy, details, gate, config.data.export_dir.clone());

        let camera = OrbitCamera::new()
            .with_projection(config.camera.fov, config.camera.near, config.camera.far)
            .with_distance(
                config.camera.start_distance,
                config.camera.min_distance,
                config.camera.max_distance,
            )
            .with_pitch_limit(config.camera.pitch_limit)
            .with_zoom_step(config.input.zoom_step);

        // Configure controller from config
        let controller = OrbitController::new()
            .with_orbit_sensitivity(config.input.orbit_sensitivity)
            .with_click_slop(config.input.click_slop);

        Self {
            config,
            window_system: None,
            render_system: None,
            ui_system: None,
            editor,
            camera,
            controller,
            started: Instant::now(),
        }
    }

    /// Picking state for the current camera and surface
    fn pick_context(&self) -> Option<PickContext> {
        let render = self.render_system.as_ref()?;
        let viewport = render.viewport();
        let mvp = self.camera.mvp(viewport.aspect());
        Some(
            PickContext::new(mvp, viewport)
                .with_radii(self.config.input.pick_radius, self.config.input.lane_pick_radius),
        )
    }

    fn handle_action(&mut self, action: EditorAction, event_loop: &ActiveEventLoop) {
        match action {
            EditorAction::ToggleFullscreen => {
                if let Some(window_system) = &self.window_system {
                    window_system.toggle_fullscreen();
                }
            }
            EditorAction::ResetCamera => {
                self.camera.reset();
                log::info!("Camera reset to starting orbit");
            }
            _ => {
                // Escape with nothing left to close
                if !self.editor.apply_action(action) {
                    event_loop.exit();
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window_system), Some(render), Some(ui)) = (
            &self.window_system,
            &mut self.render_system,
            &mut self.ui_system,
        ) else {
            return;
        };

        // 1. Camera input; orbiting is off while placing systems
        self.controller.set_orbit_enabled(!self.editor.add_mode());
        self.controller.update(&mut self.camera);

        let viewport = render.viewport();
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            window_system.request_redraw();
            return;
        }
        let mvp = self.camera.mvp(viewport.aspect());

        // 2. Hover, unless the pointer belongs to the overlay or a drag
        let hovered = if ui.wants_pointer() || self.controller.is_dragging() {
            None
        } else {
            self.controller.cursor().and_then(|cursor| {
                find_nearest_system(
                    self.editor.galaxy(),
                    cursor,
                    mvp,
                    viewport,
                    self.config.input.pick_radius,
                )
            })
        };
        self.editor.set_hovered(hovered);

        // 3. Rebuild GPU geometry after edits
        let dirty = self.editor.galaxy_mut().take_dirty();
        if !dirty.is_empty() {
            let galaxy = self.editor.galaxy();
            let geometry = StarGeometry::from_galaxy(
                galaxy,
                self.config.rendering.star_size,
                self.config.rendering.star_color,
            );
            if dirty.contains(DirtyFlags::STARS) {
                render.upload_stars(&geometry);
            }
            if dirty.contains(DirtyFlags::LANES) {
                render.upload_lanes(&geometry);
            }
            window_system.update_title(galaxy.len(), galaxy.lane_count());
        }

        // 4. Halos and overlay
        let galaxy = self.editor.galaxy();
        let halos = collect_halos(
            self.editor.hovered().and_then(|id| galaxy.position(id)),
            self.editor.selected().and_then(|id| galaxy.position(id)),
            self.started.elapsed().as_secs_f32(),
        );
        let overlay = ui.run(window_system.window(), &mut self.editor, self.controller.cursor());

        // 5. Render
        match render.render_frame(mvp, &halos, &overlay) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => render.reconfigure(),
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("{}", e),
        }

        // Request next frame
        window_system.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_system.is_some() {
            return;
        }

        let window_system = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window_system) => window_system,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render_system = match RenderSystem::new(
            window_system.window().clone(),
            self.config.rendering.clone(),
            self.config.window.vsync,
        ) {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let ui_system = UiSystem::new(window_system.window());

        self.window_system = Some(window_system);
        self.render_system = Some(render_system);
        self.ui_system = Some(ui_system);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        // The overlay sees every event first
        let consumed = match (&self.window_system, &mut self.ui_system) {
            (Some(window_system), Some(ui)) => ui.on_window_event(window_system.window(), &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render_system {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            // Releases always reach the controller so drags never stick
            WindowEvent::MouseInput { state: ElementState::Released, button, .. } if consumed => {
                self.controller.process_mouse_button(button, ElementState::Released);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.controller
                    .process_cursor_moved(position.x as f32, position.y as f32);
            }

            WindowEvent::CursorLeft { .. } => {
                self.controller.process_cursor_left();
            }

            _ if consumed => {}

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) =
                        InputMapper::map_keyboard(key, event.state, self.editor.lane_mode())
                    {
                        self.handle_action(action, event_loop);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(click) = self.controller.process_mouse_button(button, state) {
                    if let Some(pick) = self.pick_context() {
                        self.editor.handle_click(click, &pick);
                    }
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.controller.process_scroll(delta);
            }

            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config first so it can set the default log filter
    let config = AppConfig::load();
    let log_level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Starting Star Map");

    // First argument overrides the configured map file
    let systems_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data.systems_path.clone());

    // Create event loop
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config, systems_path);
    event_loop.run_app(&mut app)?;
    Ok(())
}
