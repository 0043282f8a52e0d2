//! egui integration system
//!
//! Feeds winit events to egui, runs the overlay each frame and hands the
//! tessellated output to the render system.

use winit::{event::WindowEvent, window::Window};

use crate::editor::Editor;
use crate::ui::{draw_overlay, install_style};

/// One frame of tessellated overlay output
pub struct OverlayFrame {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

/// Owns the egui context and its winit bridge
pub struct UiSystem {
    ctx: egui::Context,
    state: egui_winit::State,
}

impl UiSystem {
    pub fn new(window: &Window) -> Self {
        let ctx = egui::Context::default();
        install_style(&ctx);
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        Self { ctx, state }
    }

    /// Pass an event to egui
    ///
    /// Returns true when egui consumed it and the map should ignore it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Pointer is over an egui area or being dragged by one
    pub fn wants_pointer(&self) -> bool {
        self.ctx.wants_pointer_input() || self.ctx.is_pointer_over_area()
    }

    /// Run the overlay for one frame
    ///
    /// `cursor` is in physical pixels.
    pub fn run(&mut self, window: &Window, editor: &mut Editor, cursor: Option<(f32, f32)>) -> OverlayFrame {
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, |ctx| {
            let ppp = ctx.pixels_per_point();
            let cursor = cursor.map(|(x, y)| egui::pos2(x / ppp, y / ppp));
            draw_overlay(ctx, editor, cursor);
        });
        self.state.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self.ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        OverlayFrame {
            paint_jobs,
            textures_delta: full_output.textures_delta,
            pixels_per_point: full_output.pixels_per_point,
        }
    }
}
