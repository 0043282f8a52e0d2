//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Lane, star and halo pipelines
//! - The egui overlay
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use starmap_math::{Mat4, Viewport};
use starmap_render::{
    context::{ContextError, RenderContext},
    pipeline::{HaloInstance, HaloPipeline, LanePipeline, LaneUniforms, PointUniforms, StarPipeline},
    StarGeometry,
};
use super::ui::OverlayFrame;
use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU setup failed
    Context(ContextError),
    /// Surface was lost or outdated (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Context(e) => write!(f, "GPU setup failed: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Context(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    lane_pipeline: LanePipeline,
    star_pipeline: StarPipeline,
    halo_pipeline: HaloPipeline,
    egui_renderer: egui_wgpu::Renderer,
    render_config: RenderingConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let format = context.config.format;

        let lane_pipeline = LanePipeline::new(&context.device, format);
        let star_pipeline = StarPipeline::new(&context.device, format);
        let halo_pipeline = HaloPipeline::new(&context.device, format);
        let egui_renderer = egui_wgpu::Renderer::new(&context.device, format, None, 1, false);

        Ok(Self {
            context,
            lane_pipeline,
            star_pipeline,
            halo_pipeline,
            egui_renderer,
            render_config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
    }

    /// Current surface as a picking viewport
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.context.size.width as f32, self.context.size.height as f32)
    }

    /// Upload the lane network
    pub fn upload_lanes(&mut self, geometry: &StarGeometry) {
        self.lane_pipeline
            .upload(&self.context.device, &geometry.lane_vertices);
        log::debug!("Uploaded {} lanes", geometry.lane_count());
    }

    /// Upload the star sprites
    pub fn upload_stars(&mut self, geometry: &StarGeometry) {
        self.star_pipeline
            .upload(&self.context.device, &geometry.stars);
        log::debug!("Uploaded {} stars", geometry.star_count());
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        mvp: Mat4,
        halos: &[HaloInstance],
        overlay: &OverlayFrame,
    ) -> Result<(), RenderError> {
        let queue = &self.context.queue;
        let device = &self.context.device;

        // Update uniforms
        self.lane_pipeline.update_uniforms(
            queue,
            &LaneUniforms {
                mvp,
                color: self.render_config.lane_color,
            },
        );
        let point_uniforms = PointUniforms {
            mvp,
            viewport: [self.context.size.width as f32, self.context.size.height as f32],
            _padding: [0.0; 2],
        };
        self.star_pipeline.update_uniforms(queue, &point_uniforms);
        self.halo_pipeline.update_uniforms(queue, &point_uniforms);
        self.halo_pipeline.set_halos(queue, halos);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Create command encoder
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        // Overlay textures and buffers
        for (id, delta) in &overlay.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, delta);
        }
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.context.config.width, self.context.config.height],
            pixels_per_point: overlay.pixels_per_point,
        };
        let overlay_commands = self.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &overlay.paint_jobs,
            &screen,
        );

        // Render pass: lanes, stars, halos, then the overlay
        let bg = &self.render_config.background_color;
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Map Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color {
                                r: bg[0] as f64,
                                g: bg[1] as f64,
                                b: bg[2] as f64,
                                a: bg[3] as f64,
                            }),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();

            self.lane_pipeline.draw(&mut pass);
            self.star_pipeline.draw(&mut pass);
            self.halo_pipeline.draw(&mut pass);
            self.egui_renderer
                .render(&mut pass, &overlay.paint_jobs, &screen);
        }

        // Submit
        queue.submit(
            overlay_commands
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        output.present();

        for id in &overlay.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        Ok(())
    }

    /// Reconfigure the surface after it was lost
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }
}
