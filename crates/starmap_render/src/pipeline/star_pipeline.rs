//! Render pipeline for star sprites
//!
//! wgpu has no point size, so each star is an instanced quad expanded in the
//! vertex shader.

use wgpu::util::DeviceExt;

use super::types::{PointUniforms, StarInstance};
use super::{create_sprite_pipeline, UniformBinding, QUAD_VERTEX_COUNT};

/// Instanced sprite pipeline for stars
pub struct StarPipeline {
    pipeline: wgpu::RenderPipeline,
    uniforms: UniformBinding,
    instance_buffer: Option<wgpu::Buffer>,
    instance_count: u32,
}

impl StarPipeline {
    /// Create a new star pipeline
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let uniforms = UniformBinding::new(device, "Star", &PointUniforms::default());
        let pipeline = create_sprite_pipeline(
            device,
            "Star",
            include_str!("../shaders/stars.wgsl"),
            &uniforms.layout,
            Self::instance_buffer_layout(),
            surface_format,
            wgpu::BlendState::ALPHA_BLENDING,
        );

        Self {
            pipeline,
            uniforms,
            instance_buffer: None,
            instance_count: 0,
        }
    }

    /// Get the instance buffer layout for StarInstance
    fn instance_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StarInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // size: f32
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 12,
                    shader_location: 1,
                },
                // color: vec4<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 2,
                },
            ],
        }
    }

    /// Replace the star instances
    pub fn upload(&mut self, device: &wgpu::Device, stars: &[StarInstance]) {
        self.instance_count = stars.len() as u32;
        self.instance_buffer = if stars.is_empty() {
            None
        } else {
            Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Star Instance Buffer"),
                contents: bytemuck::cast_slice(stars),
                usage: wgpu::BufferUsages::VERTEX,
            }))
        };
    }

    /// Update uniforms
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &PointUniforms) {
        self.uniforms.write(queue, uniforms);
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Record the star draw into an open render pass
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let Some(buffer) = self.instance_buffer.as_ref() else {
            return;
        };
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniforms.bind_group, &[]);
        pass.set_vertex_buffer(0, buffer.slice(..));
        pass.draw(0..QUAD_VERTEX_COUNT, 0..self.instance_count);
    }
}
