//! Render pipeline for hover and selection halos
//!
//! Halos are blended additively so they brighten whatever lies under them.

use super::types::{HaloInstance, PointUniforms, MAX_HALOS};
use super::{create_sprite_pipeline, UniformBinding, QUAD_VERTEX_COUNT};

/// `src * alpha + dst`
const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Instanced sprite pipeline for animated halos
pub struct HaloPipeline {
    pipeline: wgpu::RenderPipeline,
    uniforms: UniformBinding,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
}

impl HaloPipeline {
    /// Create a new halo pipeline
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let uniforms = UniformBinding::new(device, "Halo", &PointUniforms::default());
        let pipeline = create_sprite_pipeline(
            device,
            "Halo",
            include_str!("../shaders/halo.wgsl"),
            &uniforms.layout,
            Self::instance_buffer_layout(),
            surface_format,
            ADDITIVE,
        );

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Halo Instance Buffer"),
            size: (MAX_HALOS * std::mem::size_of::<HaloInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            uniforms,
            instance_buffer,
            instance_count: 0,
        }
    }

    /// Get the instance buffer layout for HaloInstance
    fn instance_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<HaloInstance>() as wgpu::BufferAddress,
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
                // glow: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 16,
                    shader_location: 2,
                },
                // time: f32
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 28,
                    shader_location: 3,
                },
                // core: vec4<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 32,
                    shader_location: 4,
                },
            ],
        }
    }

    /// Set this frame's halos; extras beyond [`MAX_HALOS`] are dropped
    pub fn set_halos(&mut self, queue: &wgpu::Queue, halos: &[HaloInstance]) {
        let halos = &halos[..halos.len().min(MAX_HALOS)];
        self.instance_count = halos.len() as u32;
        if !halos.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(halos));
        }
    }

    /// Update uniforms
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &PointUniforms) {
        self.uniforms.write(queue, uniforms);
    }

    /// Record the halo draw into an open render pass
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniforms.bind_group, &[]);
        pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        pass.draw(0..QUAD_VERTEX_COUNT, 0..self.instance_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout_matches_struct() {
        let layout = HaloPipeline::instance_buffer_layout();
        assert_eq!(layout.array_stride, 48);
        assert_eq!(layout.attributes.len(), 5);
        assert_eq!(layout.attributes[4].offset, 32);
    }

    #[test]
    fn test_additive_blend() {
        assert_eq!(ADDITIVE.color.dst_factor, wgpu::BlendFactor::One);
    }
}
