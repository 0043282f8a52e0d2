//! Rendering pipeline components
//!
//! Lanes, stars and halos each get their own pipeline. All three draw into
//! one render pass owned by the caller, in that order.

pub mod types;
pub mod lane_pipeline;
pub mod star_pipeline;
pub mod halo_pipeline;

use wgpu::util::DeviceExt;

// Re-export types
pub use types::{HaloInstance, LaneUniforms, LaneVertex, PointUniforms, StarInstance, MAX_HALOS};

// Re-export pipelines
pub use lane_pipeline::LanePipeline;
pub use star_pipeline::StarPipeline;
pub use halo_pipeline::HaloPipeline;

/// Vertices per sprite quad (two triangles)
pub const QUAD_VERTEX_COUNT: u32 = 6;

/// Uniform buffer with its layout and bind group at group 0, binding 0
pub(crate) struct UniformBinding {
    pub layout: wgpu::BindGroupLayout,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl UniformBinding {
    pub fn new<T: bytemuck::Pod>(device: &wgpu::Device, label: &str, initial: &T) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{} Bind Group Layout", label)),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Uniform Buffer", label)),
            contents: bytemuck::bytes_of(initial),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Bind Group", label)),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self { layout, buffer, bind_group }
    }

    pub fn write<T: bytemuck::Pod>(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }
}

/// Pipeline drawing screen-aligned sprite quads from per-instance data
pub(crate) fn create_sprite_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader_source: &str,
    bind_group_layout: &wgpu::BindGroupLayout,
    instance_layout: wgpu::VertexBufferLayout<'_>,
    surface_format: wgpu::TextureFormat,
    blend: wgpu::BlendState,
) -> wgpu::RenderPipeline {
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{} Pipeline Layout", label)),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{} Shader", label)),
        source: wgpu::ShaderSource::Wgsl(shader_source.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{} Pipeline", label)),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[instance_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    const SHADERS: [(&str, &str); 3] = [
        ("lanes", include_str!("../shaders/lanes.wgsl")),
        ("stars", include_str!("../shaders/stars.wgsl")),
        ("halo", include_str!("../shaders/halo.wgsl")),
    ];

    /// Edges of every `smoothstep` call whose first two arguments are literals
    fn literal_smoothstep_edges(source: &str) -> Vec<(f32, f32)> {
        source
            .split("smoothstep(")
            .skip(1)
            .filter_map(|call| {
                let mut args = call.splitn(3, ',');
                let e0: f32 = args.next()?.trim().parse().ok()?;
                let e1: f32 = args.next()?.trim().parse().ok()?;
                Some((e0, e1))
            })
            .collect()
    }

    #[test]
    fn test_smoothstep_edges_ascend() {
        // WGSL leaves smoothstep undefined for e0 >= e1
        for (name, source) in SHADERS {
            for (e0, e1) in literal_smoothstep_edges(source) {
                assert!(e0 < e1, "{}.wgsl: smoothstep({}, {}, ..)", name, e0, e1);
            }
        }
    }

    #[test]
    fn test_star_sprite_alpha_ramp() {
        let source = SHADERS[1].1;
        assert_eq!(literal_smoothstep_edges(source), vec![(0.8, 1.0)]);
        assert!(source.contains("1.0 - smoothstep(0.8, 1.0, 1.0 - d)"));
    }
}
