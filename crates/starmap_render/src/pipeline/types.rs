//! GPU-compatible data types for the map pipelines
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use starmap_math::{mat4, Mat4};

/// A lane endpoint
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LaneVertex {
    pub position: [f32; 3],
}

/// Uniforms for the lane pass
/// Layout: 80 bytes total (must match lanes.wgsl LaneUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LaneUniforms {
    /// Model-view-projection matrix (64 bytes)
    pub mvp: Mat4,
    /// RGBA line color (16 bytes)
    pub color: [f32; 4],
}

impl Default for LaneUniforms {
    fn default() -> Self {
        Self {
            mvp: mat4::IDENTITY,
            color: [1.0, 0.85, 0.35, 1.0],
        }
    }
}

/// Uniforms shared by the point-sprite passes (stars and halos)
/// Layout: 80 bytes total (must match stars.wgsl / halo.wgsl PointUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PointUniforms {
    /// Model-view-projection matrix (64 bytes)
    pub mvp: Mat4,
    /// Surface size in pixels
    pub viewport: [f32; 2],
    /// Padding for 16-byte alignment
    pub _padding: [f32; 2],
}

impl Default for PointUniforms {
    fn default() -> Self {
        Self {
            mvp: mat4::IDENTITY,
            viewport: [1.0, 1.0],
            _padding: [0.0; 2],
        }
    }
}

/// One star sprite
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct StarInstance {
    /// World position
    pub position: [f32; 3],
    /// Sprite size in pixels
    pub size: f32,
    /// RGB color + alpha multiplier
    pub color: [f32; 4],
}

/// One animated halo sprite
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct HaloInstance {
    /// World position
    pub position: [f32; 3],
    /// Sprite size in pixels
    pub size: f32,
    /// Outer glow color
    pub glow: [f32; 3],
    /// Animation time in seconds
    pub time: f32,
    /// Core color (alpha unused)
    pub core: [f32; 4],
}

impl HaloInstance {
    /// Cyan halo under the cursor
    pub fn hover(position: [f32; 3], time: f32) -> Self {
        Self {
            position,
            size: 34.0,
            glow: [0.35, 0.95, 1.0],
            time,
            core: [1.0, 0.95, 0.5, 1.0],
        }
    }

    /// Gold halo around the selection, turning slower
    pub fn selected(position: [f32; 3], time: f32) -> Self {
        Self {
            position,
            size: 42.0,
            glow: [1.0, 0.85, 0.35],
            time: time * 0.7,
            core: [1.0, 0.98, 0.7, 1.0],
        }
    }
}

/// Most halos drawn in one frame (hover + selection)
pub const MAX_HALOS: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes() {
        assert_eq!(std::mem::size_of::<LaneUniforms>(), 80);
        assert_eq!(std::mem::size_of::<PointUniforms>(), 80);
    }

    #[test]
    fn test_instance_sizes() {
        assert_eq!(std::mem::size_of::<LaneVertex>(), 12);
        assert_eq!(std::mem::size_of::<StarInstance>(), 32);
        assert_eq!(std::mem::size_of::<HaloInstance>(), 48);
    }

    #[test]
    fn test_selected_halo_is_larger_and_slower() {
        let hover = HaloInstance::hover([0.0; 3], 2.0);
        let selected = HaloInstance::selected([0.0; 3], 2.0);
        assert!(selected.size > hover.size);
        assert!((selected.time - 1.4).abs() < 1e-6);
    }
}
