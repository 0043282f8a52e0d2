//! Screen-space projection helpers
//!
//! Shared by hover/picking and by system placement. Screen coordinates are in
//! physical pixels with the origin at the top-left corner.

use crate::mat4::{self, Mat4};
use crate::Vec3;

/// Size of the drawable surface in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width / height, guarded against a zero-height surface
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// A projected point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    /// Pixel x (rounded)
    pub x: f32,
    /// Pixel y (rounded, grows downward)
    pub y: f32,
    /// Normalized device depth
    pub depth: f32,
}

impl ScreenPoint {
    /// Squared pixel distance to a cursor position
    pub fn distance_squared_to(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}

/// Project a world point to pixel coordinates
///
/// Returns `None` when the clip-space w is exactly zero.
pub fn project_to_screen(p: Vec3, mvp: Mat4, viewport: Viewport) -> Option<ScreenPoint> {
    let [cx, cy, cz, cw] = mat4::transform(mvp, p.extend(1.0));
    if cw == 0.0 {
        return None;
    }
    let ndc_x = cx / cw;
    let ndc_y = cy / cw;
    Some(ScreenPoint {
        x: ((ndc_x * 0.5 + 0.5) * viewport.width).round(),
        y: ((-ndc_y * 0.5 + 0.5) * viewport.height).round(),
        depth: cz / cw,
    })
}

/// Cast a ray through a pixel and intersect it with the z = 0 plane
///
/// Returns `None` if the matrix cannot be inverted or the ray runs parallel
/// to the plane.
pub fn unproject_to_plane_z0(x: f32, y: f32, mvp: Mat4, viewport: Viewport) -> Option<Vec3> {
    let inv = mat4::invert(mvp)?;
    let ndc_x = (x / viewport.width) * 2.0 - 1.0;
    let ndc_y = -((y / viewport.height) * 2.0 - 1.0);

    let near = perspective_divide(mat4::transform(inv, [ndc_x, ndc_y, -1.0, 1.0]));
    let far = perspective_divide(mat4::transform(inv, [ndc_x, ndc_y, 1.0, 1.0]));

    let dir = far - near;
    if dir.z.abs() < 1e-6 {
        return None;
    }
    let t = -near.z / dir.z;
    Some(Vec3::new(near.x + dir.x * t, near.y + dir.y * t, 0.0))
}

fn perspective_divide(p: [f32; 4]) -> Vec3 {
    Vec3::new(p[0] / p[3], p[1] / p[3], p[2] / p[3])
}

/// Distance from point `p` to the segment `a`-`b` in 2D
///
/// A degenerate segment falls back to a unit divisor so the result is the
/// distance to `a`.
pub fn distance_point_to_segment(p: [f32; 2], a: [f32; 2], b: [f32; 2]) -> f32 {
    let ab = [b[0] - a[0], b[1] - a[1]];
    let ap = [p[0] - a[0], p[1] - a[1]];
    let mut len2 = ab[0] * ab[0] + ab[1] * ab[1];
    if len2 == 0.0 {
        len2 = 1.0;
    }
    let t = ((ap[0] * ab[0] + ap[1] * ab[1]) / len2).clamp(0.0, 1.0);
    let closest = [a[0] + t * ab[0], a[1] + t * ab[1]];
    (p[0] - closest[0]).hypot(p[1] - closest[1])
}
