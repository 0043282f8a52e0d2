//! Star map mathematics
//!
//! This crate provides the small amount of linear algebra the star map viewer needs.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix for camera transforms
//!
//! ## Projection
//!
//! - [`project_to_screen`] - world point to pixel coordinates
//! - [`unproject_to_plane_z0`] - pixel to world point on the map plane
//! - [`distance_point_to_segment`] - 2D point/segment distance for lane picking

mod vec3;
pub mod mat4;
pub mod projection;

pub use vec3::Vec3;
pub use mat4::Mat4;
pub use projection::{
    Viewport, ScreenPoint, project_to_screen, unproject_to_plane_z0, distance_point_to_segment,
};
