//! Star map rendering library
//!
//! This crate provides the wgpu-based pipelines that draw the map, plus the
//! camera and screen-space picking that depend on the same projection.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::OrbitCamera`] - Orbit camera producing the map MVP
//! - [`pipeline::LanePipeline`] - Lane network as a line list
//! - [`pipeline::StarPipeline`] - Stars as soft round sprites
//! - [`pipeline::HaloPipeline`] - Animated hover/selection halos
//! - [`renderable::StarGeometry`] - Converts a Galaxy to GPU buffers
//! - [`picking`] - Nearest system / lane under the cursor

pub mod context;
pub mod camera;
pub mod picking;
pub mod pipeline;
pub mod renderable;

pub use camera::OrbitCamera;
pub use context::{ContextError, RenderContext};
pub use picking::{find_nearest_lane, find_nearest_system, LANE_PICK_RADIUS, SYSTEM_PICK_RADIUS};
pub use renderable::{collect_halos, StarGeometry, DEFAULT_STAR_COLOR, DEFAULT_STAR_SIZE};

// Re-export core types for convenience
pub use starmap_core::{Galaxy, LaneKey};
pub use starmap_math::{Mat4, Vec3, Viewport};
