//! Core types for the star map
//!
//! This crate provides everything the viewer knows about the map itself,
//! independent of windowing and rendering:
//!
//! - [`StarMapDocument`] - Loadable/saveable `systems.json` document
//! - [`Galaxy`] - Runtime systems, positions and lanes with editing operations
//! - [`LaneKey`] - Canonical undirected lane
//! - [`SystemDetails`] - Generated star and planets for a system
//! - [`DetailCache`] - Persistent detail storage
//! - [`HologramLayout`] - System preview, paintable or exportable as SVG
//! - [`StarMapValidator`] - Data checks run at load time
//! - [`AccessGate`] - Edit-mode password lock

mod access;
mod detail_store;
mod details;
mod document;
mod error;
mod galaxy;
mod hologram;
mod lane;
mod validator;

pub use access::AccessGate;
pub use detail_store::{detail_key, file_safe, DetailCache, DetailStore, FileDetailStore, MemoryDetailStore};
pub use details::{
    generate_details, round2, DetailEdit, Planet, PlanetDraft, PlanetType, SeededRng, StarInfo,
    StarKind, SystemDetails, SYSGEN_VERSION,
};
pub use document::{Coords, ImageDims, ImageSize, Pixel, StarMapDocument, SystemRecord};
pub use error::{DetailStoreError, StarMapError};
pub use galaxy::{DirtyFlags, Galaxy, LaneEdit, SystemKey, WorldFrame, WORLD_SCALE};
pub use hologram::{HologramBody, HologramLayout, HOLOGRAM_SIZE};
pub use lane::LaneKey;
pub use validator::{StarMapValidator, ValidationError};

// Re-export commonly used math types for convenience
pub use starmap_math::Vec3;
