//! Renderable geometry - bridges Galaxy to GPU buffers
//!
//! Converts the runtime galaxy into lane vertices and star instances ready
//! for upload.

use starmap_core::Galaxy;
use starmap_math::Vec3;

use crate::pipeline::{HaloInstance, LaneVertex, StarInstance};

/// Default star sprite size in pixels
pub const DEFAULT_STAR_SIZE: f32 = 6.0;

/// Default star color
pub const DEFAULT_STAR_COLOR: [f32; 3] = [1.0, 0.92, 0.6];

/// GPU-ready geometry collected from a galaxy
#[derive(Clone, Debug, Default)]
pub struct StarGeometry {
    /// Two vertices per drawable lane
    pub lane_vertices: Vec<LaneVertex>,
    /// One sprite per positioned system
    pub stars: Vec<StarInstance>,
}

impl StarGeometry {
    /// Collect geometry from all positioned systems and drawable lanes
    pub fn from_galaxy(galaxy: &Galaxy, star_size: f32, star_color: [f32; 3]) -> Self {
        Self {
            lane_vertices: Self::lanes_from_galaxy(galaxy),
            stars: Self::stars_from_galaxy(galaxy, star_size, star_color),
        }
    }

    /// Lane vertices only
    pub fn lanes_from_galaxy(galaxy: &Galaxy) -> Vec<LaneVertex> {
        let segments = galaxy.lane_segments();
        let mut vertices = Vec::with_capacity(segments.len() * 2);
        for (_, a, b) in segments {
            vertices.push(LaneVertex { position: a.to_array() });
            vertices.push(LaneVertex { position: b.to_array() });
        }
        vertices
    }

    /// Star instances only
    pub fn stars_from_galaxy(galaxy: &Galaxy, star_size: f32, star_color: [f32; 3]) -> Vec<StarInstance> {
        let [r, g, b] = star_color;
        galaxy
            .star_positions()
            .into_iter()
            .map(|p| StarInstance {
                position: p.to_array(),
                size: star_size,
                color: [r, g, b, 1.0],
            })
            .collect()
    }

    pub fn lane_count(&self) -> usize {
        self.lane_vertices.len() / 2
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }
}

/// Halos for the hovered and selected systems, hover first
pub fn collect_halos(hovered: Option<Vec3>, selected: Option<Vec3>, time: f32) -> Vec<HaloInstance> {
    let mut halos = Vec::with_capacity(2);
    if let Some(p) = hovered {
        halos.push(HaloInstance::hover(p.to_array(), time));
    }
    if let Some(p) = selected {
        halos.push(HaloInstance::selected(p.to_array(), time));
    }
    halos
}
