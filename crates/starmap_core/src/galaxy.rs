//! Runtime star map
//!
//! The [`Galaxy`] owns every system and lane loaded from a [`StarMapDocument`],
//! resolves world positions, and applies the edits made in the viewer. It can
//! be turned back into a document for export at any time.

use std::collections::{BTreeSet, HashMap};

use bitflags::bitflags;
use serde_json::Map;
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use starmap_math::Vec3;

use crate::document::{Coords, ImageDims, ImageSize, StarMapDocument, SystemRecord};
use crate::lane::LaneKey;

new_key_type! {
    /// Key for a system stored in a [`Galaxy`]
    pub struct SystemKey;
}

bitflags! {
    /// Which GPU buffers need rebuilding after an edit
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Star set changed
        const STARS = 1 << 0;
        /// Lane set changed
        const LANES = 1 << 1;
        /// Everything
        const ALL = Self::STARS.bits() | Self::LANES.bits();
    }
}

/// World units spanned by the map's width
pub const WORLD_SCALE: f32 = 2200.0;

/// Mapping between normalized image coordinates and world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldFrame {
    pub width: f32,
    pub height: f32,
}

impl WorldFrame {
    /// Frame for an image of the given size
    pub fn from_image(image: ImageDims) -> Self {
        let aspect = (image.width / image.height) as f32;
        Self {
            width: WORLD_SCALE,
            height: WORLD_SCALE / aspect,
        }
    }

    /// World position for normalized coordinates (y flipped so up is positive)
    pub fn to_world(&self, x_norm: f64, y_norm: f64, z: f64) -> Vec3 {
        Vec3::new(
            (x_norm as f32 - 0.5) * self.width,
            -(y_norm as f32 - 0.5) * self.height,
            z as f32,
        )
    }

    /// Normalized coordinates for a world point, clamped to the image
    pub fn to_normalized(&self, wx: f32, wy: f32) -> (f64, f64) {
        let x_norm = (wx / self.width + 0.5).clamp(0.0, 1.0);
        let y_norm = (0.5 - wy / self.height).clamp(0.0, 1.0);
        (x_norm as f64, y_norm as f64)
    }
}

/// Result of toggling a lane
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LaneEdit {
    Added(LaneKey),
    Removed(LaneKey),
}

/// The loaded star map with its current edits
pub struct Galaxy {
    image_size: Option<ImageSize>,
    frame: WorldFrame,
    systems: SlotMap<SystemKey, SystemRecord>,
    /// Document order, used for export and for tie-breaking picks
    order: Vec<SystemKey>,
    /// First occurrence wins on duplicate ids
    index: HashMap<String, SystemKey>,
    positions: SecondaryMap<SystemKey, Vec3>,
    lanes: BTreeSet<LaneKey>,
    original_lanes: BTreeSet<LaneKey>,
    extra: Map<String, serde_json::Value>,
    dirty: DirtyFlags,
}

impl Galaxy {
    /// Build a galaxy from a parsed document
    pub fn from_document(doc: StarMapDocument) -> Self {
        let image = doc.image_dims();
        let frame = WorldFrame::from_image(image);

        let mut systems = SlotMap::with_key();
        let mut order = Vec::with_capacity(doc.systems.len());
        let mut index = HashMap::with_capacity(doc.systems.len());
        let mut positions = SecondaryMap::new();

        for record in doc.systems {
            let position = record
                .normalized_xy(image)
                .map(|(x, y)| frame.to_world(x, y, record.depth()));
            let id = record.id.clone();
            let key = systems.insert(record);
            order.push(key);
            index.entry(id).or_insert(key);
            if let Some(p) = position {
                positions.insert(key, p);
            }
        }

        let lanes: BTreeSet<LaneKey> = doc.lanes.into_iter().map(LaneKey::from).collect();

        log::info!(
            "Loaded {} systems ({} positioned) and {} lanes",
            order.len(),
            positions.len(),
            lanes.len()
        );

        Self {
            image_size: doc.image_size,
            frame,
            systems,
            order,
            index,
            positions,
            original_lanes: lanes.clone(),
            lanes,
            extra: doc.extra,
            dirty: DirtyFlags::ALL,
        }
    }

    /// World frame used for placing systems
    pub fn frame(&self) -> WorldFrame {
        self.frame
    }

    /// Number of systems, including unpositioned ones
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a system record by id
    pub fn system(&self, id: &str) -> Option<&SystemRecord> {
        self.index.get(id).and_then(|&key| self.systems.get(key))
    }

    /// World position of a system, if it has one
    pub fn position(&self, id: &str) -> Option<Vec3> {
        self.index.get(id).and_then(|&key| self.positions.get(key).copied())
    }

    /// Systems that have a world position, in document order
    pub fn positioned_systems(&self) -> impl Iterator<Item = (&SystemRecord, Vec3)> + '_ {
        self.order.iter().filter_map(move |&key| {
            let pos = self.positions.get(key)?;
            Some((&self.systems[key], *pos))
        })
    }

    /// Positions of every drawable star
    pub fn star_positions(&self) -> Vec<Vec3> {
        self.positioned_systems().map(|(_, p)| p).collect()
    }

    /// Current lanes
    pub fn lanes(&self) -> impl Iterator<Item = &LaneKey> {
        self.lanes.iter()
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn has_lane(&self, lane: &LaneKey) -> bool {
        self.lanes.contains(lane)
    }

    /// Endpoints of each lane whose systems both have positions
    pub fn lane_segments(&self) -> Vec<(LaneKey, Vec3, Vec3)> {
        self.lanes
            .iter()
            .filter_map(|lane| {
                let a = self.position(lane.first())?;
                let b = self.position(lane.second())?;
                Some((lane.clone(), a, b))
            })
            .collect()
    }

    /// Rename a system; blank names are ignored
    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let Some(record) = self.index.get(id).and_then(|&key| self.systems.get_mut(key)) else {
            return false;
        };
        log::info!("Renamed {} to '{}'", id, name);
        record.name = Some(name.to_string());
        true
    }

    /// Add the lane if missing, remove it if present
    ///
    /// Returns `None` for self-lanes and unknown systems.
    pub fn toggle_lane(&mut self, a: &str, b: &str) -> Option<LaneEdit> {
        if a == b || !self.contains(a) || !self.contains(b) {
            return None;
        }
        let lane = LaneKey::new(a, b);
        self.dirty |= DirtyFlags::LANES;
        if self.lanes.remove(&lane) {
            log::info!("Removed lane {}", lane);
            Some(LaneEdit::Removed(lane))
        } else {
            log::info!("Added lane {}", lane);
            self.lanes.insert(lane.clone());
            Some(LaneEdit::Added(lane))
        }
    }

    /// Remove a specific lane
    pub fn remove_lane(&mut self, lane: &LaneKey) -> bool {
        let removed = self.lanes.remove(lane);
        if removed {
            self.dirty |= DirtyFlags::LANES;
            log::info!("Deleted lane {}", lane);
        }
        removed
    }

    /// Remove every lane
    pub fn clear_lanes(&mut self) {
        log::info!("Cleared {} lanes", self.lanes.len());
        self.lanes.clear();
        self.dirty |= DirtyFlags::LANES;
    }

    /// Go back to the lanes present at load time
    pub fn restore_lanes(&mut self) {
        self.lanes = self.original_lanes.clone();
        self.dirty |= DirtyFlags::LANES;
        log::info!("Restored {} lanes", self.lanes.len());
    }

    /// Number used for the next `SYS_n` id
    pub fn next_system_number(&self) -> usize {
        let mut n = self.order.len() + 1;
        while self.index.contains_key(&format!("SYS_{}", n)) {
            n += 1;
        }
        n
    }

    /// Default name offered for the next created system
    pub fn next_default_name(&self) -> String {
        format!("New System {}", self.next_system_number())
    }

    /// Create a system at a world point on the map plane
    ///
    /// Returns the new system id. A blank name falls back to `New System n`.
    pub fn add_system_at(&mut self, world: Vec3, name: &str) -> String {
        let n = self.next_system_number();
        let id = format!("SYS_{}", n);
        let name = match name.trim() {
            "" => format!("New System {}", n),
            trimmed => trimmed.to_string(),
        };
        let (x_norm, y_norm) = self.frame.to_normalized(world.x, world.y);

        let record = SystemRecord {
            id: id.clone(),
            name: Some(name),
            coords: Some(Coords {
                x_norm: Some(x_norm),
                y_norm: Some(y_norm),
                z: Some(0.0),
                extra: Map::new(),
            }),
            pixel: None,
            tags: Some(vec!["manmade".to_string()]),
            extra: Map::new(),
        };

        let key = self.systems.insert(record);
        self.order.push(key);
        self.index.insert(id.clone(), key);
        self.positions.insert(key, Vec3::new(world.x, world.y, 0.0));
        self.dirty |= DirtyFlags::STARS;

        log::info!("Created system {} at ({:.3}, {:.3})", id, x_norm, y_norm);
        id
    }

    /// Snapshot the current state as a document
    pub fn to_document(&self) -> StarMapDocument {
        StarMapDocument {
            image_size: self.image_size.clone(),
            systems: self.order.iter().map(|&key| self.systems[key].clone()).collect(),
            lanes: self.lanes.iter().map(LaneKey::to_pair).collect(),
            extra: self.extra.clone(),
        }
    }

    /// Return and reset the pending dirty flags
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty)
    }
}
