//! Procedurally generated system details
//!
//! Every system id seeds a small deterministic generator, so the same id
//! always yields the same star and planets. Users may then edit the result
//! in the side panel; edits are merged over the stored document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Generator version; bump when the generated output changes
pub const SYSGEN_VERSION: &str = "v1";

/// Classification of a system's primary star
///
/// Kinds this crate does not know are kept as `Other` and written back as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StarKind {
    MainSequence,
    KDwarf,
    GDwarf,
    FDwarf,
    MDwarf,
    Subgiant,
    Giant,
    Neutron,
    BlackHole,
    Other(String),
}

impl StarKind {
    /// All kinds, in generator order
    pub const ALL: [StarKind; 9] = [
        StarKind::MainSequence,
        StarKind::KDwarf,
        StarKind::GDwarf,
        StarKind::FDwarf,
        StarKind::MDwarf,
        StarKind::Subgiant,
        StarKind::Giant,
        StarKind::Neutron,
        StarKind::BlackHole,
    ];

    pub fn label(&self) -> &str {
        match self {
            StarKind::MainSequence => "Main Sequence",
            StarKind::KDwarf => "K-Dwarf",
            StarKind::GDwarf => "G-Dwarf",
            StarKind::FDwarf => "F-Dwarf",
            StarKind::MDwarf => "M-Dwarf",
            StarKind::Subgiant => "Subgiant",
            StarKind::Giant => "Giant",
            StarKind::Neutron => "Neutron",
            StarKind::BlackHole => "Black Hole",
            StarKind::Other(label) => label,
        }
    }

    /// Display color for previews (RGB, 0-255)
    pub fn color(&self) -> [u8; 3] {
        match self {
            StarKind::MainSequence | StarKind::GDwarf => [255, 236, 170],
            StarKind::KDwarf => [255, 200, 120],
            StarKind::FDwarf => [250, 250, 235],
            StarKind::MDwarf => [255, 140, 100],
            StarKind::Subgiant => [255, 215, 140],
            StarKind::Giant => [255, 170, 90],
            StarKind::Neutron => [170, 210, 255],
            StarKind::BlackHole => [60, 40, 90],
            StarKind::Other(_) => [220, 220, 220],
        }
    }
}

impl From<String> for StarKind {
    fn from(label: String) -> Self {
        StarKind::ALL
            .into_iter()
            .find(|kind| kind.label() == label)
            .unwrap_or(StarKind::Other(label))
    }
}

impl From<StarKind> for String {
    fn from(kind: StarKind) -> Self {
        match kind {
            StarKind::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for StarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Planet classification
///
/// Unknown types are kept as `Other` like [`StarKind`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlanetType {
    Rocky,
    Ice,
    Gas,
    Ocean,
    Desert,
    Other(String),
}

impl PlanetType {
    /// Every type selectable in the editor
    pub const ALL: [PlanetType; 5] = [
        PlanetType::Rocky,
        PlanetType::Ice,
        PlanetType::Gas,
        PlanetType::Ocean,
        PlanetType::Desert,
    ];

    pub fn label(&self) -> &str {
        match self {
            PlanetType::Rocky => "Rocky",
            PlanetType::Ice => "Ice",
            PlanetType::Gas => "Gas",
            PlanetType::Ocean => "Ocean",
            PlanetType::Desert => "Desert",
            PlanetType::Other(label) => label,
        }
    }

    /// Display color for previews (RGB, 0-255)
    pub fn color(&self) -> [u8; 3] {
        match self {
            PlanetType::Rocky => [176, 140, 110],
            PlanetType::Ice => [190, 230, 255],
            PlanetType::Gas => [230, 190, 130],
            PlanetType::Ocean => [70, 140, 230],
            PlanetType::Desert => [225, 195, 120],
            PlanetType::Other(_) => [200, 200, 200],
        }
    }
}

impl From<String> for PlanetType {
    fn from(label: String) -> Self {
        PlanetType::ALL
            .into_iter()
            .find(|kind| kind.label() == label)
            .unwrap_or(PlanetType::Other(label))
    }
}

impl From<PlanetType> for String {
    fn from(kind: PlanetType) -> Self {
        match kind {
            PlanetType::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for PlanetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A planet in a system
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    #[serde(default)]
    pub name: String,
    /// Orbit radius in AU; `None` when the user entered something unparsable
    #[serde(rename = "semi_major_AU")]
    pub semi_major_au: Option<f64>,
    #[serde(rename = "type")]
    pub planet_type: PlanetType,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The primary star
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarInfo {
    pub kind: StarKind,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Details document stored per system
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemDetails {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub system_id: String,
    #[serde(default)]
    pub seeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    pub star: StarInfo,
    #[serde(default)]
    pub planets: Vec<Planet>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Deterministic pseudo-random stream seeded from a system id
///
/// FNV-1a over the UTF-16 code units of the id, followed by xorshift32.
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn from_id(id: &str) -> Self {
        let mut h: u32 = 2_166_136_261;
        for unit in id.encode_utf16() {
            h ^= u32::from(unit);
            h = h.wrapping_mul(16_777_619);
        }
        Self {
            state: if h == 0 { 0xdead_beef } else { h },
        }
    }

    /// Next value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        f64::from(s) / 4_294_967_296.0
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Generate the details for a system id
///
/// Everything except `generated_at` depends only on the id.
pub fn generate_details(id: &str) -> SystemDetails {
    let mut rng = SeededRng::from_id(id);

    let kind_index = (rng.next_f64() * StarKind::ALL.len() as f64) as usize;
    let kind = StarKind::ALL[kind_index.min(StarKind::ALL.len() - 1)].clone();
    let planet_count = 1 + (rng.next_f64() * 10.0) as usize;

    let planets = (0..planet_count)
        .map(|i| {
            let semi_major_au = round2(0.2 + rng.next_f64() * 15.0);
            let planet_type = if rng.next_f64() < 0.3 {
                PlanetType::Rocky
            } else if rng.next_f64() < 0.7 {
                PlanetType::Ice
            } else {
                PlanetType::Gas
            };
            let notes = if rng.next_f64() < 0.15 { "In resonance" } else { "" };
            Planet {
                name: format!("P{}", i + 1),
                semi_major_au: Some(semi_major_au),
                planet_type,
                notes: notes.to_string(),
                extra: Map::new(),
            }
        })
        .collect();

    SystemDetails {
        version: SYSGEN_VERSION.to_string(),
        system_id: id.to_string(),
        seeded: true,
        generated_at: Some(Utc::now()),
        star: StarInfo { kind, extra: Map::new() },
        planets,
        extra: Map::new(),
    }
}

/// A planet row as edited in the panel
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetDraft {
    pub name: String,
    pub planet_type: PlanetType,
    /// Raw orbit text; parsed on save
    pub semi_major_au: String,
    pub notes: String,
}

impl PlanetDraft {
    /// Row added with "+ Add Planet" when `index` rows already exist
    pub fn new_at(index: usize) -> Self {
        Self {
            name: format!("P{}", index + 1),
            planet_type: PlanetType::Rocky,
            semi_major_au: "1".to_string(),
            notes: String::new(),
        }
    }

    fn into_planet(self) -> Planet {
        let name = match self.name.trim() {
            "" => "Planet".to_string(),
            trimmed => trimmed.to_string(),
        };
        let semi_major_au = self
            .semi_major_au
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(round2);
        Planet {
            name,
            semi_major_au,
            planet_type: self.planet_type,
            notes: self.notes.trim().to_string(),
            extra: Map::new(),
        }
    }
}

impl From<&Planet> for PlanetDraft {
    fn from(planet: &Planet) -> Self {
        Self {
            name: planet.name.clone(),
            planet_type: planet.planet_type.clone(),
            // An unknown orbit reopens as the default radius
            semi_major_au: planet.semi_major_au.map_or_else(|| "1".to_string(), |v| v.to_string()),
            notes: planet.notes.clone(),
        }
    }
}

/// Form state for the panel's edit mode
#[derive(Clone, Debug, PartialEq)]
pub struct DetailEdit {
    pub system_name: String,
    pub star_kind: StarKind,
    pub planets: Vec<PlanetDraft>,
}

impl DetailEdit {
    /// Prefill the form from the current details
    pub fn from_details(system_name: &str, details: &SystemDetails) -> Self {
        Self {
            system_name: system_name.to_string(),
            star_kind: details.star.kind.clone(),
            planets: details.planets.iter().map(PlanetDraft::from).collect(),
        }
    }

    pub fn add_planet(&mut self) {
        let row = PlanetDraft::new_at(self.planets.len());
        self.planets.push(row);
    }

    pub fn remove_planet(&mut self, index: usize) {
        if index < self.planets.len() {
            self.planets.remove(index);
        }
    }

    /// Trimmed system name, if the user left one
    pub fn trimmed_name(&self) -> Option<&str> {
        Some(self.system_name.trim()).filter(|n| !n.is_empty())
    }

    /// Merge the form over the existing details (or a fresh document)
    pub fn apply(self, id: &str, existing: Option<SystemDetails>) -> SystemDetails {
        let mut details = existing.unwrap_or_else(|| SystemDetails {
            version: SYSGEN_VERSION.to_string(),
            system_id: id.to_string(),
            seeded: true,
            generated_at: None,
            star: StarInfo { kind: self.star_kind.clone(), extra: Map::new() },
            planets: Vec::new(),
            extra: Map::new(),
        });
        details.star = StarInfo { kind: self.star_kind, extra: Map::new() };
        details.planets = self.planets.into_iter().map(PlanetDraft::into_planet).collect();
        details
    }
}
