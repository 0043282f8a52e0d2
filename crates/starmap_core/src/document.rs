//! Star map document serialization
//!
//! Provides [`StarMapDocument`] for loading/saving `systems.json` files.
//! The format is schema-free: keys this crate does not know about are kept in
//! `extra` maps and written back untouched on export.

use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::error::StarMapError;

/// Source image dimensions the normalized coordinates refer to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageDims {
    pub width: f64,
    pub height: f64,
}

impl ImageDims {
    /// Used for whatever dimension the document does not give
    pub const DEFAULT: Self = Self { width: 1090.0, height: 1494.0 };
}

impl Default for ImageDims {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// `image_size` as written in the document
///
/// Each dimension is optional on its own; non-numeric values stay in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct ImageSize {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            extra: Map::new(),
        }
    }

    /// Dimensions with the defaults filled in per field
    pub fn dims(&self) -> ImageDims {
        ImageDims {
            width: self.width.unwrap_or(ImageDims::DEFAULT.width),
            height: self.height.unwrap_or(ImageDims::DEFAULT.height),
        }
    }
}

impl From<Map<String, Value>> for ImageSize {
    fn from(mut map: Map<String, Value>) -> Self {
        Self {
            width: take_number(&mut map, "width"),
            height: take_number(&mut map, "height"),
            extra: map,
        }
    }
}

/// Normalized map coordinates (0..1, origin top-left) with optional depth
///
/// Non-numeric values stay in `extra` and read as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Coords {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_norm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_norm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for Coords {
    fn from(mut map: Map<String, Value>) -> Self {
        Self {
            x_norm: take_number(&mut map, "x_norm"),
            y_norm: take_number(&mut map, "y_norm"),
            z: take_number(&mut map, "z"),
            extra: map,
        }
    }
}

/// Pixel coordinates in the source image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Pixel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for Pixel {
    fn from(mut map: Map<String, Value>) -> Self {
        Self {
            x: take_number(&mut map, "x"),
            y: take_number(&mut map, "y"),
            extra: map,
        }
    }
}

/// A single system entry in the document
///
/// Known keys with an unexpected shape are kept in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct SystemRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coords: Option<Coords>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel: Option<Pixel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for SystemRecord {
    fn from(mut map: Map<String, Value>) -> Self {
        // Non-string ids are read as their JSON text
        let id = match map.remove("id") {
            Some(Value::String(id)) => id,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let name = take_if(&mut map, "name", |v| v.is_string()).and_then(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        });
        let coords = take_object(&mut map, "coords").map(Coords::from);
        let pixel = take_object(&mut map, "pixel").map(Pixel::from);
        let tags = take_if(&mut map, "tags", |v| {
            v.as_array().is_some_and(|items| items.iter().all(Value::is_string))
        })
        .and_then(|v| serde_json::from_value(v).ok());

        Self {
            id,
            name,
            coords,
            pixel,
            tags,
            extra: map,
        }
    }
}

/// Remove `key` from `map` when its value passes `accept`
fn take_if(map: &mut Map<String, Value>, key: &str, accept: impl Fn(&Value) -> bool) -> Option<Value> {
    if map.get(key).is_some_and(accept) {
        map.remove(key)
    } else {
        None
    }
}

fn take_number(map: &mut Map<String, Value>, key: &str) -> Option<f64> {
    take_if(map, key, Value::is_number).and_then(|v| v.as_f64())
}

fn take_object(map: &mut Map<String, Value>, key: &str) -> Option<Map<String, Value>> {
    match take_if(map, key, Value::is_object) {
        Some(Value::Object(object)) => Some(object),
        _ => None,
    }
}

/// `image_size` when it is an object; anything else reads as absent
fn lenient_image_size<'de, D>(deserializer: D) -> Result<Option<ImageSize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(Some(ImageSize::from(map))),
        Value::Null => Ok(None),
        other => {
            log::warn!("Ignoring 'image_size' {}", other);
            Ok(None)
        }
    }
}

/// Object entries of `systems`; anything else is dropped with a warning
fn lenient_systems<'de, D>(deserializer: D) -> Result<Vec<SystemRecord>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        log::warn!("Ignoring 'systems': expected an array");
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(SystemRecord::from(map)),
            other => {
                log::warn!("Ignoring system entry {}", other);
                None
            }
        })
        .collect())
}

/// Lanes whose first two entries are strings; anything else is dropped with a warning
fn lenient_lanes<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        log::warn!("Ignoring 'lanes': expected an array");
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| {
            let pair = match item.as_array().map(Vec::as_slice) {
                Some([Value::String(a), Value::String(b), ..]) => Some((a.clone(), b.clone())),
                _ => None,
            };
            if pair.is_none() {
                log::warn!("Ignoring lane {}", item);
            }
            pair
        })
        .collect())
}

impl SystemRecord {
    /// Create a record with normalized coordinates
    pub fn new(id: impl Into<String>, name: impl Into<String>, x_norm: f64, y_norm: f64) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            coords: Some(Coords {
                x_norm: Some(x_norm),
                y_norm: Some(y_norm),
                z: Some(0.0),
                extra: Map::new(),
            }),
            ..Default::default()
        }
    }

    /// Builder: attach tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Name for display, falling back to the id
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.id,
        }
    }

    /// Normalized (x, y) from `coords`, else derived from `pixel` and the image size
    pub fn normalized_xy(&self, image: ImageDims) -> Option<(f64, f64)> {
        if let Some(Coords { x_norm: Some(x), y_norm: Some(y), .. }) = &self.coords {
            return Some((*x, *y));
        }
        match &self.pixel {
            Some(Pixel { x: Some(px), y: Some(py), .. }) => Some((px / image.width, py / image.height)),
            _ => None,
        }
    }

    /// Depth from `coords.z`, defaulting to the map plane
    pub fn depth(&self) -> f64 {
        self.coords.as_ref().and_then(|c| c.z).unwrap_or(0.0)
    }
}

/// A star map document (`systems.json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StarMapDocument {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_image_size")]
    pub image_size: Option<ImageSize>,
    #[serde(default, deserialize_with = "lenient_systems")]
    pub systems: Vec<SystemRecord>,
    #[serde(default, deserialize_with = "lenient_lanes")]
    pub lanes: Vec<(String, String)>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StarMapDocument {
    /// Parse a document from JSON text
    pub fn from_json(text: &str) -> Result<Self, StarMapError> {
        serde_json::from_str(text).map_err(StarMapError::Parse)
    }

    /// Pretty JSON, two-space indented
    pub fn to_json(&self) -> Result<String, StarMapError> {
        serde_json::to_string_pretty(self).map_err(StarMapError::Serialize)
    }

    /// Load a document from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StarMapError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load a document, falling back to the built-in dataset on any failure
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("Could not load '{}': {}. Using built-in dataset.", path.display(), e);
                Self::builtin()
            }
        }
    }

    /// Save a document to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StarMapError> {
        let contents = self.to_json()?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Image dimensions, defaulting each one the document leaves out
    pub fn image_dims(&self) -> ImageDims {
        self.image_size.as_ref().map(ImageSize::dims).unwrap_or_default()
    }

    /// Small dataset shown when no `systems.json` is available
    pub fn builtin() -> Self {
        let systems = vec![
            SystemRecord::new("SOL", "Sol", 0.50, 0.50).with_tags(["core"]),
            SystemRecord::new("ACEN", "Alpha Centauri", 0.58, 0.56),
            SystemRecord::new("BARN", "Barnard's Star", 0.44, 0.40),
            SystemRecord::new("SIRI", "Sirius", 0.63, 0.38),
            SystemRecord::new("WOLF", "Wolf 359", 0.36, 0.58),
            SystemRecord::new("LALA", "Lalande 21185", 0.30, 0.45),
            SystemRecord::new("EPSE", "Epsilon Eridani", 0.70, 0.62),
            SystemRecord::new("TAUC", "Tau Ceti", 0.55, 0.72),
        ];
        let lanes = [
            ("SOL", "ACEN"),
            ("SOL", "BARN"),
            ("SOL", "WOLF"),
            ("BARN", "SIRI"),
            ("WOLF", "LALA"),
            ("ACEN", "EPSE"),
            ("ACEN", "TAUC"),
        ]
        .into_iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();

        Self {
            image_size: Some(ImageSize::new(ImageDims::DEFAULT.width, ImageDims::DEFAULT.height)),
            systems,
            lanes,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "image_size": { "width": 1000, "height": 500 },
        "systems": [
            { "id": "A", "name": "Alpha", "coords": { "x_norm": 0.25, "y_norm": 0.5, "z": 12.5 }, "tags": ["core"] },
            { "id": "B", "pixel": { "x": 500, "y": 100 }, "faction": "Guild" },
            { "id": "C", "name": "Nowhere" }
        ],
        "lanes": [["A", "B"]],
        "generator": "scan-tool"
    }"#;

    #[test]
    fn test_parse_sample() {
        let doc = StarMapDocument::from_json(SAMPLE).unwrap();
        assert_eq!(doc.systems.len(), 3);
        assert_eq!(doc.lanes, vec![("A".to_string(), "B".to_string())]);
        assert_eq!(doc.image_size, Some(ImageSize::new(1000.0, 500.0)));
    }

    #[test]
    fn test_normalized_from_coords_and_pixel() {
        let doc = StarMapDocument::from_json(SAMPLE).unwrap();
        let image = doc.image_dims();
        assert_eq!(doc.systems[0].normalized_xy(image), Some((0.25, 0.5)));
        assert_eq!(doc.systems[1].normalized_xy(image), Some((0.5, 0.2)));
        assert_eq!(doc.systems[2].normalized_xy(image), None);
        assert_eq!(doc.systems[0].depth(), 12.5);
        assert_eq!(doc.systems[1].depth(), 0.0);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let doc = StarMapDocument::from_json(SAMPLE).unwrap();
        assert_eq!(doc.systems[0].display_name(), "Alpha");
        assert_eq!(doc.systems[1].display_name(), "B");
    }

    #[test]
    fn test_unknown_keys_survive_export() {
        let doc = StarMapDocument::from_json(SAMPLE).unwrap();
        let json = doc.to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["generator"], "scan-tool");
        assert_eq!(value["systems"][1]["faction"], "Guild");
        assert!(value["systems"][1].get("name").is_none());
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let doc = StarMapDocument::from_json("{}").unwrap();
        assert!(doc.systems.is_empty());
        assert!(doc.lanes.is_empty());
        assert_eq!(doc.image_dims(), ImageDims::DEFAULT);
    }

    #[test]
    fn test_partial_image_size_defaults_per_field() {
        let doc = StarMapDocument::from_json(r#"{ "image_size": { "width": 1000 } }"#).unwrap();
        assert_eq!(doc.image_dims(), ImageDims { width: 1000.0, height: 1494.0 });

        let doc = StarMapDocument::from_json(r#"{ "image_size": { "width": "wide", "height": 500 } }"#)
            .unwrap();
        assert_eq!(doc.image_dims(), ImageDims { width: 1090.0, height: 500.0 });
        let value: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(value["image_size"]["width"], "wide");
        assert_eq!(value["image_size"]["height"], 500.0);
    }

    #[test]
    fn test_non_numeric_depth_reads_as_plane() {
        let json = r#"{ "systems": [
            { "id": "A", "coords": { "x_norm": 0.5, "y_norm": 0.5, "z": "deep" } }
        ] }"#;
        let doc = StarMapDocument::from_json(json).unwrap();
        assert_eq!(doc.systems[0].depth(), 0.0);
        assert_eq!(doc.systems[0].normalized_xy(doc.image_dims()), Some((0.5, 0.5)));

        let value: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(value["systems"][0]["coords"]["z"], "deep");
    }

    #[test]
    fn test_odd_shaped_fields_are_kept_verbatim() {
        let json = r#"{ "systems": [
            { "id": 7, "name": 42, "tags": "core", "pixel": { "x": 10, "y": 20 } },
            "not a system",
            { "id": "B", "coords": null }
        ], "lanes": [["7", "B"], ["7"], [1, 2]] }"#;
        let doc = StarMapDocument::from_json(json).unwrap();
        assert_eq!(doc.systems.len(), 2);
        assert_eq!(doc.systems[0].id, "7");
        assert_eq!(doc.systems[0].name, None);
        assert_eq!(doc.systems[0].tags, None);
        assert!(doc.systems[0].normalized_xy(doc.image_dims()).is_some());
        assert!(doc.systems[1].normalized_xy(doc.image_dims()).is_none());
        assert_eq!(doc.lanes, vec![("7".to_string(), "B".to_string())]);

        let value: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(value["systems"][0]["name"], 42);
        assert_eq!(value["systems"][0]["tags"], "core");
        assert!(value["systems"][1]["coords"].is_null());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        match StarMapDocument::from_json("[1, 2") {
            Err(StarMapError::Parse(_)) => {}
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let doc = StarMapDocument::load_or_default("/nonexistent/systems.json");
        assert_eq!(doc, StarMapDocument::builtin());
    }

    #[test]
    fn test_builtin_lanes_reference_known_systems() {
        let doc = StarMapDocument::builtin();
        for (a, b) in &doc.lanes {
            assert!(doc.systems.iter().any(|s| &s.id == a));
            assert!(doc.systems.iter().any(|s| &s.id == b));
        }
    }
}
