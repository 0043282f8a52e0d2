//! Star map document validation
//!
//! Checks a loaded [`StarMapDocument`] for common data problems. The viewer
//! logs what it finds but loads the document anyway.

use std::collections::HashSet;

use crate::document::StarMapDocument;
use crate::lane::LaneKey;

/// Problem found in a star map document
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two systems share an id
    DuplicateId(String),
    /// Lane endpoint does not name a system
    UnknownLaneEndpoint { lane: LaneKey, id: String },
    /// Lane connects a system to itself
    SelfLane(String),
    /// Same lane listed more than once (in either direction)
    DuplicateLane(LaneKey),
    /// System has neither `coords` nor `pixel` position
    MissingPosition(String),
    /// Normalized coordinates outside the image
    OutOfBounds { id: String, x_norm: f64, y_norm: f64 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::DuplicateId(id) => write!(f, "Duplicate system id: '{}'", id),
            ValidationError::UnknownLaneEndpoint { lane, id } => {
                write!(f, "Lane {} references unknown system '{}'", lane, id)
            }
            ValidationError::SelfLane(id) => write!(f, "Lane connects '{}' to itself", id),
            ValidationError::DuplicateLane(lane) => write!(f, "Duplicate lane: {}", lane),
            ValidationError::MissingPosition(id) => {
                write!(f, "System '{}' has no position and will not be drawn", id)
            }
            ValidationError::OutOfBounds { id, x_norm, y_norm } => {
                write!(f, "System '{}' lies outside the map: ({}, {})", id, x_norm, y_norm)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Static checks over a document
pub struct StarMapValidator;

impl StarMapValidator {
    /// Validate a document, returning all problems found
    pub fn validate(doc: &StarMapDocument) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let image = doc.image_dims();

        let mut ids = HashSet::new();
        for system in &doc.systems {
            if !ids.insert(system.id.as_str()) {
                errors.push(ValidationError::DuplicateId(system.id.clone()));
            }
            match system.normalized_xy(image) {
                None => errors.push(ValidationError::MissingPosition(system.id.clone())),
                Some((x, y)) if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) => {
                    errors.push(ValidationError::OutOfBounds {
                        id: system.id.clone(),
                        x_norm: x,
                        y_norm: y,
                    });
                }
                Some(_) => {}
            }
        }

        let mut seen_lanes = HashSet::new();
        for (a, b) in &doc.lanes {
            let lane = LaneKey::new(a.as_str(), b.as_str());
            if lane.is_loop() {
                errors.push(ValidationError::SelfLane(a.clone()));
                continue;
            }
            for id in [a, b] {
                if !ids.contains(id.as_str()) {
                    errors.push(ValidationError::UnknownLaneEndpoint {
                        lane: lane.clone(),
                        id: id.clone(),
                    });
                }
            }
            if !seen_lanes.insert(lane.clone()) {
                errors.push(ValidationError::DuplicateLane(lane));
            }
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(doc: &StarMapDocument) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(doc);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Log every problem as a warning
    pub fn log_warnings(doc: &StarMapDocument) {
        for error in Self::validate(doc) {
            log::warn!("{}", error);
        }
    }
}
