//! Undirected lane keys

use std::fmt;

/// Canonical key for an undirected lane between two systems
///
/// The two ids are stored sorted, so `LaneKey::new("B", "A") == LaneKey::new("A", "B")`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaneKey {
    a: String,
    b: String,
}

impl LaneKey {
    /// Create a lane key from two system ids in any order
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    /// Lexicographically smaller endpoint
    pub fn first(&self) -> &str {
        &self.a
    }

    /// Lexicographically larger endpoint
    pub fn second(&self) -> &str {
        &self.b
    }

    /// Both endpoints are the same system
    pub fn is_loop(&self) -> bool {
        self.a == self.b
    }

    /// Whether this lane touches the given system
    pub fn touches(&self, id: &str) -> bool {
        self.a == id || self.b == id
    }

    /// As the `[a, b]` pair used in exported documents
    pub fn to_pair(&self) -> (String, String) {
        (self.a.clone(), self.b.clone())
    }
}

impl From<(String, String)> for LaneKey {
    fn from((a, b): (String, String)) -> Self {
        Self::new(a, b)
    }
}

impl fmt::Display for LaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.a, self.b)
    }
}
