//! Error types for star map documents and detail storage

use std::fmt;
use std::io;

/// Error loading or saving a star map document
#[derive(Debug)]
pub enum StarMapError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid JSON or unexpected shape)
    Parse(serde_json::Error),
    /// Serialization error
    Serialize(serde_json::Error),
}

impl From<io::Error> for StarMapError {
    fn from(e: io::Error) -> Self {
        StarMapError::Io(e)
    }
}

impl fmt::Display for StarMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarMapError::Io(e) => write!(f, "IO error: {}", e),
            StarMapError::Parse(e) => write!(f, "Parse error: {}", e),
            StarMapError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for StarMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StarMapError::Io(e) => Some(e),
            StarMapError::Parse(e) | StarMapError::Serialize(e) => Some(e),
        }
    }
}

/// Error reading or writing cached system details
#[derive(Debug)]
pub enum DetailStoreError {
    /// IO error from the backing directory
    Io(io::Error),
    /// Stored entry is not a valid details document
    Parse(String),
}

impl From<io::Error> for DetailStoreError {
    fn from(err: io::Error) -> Self {
        DetailStoreError::Io(err)
    }
}

impl From<serde_json::Error> for DetailStoreError {
    fn from(err: serde_json::Error) -> Self {
        DetailStoreError::Parse(err.to_string())
    }
}

impl fmt::Display for DetailStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailStoreError::Io(err) => write!(f, "Detail store IO error: {}", err),
            DetailStoreError::Parse(msg) => write!(f, "Detail store parse error: {}", msg),
        }
    }
}

impl std::error::Error for DetailStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DetailStoreError::Io(err) => Some(err),
            DetailStoreError::Parse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_io_error_display() {
        let err = StarMapError::from(io::Error::new(io::ErrorKind::NotFound, "systems.json"));
        let msg = format!("{}", err);
        assert!(msg.contains("IO error"));
        assert!(msg.contains("systems.json"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_parse_error_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StarMapError::Parse(json_err);
        assert!(format!("{}", err).starts_with("Parse error"));
    }

    #[test]
    fn test_detail_store_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let err: DetailStoreError = json_err.into();
        match err {
            DetailStoreError::Parse(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Parse variant"),
        }
    }

    #[test]
    fn test_detail_store_error_source() {
        let io_err = DetailStoreError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "ro"));
        assert!(io_err.source().is_some());
        assert!(DetailStoreError::Parse("bad".into()).source().is_none());
    }
}
