//! Crate-level error types.

use std::fmt;

use crate::catalog::CatalogError;
use crate::mesh::StlError;

/// Errors produced by the turbine-twin crate.
#[derive(Debug)]
pub enum TwinError {
    /// Failed to load or parse the visual mesh asset.
    MeshLoad(StlError),
    /// The inspection catalog failed validation.
    Catalog(CatalogError),
    /// The inspection catalog document could not be parsed.
    CatalogParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for TwinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MeshLoad(e) => write!(f, "mesh load error: {e}"),
            Self::Catalog(e) => write!(f, "catalog error: {e}"),
            Self::CatalogParse(msg) => {
                write!(f, "catalog parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for TwinError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MeshLoad(e) => Some(e),
            Self::Catalog(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StlError> for TwinError {
    fn from(e: StlError) -> Self {
        Self::MeshLoad(e)
    }
}

impl From<CatalogError> for TwinError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

impl From<std::io::Error> for TwinError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
