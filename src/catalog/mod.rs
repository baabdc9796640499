//! Inspection records and the validated catalog that holds them.
//!
//! A [`Catalog`] is fixed for the lifetime of a viewer: it is built once,
//! validated (unique non-empty ids, known statuses, finite regions with
//! positive scale) and never mutated. Catalog documents are TOML or JSON
//! with a top-level `records` array; see `assets/catalog.toml` for the
//! shipped dataset.

mod record;

use std::fmt;
use std::path::PathBuf;

pub use record::{HitRegion, InspectionRecord, Status};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::TwinError;

/// The dataset compiled into the crate.
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.toml");

/// Reasons a set of records is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A record has an empty id.
    EmptyId {
        /// Position of the record in its document.
        index: usize,
    },
    /// Two records share an id.
    DuplicateId {
        /// The repeated id.
        id: String,
    },
    /// A record's status is outside the closed set.
    UnknownStatus {
        /// Offending record.
        id: String,
        /// Status as written.
        status: String,
    },
    /// A hit region component is NaN or infinite.
    NonFiniteRegion {
        /// Offending record.
        id: String,
    },
    /// A hit region scale component is zero or negative.
    NonPositiveScale {
        /// Offending record.
        id: String,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId { index } => {
                write!(f, "record {index} has an empty id")
            }
            Self::DuplicateId { id } => write!(f, "duplicate record id '{id}'"),
            Self::UnknownStatus { id, status } => {
                write!(f, "record '{id}' has unknown status '{status}'")
            }
            Self::NonFiniteRegion { id } => {
                write!(f, "record '{id}' has a non-finite hit region")
            }
            Self::NonPositiveScale { id } => {
                write!(f, "record '{id}' has a non-positive hit region scale")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Serialized form of a catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogDocument {
    /// Records in display order.
    #[serde(default)]
    pub records: Vec<InspectionRecord>,
}

/// Validated, immutable set of inspection records with an id index.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<InspectionRecord>,
    by_id: FxHashMap<String, usize>,
}

impl Catalog {
    /// Validate records and build the id index.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found, in record order.
    pub fn from_records(
        records: Vec<InspectionRecord>,
    ) -> Result<Self, CatalogError> {
        let mut by_id = FxHashMap::default();
        by_id.reserve(records.len());

        for (index, record) in records.iter().enumerate() {
            validate(index, record)?;
            if by_id.insert(record.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId {
                    id: record.id.clone(),
                });
            }
        }

        Ok(Self { records, by_id })
    }

    /// Parse and validate a TOML catalog document.
    ///
    /// # Errors
    ///
    /// [`TwinError::CatalogParse`] for malformed TOML or schema mismatches
    /// (including negative anomaly counts); [`TwinError::Catalog`] when
    /// validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, TwinError> {
        let doc: CatalogDocument = toml::from_str(content)
            .map_err(|e| TwinError::CatalogParse(e.to_string()))?;
        Ok(Self::from_records(doc.records)?)
    }

    /// Parse and validate a JSON catalog document.
    ///
    /// # Errors
    ///
    /// Same as [`from_toml_str`](Self::from_toml_str).
    pub fn from_json_str(content: &str) -> Result<Self, TwinError> {
        let doc: CatalogDocument = serde_json::from_str(content)
            .map_err(|e| TwinError::CatalogParse(e.to_string()))?;
        Ok(Self::from_records(doc.records)?)
    }

    /// The turbine dataset shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only if the embedded document is itself invalid.
    pub fn builtin() -> Result<Self, TwinError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at a position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&InspectionRecord> {
        self.records.get(index)
    }

    /// Position of the record with this id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Record with this id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&InspectionRecord> {
        self.index_of(id).and_then(|i| self.records.get(i))
    }

    /// Records in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &InspectionRecord> {
        self.records.iter()
    }

    /// Records as a slice.
    #[must_use]
    pub fn records(&self) -> &[InspectionRecord] {
        &self.records
    }

    /// Serializable copy of the catalog.
    #[must_use]
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            records: self.records.clone(),
        }
    }
}

fn validate(index: usize, record: &InspectionRecord) -> Result<(), CatalogError> {
    if record.id.trim().is_empty() {
        return Err(CatalogError::EmptyId { index });
    }
    if !record.status.is_known() {
        return Err(CatalogError::UnknownStatus {
            id: record.id.clone(),
            status: record.status.as_str().to_owned(),
        });
    }
    if !record.hit_region.is_finite() {
        return Err(CatalogError::NonFiniteRegion {
            id: record.id.clone(),
        });
    }
    if record.hit_region.scale.iter().any(|&s| s <= 0.0) {
        return Err(CatalogError::NonPositiveScale {
            id: record.id.clone(),
        });
    }
    Ok(())
}

/// Where a viewer gets its catalog from.
///
/// The shipped dataset is one source; an inspection-results service or a
/// file exported from one is another. Rendering code only ever sees the
/// resulting [`Catalog`].
pub trait CatalogSource {
    /// Produce a validated catalog.
    ///
    /// # Errors
    ///
    /// Any read, parse, or validation failure.
    fn load(&self) -> Result<Catalog, TwinError>;
}

/// The dataset compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn load(&self) -> Result<Catalog, TwinError> {
        Catalog::builtin()
    }
}

/// A catalog document on disk; `.json` files are read as JSON, anything
/// else as TOML.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    /// Source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalog {
    fn load(&self) -> Result<Catalog, TwinError> {
        let content = std::fs::read_to_string(&self.path)?;
        let catalog = if self.path.extension().is_some_and(|ext| ext == "json")
        {
            Catalog::from_json_str(&content)?
        } else {
            Catalog::from_toml_str(&content)?
        };
        log::info!(
            "loaded {} inspection records from {}",
            catalog.len(),
            self.path.display()
        );
        Ok(catalog)
    }
}
