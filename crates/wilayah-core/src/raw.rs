// crates/wilayah-core/src/raw.rs

//! Raw input records, exactly as read from the source dumps.
//!
//! These only exist during ingestion. Once the flat relation is built they
//! are dropped.

use serde::{Deserialize, Serialize};

/// One row of the hierarchical region table: `('11.01.01.2001', 'Keude Bakongan')`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRegionRecord {
    pub code: String,
    pub name: String,
}

/// One row of the postal code table, keyed by subdistrict code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPostalRecord {
    pub code: String,
    pub postal_code: String,
}

impl RawRegionRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl RawPostalRecord {
    pub fn new(code: impl Into<String>, postal_code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            postal_code: postal_code.into(),
        }
    }
}

/// The four administrative levels, identified by code length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Province,
    City,
    District,
    Subdistrict,
}

impl Level {
    /// Ancestor levels, outermost first.
    pub const ANCESTORS: [Level; 3] = [Level::Province, Level::City, Level::District];

    pub fn from_code(code: &str) -> Option<Self> {
        match code.len() {
            2 => Some(Level::Province),
            5 => Some(Level::City),
            8 => Some(Level::District),
            13 => Some(Level::Subdistrict),
            _ => None,
        }
    }

    /// Length of a code at this level; also the prefix length that selects
    /// this level's ancestor from a longer code.
    pub fn code_len(self) -> usize {
        match self {
            Level::Province => 2,
            Level::City => 5,
            Level::District => 8,
            Level::Subdistrict => 13,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Province => "province",
            Level::City => "city",
            Level::District => "district",
            Level::Subdistrict => "subdistrict",
        }
    }
}
