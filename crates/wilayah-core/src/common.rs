// crates/wilayah-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the region database.
///
/// Returned by [`RegionStore::stats`](crate::traits::RegionStore::stats),
/// these counts reflect the materialized flat relation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    /// Number of flat rows, one per subdistrict.
    pub regions: usize,
    pub provinces: usize,
    pub cities: usize,
    pub districts: usize,
    /// Rows that carry a postal code.
    pub with_postal_code: usize,
}

/// What the denormalizer did with its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Raw region records read (all levels).
    pub raw_regions: usize,
    /// Raw postal records read.
    pub raw_postal_codes: usize,
    /// Flat rows emitted.
    pub subdistricts: usize,
    pub with_postal_code: usize,
    pub without_postal_code: usize,
    /// Raw records whose code length is not a hierarchy level.
    pub ignored: usize,
}
