//! Umbrella crate for the wilayah workspace.
//!
//! Re-exports [`wilayah_core`] so the demos can `use wilayah_rs::prelude::*`.

pub use wilayah_core::*;

pub mod prelude {
    pub use wilayah_core::raw::{RawPostalRecord, RawRegionRecord};
    pub use wilayah_core::{
        build_database, denormalize, jaro_winkler, normalize_query, CompressionMode, DbStats,
        DefaultBackend, DefaultRegionDb, FlatRegion, IngestReport, Region, RegionDb, RegionStore,
        Result, SearchError, SearchKind, SearchService, WilayahError,
    };
}
