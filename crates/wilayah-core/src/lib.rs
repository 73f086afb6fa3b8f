// crates/wilayah-core/src/lib.rs

//! # wilayah-core
//!
//! Typo-tolerant lookup over the Indonesian administrative hierarchy
//! (province → city/regency → district → subdistrict) and postal codes.
//!
//! The crate has two phases:
//!
//! 1. **Ingestion** ([`loader`]): raw SQL or JSON dumps are denormalized into
//!    one flat row per subdistrict and written as a compact binary file.
//! 2. **Serving** ([`search`]): the binary file is loaded once and queried
//!    through [`SearchService`], which dispatches general, district,
//!    subdistrict, city, province and postal code searches.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wilayah_core::{DefaultRegionDb, SearchService};
//!
//! let db = DefaultRegionDb::load_from_path("data/regions.bin")?;
//! let service = SearchService::new(Arc::new(db));
//! for region in service.search_city("bandung").unwrap_or_default() {
//!     println!("{}", region.label());
//! }
//! # Ok::<(), wilayah_core::WilayahError>(())
//! ```

pub mod api;
pub mod common;
pub mod error;
pub mod loader;
pub mod model;
#[doc(hidden)]
pub mod raw;
pub mod search;
pub mod similarity;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::api::{format_results, Region};
pub use crate::common::{DbStats, IngestReport};
pub use crate::error::{Result, SearchError, WilayahError};
pub use crate::loader::{build_database, CompressionMode};
pub use crate::model::{denormalize, DefaultBackend, DefaultRegionDb, FlatRegion, RegionDb};
pub use crate::search::{SearchKind, SearchService, RESULT_LIMIT, SIMILARITY_THRESHOLD};
pub use crate::similarity::jaro_winkler;
pub use crate::text::normalize_query;
pub use crate::traits::{RegionBackend, RegionStore};
