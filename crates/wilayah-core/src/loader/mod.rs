// crates/wilayah-core/src/loader/mod.rs

//! # Data Loader
//!
//! Physical layer (I/O, decompression) for both directions:
//! raw dumps in through [`builder::build_database`], the compiled binary
//! back out through [`RegionDb::load_from_path`].

use crate::error::Result;
use crate::model::{DefaultBackend, RegionDb};
use crate::traits::RegionBackend;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

pub mod builder;
pub mod common_io;
#[cfg(feature = "builder")]
pub mod fetch;
pub mod source;
pub mod sql_dump;

pub use builder::{build_database, CompressionMode};

static REGION_DB_CACHE: OnceCell<RegionDb<DefaultBackend>> = OnceCell::new();

impl RegionDb<DefaultBackend> {
    /// Relative to the working directory, like the ingestor's default output.
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from("data")
    }

    pub fn default_dataset_filename() -> &'static str {
        "regions.bin"
    }

    pub fn default_dataset_path() -> PathBuf {
        Self::default_data_dir().join(Self::default_dataset_filename())
    }

    /// Load the default dataset once per process; later calls clone the cache.
    pub fn load() -> Result<Self> {
        REGION_DB_CACHE
            .get_or_try_init(|| Self::load_from_path(Self::default_dataset_path()))
            .cloned()
    }
}

impl<B: RegionBackend> RegionDb<B> {
    /// Load a compiled database, gzipped or not.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = common_io::open_stream(path)?;
        let db = Self::from_reader(reader)?;
        tracing::debug!(path = %path.display(), regions = db.len(), "region database loaded");
        Ok(db)
    }
}
