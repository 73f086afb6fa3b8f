// crates/wilayah-core/src/model/mod.rs
pub mod convert;
pub mod flat;
pub mod load;

pub use convert::{build_full_text, denormalize};
pub use flat::{FlatRegion, RegionDb};

pub use crate::traits::DefaultBackend;

/// Convenient alias for the default backend.
pub type DefaultRegionDb = RegionDb<DefaultBackend>;
