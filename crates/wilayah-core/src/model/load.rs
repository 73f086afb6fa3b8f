// crates/wilayah-core/src/model/load.rs
use crate::error::{Result, WilayahError};
use crate::model::flat::RegionDb;
use crate::traits::RegionBackend;
use bincode::Options;
use std::io::{Read, Write};

/// Upper bound on a decoded database. Refuses data bombs and truncated
/// length prefixes that would otherwise allocate wildly.
pub const MAX_DB_BYTES: u64 = 256 * 1024 * 1024;

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(MAX_DB_BYTES)
        .allow_trailing_bytes()
}

impl<B: RegionBackend> RegionDb<B> {
    /// Reconstructs the database from its serialized binary form.
    ///
    /// Rows are re-sorted by id so that lookups stay valid even for caches
    /// written by other tools.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(data)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let db: RegionDb<B> = codec().deserialize_from(reader)?;
        Ok(RegionDb::new(db.regions))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        codec().serialize(self).map_err(WilayahError::Bincode)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        codec()
            .serialize_into(writer, self)
            .map_err(WilayahError::Bincode)
    }
}
