// crates/wilayah-core/src/loader/builder.rs
use super::common_io;
use super::source;
use crate::common::IngestReport;
use crate::error::Result;
use crate::model::{denormalize, DefaultBackend, RegionDb};
use crate::traits::RegionBackend;
use flate2::{write::GzEncoder, Compression};
use std::path::Path;

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl Default for CompressionMode {
    fn default() -> Self {
        if cfg!(feature = "compact") {
            CompressionMode::Gzip
        } else {
            CompressionMode::None
        }
    }
}

// -----------------------------------------------------------------------------
// INGESTION (run once, before serving)
// -----------------------------------------------------------------------------

/// Read the raw sources, denormalize them and write the binary database.
///
/// Nothing is written unless the whole relation could be built; the output
/// replaces `out_path` atomically.
pub fn build_database(
    regions_path: &Path,
    postal_path: Option<&Path>,
    out_path: &Path,
    compression: CompressionMode,
) -> Result<IngestReport> {
    tracing::info!(
        regions = %regions_path.display(),
        postal = ?postal_path.map(Path::display),
        out = %out_path.display(),
        ?compression,
        "building region database"
    );

    let (db, report) = RegionDb::<DefaultBackend>::build_from_sources(regions_path, postal_path)?;
    write_db(out_path, &db, compression)?;

    tracing::info!(
        subdistricts = report.subdistricts,
        with_postal_code = report.with_postal_code,
        without_postal_code = report.without_postal_code,
        ignored = report.ignored,
        "region database written"
    );
    Ok(report)
}

impl<B: RegionBackend> RegionDb<B> {
    /// Parse raw dumps and run the denormalizer.
    pub fn build_from_sources(
        regions_path: &Path,
        postal_path: Option<&Path>,
    ) -> Result<(Self, IngestReport)> {
        let raw_regions = source::read_regions(regions_path)?;
        let raw_postal = match postal_path {
            Some(p) => source::read_postal_codes(p)?,
            None => Vec::new(),
        };
        denormalize(raw_regions, raw_postal)
    }

    /// Persist with the default compression of this build.
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        write_db(path.as_ref(), self, CompressionMode::default())
    }
}

fn write_db<B: RegionBackend>(
    path: &Path,
    db: &RegionDb<B>,
    compression: CompressionMode,
) -> Result<()> {
    common_io::write_atomically(path, |w| match compression {
        CompressionMode::Gzip => {
            let mut encoder = GzEncoder::new(w, Compression::default());
            db.write_to(&mut encoder)?;
            encoder.finish()?;
            Ok(())
        }
        CompressionMode::None => db.write_to(w),
    })
}
