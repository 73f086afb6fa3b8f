// crates/wilayah-core/src/loader/fetch.rs
use super::common_io;
use crate::error::Result;
use std::path::Path;

/// Upstream region dump (`wilayah` table, dotted codes).
pub const REGIONS_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/cahyadsn/wilayah/master/db/wilayah.sql";

/// Upstream postal-code dump.
pub const POSTAL_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/cahyadsn/wilayah_kodepos/main/db/wilayah_kodepos.sql";

/// Download `url` into `dest`, replacing it only when the transfer completes.
///
/// Returns the number of bytes written.
pub fn download_source(url: &str, dest: &Path) -> Result<u64> {
    tracing::info!(%url, dest = %dest.display(), "downloading source dump");

    let mut response = reqwest::blocking::get(url)?.error_for_status()?;
    let mut written = 0;
    common_io::write_atomically(dest, |w| {
        written = response.copy_to(w)?;
        Ok(())
    })?;

    tracing::info!(bytes = written, "download complete");
    Ok(written)
}
