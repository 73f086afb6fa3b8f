// crates/wilayah-core/src/loader/common_io.rs
use crate::error::{Result, WilayahError};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Opens a file, buffers it, and transparently gunzips it when the content
/// starts with the gzip magic bytes. Callers never care about compression.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        WilayahError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let mut reader = BufReader::new(file);
    let head = {
        use std::io::BufRead;
        reader.fill_buf()?.get(..2).map(|h| [h[0], h[1]])
    };

    if head == Some(GZIP_MAGIC) {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

/// Reads a whole (possibly gzipped) text file.
pub fn read_to_string(path: &Path) -> Result<String> {
    let mut s = String::new();
    open_stream(path)?.read_to_string(&mut s)?;
    Ok(s)
}

/// File name without a trailing `.gz`, lowercased, for format sniffing.
pub fn logical_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match name.strip_suffix(".gz") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

/// Sibling path used while writing `path`, renamed over it once complete.
pub fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "regions".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

/// Write through `write` into a staging file, then atomically swap it in.
///
/// Readers either see the old file or the complete new one, never a prefix.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    let result = (|| -> Result<()> {
        let file = File::create(&staging)?;
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer.flush()?;
        writer
            .into_inner()
            .map_err(|e| WilayahError::Io(e.into_error()))?
            .sync_all()?;
        fs::rename(&staging, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}
