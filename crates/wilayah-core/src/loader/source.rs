// crates/wilayah-core/src/loader/source.rs

//! Raw source readers: SQL dump or JSON, optionally gzipped.

use super::common_io;
use super::sql_dump;
use crate::error::{Result, WilayahError};
use crate::raw::{RawPostalRecord, RawRegionRecord};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `INSERT INTO ... VALUES (...)` statements.
    SqlDump,
    /// A JSON array of records.
    Json,
}

impl SourceFormat {
    /// Chosen by extension, ignoring a trailing `.gz`.
    pub fn detect(path: &Path) -> Self {
        if common_io::logical_name(path).ends_with(".json") {
            SourceFormat::Json
        } else {
            SourceFormat::SqlDump
        }
    }
}

/// Read every region record (all levels) from `path`.
pub fn read_regions(path: &Path) -> Result<Vec<RawRegionRecord>> {
    let records = match SourceFormat::detect(path) {
        SourceFormat::SqlDump => {
            let text = common_io::read_to_string(path)?;
            sql_dump::parse_pairs(&text)?
                .into_iter()
                .map(|(code, name)| RawRegionRecord { code, name })
                .collect()
        }
        SourceFormat::Json => read_json(path)?,
    };
    tracing::debug!(path = %path.display(), records = records.len(), "read region source");
    Ok(records)
}

/// Read every postal record from `path`.
pub fn read_postal_codes(path: &Path) -> Result<Vec<RawPostalRecord>> {
    let records = match SourceFormat::detect(path) {
        SourceFormat::SqlDump => {
            let text = common_io::read_to_string(path)?;
            sql_dump::parse_pairs(&text)?
                .into_iter()
                .map(|(code, postal_code)| RawPostalRecord { code, postal_code })
                .collect()
        }
        SourceFormat::Json => read_json(path)?,
    };
    tracing::debug!(path = %path.display(), records = records.len(), "read postal source");
    Ok(records)
}

#[cfg(feature = "json")]
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let reader = common_io::open_stream(path)?;
    serde_json::from_reader(reader).map_err(WilayahError::Json)
}

#[cfg(not(feature = "json"))]
fn read_json<T>(path: &Path) -> Result<Vec<T>> {
    Err(WilayahError::InvalidData(format!(
        "{} is JSON but the 'json' feature is disabled",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn detects_format_by_extension() {
        assert_eq!(SourceFormat::detect(Path::new("wilayah.sql")), SourceFormat::SqlDump);
        assert_eq!(SourceFormat::detect(Path::new("wilayah.sql.gz")), SourceFormat::SqlDump);
        assert_eq!(SourceFormat::detect(Path::new("wilayah.json")), SourceFormat::Json);
        assert_eq!(SourceFormat::detect(Path::new("wilayah.json.gz")), SourceFormat::Json);
    }

    #[test]
    fn reads_sql_regions_and_postal() {
        let dir = tempfile::tempdir().unwrap();
        let regions = dir.path().join("wilayah.sql");
        fs::write(
            &regions,
            "INSERT INTO wilayah (kode, nama) VALUES ('31','DKI Jakarta'),('31.71','Kota Jakarta Pusat');",
        )
        .unwrap();
        let postal = dir.path().join("wilayah_kodepos.sql");
        fs::write(
            &postal,
            "INSERT INTO wilayah_kodepos (kode, kodepos) VALUES ('31.71.06.1001','10310');",
        )
        .unwrap();

        let r = read_regions(&regions).unwrap();
        assert_eq!(r, vec![
            RawRegionRecord::new("31", "DKI Jakarta"),
            RawRegionRecord::new("31.71", "Kota Jakarta Pusat"),
        ]);
        let p = read_postal_codes(&postal).unwrap();
        assert_eq!(p, vec![RawPostalRecord::new("31.71.06.1001", "10310")]);
    }

    #[cfg(feature = "json")]
    #[test]
    fn reads_json_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kodepos.json");
        fs::write(&path, r#"[{"code":"31.71.06.1001","postal_code":"10310"}]"#).unwrap();
        let p = read_postal_codes(&path).unwrap();
        assert_eq!(p[0].postal_code, "10310");
    }
}
