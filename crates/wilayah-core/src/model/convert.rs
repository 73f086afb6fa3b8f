// crates/wilayah-core/src/model/convert.rs
use crate::common::IngestReport;
use crate::error::{Result, WilayahError};
use crate::model::flat::{FlatRegion, RegionDb};
use crate::raw::{Level, RawPostalRecord, RawRegionRecord};
use crate::traits::RegionBackend;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// **Denormalizer:** Raw hierarchy + postal table -> Flat relation.
///
/// Every 13-character code becomes one [`FlatRegion`]; its district, city and
/// province names are found by looking up the 8, 5 and 2 character prefixes
/// of its code. Postal codes are joined by exact code equality and are
/// optional: a subdistrict without one is kept with `postal_code = None`.
///
/// The whole build fails if any subdistrict is missing an ancestor or if a
/// code appears twice. A partial relation would silently drop valid regions.
pub fn denormalize<B: RegionBackend>(
    raw_regions: Vec<RawRegionRecord>,
    raw_postal: Vec<RawPostalRecord>,
) -> Result<(RegionDb<B>, IngestReport)> {
    let mut report = IngestReport {
        raw_regions: raw_regions.len(),
        raw_postal_codes: raw_postal.len(),
        ..IngestReport::default()
    };

    // 1. Index every level by code
    let mut names: HashMap<String, String> = HashMap::with_capacity(raw_regions.len());
    let mut subdistricts: Vec<String> = Vec::new();

    for rec in raw_regions {
        let code = rec.code.trim().to_string();
        let Some(level) = Level::from_code(&code) else {
            tracing::debug!(code = %code, "ignoring record with unknown code length");
            report.ignored += 1;
            continue;
        };
        if level == Level::Subdistrict {
            subdistricts.push(code.clone());
        }
        match names.entry(code) {
            Entry::Occupied(e) => {
                return Err(WilayahError::InvalidData(format!(
                    "duplicate region code {}",
                    e.key()
                )));
            }
            Entry::Vacant(e) => {
                e.insert(rec.name.trim().to_string());
            }
        }
    }

    // 2. Postal index (first one wins)
    let mut postal: HashMap<String, String> = HashMap::with_capacity(raw_postal.len());
    for rec in raw_postal {
        postal
            .entry(rec.code.trim().to_string())
            .or_insert_with(|| rec.postal_code.trim().to_string());
    }

    // 3. Resolve ancestors
    let mut regions = Vec::with_capacity(subdistricts.len());
    for code in subdistricts {
        let [province, city, district] = Level::ANCESTORS.map(|level| {
            code.get(..level.code_len())
                .and_then(|prefix| names.get(prefix))
                .ok_or(level)
        });
        let province = province.map_err(|level| missing(&code, level))?;
        let city = city.map_err(|level| missing(&code, level))?;
        let district = district.map_err(|level| missing(&code, level))?;
        let subdistrict = &names[&code];

        let postal_code = postal.get(&code);
        if postal_code.is_some() {
            report.with_postal_code += 1;
        } else {
            report.without_postal_code += 1;
        }

        let full_text = build_full_text(province, city, district, subdistrict);

        regions.push(FlatRegion {
            id: B::str_from(&code),
            subdistrict: B::str_from(subdistrict),
            district: B::str_from(district),
            city: B::str_from(city),
            province: B::str_from(province),
            postal_code: postal_code.map(|p| B::str_from(p)),
            full_text: B::str_from(&full_text),
        });
    }

    report.subdistricts = regions.len();
    Ok((RegionDb::new(regions), report))
}

/// `lowercase(province + " " + city + " " + district + " " + subdistrict)`
pub fn build_full_text(province: &str, city: &str, district: &str, subdistrict: &str) -> String {
    [province, city, district, subdistrict].join(" ").to_lowercase()
}

fn missing(code: &str, level: Level) -> WilayahError {
    WilayahError::MissingAncestor {
        code: code.to_string(),
        level: level.as_str(),
        ancestor: code.get(..level.code_len()).unwrap_or(code).to_string(),
    }
}
