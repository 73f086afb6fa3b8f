//! Basic usage example for wilayah-rs
//!
//! This example demonstrates how to:
//! - Load the compiled region database (or build a tiny one in memory)
//! - Run each kind of search
//! - Handle invalid input and empty postal lookups

use std::sync::Arc;
use wilayah_rs::prelude::*;

fn demo_db() -> Result<DefaultRegionDb> {
    let raw = vec![
        RawRegionRecord::new("31", "DKI Jakarta"),
        RawRegionRecord::new("31.71", "Kota Jakarta Pusat"),
        RawRegionRecord::new("31.71.06", "Menteng"),
        RawRegionRecord::new("31.71.06.1001", "Menteng"),
        RawRegionRecord::new("31.71.06.1003", "Cikini"),
        RawRegionRecord::new("32", "Jawa Barat"),
        RawRegionRecord::new("32.73", "Kota Bandung"),
        RawRegionRecord::new("32.73.01", "Sukasari"),
        RawRegionRecord::new("32.73.01.1001", "Sarijadi"),
        RawRegionRecord::new("32.04", "Kabupaten Bandung"),
        RawRegionRecord::new("32.04.05", "Cileunyi"),
        RawRegionRecord::new("32.04.05.2001", "Cibiru Wetan"),
    ];
    let postal = vec![
        RawPostalRecord::new("31.71.06.1001", "10310"),
        RawPostalRecord::new("31.71.06.1003", "10330"),
        RawPostalRecord::new("32.73.01.1001", "40151"),
    ];
    let (db, report) = denormalize(raw, postal)?;
    println!("Built demo database: {} subdistricts", report.subdistricts);
    Ok(db)
}

fn print_results(title: &str, results: std::result::Result<Vec<Region>, SearchError>) {
    println!("--- {title} ---");
    match results {
        Ok(regions) if regions.is_empty() => println!("(no matches)"),
        Ok(regions) => {
            for (i, r) in regions.iter().enumerate() {
                println!("{}. {}", i + 1, r.label());
            }
        }
        Err(e) => println!("error [{}]: {e}", e.code()),
    }
    println!();
}

fn main() -> Result<()> {
    println!("=== wilayah-rs Basic Usage Example ===\n");

    // Prefer the compiled dataset; fall back to a handful of rows.
    let db = match DefaultRegionDb::load() {
        Ok(db) => {
            println!("✓ Loaded {} regions from data/regions.bin", db.len());
            db
        }
        Err(e) => {
            println!("No compiled database ({e}), using demo rows");
            demo_db()?
        }
    };

    let stats = db.stats()?;
    println!(
        "Provinces: {}, cities: {}, districts: {}, subdistricts: {}\n",
        stats.provinces, stats.cities, stats.districts, stats.regions
    );

    let service = SearchService::new(Arc::new(db));

    print_results("General: \"menteng\"", service.search_general("menteng"));
    print_results("City (typo): \"bandng\"", service.search_city("bandng"));
    print_results("District: \"sukasri\"", service.search_district("sukasri"));
    print_results("Subdistrict: \"sarijad\"", service.search_subdistrict("sarijad"));
    print_results("Province: \"jawa barat\"", service.search_province("jawa barat"));
    print_results("Postal: 40151", service.search_postal_code("40151"));

    // Error handling
    print_results("Postal: 123 (invalid)", service.search_postal_code("123"));
    print_results("Postal: 99999 (unknown)", service.search_postal_code("99999"));
    print_results("Empty query", service.search(SearchKind::General, ""));

    println!("Query \"jakarta-barat\" normalizes to {:?}", normalize_query("jakarta-barat"));
    println!(
        "jaro_winkler(\"Kota Bandung\", \"Kota Bandng\") = {:.3}",
        jaro_winkler("Kota Bandung", "Kota Bandng")
    );

    Ok(())
}
