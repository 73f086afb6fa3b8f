//! wilayah-cli: command-line interface for wilayah-core
//!
//! Builds the compiled region database from raw dumps and runs the same
//! searches the HTTP server exposes, straight from the terminal.
//!
//! Usage examples
//! --------------
//!
//! - Compile the database from the upstream dumps
//!   $ wilayah build --regions wilayah.sql --postal wilayah_kodepos.sql
//!
//! - Search everything, or one level with typo tolerance
//!   $ wilayah search "menteng"
//!   $ wilayah search --by city bandng
//!
//! - Postal code lookup, JSON output
//!   $ wilayah --json postal 40151
//!
//! - Show overall stats
//!   $ wilayah stats
//!
//! The database path defaults to `data/regions.bin` and can be set with
//! `--db <path>` or the `DB_PATH` environment variable.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wilayah_core::{
    build_database, CompressionMode, DefaultRegionDb, Region, RegionStore, SearchKind,
    SearchService,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let CliArgs { db, json, command } = CliArgs::parse();

    match command {
        Commands::Build {
            regions,
            postal,
            out,
            plain,
        } => {
            let out = out.unwrap_or_else(|| db.clone());
            let compression = if plain {
                CompressionMode::None
            } else {
                CompressionMode::default()
            };
            let report = build_database(&regions, postal.as_deref(), &out, compression)
                .with_context(|| format!("building {}", out.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Wrote {}", out.display());
                println!("  Raw regions: {}", report.raw_regions);
                println!("  Raw postal codes: {}", report.raw_postal_codes);
                println!("  Subdistricts: {}", report.subdistricts);
                println!("  With postal code: {}", report.with_postal_code);
                println!("  Without postal code: {}", report.without_postal_code);
                println!("  Ignored records: {}", report.ignored);
            }
        }

        Commands::Fetch { url, out } => fetch(url.as_deref(), &out)?,

        Commands::Search { by, query } => {
            let service = open_service(&db)?;
            let results = service.search(by, &query)?;
            print_regions(&results, json)?;
        }

        Commands::Postal { code } => {
            let service = open_service(&db)?;
            let results = service.search(SearchKind::PostalCode, &code)?;
            print_regions(&results, json)?;
        }

        Commands::Stats => {
            let stats = load_db(&db)?.stats()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Database statistics:");
                println!("  Subdistricts: {}", stats.regions);
                println!("  Provinces: {}", stats.provinces);
                println!("  Cities/Regencies: {}", stats.cities);
                println!("  Districts: {}", stats.districts);
                println!("  With postal code: {}", stats.with_postal_code);
            }
        }
    }

    Ok(())
}

fn load_db(path: &Path) -> anyhow::Result<DefaultRegionDb> {
    DefaultRegionDb::load_from_path(path)
        .with_context(|| format!("loading {} (run `wilayah build` first)", path.display()))
}

fn open_service(path: &Path) -> anyhow::Result<SearchService<DefaultRegionDb>> {
    Ok(SearchService::new(Arc::new(load_db(path)?)))
}

#[cfg(feature = "builder")]
fn fetch(url: Option<&str>, out: &Path) -> anyhow::Result<()> {
    use wilayah_core::loader::fetch::{download_source, REGIONS_SOURCE_URL};

    let url = url.unwrap_or(REGIONS_SOURCE_URL);
    let bytes = download_source(url, out).with_context(|| format!("downloading {url}"))?;
    println!("Saved {bytes} bytes to {}", out.display());
    Ok(())
}

#[cfg(not(feature = "builder"))]
fn fetch(_url: Option<&str>, _out: &Path) -> anyhow::Result<()> {
    anyhow::bail!("this build has no download support; rebuild with `--features builder`")
}

fn print_regions(results: &[Region], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else if results.is_empty() {
        println!("No regions found");
    } else {
        for r in results {
            println!("{}  {}", r.id, r.label());
        }
    }
    Ok(())
}
