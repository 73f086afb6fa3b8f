use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wilayah_core::SearchKind;

/// CLI arguments for wilayah-cli
#[derive(Debug, Parser)]
#[command(
    name = "wilayah",
    version,
    about = "Build and query the Indonesian administrative region database"
)]
pub struct CliArgs {
    /// Path to the compiled region database
    #[arg(long = "db", env = "DB_PATH", default_value = "data/regions.bin", global = true)]
    pub db: PathBuf,

    /// Print results as JSON instead of one line per region
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Denormalize raw dumps into the compiled database
    Build {
        /// Region dump: SQL (`kode`, `nama`) or JSON, optionally .gz
        #[arg(long)]
        regions: PathBuf,

        /// Postal code dump: SQL (`kode`, `kodepos`) or JSON, optionally .gz
        #[arg(long)]
        postal: Option<PathBuf>,

        /// Output file (default: the --db path)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write the database without gzip compression
        #[arg(long)]
        plain: bool,
    },

    /// Download a raw source dump (needs the `builder` feature)
    Fetch {
        /// Source URL (default: the upstream region dump)
        #[arg(long)]
        url: Option<String>,

        /// Where to save the download
        #[arg(long)]
        out: PathBuf,
    },

    /// Typo-tolerant search
    Search {
        /// general, district, subdistrict, city, province or postal
        #[arg(long = "by", default_value = "general")]
        by: SearchKind,

        /// Free text (or a 5-digit postal code with --by postal)
        query: String,
    },

    /// Exact lookup by 5-digit postal code
    Postal {
        code: String,
    },

    /// Show a summary of the database contents
    Stats,
}
