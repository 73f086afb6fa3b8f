//! wilayah-cli
//! ===========
//!
//! Command-line interface for the `wilayah-core` region database.
//!
//! This crate primarily provides a binary (`wilayah`). The small library
//! target exists so the overview renders as a documentation page.
//!
//! Quick start
//! -----------
//!
//! ```text
//! wilayah fetch --out data/wilayah.sql
//! wilayah build --regions data/wilayah.sql --postal data/wilayah_kodepos.sql
//! wilayah search --by city bandung
//! wilayah postal 40151
//! wilayah stats
//! ```
//!
//! For programmatic access use the [`wilayah-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
