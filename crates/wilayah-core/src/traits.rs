// crates/wilayah-core/src/traits.rs
use crate::common::DbStats;
use crate::error::Result;
use crate::model::FlatRegion;
use serde::{Deserialize, Serialize};

/// Storage backend for the strings held by every region row.
///
/// This abstraction allows the crate to swap how textual data is stored
/// internally (for example to use a more compact string type) without
/// changing the accessors, which always hand out `&str` views.
///
/// Implementors must be `Clone + Send + Sync + 'static` and their string type
/// must be serializable so a database can be cached via bincode.
pub trait RegionBackend: Clone + Send + Sync + 'static {
    type Str: Clone
        + Send
        + Sync
        + std::fmt::Debug
        + PartialEq
        + Serialize
        + for<'de> Deserialize<'de>
        + AsRef<str>;

    fn str_from(s: &str) -> Self::Str;

    #[inline]
    fn str_to_string(v: &Self::Str) -> String {
        v.as_ref().to_string()
    }
}

/// Default backend: plain `String`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefaultBackend;

impl RegionBackend for DefaultBackend {
    type Str = String;

    #[inline]
    fn str_from(s: &str) -> Self::Str {
        s.to_owned()
    }

    #[inline]
    fn str_to_string(v: &Self::Str) -> String {
        v.clone()
    }
}

/// An iterator over borrowed region rows.
/// Box<dyn ...> lets stores return whatever iterator suits their layout.
pub type RegionsIter<'a, B> = Box<dyn Iterator<Item = &'a FlatRegion<B>> + 'a>;

/// The read-only relation the search engine runs against.
///
/// Only [`RegionStore::scan`] is required; the other predicates have
/// scan-based defaults that a store with real indexes can override.
/// Every method is fallible so that stores backed by something other than
/// memory can report that they are unreachable.
pub trait RegionStore: Send + Sync {
    type Backend: RegionBackend;

    /// Column scan over every row, in store order.
    fn scan(&self) -> Result<RegionsIter<'_, Self::Backend>>;

    /// Rows whose `full_text` contains `needle`.
    ///
    /// `full_text` is stored lowercase, so callers pass a lowercase needle.
    fn find_by_substring(&self, needle: &str) -> Result<Vec<&FlatRegion<Self::Backend>>> {
        Ok(self
            .scan()?
            .filter(|r| r.full_text().contains(needle))
            .collect())
    }

    /// Rows whose postal code equals `code` exactly.
    fn find_by_postal_code(&self, code: &str) -> Result<Vec<&FlatRegion<Self::Backend>>> {
        Ok(self
            .scan()?
            .filter(|r| r.postal_code() == Some(code))
            .collect())
    }

    /// Cheap reachability probe used by health checks.
    fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn stats(&self) -> Result<DbStats>;
}
