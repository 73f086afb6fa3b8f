// crates/wilayah-core/src/model/flat.rs
use crate::common::DbStats;
use crate::error::Result;
use crate::traits::{RegionBackend, RegionStore, RegionsIter};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The flat, search-ready relation.
///
/// One row per subdistrict, sorted by id. Built once by the denormalizer and
/// never mutated afterwards, so it can be shared freely between threads.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct RegionDb<B: RegionBackend> {
    pub regions: Vec<FlatRegion<B>>,
}

/// A denormalized subdistrict row carrying the names of all its ancestors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FlatRegion<B: RegionBackend> {
    /// 13-character subdistrict code, e.g. `32.73.01.1001`.
    pub id: B::Str,
    pub subdistrict: B::Str,
    pub district: B::Str,
    pub city: B::Str,
    pub province: B::Str,
    pub postal_code: Option<B::Str>,
    /// `lowercase(province city district subdistrict)`, used by general search only.
    pub full_text: B::Str,
}

impl<B: RegionBackend> FlatRegion<B> {
    pub fn id(&self) -> &str {
        self.id.as_ref()
    }

    pub fn subdistrict(&self) -> &str {
        self.subdistrict.as_ref()
    }

    pub fn district(&self) -> &str {
        self.district.as_ref()
    }

    pub fn city(&self) -> &str {
        self.city.as_ref()
    }

    pub fn province(&self) -> &str {
        self.province.as_ref()
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_ref().map(|s| s.as_ref())
    }

    pub fn full_text(&self) -> &str {
        self.full_text.as_ref()
    }
}

impl<B: RegionBackend> RegionDb<B> {
    pub fn new(mut regions: Vec<FlatRegion<B>>) -> Self {
        regions.sort_by(|a, b| a.id().cmp(b.id()));
        Self { regions }
    }

    pub fn regions(&self) -> &[FlatRegion<B>] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Exact lookup by subdistrict code. Rows are id-sorted.
    pub fn find_by_id(&self, id: &str) -> Option<&FlatRegion<B>> {
        self.regions
            .binary_search_by(|r| r.id().cmp(id))
            .ok()
            .map(|i| &self.regions[i])
    }
}

impl<B: RegionBackend> RegionStore for RegionDb<B> {
    type Backend = B;

    fn scan(&self) -> Result<RegionsIter<'_, B>> {
        Ok(Box::new(self.regions.iter()))
    }

    fn stats(&self) -> Result<DbStats> {
        let mut provinces = HashSet::new();
        let mut cities = HashSet::new();
        let mut districts = HashSet::new();
        let mut with_postal_code = 0;

        // Ancestor codes are the id prefixes; names are not unique.
        for r in &self.regions {
            let id = r.id();
            provinces.insert(id.get(..2).unwrap_or(id));
            cities.insert(id.get(..5).unwrap_or(id));
            districts.insert(id.get(..8).unwrap_or(id));
            if r.postal_code.is_some() {
                with_postal_code += 1;
            }
        }

        Ok(DbStats {
            regions: self.regions.len(),
            provinces: provinces.len(),
            cities: cities.len(),
            districts: districts.len(),
            with_postal_code,
        })
    }
}
