// crates/wilayah-core/src/search.rs

//! # Search Dispatcher
//!
//! Six named lookups, one execution path. Each [`SearchKind`] maps to a
//! [`Strategy`] in a static table; [`SearchService::search`] validates the
//! input, asks the store for candidate rows, applies the strategy's
//! predicate and ordering, keeps the first [`RESULT_LIMIT`] rows and formats
//! them as [`Region`]s.
//!
//! | Kind        | Predicate                                             | Order                     |
//! |-------------|-------------------------------------------------------|---------------------------|
//! | General     | `full_text` contains the normalized query             | `full_text` ascending     |
//! | District    | `jw(district, q) >= 0.8`                              | score descending          |
//! | Subdistrict | `jw(subdistrict, q) >= 0.8`                           | score descending          |
//! | City        | `jw(city, "Kota " + q)` or `jw(city, "Kabupaten " + q)` `>= 0.8` | Kota score, then Kabupaten score, descending |
//! | Province    | `jw(province, q) >= 0.8`                              | score descending          |
//! | PostalCode  | `postal_code == raw input`                            | `full_text` ascending     |

use crate::api::{format_results, Region};
use crate::error::SearchError;
use crate::model::FlatRegion;
use crate::similarity::jaro_winkler;
use crate::text::{is_postal_code, normalize_query};
use crate::traits::{RegionBackend, RegionStore};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Minimum Jaro-Winkler score for a fuzzy match.
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Maximum number of rows returned by any search.
pub const RESULT_LIMIT: usize = 10;

/// Official prefixes of city-level names: "Kota" (city) and "Kabupaten" (regency).
pub const CITY_PREFIXES: &[&str] = &["Kota ", "Kabupaten "];

/// The six public lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    General,
    District,
    Subdistrict,
    City,
    Province,
    PostalCode,
}

/// Name column a similarity strategy scores against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Subdistrict,
    District,
    City,
    Province,
}

impl Field {
    #[inline]
    pub fn get<B: RegionBackend>(self, r: &FlatRegion<B>) -> &str {
        match self {
            Field::Subdistrict => r.subdistrict(),
            Field::District => r.district(),
            Field::City => r.city(),
            Field::Province => r.province(),
        }
    }
}

/// How a [`SearchKind`] retrieves and ranks rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Case-insensitive substring of `full_text`, ordered by `full_text`.
    Substring,
    /// Jaro-Winkler of `field` against `prefix + query` for each prefix.
    /// A row matches if any score reaches the threshold; rows are ordered by
    /// the scores, first prefix first.
    Similarity {
        field: Field,
        prefixes: &'static [&'static str],
    },
    /// Exact postal code, ordered by `full_text`.
    ExactPostal,
}

const NO_PREFIX: &[&str] = &[""];

impl SearchKind {
    pub const ALL: [SearchKind; 6] = [
        SearchKind::General,
        SearchKind::District,
        SearchKind::Subdistrict,
        SearchKind::City,
        SearchKind::Province,
        SearchKind::PostalCode,
    ];

    /// The dispatch table: one strategy per kind.
    pub fn strategy(self) -> Strategy {
        match self {
            SearchKind::General => Strategy::Substring,
            SearchKind::District => Strategy::Similarity {
                field: Field::District,
                prefixes: NO_PREFIX,
            },
            SearchKind::Subdistrict => Strategy::Similarity {
                field: Field::Subdistrict,
                prefixes: NO_PREFIX,
            },
            SearchKind::City => Strategy::Similarity {
                field: Field::City,
                prefixes: CITY_PREFIXES,
            },
            SearchKind::Province => Strategy::Similarity {
                field: Field::Province,
                prefixes: NO_PREFIX,
            },
            SearchKind::PostalCode => Strategy::ExactPostal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::General => "general",
            SearchKind::District => "district",
            SearchKind::Subdistrict => "subdistrict",
            SearchKind::City => "city",
            SearchKind::Province => "province",
            SearchKind::PostalCode => "postal",
        }
    }

    fn missing_param_message(self) -> &'static str {
        match self {
            SearchKind::PostalCode => "postal code parameter is required",
            _ => "query parameter is required",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" | "general" => Ok(SearchKind::General),
            "district" => Ok(SearchKind::District),
            "subdistrict" => Ok(SearchKind::Subdistrict),
            "city" => Ok(SearchKind::City),
            "province" => Ok(SearchKind::Province),
            "postal" | "postal_code" | "postalcode" => Ok(SearchKind::PostalCode),
            other => Err(SearchError::invalid_input(format!(
                "unknown search kind: {other}"
            ))),
        }
    }
}

// -----------------------------------------------------------------------------
// SERVICE
// -----------------------------------------------------------------------------

/// Runs searches against an immutable region store.
///
/// Cheap to clone; clones share the same store.
pub struct SearchService<S: RegionStore> {
    store: Arc<S>,
}

impl<S: RegionStore> Clone for SearchService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RegionStore> SearchService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// General relevance search over the concatenated names.
    pub fn search_general(&self, query: &str) -> Result<Vec<Region>, SearchError> {
        self.search(SearchKind::General, query)
    }

    pub fn search_district(&self, query: &str) -> Result<Vec<Region>, SearchError> {
        self.search(SearchKind::District, query)
    }

    pub fn search_subdistrict(&self, query: &str) -> Result<Vec<Region>, SearchError> {
        self.search(SearchKind::Subdistrict, query)
    }

    /// City search. A bare name matches both "Kota <name>" and "Kabupaten <name>".
    pub fn search_city(&self, query: &str) -> Result<Vec<Region>, SearchError> {
        self.search(SearchKind::City, query)
    }

    pub fn search_province(&self, query: &str) -> Result<Vec<Region>, SearchError> {
        self.search(SearchKind::Province, query)
    }

    /// Exact postal code lookup. Unlike the other searches, no match is an error.
    pub fn search_postal_code(&self, postal_code: &str) -> Result<Vec<Region>, SearchError> {
        self.search(SearchKind::PostalCode, postal_code)
    }

    /// The single execution path behind every lookup.
    pub fn search(&self, kind: SearchKind, raw: &str) -> Result<Vec<Region>, SearchError> {
        if raw.is_empty() {
            return Err(SearchError::invalid_input(kind.missing_param_message()));
        }

        tracing::info!(kind = %kind, query = raw, "processing search request");

        let results = match kind.strategy() {
            Strategy::Substring => self.run_substring(raw)?,
            Strategy::Similarity { field, prefixes } => {
                self.run_similarity(field, prefixes, raw)?
            }
            Strategy::ExactPostal => self.run_postal(raw)?,
        };

        tracing::info!(kind = %kind, query = raw, results = results.len(), "search completed");
        Ok(results)
    }

    fn run_substring(&self, raw: &str) -> Result<Vec<Region>, SearchError> {
        let needle = normalize_query(raw).to_lowercase();
        let mut rows = self
            .store
            .find_by_substring(&needle)
            .map_err(store_failure)?;
        rows.sort_by(|a, b| a.full_text().cmp(b.full_text()));
        rows.truncate(RESULT_LIMIT);
        Ok(format_results(rows))
    }

    fn run_similarity(
        &self,
        field: Field,
        prefixes: &[&str],
        raw: &str,
    ) -> Result<Vec<Region>, SearchError> {
        let query = normalize_query(raw);
        let targets: Vec<String> = prefixes.iter().map(|p| format!("{p}{query}")).collect();

        let mut scored: Vec<(Vec<f64>, &FlatRegion<S::Backend>)> = self
            .store
            .scan()
            .map_err(store_failure)?
            .filter_map(|row| {
                let value = field.get(row);
                let scores: Vec<f64> = targets.iter().map(|t| jaro_winkler(value, t)).collect();
                scores
                    .iter()
                    .any(|s| *s >= SIMILARITY_THRESHOLD)
                    .then_some((scores, row))
            })
            .collect();

        // Stable: equal score vectors keep store order.
        scored.sort_by(|(a, _), (b, _)| compare_desc(a, b));
        scored.truncate(RESULT_LIMIT);
        Ok(format_results(scored.into_iter().map(|(_, row)| row)))
    }

    fn run_postal(&self, raw: &str) -> Result<Vec<Region>, SearchError> {
        if !is_postal_code(raw) {
            return Err(SearchError::invalid_input(
                "postal code must be a 5-digit number",
            ));
        }

        let mut rows = self
            .store
            .find_by_postal_code(raw)
            .map_err(store_failure)?;

        if rows.is_empty() {
            tracing::info!(postal_code = raw, "no results found for postal code");
            return Err(SearchError::not_found(
                "no regions found for the provided postal code",
            ));
        }

        rows.sort_by(|a, b| a.full_text().cmp(b.full_text()));
        rows.truncate(RESULT_LIMIT);
        Ok(format_results(rows))
    }
}

/// Lexicographic, descending comparison of score vectors.
fn compare_desc(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| y.total_cmp(x))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn store_failure(err: crate::error::WilayahError) -> SearchError {
    tracing::error!(error = %err, "region store query failed");
    SearchError::StoreFailure("database query failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::DbStats;
    use crate::error::{Result, WilayahError};
    use crate::model::{denormalize, DefaultRegionDb};
    use crate::raw::{RawPostalRecord, RawRegionRecord};
    use crate::traits::{DefaultBackend, RegionsIter};

    fn fixture() -> DefaultRegionDb {
        let regions = [
            ("32", "Jawa Barat"),
            ("32.73", "Kota Bandung"),
            ("32.04", "Kabupaten Bandung"),
            ("32.17", "Kabupaten Bandung Barat"),
            ("32.73.01", "Sukasari"),
            ("32.73.10", "Bandung Kidul"),
            ("32.04.05", "Cileunyi"),
            ("32.17.01", "Lembang"),
            ("32.73.01.1001", "Sarijadi"),
            ("32.73.01.1002", "Gegerkalong"),
            ("32.73.01.1003", "Isola"),
            ("32.73.01.1004", "Sukarasa"),
            ("32.73.10.1001", "Batununggal"),
            ("32.73.10.1002", "Kujangsari"),
            ("32.04.05.2001", "Cibiru Wetan"),
            ("32.04.05.2002", "Cibiru Hilir"),
            ("32.04.05.2003", "Cileunyi Kulon"),
            ("32.17.01.2001", "Lembang"),
            ("31", "DKI Jakarta"),
            ("31.71", "Kota Jakarta Pusat"),
            ("31.71.06", "Menteng"),
            ("31.71.06.1001", "Menteng"),
            ("31.71.06.1002", "Pegangsaan"),
            ("31.71.06.1003", "Cikini"),
        ];
        let postal = [
            ("32.73.01.1001", "40151"),
            ("32.73.01.1002", "40153"),
            ("31.71.06.1001", "10310"),
            ("31.71.06.1002", "10320"),
            ("31.71.06.1003", "10330"),
        ];
        let (db, _) = denormalize::<DefaultBackend>(
            regions
                .iter()
                .map(|(c, n)| RawRegionRecord::new(*c, *n))
                .collect(),
            postal
                .iter()
                .map(|(c, p)| RawPostalRecord::new(*c, *p))
                .collect(),
        )
        .unwrap();
        db
    }

    fn service() -> SearchService<DefaultRegionDb> {
        SearchService::new(Arc::new(fixture()))
    }

    #[test]
    fn empty_query_is_invalid_for_every_kind() {
        let svc = service();
        for kind in SearchKind::ALL {
            let err = svc.search(kind, "").unwrap_err();
            assert!(matches!(err, SearchError::InvalidInput(_)), "{kind}");
        }
    }

    #[test]
    fn general_search_is_case_insensitive_and_sorted() {
        let out = service().search_general("MENTENG").unwrap();
        assert_eq!(out.len(), 3);
        let texts: Vec<_> = out.iter().map(|r| r.full_text.as_str()).collect();
        let mut sorted = texts.clone();
        sorted.sort();
        assert_eq!(texts, sorted);
        assert!(out.iter().all(|r| r.full_text.contains("menteng")));
    }

    #[test]
    fn general_search_without_match_is_empty() {
        let out = service().search_general("surabaya").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn general_search_applies_limit() {
        // All 13 rows contain an "a".
        let out = service().search_general("a").unwrap();
        assert_eq!(out.len(), RESULT_LIMIT);
    }

    #[test]
    fn district_search_filters_and_ranks() {
        let out = service().search_district("bandung").unwrap();
        assert!(!out.is_empty());
        assert!(out.len() <= RESULT_LIMIT);

        let scores: Vec<f64> = out
            .iter()
            .map(|r| jaro_winkler(&r.district, "Bandung"))
            .collect();
        assert!(scores.iter().all(|s| *s >= SIMILARITY_THRESHOLD));
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert!(out.iter().all(|r| r.district == "Bandung Kidul"));
    }

    #[test]
    fn subdistrict_search_tolerates_typos() {
        let out = service().search_subdistrict("sarijad").unwrap();
        assert_eq!(out[0].subdistrict, "Sarijadi");
    }

    #[test]
    fn province_search() {
        let out = service().search_province("jawa barat").unwrap();
        assert_eq!(out.len(), RESULT_LIMIT);
        assert!(out.iter().all(|r| r.province == "Jawa Barat"));

        let none = service().search_province("papua").unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn city_search_matches_kota_and_kabupaten() {
        let out = service().search_city("bandung").unwrap();
        let cities: Vec<_> = out.iter().map(|r| r.city.as_str()).collect();

        assert!(cities.contains(&"Kota Bandung"));
        assert!(cities.contains(&"Kabupaten Bandung"));
        // "Kota" matches come first.
        let first_kab = cities.iter().position(|c| c.starts_with("Kabupaten"));
        let last_kota = cities.iter().rposition(|c| c.starts_with("Kota"));
        assert!(last_kota < first_kab);
        assert!(!cities.contains(&"Kota Jakarta Pusat"));
    }

    #[test]
    fn city_rows_satisfy_one_of_the_prefixes() {
        for r in service().search_city("bandung").unwrap() {
            let kota = jaro_winkler(&r.city, "Kota Bandung");
            let kab = jaro_winkler(&r.city, "Kabupaten Bandung");
            assert!(kota >= SIMILARITY_THRESHOLD || kab >= SIMILARITY_THRESHOLD);
        }
    }

    #[test]
    fn postal_search() {
        let svc = service();

        let out = svc.search_postal_code("10310").unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].subdistrict, "Menteng");

        assert!(matches!(
            svc.search_postal_code("99999").unwrap_err(),
            SearchError::NotFound(_)
        ));
        assert!(matches!(
            svc.search_postal_code("123").unwrap_err(),
            SearchError::InvalidInput(_)
        ));
        assert!(matches!(
            svc.search_postal_code(" 10310").unwrap_err(),
            SearchError::InvalidInput(_)
        ));
    }

    #[test]
    fn shared_postal_code_is_sorted_and_limited() {
        // Ids ascend while names descend, so store order is the reverse of
        // full_text order.
        let names = [
            "Tamansari",
            "Sekeloa",
            "Sadang Serang",
            "Lebaksiliwangi",
            "Lebakgede",
            "Dago",
            "Cipaganti",
            "Cihapit",
            "Cigadung",
            "Babakan",
            "Antapani",
            "Ancol",
        ];
        let mut regions = vec![
            RawRegionRecord::new("32", "Jawa Barat"),
            RawRegionRecord::new("32.73", "Kota Bandung"),
            RawRegionRecord::new("32.73.02", "Coblong"),
        ];
        let mut postal = Vec::new();
        for (i, name) in names.iter().enumerate() {
            let code = format!("32.73.02.{}", 1001 + i);
            regions.push(RawRegionRecord::new(&code, *name));
            postal.push(RawPostalRecord::new(&code, "40132"));
        }
        let (db, _) = denormalize::<DefaultBackend>(regions, postal).unwrap();
        let svc = SearchService::new(Arc::new(db));

        let out = svc.search_postal_code("40132").unwrap();
        let got: Vec<_> = out.iter().map(|r| r.subdistrict.as_str()).collect();
        assert_eq!(
            got,
            [
                "Ancol",
                "Antapani",
                "Babakan",
                "Cigadung",
                "Cihapit",
                "Cipaganti",
                "Dago",
                "Lebakgede",
                "Lebaksiliwangi",
                "Sadang Serang",
            ]
        );
    }

    #[test]
    fn every_kind_has_a_strategy() {
        let similarity = SearchKind::ALL
            .iter()
            .filter(|k| matches!(k.strategy(), Strategy::Similarity { .. }))
            .count();
        assert_eq!(similarity, 4);
        assert_eq!(SearchKind::General.strategy(), Strategy::Substring);
        assert_eq!(SearchKind::PostalCode.strategy(), Strategy::ExactPostal);
        assert_eq!(
            SearchKind::City.strategy(),
            Strategy::Similarity {
                field: Field::City,
                prefixes: CITY_PREFIXES,
            }
        );
    }

    #[test]
    fn punctuation_only_query() {
        let svc = service();
        assert_eq!(svc.search_general("---").unwrap().len(), RESULT_LIMIT);
        assert!(svc.search_district("---").unwrap().is_empty());
    }

    #[test]
    fn kinds_parse_from_names() {
        for kind in SearchKind::ALL {
            assert_eq!(kind.as_str().parse::<SearchKind>().unwrap(), kind);
        }
        assert_eq!("all".parse::<SearchKind>().unwrap(), SearchKind::General);
        assert!("country".parse::<SearchKind>().is_err());
    }

    #[test]
    fn score_vectors_compare_lexicographically() {
        assert_eq!(compare_desc(&[1.0, 0.5], &[0.9, 1.0]), Ordering::Less);
        assert_eq!(compare_desc(&[0.9, 0.8], &[0.9, 0.9]), Ordering::Greater);
        assert_eq!(compare_desc(&[0.9], &[0.9]), Ordering::Equal);
    }

    struct Unreachable;

    impl RegionStore for Unreachable {
        type Backend = DefaultBackend;

        fn scan(&self) -> Result<RegionsIter<'_, DefaultBackend>> {
            Err(WilayahError::NotFound("regions.bin".into()))
        }

        fn ping(&self) -> Result<()> {
            Err(WilayahError::NotFound("regions.bin".into()))
        }

        fn stats(&self) -> Result<DbStats> {
            Err(WilayahError::NotFound("regions.bin".into()))
        }
    }

    #[test]
    fn store_failure_hides_details() {
        let svc = SearchService::new(Arc::new(Unreachable));
        for kind in [SearchKind::General, SearchKind::City] {
            let err = svc.search(kind, "bandung").unwrap_err();
            assert_eq!(err, SearchError::StoreFailure("database query failed".into()));
        }
        let err = svc.search_postal_code("40151").unwrap_err();
        assert!(matches!(err, SearchError::StoreFailure(_)));
    }
}
