// crates/wilayah-core/src/similarity.rs

//! Jaro-Winkler string similarity.
//!
//! The only approximate-matching primitive used by the search engine. Scores
//! are in `[0, 1]`, `1.0` meaning identical. Comparison is case-sensitive and
//! works on Unicode scalar values; callers normalize case beforehand.

/// Winkler prefix scaling factor.
pub const PREFIX_SCALE: f64 = 0.1;

/// Longest common prefix that still earns a bonus.
pub const MAX_PREFIX: usize = 4;

/// Jaro similarity of `a` and `b`.
///
/// Two characters match when they are equal and no further apart than
/// `max(len(a), len(b)) / 2 - 1` positions. Each character of `b` is consumed
/// at most once, scanning `a` left to right. Transpositions are the matched
/// pairs that appear in a different relative order, halved.
///
/// Two empty strings are identical (`1.0`); an empty string against a
/// non-empty one scores `0.0`.
pub fn jaro(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let window = (a.len().max(b.len()) / 2).saturating_sub(1);
    let mut b_taken = vec![false; b.len()];
    let mut a_matched: Vec<char> = Vec::with_capacity(a.len().min(b.len()));

    for (i, &ca) in a.iter().enumerate() {
        let lo = i.saturating_sub(window);
        let hi = (i + window + 1).min(b.len());
        for j in lo..hi {
            if !b_taken[j] && b[j] == ca {
                b_taken[j] = true;
                a_matched.push(ca);
                break;
            }
        }
    }

    if a_matched.is_empty() {
        return 0.0;
    }

    let b_matched = b
        .iter()
        .zip(&b_taken)
        .filter_map(|(c, taken)| taken.then_some(*c));
    let out_of_order = a_matched
        .iter()
        .zip(b_matched)
        .filter(|(x, y)| **x != *y)
        .count();

    let m = a_matched.len() as f64;
    let t = out_of_order as f64 / 2.0;

    (m / a.len() as f64 + m / b.len() as f64 + (m - t) / m) / 3.0
}

/// Jaro-Winkler similarity: Jaro boosted by up to four shared leading characters.
///
/// `jw = jaro + l * 0.1 * (1 - jaro)`
///
/// # Examples
///
/// ```rust
/// use wilayah_core::similarity::jaro_winkler;
///
/// assert_eq!(jaro_winkler("Bandung", "Bandung"), 1.0);
/// assert!(jaro_winkler("Bandung", "Bandunh") > 0.9);
/// assert!(jaro_winkler("Bandung", "Menteng") < 0.8);
/// ```
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    let j = jaro(a, b);
    let prefix = a
        .chars()
        .zip(b.chars())
        .take(MAX_PREFIX)
        .take_while(|(x, y)| x == y)
        .count();

    (j + prefix as f64 * PREFIX_SCALE * (1.0 - j)).min(1.0)
}
