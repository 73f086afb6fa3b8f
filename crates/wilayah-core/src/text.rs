// crates/wilayah-core/src/text.rs

//! Query text helpers.

/// Convert raw user input into the canonical match key.
///
/// Steps, in order:
/// 1\) lowercase everything
/// 2\) drop every character that is not an ASCII letter, ASCII digit or space
/// 3\) title-case each space-delimited token
/// 4\) trim
///
/// Punctuation is deleted rather than replaced, so hyphenated words fuse:
/// `"jakarta-barat"` becomes `"Jakartabarat"`. Only the first character of a
/// token is uppercased, so `"123abc"` stays as is.
///
/// # Examples
///
/// ```rust
/// use wilayah_core::text::normalize_query;
///
/// assert_eq!(normalize_query("  jakarta BARAT "), "Jakarta Barat");
/// assert_eq!(normalize_query("jakarta-barat"), "Jakartabarat");
/// assert_eq!(normalize_query(""), "");
/// ```
pub fn normalize_query(raw: &str) -> String {
    let lowered = raw.to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    let mut at_token_start = true;
    for c in lowered.chars() {
        if !(c.is_ascii_alphanumeric() || c == ' ') {
            continue;
        }
        if at_token_start {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        at_token_start = c == ' ';
    }

    out.trim().to_string()
}

/// `true` if `s` is exactly five ASCII digits.
pub fn is_postal_code(s: &str) -> bool {
    s.len() == 5 && s.bytes().all(|b| b.is_ascii_digit())
}
