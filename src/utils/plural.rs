//! Pluralization helpers for summary lines.

/// `"s"` unless `n == 1`.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Count followed by the noun, pluralized: `3 outputs`, `1 conversion`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", plural_s(count))
}
