//! Keyword vocabulary derived from the dataset.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::Paper;

/// All distinct `matched_keywords` across `papers`, in locale order.
///
/// Computed from the full dataset regardless of any active filter, so that
/// keywords hidden by the current selection stay selectable.
pub fn derive_vocabulary(papers: &[Paper]) -> Vec<String> {
    let distinct: BTreeSet<&str> = papers
        .iter()
        .flat_map(|p| p.matched_keywords.iter().map(String::as_str))
        .collect();

    let mut keywords: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    keywords.sort_by(|a, b| locale_cmp(a, b));
    keywords
}

/// Locale-style string comparison.
///
/// Compares accent- and case-insensitively first, so `"Éclair"` sorts next
/// to `"eclair"` rather than after `"z"`, then falls back to code point order
/// to keep the ordering total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
