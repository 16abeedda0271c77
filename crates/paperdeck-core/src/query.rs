//! Filtering and sorting of the dataset for display.

use std::cmp::Ordering;

use crate::{FilterState, Paper, SortOrder};

/// Papers matching `state`, ordered by publication date.
///
/// A paper is kept when its title or summary contains the search text
/// (case-insensitive) and it carries every selected keyword. The sort is
/// stable in both directions, and `papers` itself is left untouched.
pub fn query<'a>(papers: &'a [Paper], state: &FilterState) -> Vec<&'a Paper> {
    query_indices(papers, state)
        .into_iter()
        .map(|i| &papers[i])
        .collect()
}

/// Same as [`query`], but yields positions into `papers`.
pub fn query_indices(papers: &[Paper], state: &FilterState) -> Vec<usize> {
    let needle = state.normalized_search();

    let mut indices: Vec<usize> = papers
        .iter()
        .enumerate()
        .filter(|(_, p)| matches_text(p, &needle) && p.has_all_keywords(&state.selected_keywords))
        .map(|(i, _)| i)
        .collect();

    indices.sort_by(|&a, &b| compare_published(&papers[a], &papers[b], state.sort));
    indices
}

/// Whether the title or summary contains `needle`, which must already be
/// lowercased. An empty needle matches everything.
pub fn matches_text(paper: &Paper, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack = format!("{}\n{}", paper.title, paper.summary).to_lowercase();
    haystack.contains(needle)
}

/// Publication-date comparator. Unparsable dates compare as the earliest
/// instant, so they land at the end of `Newest` and the start of `Oldest`.
pub fn compare_published(a: &Paper, b: &Paper, sort: SortOrder) -> Ordering {
    match sort {
        SortOrder::Newest => b.published_at.cmp(&a.published_at),
        SortOrder::Oldest => a.published_at.cmp(&b.published_at),
    }
}
