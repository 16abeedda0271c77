//! View projection: turns the dataset plus a filter snapshot into a complete,
//! self-contained description of what a display layer should show.
//!
//! Every call rebuilds the whole view from scratch. Nothing is cached between
//! calls, so the output can never lag behind the state it was built from.

use crate::date::format_date;
use crate::query::query_indices;
use crate::vocabulary::derive_vocabulary;
use crate::{FilterState, Paper};

/// Maximum number of summary characters shown on a card.
pub const SUMMARY_LIMIT: usize = 240;
/// Maximum number of authors listed on a card's metadata line.
pub const MAX_AUTHORS: usize = 5;
/// Appended to a summary that was cut at [`SUMMARY_LIMIT`].
pub const ELLIPSIS: char = '\u{2026}';

/// Overall state of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    /// No dataset yet.
    Loading,
    Ready,
    /// The dataset could not be loaded; the message is user-facing.
    Failed(String),
}

/// A selectable keyword button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordChip {
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Source,
    Category,
    Keyword,
}

/// A badge on a paper card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub kind: TagKind,
    pub label: String,
    /// Set on keyword tags that are part of the current selection.
    pub selected: bool,
}

/// Display-ready projection of one paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperCard {
    /// Position of the paper in the loaded dataset.
    pub index: usize,
    pub title: String,
    pub link: String,
    /// `YYYY-MM-DD`, or [`crate::date::UNKNOWN_DATE`].
    pub date: String,
    /// Up to [`MAX_AUTHORS`] authors, comma-joined.
    pub authors: String,
    pub summary: String,
    pub summary_truncated: bool,
    pub doi: Option<String>,
    pub tags: Vec<Tag>,
}

impl PaperCard {
    /// `date · authors`, or just the date when there are no authors.
    pub fn meta_line(&self) -> String {
        if self.authors.is_empty() {
            self.date.clone()
        } else {
            format!("{} \u{00b7} {}", self.date, self.authors)
        }
    }
}

/// Full replacement output of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub status: ViewStatus,
    pub keywords: Vec<KeywordChip>,
    pub cards: Vec<PaperCard>,
    /// Number of papers in the whole dataset.
    pub total: usize,
    /// The filter snapshot this view was rendered from.
    pub filter: FilterState,
}

impl View {
    /// An empty view for a session whose dataset has not arrived.
    pub fn loading(filter: &FilterState) -> Self {
        Self::empty(ViewStatus::Loading, filter)
    }

    /// An empty view for a session whose dataset failed to load.
    pub fn failed(message: impl Into<String>, filter: &FilterState) -> Self {
        Self::empty(ViewStatus::Failed(message.into()), filter)
    }

    fn empty(status: ViewStatus, filter: &FilterState) -> Self {
        Self {
            status,
            keywords: Vec::new(),
            cards: Vec::new(),
            total: 0,
            filter: filter.clone(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == ViewStatus::Ready
    }

    /// Number of keywords currently selected.
    pub fn active_keywords(&self) -> usize {
        self.keywords.iter().filter(|k| k.active).count()
    }
}

/// Rebuild the view for `papers` under `state`.
///
/// The vocabulary always comes from the full dataset, not the filtered list,
/// so deselecting is possible even when a keyword has no visible papers.
pub fn sync(papers: &[Paper], state: &FilterState) -> View {
    let keywords = derive_vocabulary(papers)
        .into_iter()
        .map(|label| KeywordChip {
            active: state.selected_keywords.contains(&label),
            label,
        })
        .collect();

    let cards: Vec<PaperCard> = query_indices(papers, state)
        .into_iter()
        .map(|i| build_card(i, &papers[i], state))
        .collect();

    tracing::debug!(
        total = papers.len(),
        shown = cards.len(),
        search = %state.search,
        selected = state.selected_keywords.len(),
        sort = %state.sort,
        "view synced"
    );

    View {
        status: ViewStatus::Ready,
        keywords,
        cards,
        total: papers.len(),
        filter: state.clone(),
    }
}

fn build_card(index: usize, paper: &Paper, state: &FilterState) -> PaperCard {
    let (summary, summary_truncated) = truncate_summary(&paper.summary);

    let mut tags = Vec::with_capacity(1 + paper.categories.len() + paper.matched_keywords.len());
    if let Some(source) = &paper.source {
        tags.push(Tag {
            kind: TagKind::Source,
            label: source.clone(),
            selected: false,
        });
    }
    tags.extend(paper.categories.iter().map(|c| Tag {
        kind: TagKind::Category,
        label: c.clone(),
        selected: false,
    }));
    tags.extend(paper.matched_keywords.iter().map(|k| Tag {
        kind: TagKind::Keyword,
        label: k.clone(),
        selected: state.selected_keywords.contains(k),
    }));

    PaperCard {
        index,
        title: paper.title.clone(),
        link: paper.link.clone(),
        date: format_date(paper.published_at),
        authors: paper
            .authors
            .iter()
            .take(MAX_AUTHORS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        summary,
        summary_truncated,
        doi: paper.doi.clone(),
        tags,
    }
}

/// Cut `summary` to [`SUMMARY_LIMIT`] characters, appending [`ELLIPSIS`]
/// when anything was removed.
pub fn truncate_summary(summary: &str) -> (String, bool) {
    match summary.char_indices().nth(SUMMARY_LIMIT) {
        None => (summary.to_string(), false),
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len_utf8());
            out.push_str(&summary[..cut]);
            out.push(ELLIPSIS);
            (out, true)
        }
    }
}
