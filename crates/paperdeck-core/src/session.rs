//! The session controller: owns the dataset and the single mutable filter
//! state, and re-renders after every change.

use crate::render::{View, sync};
use crate::{FilterEvent, FilterState, LoadError, Paper};

/// Lifecycle of the dataset within a session.
#[derive(Debug, Default)]
pub enum SessionPhase {
    /// Waiting for the dataset.
    #[default]
    Idle,
    Loaded(Vec<Paper>),
    /// The load failed; nothing will be shown for the rest of the session.
    Failed(LoadError),
}

/// One browsing session.
///
/// All reads and writes of the filter state go through this type, and every
/// mutation returns the freshly rendered [`View`].
#[derive(Debug, Default)]
pub struct Session {
    phase: SessionPhase,
    state: FilterState,
}

impl Session {
    pub fn new(state: FilterState) -> Self {
        Self {
            phase: SessionPhase::Idle,
            state,
        }
    }

    /// Record the outcome of the one dataset load and render it.
    ///
    /// Only the first outcome is accepted; a session never reloads.
    pub fn finish_load(&mut self, result: Result<Vec<Paper>, LoadError>) -> View {
        if !matches!(self.phase, SessionPhase::Idle) {
            tracing::warn!("ignoring dataset load outcome: session already settled");
            return self.render();
        }

        self.phase = match result {
            Ok(papers) => {
                tracing::info!(count = papers.len(), "session loaded");
                SessionPhase::Loaded(papers)
            }
            Err(e) => {
                tracing::warn!(error = %e, "dataset load failed");
                SessionPhase::Failed(e)
            }
        };
        self.render()
    }

    /// Apply a user interaction, then re-render from the new state.
    pub fn handle(&mut self, event: FilterEvent) -> View {
        tracing::trace!(?event, "filter event");
        event.apply(&mut self.state);
        self.render()
    }

    /// Render from the current state without changing anything.
    pub fn render(&self) -> View {
        match &self.phase {
            SessionPhase::Idle => View::loading(&self.state),
            SessionPhase::Loaded(papers) => sync(papers, &self.state),
            SessionPhase::Failed(e) => View::failed(e.to_string(), &self.state),
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// The loaded dataset, or an empty slice before/without a successful load.
    pub fn papers(&self) -> &[Paper] {
        match &self.phase {
            SessionPhase::Loaded(papers) => papers,
            _ => &[],
        }
    }

    pub fn paper(&self, index: usize) -> Option<&Paper> {
        self.papers().get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ViewStatus;
    use crate::{SortOrder, parse_papers};

    fn sample() -> Vec<Paper> {
        parse_papers(
            br#"[
                {"title": "A", "summary": "x", "published": "2024-01-01", "matched_keywords": ["ml"]},
                {"title": "B", "summary": "y", "published": "2024-06-01", "matched_keywords": ["nlp", "ml"]}
            ]"#,
        )
        .unwrap()
    }

    fn titles(view: &View) -> Vec<&str> {
        view.cards.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn idle_session_renders_loading() {
        let session = Session::default();
        assert_eq!(session.render().status, ViewStatus::Loading);
        assert!(session.papers().is_empty());
    }

    #[test]
    fn interactions_before_load_are_harmless() {
        let mut session = Session::default();
        let view = session.handle(FilterEvent::ToggleKeyword("nlp".into()));
        assert_eq!(view.status, ViewStatus::Loading);
        assert!(view.cards.is_empty());

        // The selection made early still applies once data arrives.
        let view = session.finish_load(Ok(sample()));
        assert_eq!(titles(&view), ["B"]);
    }

    #[test]
    fn every_event_rerenders() {
        let mut session = Session::default();
        let view = session.finish_load(Ok(sample()));
        assert_eq!(titles(&view), ["B", "A"]);

        let view = session.handle(FilterEvent::SetSort(SortOrder::Oldest));
        assert_eq!(titles(&view), ["A", "B"]);

        let view = session.handle(FilterEvent::Search("X".into()));
        assert_eq!(titles(&view), ["A"]);

        let view = session.handle(FilterEvent::Search(String::new()));
        let view2 = session.handle(FilterEvent::ToggleKeyword("nlp".into()));
        assert_eq!(titles(&view), ["A", "B"]);
        assert_eq!(titles(&view2), ["B"]);
        assert!(view2.keywords.iter().any(|k| k.label == "nlp" && k.active));

        let view = session.handle(FilterEvent::ToggleKeyword("nlp".into()));
        assert_eq!(titles(&view), ["A", "B"]);
        assert!(view.keywords.iter().all(|k| !k.active));
    }

    #[test]
    fn failed_load_is_terminal() {
        let mut session = Session::default();
        let err = parse_papers(b"not json").unwrap_err();
        let view = session.finish_load(Err(err));
        assert!(matches!(view.status, ViewStatus::Failed(_)));

        // A late success does not revive the session.
        let view = session.finish_load(Ok(sample()));
        assert!(matches!(view.status, ViewStatus::Failed(_)));
        assert!(matches!(session.phase(), SessionPhase::Failed(_)));

        let view = session.handle(FilterEvent::Search("x".into()));
        assert!(matches!(view.status, ViewStatus::Failed(_)));
        assert!(view.cards.is_empty());
    }

    #[test]
    fn second_load_is_ignored() {
        let mut session = Session::default();
        session.finish_load(Ok(sample()));
        let view = session.finish_load(Ok(Vec::new()));
        assert_eq!(view.total, 2);
    }

    #[test]
    fn view_carries_state_snapshot() {
        let mut session = Session::new(FilterState::with_sort(SortOrder::Oldest));
        session.finish_load(Ok(sample()));
        let view = session.handle(FilterEvent::Search("y".into()));
        assert_eq!(view.filter, *session.state());
        assert_eq!(view.filter.sort, SortOrder::Oldest);
        assert_eq!(session.paper(view.cards[0].index).map(|p| p.title.as_str()), Some("B"));
    }
}
