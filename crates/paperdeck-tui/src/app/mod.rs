mod update;
mod util;
use util::*;

use paperdeck_core::{FilterEvent, FilterState, PaperCard, Session, View};

use crate::theme::Theme;
use crate::tui_event::LoadEvent;

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Keywords,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Self::List => Self::Keywords,
            Self::Keywords => Self::List,
        }
    }
}

pub struct App {
    pub session: Session,
    /// Last view produced by the session; every draw reads from this.
    pub view: View,
    /// Where the dataset is being loaded from, for the header.
    pub source_label: String,
    /// Row in `view.cards`.
    pub cursor: usize,
    /// Chip in `view.keywords`.
    pub keyword_cursor: usize,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub should_quit: bool,
    pub tick: usize,
    pub theme: Theme,
    /// Height of the visible table area (set on resize, used for page up/down).
    pub visible_rows: usize,
    /// One-line feedback shown in the footer until the next keypress.
    pub status_message: Option<String>,
}

impl App {
    pub fn new(source_label: String, initial: FilterState, theme: Theme) -> Self {
        let session = Session::new(initial);
        let view = session.render();
        Self {
            session,
            view,
            source_label,
            cursor: 0,
            keyword_cursor: 0,
            focus: Focus::List,
            input_mode: InputMode::Normal,
            show_help: false,
            should_quit: false,
            tick: 0,
            theme,
            visible_rows: 20,
            status_message: None,
        }
    }

    pub fn handle_load_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Finished(result) => {
                if let Err(e) = &result {
                    tracing::error!(source = %self.source_label, error = %e, "dataset load failed");
                }
                let view = self.session.finish_load(result);
                self.set_view(view, None);
            }
        }
    }

    /// Feed a filter change through the session and keep the selection on
    /// the same paper when it survives the new filter.
    pub fn apply(&mut self, event: FilterEvent) {
        let selected = self.selected_card().map(|c| c.index);
        let view = self.session.handle(event);
        self.set_view(view, selected);
    }

    fn set_view(&mut self, view: View, keep: Option<usize>) {
        self.view = view;
        self.cursor = keep
            .and_then(|index| self.view.cards.iter().position(|c| c.index == index))
            .unwrap_or(self.cursor);
        self.cursor = self.cursor.min(self.view.cards.len().saturating_sub(1));
        self.keyword_cursor = self
            .keyword_cursor
            .min(self.view.keywords.len().saturating_sub(1));
    }

    pub fn selected_card(&self) -> Option<&PaperCard> {
        self.view.cards.get(self.cursor)
    }

    pub fn view(&self, f: &mut ratatui::Frame) {
        crate::view::browse::render(f, self);
        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }
    }
}

#[cfg(test)]
mod tests;
