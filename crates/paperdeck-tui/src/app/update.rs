use paperdeck_core::FilterEvent;

use super::{App, Focus, InputMode, osc52_copy};
use crate::action::Action;

impl App {
    /// Apply one action. Returns `true` when the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        if !matches!(action, Action::Tick | Action::None | Action::Resize(..)) {
            self.status_message = None;
        }

        // Help overlay swallows everything except closing keys
        if self.show_help {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::ToggleHelp | Action::NavigateBack => self.show_help = false,
                Action::Tick => self.tick = self.tick.wrapping_add(1),
                Action::Resize(_w, h) => self.resize(h),
                _ => {}
            }
            return false;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
                return true;
            }
            Action::Tick => self.tick = self.tick.wrapping_add(1),
            Action::Resize(_w, h) => self.resize(h),
            Action::ToggleHelp => self.show_help = true,

            Action::StartSearch => self.input_mode = InputMode::Search,
            Action::SearchInput(c) => {
                let mut text = self.session.state().search.clone();
                text.push(c);
                self.apply(FilterEvent::Search(text));
            }
            Action::SearchBackspace => {
                let mut text = self.session.state().search.clone();
                if text.pop().is_some() {
                    self.apply(FilterEvent::Search(text));
                }
            }
            Action::SearchConfirm => self.input_mode = InputMode::Normal,
            Action::SearchCancel => {
                self.input_mode = InputMode::Normal;
                if !self.session.state().search.is_empty() {
                    self.apply(FilterEvent::Search(String::new()));
                }
            }

            Action::ToggleFocus => self.focus = self.focus.toggle(),
            Action::NavigateBack => {
                if self.focus == Focus::Keywords {
                    self.focus = Focus::List;
                } else if !self.session.state().search.is_empty() {
                    self.apply(FilterEvent::Search(String::new()));
                }
            }
            Action::CycleSort => {
                let next = self.session.state().sort.next();
                self.apply(FilterEvent::SetSort(next));
                self.status_message = Some(format!("Sorted {} first", next.label()));
            }
            Action::ClearKeywords => {
                if !self.session.state().selected_keywords.is_empty() {
                    self.apply(FilterEvent::ClearKeywords);
                }
            }

            Action::MoveLeft if self.focus == Focus::Keywords => {
                self.keyword_cursor = self.keyword_cursor.saturating_sub(1);
            }
            Action::MoveRight if self.focus == Focus::Keywords => {
                if self.keyword_cursor + 1 < self.view.keywords.len() {
                    self.keyword_cursor += 1;
                }
            }
            Action::Select if self.focus == Focus::Keywords => {
                if let Some(chip) = self.view.keywords.get(self.keyword_cursor) {
                    let label = chip.label.clone();
                    self.apply(FilterEvent::ToggleKeyword(label));
                }
            }

            Action::MoveDown => {
                if self.cursor + 1 < self.view.cards.len() {
                    self.cursor += 1;
                }
            }
            Action::MoveUp => self.cursor = self.cursor.saturating_sub(1),
            Action::PageDown => {
                let page = self.visible_rows.max(1);
                self.cursor = (self.cursor + page).min(self.view.cards.len().saturating_sub(1));
            }
            Action::PageUp => {
                let page = self.visible_rows.max(1);
                self.cursor = self.cursor.saturating_sub(page);
            }
            Action::GoTop => self.cursor = 0,
            Action::GoBottom => self.cursor = self.view.cards.len().saturating_sub(1),

            Action::CopyToClipboard => {
                if let Some(link) = self.selected_card().map(|c| c.link.clone()) {
                    if link.is_empty() {
                        self.status_message = Some("Paper has no link".to_string());
                    } else {
                        osc52_copy(&link);
                        self.status_message = Some("Copied link to clipboard".to_string());
                    }
                }
            }

            Action::MoveLeft | Action::MoveRight | Action::Select | Action::None => {}
        }
        false
    }

    fn resize(&mut self, height: u16) {
        // header, search, keyword bar, detail pane, table chrome and footer
        self.visible_rows = (height as usize).saturating_sub(17).max(1);
    }
}
