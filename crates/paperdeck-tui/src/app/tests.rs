use super::*;
use crate::action::Action;
use paperdeck_core::{LoadError, SortOrder, ViewStatus, parse_papers};

const DATA: &str = r#"[
    {"title": "Gamma", "summary": "Protein folding", "published": "2024-03-01",
     "link": "https://example.org/g", "matched_keywords": ["bio"]},
    {"title": "Alpha", "summary": "Language models", "published": "2024-01-01",
     "link": "https://example.org/a", "matched_keywords": ["llm", "nlp"]},
    {"title": "Beta", "summary": "More language", "published": "2024-02-01",
     "link": "", "matched_keywords": ["nlp"]}
]"#;

/// Create a minimal App for testing (no terminal, no load task).
fn test_app() -> App {
    App::new("test.json".to_string(), FilterState::default(), Theme::hacker())
}

fn loaded_app() -> App {
    let mut app = test_app();
    app.handle_load_event(LoadEvent::Finished(parse_papers(DATA.as_bytes())));
    app
}

fn titles(app: &App) -> Vec<&str> {
    app.view.cards.iter().map(|c| c.title.as_str()).collect()
}

fn type_text(app: &mut App, text: &str) {
    app.update(Action::StartSearch);
    for c in text.chars() {
        app.update(Action::SearchInput(c));
    }
}

// ── Loading ───────────────────────────────────────────────────

#[test]
fn starts_loading_with_empty_view() {
    let app = test_app();
    assert_eq!(app.view.status, ViewStatus::Loading);
    assert!(app.view.cards.is_empty());
}

#[test]
fn load_success_renders_newest_first() {
    let app = loaded_app();
    assert_eq!(titles(&app), ["Gamma", "Beta", "Alpha"]);
    let labels: Vec<&str> = app.view.keywords.iter().map(|k| k.label.as_str()).collect();
    assert_eq!(labels, ["bio", "llm", "nlp"]);
}

#[test]
fn load_failure_shows_error() {
    let mut app = test_app();
    app.handle_load_event(LoadEvent::Finished(Err(LoadError::Shape(
        "expected an array".into(),
    ))));
    assert!(matches!(app.view.status, ViewStatus::Failed(_)));
    assert!(app.view.cards.is_empty());
}

#[test]
fn filters_typed_before_load_apply_once_data_arrives() {
    let mut app = test_app();
    type_text(&mut app, "language");
    app.update(Action::SearchConfirm);
    assert!(app.view.cards.is_empty());

    app.handle_load_event(LoadEvent::Finished(parse_papers(DATA.as_bytes())));
    assert_eq!(titles(&app), ["Beta", "Alpha"]);
}

// ── Search ────────────────────────────────────────────────────

#[test]
fn search_updates_live() {
    let mut app = loaded_app();
    type_text(&mut app, "PROT");
    assert_eq!(app.input_mode, InputMode::Search);
    assert_eq!(titles(&app), ["Gamma"]);

    app.update(Action::SearchBackspace);
    app.update(Action::SearchBackspace);
    app.update(Action::SearchBackspace);
    app.update(Action::SearchBackspace);
    assert_eq!(app.view.cards.len(), 3);
}

#[test]
fn search_confirm_keeps_text_and_cancel_clears() {
    let mut app = loaded_app();
    type_text(&mut app, "language");
    app.update(Action::SearchConfirm);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.session.state().search, "language");
    assert_eq!(titles(&app), ["Beta", "Alpha"]);

    type_text(&mut app, "xyz");
    assert!(app.view.cards.is_empty());
    app.update(Action::SearchCancel);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.session.state().search.is_empty());
    assert_eq!(app.view.cards.len(), 3);
}

#[test]
fn esc_in_list_clears_search() {
    let mut app = loaded_app();
    type_text(&mut app, "protein");
    app.update(Action::SearchConfirm);
    app.update(Action::NavigateBack);
    assert!(app.session.state().search.is_empty());
    assert_eq!(app.view.cards.len(), 3);
}

// ── Keywords ──────────────────────────────────────────────────

#[test]
fn keyword_bar_toggles_selection() {
    let mut app = loaded_app();
    app.update(Action::ToggleFocus);
    assert_eq!(app.focus, Focus::Keywords);

    app.update(Action::MoveRight);
    app.update(Action::MoveRight);
    app.update(Action::MoveRight); // clamps at last chip
    assert_eq!(app.keyword_cursor, 2);
    app.update(Action::Select);
    assert_eq!(titles(&app), ["Beta", "Alpha"]);
    assert!(app.view.keywords[2].active);

    app.update(Action::MoveLeft);
    app.update(Action::Select);
    assert_eq!(titles(&app), ["Alpha"]);

    app.update(Action::Select);
    assert_eq!(titles(&app), ["Beta", "Alpha"]);
}

#[test]
fn clear_keywords_restores_full_list() {
    let mut app = loaded_app();
    app.update(Action::ToggleFocus);
    app.update(Action::Select);
    assert_eq!(titles(&app), ["Gamma"]);
    app.update(Action::ClearKeywords);
    assert_eq!(app.view.cards.len(), 3);
    assert_eq!(app.view.active_keywords(), 0);
}

#[test]
fn select_in_list_focus_does_not_toggle() {
    let mut app = loaded_app();
    app.update(Action::Select);
    assert!(app.session.state().selected_keywords.is_empty());
}

// ── Sort & navigation ─────────────────────────────────────────

#[test]
fn cycle_sort_flips_order() {
    let mut app = loaded_app();
    app.update(Action::CycleSort);
    assert_eq!(app.session.state().sort, SortOrder::Oldest);
    assert_eq!(titles(&app), ["Alpha", "Beta", "Gamma"]);
    assert!(app.status_message.is_some());
}

#[test]
fn selection_follows_paper_across_resort() {
    let mut app = loaded_app();
    app.update(Action::MoveDown);
    assert_eq!(app.selected_card().map(|c| c.title.as_str()), Some("Beta"));
    app.update(Action::CycleSort);
    assert_eq!(app.selected_card().map(|c| c.title.as_str()), Some("Beta"));
    assert_eq!(app.cursor, 1);
}

#[test]
fn cursor_clamps_when_list_shrinks() {
    let mut app = loaded_app();
    app.update(Action::GoBottom);
    assert_eq!(app.cursor, 2);
    type_text(&mut app, "protein");
    assert_eq!(app.cursor, 0);
    assert_eq!(app.selected_card().map(|c| c.title.as_str()), Some("Gamma"));
}

#[test]
fn navigation_stays_in_bounds() {
    let mut app = loaded_app();
    app.update(Action::MoveUp);
    assert_eq!(app.cursor, 0);
    app.update(Action::PageDown);
    assert_eq!(app.cursor, 2);
    app.update(Action::GoTop);
    assert_eq!(app.cursor, 0);
}

#[test]
fn copy_without_link_reports_it() {
    let mut app = loaded_app();
    app.update(Action::MoveDown);
    app.update(Action::CopyToClipboard);
    assert_eq!(app.status_message.as_deref(), Some("Paper has no link"));
}

// ── Help & quit ───────────────────────────────────────────────

#[test]
fn help_overlay_blocks_other_actions() {
    let mut app = loaded_app();
    app.update(Action::ToggleHelp);
    assert!(app.show_help);
    app.update(Action::CycleSort);
    assert_eq!(app.session.state().sort, SortOrder::Newest);
    app.update(Action::NavigateBack);
    assert!(!app.show_help);
}

#[test]
fn quit_sets_flag() {
    let mut app = test_app();
    assert!(app.update(Action::Quit));
    assert!(app.should_quit);
}
