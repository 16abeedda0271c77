use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};

use paperdeck_core::{PaperCard, TagKind, ViewStatus};

use crate::app::{App, Focus, InputMode};
use crate::theme::Theme;
use crate::view::{spinner_char, truncate};

/// Render the whole browse screen.
pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Length(1), // search bar
        Constraint::Length(3), // keyword bar
        Constraint::Min(5),    // body
        Constraint::Length(1), // footer
    ])
    .split(f.area());

    render_header(f, chunks[0], app, theme);
    render_search_bar(f, chunks[1], app, theme);
    render_keyword_bar(f, chunks[2], app, theme);

    match &app.view.status {
        ViewStatus::Loading => render_loading(f, chunks[3], app, theme),
        ViewStatus::Failed(message) => render_error(f, chunks[3], message, theme),
        ViewStatus::Ready => {
            let body = Layout::vertical([Constraint::Min(5), Constraint::Length(10)])
                .split(chunks[3]);
            render_table(f, body[0], app, theme);
            render_detail(f, body[1], app.selected_card(), theme);
        }
    }

    render_footer(f, chunks[4], app, theme);
}

fn render_header(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let view = &app.view;
    let mut spans = vec![
        Span::styled(" Paperdeck ", theme.header_style()),
        Span::styled(
            format!(" {}", app.source_label),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ];
    match &view.status {
        ViewStatus::Ready => spans.push(Span::styled(
            format!("  {} of {} papers", view.cards.len(), view.total),
            Style::default().fg(theme.dim),
        )),
        ViewStatus::Loading => spans.push(Span::styled(
            format!("  {} loading", spinner_char(app.tick)),
            Style::default().fg(theme.spinner),
        )),
        ViewStatus::Failed(_) => spans.push(Span::styled(
            "  load failed",
            Style::default().fg(theme.error),
        )),
    }
    spans.push(Span::styled(
        format!("  [{} first]", view.filter.sort.label()),
        Style::default().fg(theme.active),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_search_bar(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let editing = app.input_mode == InputMode::Search;
    let search = &app.session.state().search;

    let mut spans = vec![Span::styled(
        " /",
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    )];
    if search.is_empty() && !editing {
        spans.push(Span::styled(
            " type / to search titles and summaries",
            Style::default().fg(theme.dim),
        ));
    } else {
        spans.push(Span::styled(search.as_str(), Style::default().fg(theme.text)));
    }
    if editing {
        spans.push(Span::styled("\u{2588}", Style::default().fg(theme.active)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_keyword_bar(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.focus == Focus::Keywords;
    let active = app.view.active_keywords();
    let title = if active > 0 {
        format!(" Keywords ({active} selected, c: clear) ")
    } else {
        " Keywords (Tab) ".to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.focused_border_style()
        } else {
            theme.border_style()
        })
        .title(title);

    if app.view.keywords.is_empty() {
        let text = if app.view.is_ready() {
            "no keywords in this dataset"
        } else {
            ""
        };
        let p = Paragraph::new(Span::styled(text, Style::default().fg(theme.dim))).block(block);
        f.render_widget(p, area);
        return;
    }

    let (spans, cursor_end) = keyword_chips(app, theme, focused);

    // Scroll horizontally so the chip under the cursor stays visible
    let inner_width = area.width.saturating_sub(2) as usize;
    let offset = cursor_end.saturating_sub(inner_width);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);

    let p = Paragraph::new(Line::from(spans))
        .block(block)
        .scroll((0, offset));
    f.render_widget(p, area);
}

/// Chip spans for the keyword bar, plus the display column where the chip
/// under the cursor ends. Widths are terminal cells, so wide glyphs count 2.
fn keyword_chips<'a>(app: &App, theme: &Theme, focused: bool) -> (Vec<Span<'a>>, usize) {
    let mut spans = Vec::with_capacity(app.view.keywords.len() * 2);
    let mut cursor_end = 0usize;
    let mut width = 0usize;
    for (i, chip) in app.view.keywords.iter().enumerate() {
        if i > 0 {
            let gap = Span::raw(" ");
            width += gap.width();
            spans.push(gap);
        }
        let under_cursor = focused && i == app.keyword_cursor;
        let span = Span::styled(
            format!(" {} ", chip.label),
            theme.chip_style(chip.active, under_cursor),
        );
        width += span.width();
        if i == app.keyword_cursor {
            cursor_end = width;
        }
        spans.push(span);
    }
    (spans, cursor_end)
}

fn render_loading(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            format!("{} ", spinner_char(app.tick)),
            Style::default().fg(theme.spinner),
        ),
        Span::styled(
            format!("Loading papers from {}\u{2026}", app.source_label),
            Style::default().fg(theme.text),
        ),
    ]);
    let p = Paragraph::new(vec![Line::from(""), line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        );
    f.render_widget(p, area);
}

fn render_error(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            "Could not load papers",
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(Span::styled(
            "Check the dataset path or URL, then restart. Press q to quit.",
            Style::default().fg(theme.dim),
        )),
    ];
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error))
            .title(" Error "),
    );
    f.render_widget(p, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.focus == Focus::List;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.focused_border_style()
        } else {
            theme.border_style()
        })
        .title(format!(" Papers, {} first (s) ", app.view.filter.sort.label()));

    if app.view.cards.is_empty() {
        let text = if app.view.total == 0 {
            "The dataset is empty."
        } else {
            "No papers match the current filters."
        };
        let p = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(text, Style::default().fg(theme.dim))),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(p, area);
        return;
    }

    let wide = area.width >= 100;
    let header_cells: &[&str] = if wide {
        &["Date", "Title", "Authors", "Keywords"]
    } else {
        &["Date", "Title"]
    };
    let header = Row::new(header_cells.iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
    }))
    .height(1);

    let title_width = if wide {
        (area.width as usize).saturating_sub(10 + 28 + 24 + 8)
    } else {
        (area.width as usize).saturating_sub(10 + 4)
    };

    let rows: Vec<Row> = app
        .view
        .cards
        .iter()
        .map(|card| {
            let date = Cell::from(card.date.clone()).style(Style::default().fg(theme.dim));
            let title = Cell::from(truncate(&card.title, title_width))
                .style(Style::default().fg(theme.text));
            if wide {
                let keywords: Vec<&str> = card
                    .tags
                    .iter()
                    .filter(|t| t.kind == TagKind::Keyword)
                    .map(|t| t.label.as_str())
                    .collect();
                Row::new(vec![
                    date,
                    title,
                    Cell::from(truncate(&card.authors, 28)).style(Style::default().fg(theme.dim)),
                    Cell::from(truncate(&keywords.join(" "), 24))
                        .style(Style::default().fg(theme.keyword)),
                ])
            } else {
                Row::new(vec![date, title])
            }
        })
        .collect();

    let widths = if wide {
        vec![
            Constraint::Length(10), // Date
            Constraint::Min(20),    // Title
            Constraint::Length(28), // Authors
            Constraint::Length(24), // Keywords
        ]
    } else {
        vec![Constraint::Length(10), Constraint::Min(10)]
    };

    let table = Table::new(rows, &widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme.highlight_style());

    let mut state = TableState::default();
    state.select(Some(app.cursor));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_detail(f: &mut Frame, area: Rect, card: Option<&PaperCard>, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Details ");

    let Some(card) = card else {
        f.render_widget(block, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            card.title.as_str(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.meta_line(), Style::default().fg(theme.dim))),
    ];
    if !card.link.is_empty() {
        lines.push(Line::from(Span::styled(
            card.link.as_str(),
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::UNDERLINED),
        )));
    }
    if let Some(doi) = &card.doi {
        lines.push(Line::from(vec![
            Span::styled("doi ", Style::default().fg(theme.dim)),
            Span::styled(doi.as_str(), Style::default().fg(theme.text)),
        ]));
    }
    if !card.tags.is_empty() {
        let mut spans = Vec::with_capacity(card.tags.len() * 2);
        for tag in &card.tags {
            spans.push(Span::styled(
                format!("[{}]", tag.label),
                theme.tag_style(tag.kind, tag.selected),
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }
    if !card.summary.is_empty() {
        lines.push(Line::from(Span::styled(
            card.summary.as_str(),
            Style::default().fg(theme.text),
        )));
    }

    let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    f.render_widget(p, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let line = if let Some(message) = &app.status_message {
        Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(theme.active),
        ))
    } else {
        let hint = match (&app.input_mode, app.focus) {
            (InputMode::Search, _) => " Enter:keep  Esc:clear  Backspace:delete",
            (InputMode::Normal, Focus::Keywords) => {
                " \u{2190}\u{2192}:move  Space:toggle  c:clear  Tab:papers  s:sort  /:search  ?:help  q:quit"
            }
            (InputMode::Normal, Focus::List) => {
                " j/k:move  Tab:keywords  s:sort  /:search  y:copy link  ?:help  q:quit"
            }
        };
        Line::from(Span::styled(hint, theme.footer_style()))
    };
    f.render_widget(Paragraph::new(line), area);
}
