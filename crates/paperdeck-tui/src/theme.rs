use paperdeck_core::TagKind;
use ratatui::style::{Color, Modifier, Style};

/// Color theme for the TUI.
pub struct Theme {
    pub keyword: Color,
    pub source: Color,
    pub category: Color,
    pub error: Color,

    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_bg: Color,
    pub active: Color,
    pub spinner: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

impl Theme {
    /// Hacker-green terminal theme.
    pub fn hacker() -> Self {
        Self {
            keyword: Color::Rgb(0, 210, 0),
            source: Color::Yellow,
            category: Color::Cyan,
            error: Color::Red,

            header_fg: Color::Black,
            header_bg: Color::Rgb(0, 210, 0),
            border: Color::DarkGray,
            text: Color::White,
            dim: Color::DarkGray,
            highlight_bg: Color::Rgb(30, 50, 30),
            active: Color::Cyan,
            spinner: Color::Cyan,
            footer_fg: Color::DarkGray,
            footer_bg: Color::Reset,
        }
    }

    /// Modern theme: white text, electric blue accents, dark blue header.
    pub fn modern() -> Self {
        Self {
            keyword: Color::Rgb(0, 200, 80),
            source: Color::Rgb(255, 200, 0),
            category: Color::Rgb(160, 120, 255),
            error: Color::Rgb(255, 80, 80),

            header_fg: Color::White,
            header_bg: Color::Rgb(30, 60, 120),
            border: Color::Rgb(60, 60, 80),
            text: Color::White,
            dim: Color::Rgb(120, 120, 140),
            highlight_bg: Color::Rgb(30, 40, 80),
            active: Color::Rgb(60, 140, 255),
            spinner: Color::Rgb(60, 140, 255),
            footer_fg: Color::Rgb(120, 120, 140),
            footer_bg: Color::Reset,
        }
    }

    /// Look a theme up by name, falling back to hacker for unknown names.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "modern" => Self::modern(),
            "hacker" => Self::hacker(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using hacker");
                Self::hacker()
            }
        }
    }

    pub fn tag_style(&self, kind: TagKind, selected: bool) -> Style {
        let style = match kind {
            TagKind::Source => Style::default().fg(self.source),
            TagKind::Category => Style::default().fg(self.category),
            TagKind::Keyword => Style::default().fg(self.keyword),
        };
        if selected {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style
        }
    }

    /// Style of a keyword chip in the keyword bar.
    pub fn chip_style(&self, active: bool, under_cursor: bool) -> Style {
        let mut style = if active {
            Style::default()
                .fg(self.header_fg)
                .bg(self.keyword)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.dim)
        };
        if under_cursor {
            style = style.add_modifier(Modifier::UNDERLINED);
            if !active {
                style = style.fg(self.text);
            }
        }
        style
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Border of the pane that currently has keyboard focus.
    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.active)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }
}
