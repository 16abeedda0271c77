use std::io::Write;

use owo_colors::OwoColorize;
use paperdeck_core::{PaperCard, Session, TagKind, View};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the filtered list, one card per block.
pub fn print_list(w: &mut dyn Write, view: &View, color: ColorMode) -> std::io::Result<()> {
    print_header(w, view, color)?;

    if view.cards.is_empty() {
        writeln!(w, "No papers match the current filters.")?;
        return Ok(());
    }

    for card in &view.cards {
        print_card(w, card, color)?;
    }
    Ok(())
}

fn print_header(w: &mut dyn Write, view: &View, color: ColorMode) -> std::io::Result<()> {
    let mut line = format!(
        "Showing {} of {} papers, {} first",
        view.cards.len(),
        view.total,
        view.filter.sort.label()
    );
    // From the filter, not the chips: a selection may name no known keyword
    let active: Vec<&str> = view
        .filter
        .selected_keywords
        .iter()
        .map(String::as_str)
        .collect();
    if !active.is_empty() {
        line.push_str(&format!(" [keywords: {}]", active.join(", ")));
    }
    let search = view.filter.search.trim();
    if !search.is_empty() {
        line.push_str(&format!(" [search: \"{search}\"]"));
    }

    if color.enabled() {
        writeln!(w, "{}", line.dimmed())?;
    } else {
        writeln!(w, "{line}")?;
    }
    writeln!(w)
}

fn print_card(w: &mut dyn Write, card: &PaperCard, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", card.title.bold())?;
        if !card.link.is_empty() {
            writeln!(w, "  {}", card.link.cyan())?;
        }
        writeln!(w, "  {}", card.meta_line().dimmed())?;
    } else {
        writeln!(w, "{}", card.title)?;
        if !card.link.is_empty() {
            writeln!(w, "  {}", card.link)?;
        }
        writeln!(w, "  {}", card.meta_line())?;
    }

    if !card.summary.is_empty() {
        writeln!(w, "  {}", card.summary)?;
    }
    if let Some(doi) = &card.doi {
        writeln!(w, "  doi: {doi}")?;
    }

    if !card.tags.is_empty() {
        let mut rendered = Vec::with_capacity(card.tags.len());
        for tag in &card.tags {
            let text = format!("[{}]", tag.label);
            let text = if !color.enabled() {
                if tag.selected { format!("{text}*") } else { text }
            } else {
                match (tag.kind, tag.selected) {
                    (TagKind::Keyword, true) => text.green().bold().to_string(),
                    (TagKind::Keyword, false) => text.green().to_string(),
                    (TagKind::Source, _) => text.yellow().to_string(),
                    (TagKind::Category, _) => text.blue().to_string(),
                }
            };
            rendered.push(text);
        }
        writeln!(w, "  {}", rendered.join(" "))?;
    }
    writeln!(w)
}

/// Print the keyword vocabulary, marking selected keywords.
pub fn print_keywords(w: &mut dyn Write, view: &View, color: ColorMode) -> std::io::Result<()> {
    if view.keywords.is_empty() {
        writeln!(w, "No keywords in this dataset.")?;
        return Ok(());
    }
    for chip in &view.keywords {
        match (chip.active, color.enabled()) {
            (true, true) => writeln!(w, "{} {}", "*".green(), chip.label.green().bold())?,
            (true, false) => writeln!(w, "* {}", chip.label)?,
            (false, _) => writeln!(w, "  {}", chip.label)?,
        }
    }
    Ok(())
}

/// Print the papers behind `view` as a JSON array, in display order.
pub fn print_json(w: &mut dyn Write, session: &Session, view: &View) -> anyhow::Result<()> {
    let papers: Vec<_> = view
        .cards
        .iter()
        .filter_map(|card| session.paper(card.index))
        .collect();
    serde_json::to_writer_pretty(&mut *w, &papers)?;
    writeln!(w)?;
    Ok(())
}
