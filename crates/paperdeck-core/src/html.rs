//! Static HTML rendering of a [`View`].

use crate::render::{PaperCard, TagKind, View, ViewStatus};

/// Escape text for use in HTML element content and double-quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render `view` as a complete standalone HTML page.
pub fn render_page(view: &View, page_title: &str) -> String {
    let mut out = String::with_capacity(8192 + view.cards.len() * 1024);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    out.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    out.push_str(&format!("<title>{}</title>\n", html_escape(page_title)));
    out.push_str(STYLE);
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", html_escape(page_title)));

    out.push_str(&format!(
        "<div class=\"summary\">Showing {} of {} papers \u{00b7} sorted by {}",
        view.cards.len(),
        view.total,
        view.filter.sort
    ));
    let search = view.filter.search.trim();
    if !search.is_empty() {
        out.push_str(&format!(
            " \u{00b7} matching &ldquo;{}&rdquo;",
            html_escape(search)
        ));
    }
    out.push_str("</div>\n");

    match &view.status {
        ViewStatus::Loading => {
            out.push_str("<div class=\"empty\">Loading\u{2026}</div>\n");
        }
        ViewStatus::Failed(message) => {
            out.push_str(&format!(
                "<div class=\"error\">Could not load papers: {}</div>\n",
                html_escape(message)
            ));
        }
        ViewStatus::Ready => {
            render_keywords(&mut out, view);
            out.push_str("<div id=\"list\">\n");
            if view.cards.is_empty() {
                out.push_str("<div class=\"empty\">No papers match the current filters.</div>\n");
            }
            for card in &view.cards {
                render_card(&mut out, card);
            }
            out.push_str("</div>\n");
        }
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn render_keywords(out: &mut String, view: &View) {
    if view.keywords.is_empty() {
        return;
    }
    out.push_str("<div id=\"keywords\">\n");
    for chip in &view.keywords {
        let class = if chip.active {
            "keyword active"
        } else {
            "keyword"
        };
        out.push_str(&format!(
            "<button class=\"{}\" type=\"button\">{}</button>\n",
            class,
            html_escape(&chip.label)
        ));
    }
    out.push_str("</div>\n");
}

/// Only `http(s)` links become anchors; `javascript:` and friends survive
/// attribute escaping.
fn is_web_link(link: &str) -> bool {
    let link = link.trim_start().to_ascii_lowercase();
    link.starts_with("http://") || link.starts_with("https://")
}

fn render_card(out: &mut String, card: &PaperCard) {
    out.push_str("<div class=\"card\">\n");
    if is_web_link(&card.link) {
        out.push_str(&format!(
            "<h3><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></h3>\n",
            html_escape(&card.link),
            html_escape(&card.title)
        ));
    } else {
        out.push_str(&format!("<h3>{}</h3>\n", html_escape(&card.title)));
    }
    out.push_str(&format!(
        "<div class=\"meta\">{}</div>\n",
        html_escape(&card.meta_line())
    ));
    out.push_str(&format!("<div>{}</div>\n", html_escape(&card.summary)));

    if !card.tags.is_empty() {
        out.push_str("<div class=\"tags\">");
        let badges: Vec<String> = card
            .tags
            .iter()
            .map(|tag| {
                let kind = match tag.kind {
                    TagKind::Source => "source",
                    TagKind::Category => "category",
                    TagKind::Keyword => "kw",
                };
                let selected = if tag.selected { " selected" } else { "" };
                format!(
                    "<span class=\"tag {}{}\">{}</span>",
                    kind,
                    selected,
                    html_escape(&tag.label)
                )
            })
            .collect();
        out.push_str(&badges.join(" "));
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n");
}

const STYLE: &str = r#"<style>
:root {
  --bg: #0f172a;
  --card: #111827;
  --text: #e5e7eb;
  --dim: #9ca3af;
  --accent: #38bdf8;
  --border: #1f2937;
}
* { box-sizing: border-box; }
body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  background: var(--bg);
  color: var(--text);
  line-height: 1.5;
  max-width: 960px;
  margin: 0 auto;
  padding: 2rem;
}
a { color: var(--accent); text-decoration: none; }
h1 { margin-bottom: 0.5rem; }
.summary { color: var(--dim); margin-bottom: 1rem; }
#keywords { display: flex; flex-wrap: wrap; gap: 6px; margin-bottom: 1.5rem; }
.keyword {
  background: transparent;
  border: 1px solid var(--border);
  border-radius: 999px;
  color: var(--text);
  padding: 4px 10px;
}
.keyword.active { background: var(--accent); color: var(--bg); border-color: var(--accent); }
.card {
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: 8px;
  padding: 1rem 1.25rem;
  margin-bottom: 1rem;
}
.card h3 { margin: 0 0 4px; font-size: 1.1rem; }
.meta { color: var(--dim); font-size: 0.9rem; margin-bottom: 6px; }
.tags { margin-top: 8px; }
.tag {
  display: inline-block;
  border: 1px solid var(--border);
  border-radius: 4px;
  font-size: 0.8rem;
  padding: 1px 6px;
  color: var(--dim);
}
.tag.selected { border-color: var(--accent); color: var(--accent); }
.empty, .error { color: var(--dim); padding: 2rem 0; text-align: center; }
.error { color: #f87171; }
</style>
"#;
