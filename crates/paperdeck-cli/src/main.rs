use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use paperdeck_core::config_file::{ConfigFile, load_config};
use paperdeck_core::{DataSource, FilterEvent, Session, SortOrder, View, ViewStatus};
use tracing_subscriber::EnvFilter;

mod output;

use output::ColorMode;

/// Paperdeck - browse a collection of papers by text, keywords and date
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the papers that match the given filters
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Emit the matching papers as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the keyword vocabulary of the dataset
    Keywords {
        #[command(flatten)]
        filters: FilterArgs,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Write the filtered list as a standalone HTML page
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Path of the HTML file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Page heading
        #[arg(long, default_value = "Papers")]
        title: String,
    },
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Dataset path or http(s) URL (default: $PAPERDECK_SOURCE, config, ./data/papers.json)
    source: Option<String>,

    /// Case-insensitive text to find in title or summary
    #[arg(short, long)]
    search: Option<String>,

    /// Keyword a paper must carry; repeat for several (all must match)
    #[arg(short, long = "keyword", value_name = "KEYWORD")]
    keywords: Vec<String>,

    /// Sort order: newest or oldest
    #[arg(long)]
    sort: Option<SortOrder>,

    /// HTTP fetch timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let config = load_config();

    match cli.command {
        Command::List {
            filters,
            json,
            no_color,
        } => {
            let (session, view) = build_view(&filters, &config).await?;
            let mut out = std::io::stdout().lock();
            if json {
                output::print_json(&mut out, &session, &view)?;
            } else {
                output::print_list(&mut out, &view, ColorMode(!no_color))?;
            }
            out.flush()?;
        }
        Command::Keywords { filters, no_color } => {
            let (_, view) = build_view(&filters, &config).await?;
            let mut out = std::io::stdout().lock();
            output::print_keywords(&mut out, &view, ColorMode(!no_color))?;
            out.flush()?;
        }
        Command::Export {
            filters,
            output,
            title,
        } => {
            let (_, view) = build_view(&filters, &config).await?;
            let html = paperdeck_core::html::render_page(&view, &title);
            std::fs::write(&output, html)?;
            eprintln!(
                "Wrote {} of {} papers to {}",
                view.cards.len(),
                view.total,
                output.display()
            );
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PAPERDECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the dataset once, then replay the command-line filters through a
/// session exactly as interactive input would be.
async fn build_view(args: &FilterArgs, config: &ConfigFile) -> anyhow::Result<(Session, View)> {
    let source = config.resolve_source(args.source.as_deref());
    let timeout = args
        .timeout
        .map(|s| Duration::from_secs(s.max(1)))
        .unwrap_or_else(|| config.fetch_timeout());

    let mut session = Session::new(Default::default());
    session.handle(FilterEvent::SetSort(args.sort.unwrap_or_else(|| config.sort())));
    if let Some(search) = &args.search {
        session.handle(FilterEvent::Search(search.clone()));
    }
    for keyword in &args.keywords {
        if !session.state().selected_keywords.contains(keyword) {
            session.handle(FilterEvent::ToggleKeyword(keyword.clone()));
        }
    }

    let spinner = loading_spinner(&source);
    let result = paperdeck_core::load(&source, timeout).await;
    spinner.finish_and_clear();

    let view = session.finish_load(result);
    if let ViewStatus::Failed(message) = &view.status {
        anyhow::bail!("Could not load papers from {}: {}", source, message);
    }

    for keyword in &args.keywords {
        if !view.keywords.iter().any(|k| &k.label == keyword) {
            tracing::warn!(keyword = %keyword, "keyword does not occur in the dataset");
        }
    }
    Ok((session, view))
}

fn loading_spinner(source: &DataSource) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Loading {source}"));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
