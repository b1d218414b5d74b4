use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::client::{EntrySource, HttpEntrySource};
use crate::detail::{display_snippet, post_url};
use crate::layers::{layer_name, normalize_layer_id};
use crate::logging::{self, LogTarget};
use crate::models::{DateRange, Entry, QueryState, SortKey};
use crate::pipeline::run_pipeline;
use crate::tui::run_interactive;
use crate::utils::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, MISSING_DATE, format_long, sanitize};

const TOP_YEARS: usize = 6;
const TOP_LAYERS: usize = 8;

#[derive(Parser)]
#[command(name = "timeline-explorer")]
#[command(version)]
#[command(about = "Browse the engineering blog timeline by layer, date and topic", long_about = None)]
pub struct Cli {
    /// Base URL of the timeline backend
    #[arg(long, env = "TIMELINE_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "TIMELINE_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive browser (default)
    Browse,
    /// Run the filter pipeline once and print the result
    List(ListArgs),
    /// Show the layer catalog
    Layers,
    /// Show aggregate statistics
    Stats,
    /// Show one post and its external URL
    Show {
        /// Entry path as served by the backend
        path: String,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct ListArgs {
    /// Restrict to a layer (repeatable)
    #[arg(long = "layer")]
    pub layers: Vec<String>,
    /// Full-text query (at least 2 characters to take effect)
    #[arg(long)]
    pub search: Option<String>,
    /// First year to include
    #[arg(long)]
    pub from: Option<i32>,
    /// Last year to include
    #[arg(long)]
    pub to: Option<i32>,
    /// newest, oldest, title-asc or title-desc
    #[arg(long, default_value = "newest")]
    pub sort: SortKey,
    /// Keep posts tagged with this title category (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,
    /// Print at most this many posts
    #[arg(long)]
    pub limit: Option<usize>,
    /// Print JSON instead of text lines
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Query state equivalent to these flags
    pub fn query_state(&self) -> Result<QueryState> {
        let range = DateRange::new(self.from, self.to)?;
        Ok(QueryState::new()
            .with_layers(self.layers.iter().map(|l| normalize_layer_id(l).to_string()))
            .with_search(self.search.clone().unwrap_or_default())
            .with_date_range(range)
            .with_sort(self.sort)
            .with_categories(self.categories.iter().cloned()))
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let target = match cli.command {
        None | Some(Commands::Browse) => LogTarget::File,
        Some(_) => LogTarget::Stderr,
    };
    logging::init(target);

    let source = HttpEntrySource::new(&cli.api_url, Duration::from_secs(cli.timeout_secs))
        .context("Invalid backend configuration")?;
    debug!(base_url = source.base_url(), "backend configured");

    match &cli.command {
        None | Some(Commands::Browse) => run_interactive(Arc::new(source))?,
        Some(Commands::List(args)) => list_entries(&source, args)?,
        Some(Commands::Layers) => show_layers(&source)?,
        Some(Commands::Stats) => show_stats(&source)?,
        Some(Commands::Show { path }) => show_entry(&source, path)?,
    }

    Ok(())
}

/// One text line per entry: `date | title | layers`
pub fn format_list_line(entry: &Entry) -> String {
    let date = entry
        .parsed_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| MISSING_DATE.to_string());
    format!("{} | {} | {}", date, sanitize(&entry.title), sanitize(&entry.layers.join(", ")))
}

fn list_entries(source: &dyn EntrySource, args: &ListArgs) -> Result<()> {
    let state = args.query_state()?;
    let fetched = source.fetch_source(&state.source_request()).context("Failed to load posts")?;

    let mut entries = run_pipeline(&fetched, &state);
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No posts found");
        return Ok(());
    }
    for entry in &entries {
        println!("{}", format_list_line(entry));
    }
    Ok(())
}

fn show_layers(source: &dyn EntrySource) -> Result<()> {
    let layers = source.fetch_layers().context("Failed to load layers")?;

    println!("{:<24} {:<24} {:>6}  {}", "ID", "NAME", "POSTS", "RANGE");
    for info in &layers {
        let range = match (&info.earliest, &info.latest) {
            (Some(earliest), Some(latest)) => format!("{} - {}", earliest, latest),
            _ => MISSING_DATE.to_string(),
        };
        println!(
            "{:<24} {:<24} {:>6}  {}",
            sanitize(&info.name),
            sanitize(&layer_name(&info.name)),
            info.count,
            sanitize(&range)
        );
    }
    Ok(())
}

fn show_stats(source: &dyn EntrySource) -> Result<()> {
    let stats = source.fetch_stats().context("Failed to load statistics")?;

    println!("Timeline Statistics");
    println!("===================");
    println!("Total posts: {}", stats.total_posts);
    println!("Timeline span: {} years", stats.timeline_span_years());
    println!("Multi-layer posts: {}", stats.multi_layer_posts);
    println!("Avg layers per post: {:.1}", stats.avg_layers_per_post);
    println!(
        "Earliest post: {}",
        stats.date_range.earliest.as_deref().map(sanitize).unwrap_or_else(|| MISSING_DATE.to_string())
    );
    println!(
        "Latest post: {}",
        stats.date_range.latest.as_deref().map(sanitize).unwrap_or_else(|| MISSING_DATE.to_string())
    );

    println!();
    println!("Most active years:");
    for (year, count) in stats.top_years(TOP_YEARS) {
        println!("  {} {}", sanitize(year), count);
    }

    println!();
    println!("Top layers:");
    for (layer, count) in stats.top_layers(TOP_LAYERS) {
        println!("  {} {}", sanitize(&layer_name(layer)), count);
    }
    Ok(())
}

fn show_entry(source: &dyn EntrySource, path: &str) -> Result<()> {
    let entries = source.fetch_timeline(&[]).context("Failed to load posts")?;
    let entry = entries
        .iter()
        .find(|e| e.path == path)
        .with_context(|| format!("No post with path '{}'", path))?;

    let layers: Vec<String> = entry.layers.iter().map(|l| sanitize(&layer_name(l))).collect();
    println!("{}", sanitize(&entry.title));
    println!();
    println!("Date: {}", format_long(entry));
    println!("Layers: {}", layers.join(", "));
    println!();
    println!("{}", display_snippet(entry));
    println!();
    println!("Read: {}", post_url(entry));
    Ok(())
}
