//! poststats - per-author posting statistics CLI
//!
//! Reads exported feed files and prints a statistics report.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::Parser;
use poststats_core::analytics::{create_composite, StatName, StatisticsNode, StatsParams};
use poststats_core::{ingest, logging, Config};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "poststats")]
#[command(about = "Per-author posting statistics for social media exports")]
#[command(version)]
struct Args {
    /// Feed files or glob patterns (JSON array, feed envelope, or JSON lines)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Statistic to compute (repeatable; default: from config, else all)
    #[arg(long = "stat")]
    stats: Vec<String>,

    /// Earliest post date in scope (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    start: Option<String>,

    /// Latest post date in scope (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    end: Option<String>,

    /// Export format (text or json)
    #[arg(long)]
    export: Option<String>,

    /// Config file (default: $XDG_CONFIG_HOME/poststats/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Which end of a day a bare date should resolve to.
#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

fn parse_bound(value: &str, bound: Bound) -> Result<DateTime<FixedOffset>> {
    if let Some(ts) = ingest::parse_created_time(value) {
        return Ok(ts);
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {value}. Use YYYY-MM-DD or RFC 3339"))?;
    let time = match bound {
        Bound::Start => date.and_hms_opt(0, 0, 0),
        Bound::End => date.and_hms_opt(23, 59, 59),
    }
    .context("Invalid time of day")?;

    Ok(time.and_utc().fixed_offset())
}

fn build_params(args: &Args, config: &Config) -> Result<Vec<StatsParams>> {
    let mut params = config
        .statistics
        .params()
        .context("invalid [statistics] configuration")?;

    if !args.stats.is_empty() {
        let (start, end) = config
            .statistics
            .bounds()
            .context("invalid [statistics] configuration")?;
        params = args
            .stats
            .iter()
            .map(|s| -> Result<StatsParams> {
                let stat = s.parse::<StatName>().map_err(|_| {
                    let known: Vec<_> = StatName::ALL.iter().map(|name| name.as_str()).collect();
                    anyhow::anyhow!("Unknown statistic: {s}. Known statistics: {}", known.join(", "))
                })?;
                Ok(StatsParams::new(stat).with_window(start, end))
            })
            .collect::<Result<_>>()?;
    }

    let start = args
        .start
        .as_deref()
        .map(|s| parse_bound(s, Bound::Start))
        .transpose()?;
    let end = args
        .end
        .as_deref()
        .map(|s| parse_bound(s, Bound::End))
        .transpose()?;

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            anyhow::bail!("--start must not be after --end");
        }
    }

    for p in &mut params {
        if start.is_some() {
            p.start_date = start;
        }
        if end.is_some() {
            p.end_date = end;
        }
    }

    Ok(params)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path).context("failed to load configuration")?,
        None => Config::load().context("failed to load configuration")?,
    };
    let log_guard = logging::init(&config.logging).ok();

    let result = run(&args, &config);
    if let (Err(e), Some(guard)) = (&result, &log_guard) {
        let message = format!("{e:#}");
        tracing::error!(error = %message, "Report failed");
        eprintln!("Logs: {}", guard.log_dir().display());
    }
    result
}

fn run(args: &Args, config: &Config) -> Result<()> {
    let params = build_params(args, config)?;

    let files = ingest::discover(&args.inputs).context("failed to expand inputs")?;
    if files.is_empty() {
        anyhow::bail!("No input files matched");
    }
    let input = ingest::read_all(&files).context("failed to read posts")?;
    for warning in &input.warnings {
        eprintln!("warning: {warning}");
    }

    let mut composite = create_composite(&params);
    let summary = composite
        .accumulate_all(&input.posts)
        .context("failed to accumulate posts")?;
    let stats = composite
        .calculate()
        .context("failed to calculate statistics")?;

    tracing::info!(
        files = input.files_read,
        posts = summary.posts_seen,
        in_scope = summary.posts_in_scope,
        "Report generated"
    );

    match args.export.as_deref() {
        Some("json") => println!("{}", serde_json::to_string_pretty(&stats)?),
        Some("text") | None => print_terminal(&stats, summary.posts_in_scope),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'text' or 'json'", other),
    }

    Ok(())
}

fn format_value(node: &StatisticsNode) -> String {
    match (node.value(), node.units()) {
        (Some(value), Some(units)) => format!("{value} {units}"),
        (Some(value), None) => format!("{value}"),
        (None, _) => String::new(),
    }
}

fn print_node(node: &StatisticsNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let value = format_value(node);

    match (node.split_key(), value.is_empty()) {
        (Some(key), false) => println!("{indent}{key}: {value}"),
        (Some(key), true) => println!("{indent}{key}"),
        (None, false) => println!("{indent}{}: {value}", node.name()),
        (None, true) => println!("{indent}{}", node.name()),
    }

    for child in node.children() {
        print_node(child, depth + 1);
    }
}

fn print_terminal(stats: &StatisticsNode, posts_in_scope: usize) {
    if posts_in_scope == 0 {
        println!("No posts found for this period.");
        return;
    }
    print_node(stats, 0);
}
