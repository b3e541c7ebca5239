use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;

use exif_inspector::app::{InspectorState, ViewMode};
use exif_inspector::core::bulk::BatchCollector;
use exif_inspector::core::formats;
use exif_inspector::logging;
use exif_inspector::models::{display_filename, CollectedMetadata};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Grouped,
    Json,
}

#[derive(Parser)]
#[command(name = "exif_inspector")]
#[command(about = "Print EXIF, image and file metadata for photos", long_about = None)]
struct Cli {
    /// Image files or directories to inspect
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Only show entries whose key or value contains this text
    #[arg(short, long)]
    search: Option<String>,

    /// Descend into sub-directories of directory arguments
    #[arg(short, long)]
    recursive: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let paths = formats::expand_paths(&cli.paths, cli.recursive)
        .context("failed to expand input paths")?;
    if paths.is_empty() {
        bail!("no supported images found in the given paths");
    }

    if let [path] = paths.as_slice() {
        let mut state = inspector(&cli);
        state.open(path);
        println!("{}", render(&state, cli.format)?);
        return Ok(());
    }

    let (progress_tx, progress_rx) = mpsc::channel();
    let results = BatchCollector::collect(&paths, progress_tx);
    for event in progress_rx.try_iter() {
        debug!(
            current = event.current,
            total = event.total,
            file = %event.filename,
            failed_sources = event.failed_sources,
            "collected"
        );
    }

    match cli.format {
        OutputFormat::Json => {
            let mut report = BTreeMap::new();
            for collected in results {
                let key = collected.path.display().to_string();
                let state = with_current(&cli, collected);
                let map: BTreeMap<String, String> = state
                    .rows()
                    .into_iter()
                    .map(|row| (row.key, row.value))
                    .collect();
                report.insert(key, map);
            }
            let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
            println!("{json}");
        }
        OutputFormat::Text | OutputFormat::Grouped => {
            for (index, collected) in results.into_iter().enumerate() {
                if index > 0 {
                    println!();
                }
                println!("== {} ==", display_filename(&collected.path));
                let state = with_current(&cli, collected);
                println!("{}", render(&state, cli.format)?);
            }
        }
    }

    Ok(())
}

fn inspector(cli: &Cli) -> InspectorState {
    let mut state = InspectorState::default();
    state.set_view_mode(match cli.format {
        OutputFormat::Grouped => ViewMode::Grouped,
        OutputFormat::Text | OutputFormat::Json => ViewMode::Sorted,
    });
    if let Some(query) = &cli.search {
        state.set_search_query(query.as_str());
    }
    state
}

fn with_current(cli: &Cli, collected: CollectedMetadata) -> InspectorState {
    let mut state = inspector(cli);
    state.current = Some(collected);
    state
}

fn render(state: &InspectorState, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => state.to_json(),
        OutputFormat::Text | OutputFormat::Grouped => state.as_text(),
    };
    rendered.context("failed to render metadata")
}
