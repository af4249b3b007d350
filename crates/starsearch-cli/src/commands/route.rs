//! Route command handler for running A* between two cities.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use starsearch_cli::output::OutputFormat;
use starsearch_lib::{SearchEngine, SearchOutcome, SearchSummary};

use super::DataSource;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Source city name or code.
    pub from: String,
    /// Goal city name or code.
    pub to: String,
    /// Append the final path-tracker table to the report.
    pub show_tracker: bool,
    /// Also write the report to this file.
    pub output: Option<PathBuf>,
}

/// Handle the route subcommand.
pub fn handle_route_command(
    source: &DataSource,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let dataset = source.load()?;
    let mut engine = SearchEngine::new(&dataset.distances, &dataset.heuristics)
        .context("distance and heuristic matrices do not describe the same cities")?;

    let outcome = engine.search(&args.from, &args.to)?;
    if outcome == SearchOutcome::FrontierExhausted {
        warn!(
            from = %args.from,
            to = %args.to,
            relaxations = engine.relaxation_count(),
            "frontier exhausted before reaching the goal"
        );
    }

    let summary =
        SearchSummary::from_engine(&engine).context("failed to build search summary")?;
    let report = format.render_search(&summary, args.show_tracker)?;

    if let Some(path) = &args.output {
        fs::write(path, &report)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    print!("{report}");
    Ok(())
}
