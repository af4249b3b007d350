mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use starsearch_cli::output::OutputFormat;

use commands::cities::handle_cities_command;
use commands::route::{handle_route_command, RouteCommandArgs};
use commands::DataSource;

#[derive(Parser, Debug)]
#[command(author, version, about = "A* route finding over city distance matrices")]
struct Cli {
    /// Directory holding the distance and heuristic matrix files.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override the actual-distance matrix file.
    #[arg(long, global = true)]
    distances: Option<PathBuf>,

    /// Override the heuristic-distance matrix file.
    #[arg(long, global = true)]
    heuristics: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every city with its index and code.
    Cities,
    /// Search for a route between two cities and print the trace.
    Route {
        /// Source city name or code.
        #[arg(long = "from")]
        from: String,
        /// Goal city name or code.
        #[arg(long = "to")]
        to: String,
        /// Append the path-tracker table to the report.
        #[arg(long)]
        show_tracker: bool,
        /// Also write the report to this file.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let source = DataSource {
        data_dir: cli.data_dir,
        distances: cli.distances,
        heuristics: cli.heuristics,
    };

    match cli.command {
        Command::Cities => handle_cities_command(&source, cli.format),
        Command::Route {
            from,
            to,
            show_tracker,
            output,
        } => handle_route_command(
            &source,
            cli.format,
            &RouteCommandArgs {
                from,
                to,
                show_tracker,
                output,
            },
        ),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
