//! Trellis CLI entry point

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(about = "Render JSONL edge streams as Graphviz DOT with degree-scaled emphasis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// How the input stream is read and keyed. Shared by render and debug.
#[derive(Args)]
struct InputArgs {
    /// Show self-referencing edges instead of dropping them
    #[arg(short = 's', long)]
    show_self_loops: bool,

    /// Node attribute to use as the display name
    #[arg(short = 'k', long, value_name = "KEY")]
    name_key: Option<String>,

    /// Node attribute to cluster nodes by
    #[arg(short = 'g', long, value_name = "KEY")]
    group_key: Option<String>,
}

/// Bounds for the emphasis scales. Each pair is order-normalized.
#[derive(Args)]
struct ScaleArgs {
    /// Minimum edge line width
    #[arg(long, default_value_t = 1.0)]
    penwidth_min: f64,

    /// Maximum edge line width
    #[arg(long, default_value_t = 5.0)]
    penwidth_max: f64,

    /// Minimum arrow head size
    #[arg(long, default_value_t = 1.0)]
    arrowsize_min: f64,

    /// Maximum arrow head size
    #[arg(long, default_value_t = 2.0)]
    arrowsize_max: f64,

    /// Minimum edge routing weight
    #[arg(long, default_value_t = 1.0)]
    weight_min: f64,

    /// Maximum edge routing weight
    #[arg(long, default_value_t = 100.0)]
    weight_max: f64,

    /// Minimum node font size
    #[arg(long, default_value_t = 8.0)]
    fontsize_min: f64,

    /// Maximum node font size
    #[arg(long, default_value_t = 48.0)]
    fontsize_max: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Read edge records on stdin and print DOT source
    Render {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        scale: ScaleArgs,

        /// Write here instead of stdout; a non-.dot/.gv extension renders
        /// through the external `dot` executable
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Read edge records on stdin and dump every computed intermediate as JSON
    Debug {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so DOT source and dumps own stdout
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "trellis={}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Render { input, scale, out } => commands::render(input, scale, out),
        Commands::Debug { input } => commands::debug(input),
        Commands::Version => {
            println!("trellis v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
