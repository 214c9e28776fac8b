use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Best/worst skill order scores and event points per chart.
    Range(cmd::range::RangeArgs),
    /// Plans that close an event point gap exactly.
    Art(cmd::art::ArtArgs),
}

fn main() {
    // Raw matches let the art command tell typed flags from defaults.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Range(args) => cmd::range::run(args),
        Commands::Art(args) => cmd::art::run(args, matches.subcommand_matches("art")),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
