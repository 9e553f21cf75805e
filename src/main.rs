use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use mixforge::catalog::Catalog;
use mixforge::error::MfResult;
use std::process;
use std::sync::Arc;
use tracing_subscriber::filter::LevelFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON catalog replacing the built-in effects, items and raw materials
    #[arg(global = true, short, long)]
    catalog: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for the most profitable mix
    Search(cmd::search::SearchArgs),
    /// Apply a fixed sequence of items and show each step
    Mix(cmd::mix::MixArgs),
    /// Show the effects, items and raw materials in use
    List,
}

fn main() {
    // 1. Parse raw matches (to tell user input from defaults)
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(cli, &matches) {
        eprintln!("\n❌ {}", e);
        process::exit(1);
    }
}

fn execute(cli: Cli, matches: &clap::ArgMatches) -> MfResult<()> {
    // 2. Catalog: built-in unless a file is given
    let catalog = match &cli.catalog {
        Some(path) => Catalog::load_from_file(path)?,
        None => Catalog::standard(),
    };
    let catalog = Arc::new(catalog);

    // 3. Execute
    match cli.command {
        Commands::Search(args) => {
            let sub_matches = matches
                .subcommand_matches("search")
                .unwrap_or(matches);
            cmd::search::run(args, sub_matches, catalog)
        }
        Commands::Mix(args) => cmd::mix::run(args, catalog),
        Commands::List => {
            cmd::list::run(&catalog);
            Ok(())
        }
    }
}
