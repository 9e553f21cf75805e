use crate::reports;
use clap::{ArgMatches, Args};
use mixforge::catalog::Catalog;
use mixforge::config::{Config, GeneticParams};
use mixforge::error::MfResult;
use mixforge::optimizer::{Flow, Optimizer, ProgressCallback, SearchConfig};
use mixforge::scorer::Scorer;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: Config,

    /// JSON file with genetic settings; explicit flags still win
    #[arg(short = 'g', long)]
    pub genetics: Option<String>,

    /// Print the result as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Prints each checkpoint on stderr so stdout stays parseable with `--json`.
struct CliLogger;

impl ProgressCallback for CliLogger {
    fn on_progress(&self, percent: u8, message: &str) -> Flow {
        eprintln!("[{:3}%] {}", percent, message);
        Flow::Continue
    }
}

pub fn run(args: SearchArgs, matches: &ArgMatches, catalog: Arc<Catalog>) -> MfResult<()> {
    let genetics = match &args.genetics {
        Some(path) => {
            info!("⚙️  Loading genetic settings from: {}", path);
            let mut params = GeneticParams::load_from_file(path)?;
            params.merge_from_cli(&args.config.genetics, matches);
            params.validate()?;
            params
        }
        None => args.config.genetics.clone(),
    };

    let search = &args.config.search;
    let config = SearchConfig::from_params(search, &catalog)?;

    eprintln!(
        "🔍 Searching {}-item mixes for {}s (base value ${:.2})",
        config.combo_size,
        config.time_limit.as_secs(),
        config.base_value
    );

    let optimizer = Optimizer::new(Scorer::new(Arc::clone(&catalog)), genetics);
    let result = optimizer.run(&config, search.seed, &CliLogger)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        reports::print_search_result(&catalog, &result, config.base_value);
    }
    Ok(())
}
