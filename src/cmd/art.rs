use crate::reports;
use clap::{ArgMatches, Args};
use sekai_calc::api::{plan_score_art, ScoreArtRequest};
use sekai_calc::config::{CatalogParams, SolverLimits};
use sekai_calc::error::CalcResult;
use sekai_calc::score_art::loader::load_envy_table_from_file;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ArtArgs {
    /// Envy score/bonus table (CSV).
    #[arg(long, default_value = "data/envy.csv")]
    pub table: String,

    #[arg(long)]
    pub current: i64,

    #[arg(long)]
    pub target: i64,

    #[command(flatten)]
    pub catalog: CatalogParams,

    /// Also accept bonus brackets that are not multiples of 5.
    #[arg(long, default_value_t = false)]
    pub allow_non_mod5: bool,

    #[command(flatten)]
    pub limits: SolverLimits,

    /// JSON file with solver limits; typed flags still win.
    #[arg(long)]
    pub limits_file: Option<String>,

    #[arg(long, default_value_t = 10)]
    pub per_page: usize,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ArtArgs, matches: Option<&ArgMatches>) -> CalcResult<()> {
    let limits = match &args.limits_file {
        Some(path) => {
            info!("⚖️  Loading limits from: {}", path);
            let mut file_limits = SolverLimits::load_from_file(path)?;
            if let Some(matches) = matches {
                file_limits.merge_from_cli(&args.limits, matches);
            }
            file_limits
        }
        None => args.limits.clone(),
    };

    info!("📂 Loading Envy table: {}", args.table);
    let table = load_envy_table_from_file(&args.table)?;

    let request = ScoreArtRequest {
        current: args.current,
        target: args.target,
        catalog: args.catalog.clone(),
        allow_non_mod5: args.allow_non_mod5,
    };

    let start = Instant::now();
    let solutions = plan_score_art(&table, &request, &limits)?;
    info!(
        "Solved in {:.1} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&solutions)?);
        return Ok(());
    }

    reports::print_solutions(&solutions, args.page, args.per_page);
    Ok(())
}
