use crate::reports;
use clap::Args;
use sekai_calc::api::score_table;
use sekai_calc::config::RangeParams;
use sekai_calc::error::CalcResult;
use sekai_calc::score_range::MusicMetaIndex;
use sekai_calc::tables::Difficulty;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct RangeArgs {
    /// music_metas.json
    #[arg(long, default_value = "data/music_metas.json")]
    pub meta: String,

    #[command(flatten)]
    pub params: RangeParams,

    #[arg(long)]
    pub song: Option<u32>,

    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Keep only the most efficient difficulty per song.
    #[arg(long, default_value_t = false)]
    pub best: bool,

    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &RangeArgs) -> CalcResult<()> {
    info!("📂 Loading music metas: {}", args.meta);
    let index = MusicMetaIndex::load_from_file(&args.meta)?;

    let mut rows = score_table(
        &index,
        &args.params,
        args.song,
        args.difficulty,
        args.best,
    )?;
    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    reports::print_range_table(&rows, &args.params);
    Ok(())
}
