use crate::config::{CatalogParams, RangeParams, SolverLimits};
use crate::error::{CalcError, CalcResult};
use crate::score_art::{build_catalogs, rank_solutions, solve_gap, LookupTable, ScoredSolution};
use crate::score_range::batch::{self, BatchInput, SongRangeRow, SongTarget};
use crate::score_range::{MusicMetaIndex, ScoreRangeSolver};
use crate::tables::Difficulty;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Gaps at or above this are rejected before any search runs.
pub const MAX_GAP: i64 = 100_000;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScoreArtRequest {
    pub current: i64,
    pub target: i64,
    #[serde(default)]
    pub catalog: CatalogParams,
    #[serde(default)]
    pub allow_non_mod5: bool,
}

impl ScoreArtRequest {
    pub fn gap(&self) -> CalcResult<i64> {
        if self.target <= self.current {
            return Err(CalcError::Validation(format!(
                "target {} must be above current {}",
                self.target, self.current
            )));
        }
        let gap = self.target - self.current;
        if gap >= MAX_GAP {
            return Err(CalcError::Validation(format!(
                "gap {} must be below {}",
                gap, MAX_GAP
            )));
        }
        Ok(gap)
    }
}

/// Service: catalogs -> gap search -> ranking.
pub fn plan_score_art(
    table: &LookupTable,
    request: &ScoreArtRequest,
    limits: &SolverLimits,
) -> CalcResult<Vec<ScoredSolution>> {
    let gap = request.gap()?;
    limits.validate()?;

    let catalogs = build_catalogs(table, &request.catalog);
    let found = solve_gap(gap, &catalogs, request.allow_non_mod5, limits);
    info!("Gap {}: {} combinations found", gap, found.len());

    Ok(rank_solutions(found, request.allow_non_mod5, limits))
}

/// Service: score ranges and event points for one song or the whole index.
/// With `best_only`, each song keeps only its most efficient difficulty.
pub fn score_table(
    index: &MusicMetaIndex,
    params: &RangeParams,
    song: Option<u32>,
    difficulty: Option<Difficulty>,
    best_only: bool,
) -> CalcResult<Vec<SongRangeRow>> {
    let input = BatchInput {
        skills: params.get_skills()?,
        total_power: params.total_power,
        mode: params.mode,
        event_bonus: params.event_bonus,
        energy: params.energy,
    };

    let targets: Vec<SongTarget> = batch::all_targets(index)
        .into_iter()
        .filter(|t| song.is_none_or(|id| t.music_id == id))
        .filter(|t| difficulty.is_none_or(|d| t.difficulty == d))
        .collect();

    let solver = ScoreRangeSolver::default();
    let rows = batch::evaluate(&solver, index, &targets, &input);
    info!("Scored {} of {} charts", rows.len(), targets.len());

    let mut rows = if best_only {
        batch::best_per_song(&rows)
    } else {
        rows
    };
    batch::sort_by_efficiency(&mut rows);
    Ok(rows)
}
