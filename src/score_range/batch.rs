use super::event::event_point;
use super::live::LiveScoreFunction;
use super::loader::MusicMetaIndex;
use super::types::{ScoreRange, SkillSet};
use super::ScoreRangeSolver;
use crate::tables::{Difficulty, LiveMode};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SongTarget {
    pub music_id: u32,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRangeRow {
    pub music_id: u32,
    pub difficulty: Difficulty,
    pub range: ScoreRange,
    pub min_event_point: i64,
    pub max_event_point: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct BatchInput {
    pub skills: SkillSet,
    pub total_power: u32,
    pub mode: LiveMode,
    pub event_bonus: u32,
    pub energy: usize,
}

/// Every difficulty of every song in the index.
pub fn all_targets(index: &MusicMetaIndex) -> Vec<SongTarget> {
    index
        .song_ids()
        .into_iter()
        .flat_map(|music_id| {
            Difficulty::iter().filter_map(move |difficulty| {
                index.get(music_id, difficulty).map(|_| SongTarget {
                    music_id,
                    difficulty,
                })
            })
        })
        .collect()
}

/// Scores every target in parallel. Targets without data are dropped and a
/// failing target is logged and skipped so one bad chart cannot sink the table.
pub fn evaluate<L>(
    solver: &ScoreRangeSolver<L>,
    index: &MusicMetaIndex,
    targets: &[SongTarget],
    input: &BatchInput,
) -> Vec<SongRangeRow>
where
    L: LiveScoreFunction + Sync,
{
    targets
        .par_iter()
        .filter_map(|target| {
            let meta = index.get(target.music_id, target.difficulty)?;
            let range = match solver.compute(&input.skills, Some(meta), input.total_power, input.mode)
            {
                Ok(Some(range)) => range,
                Ok(None) => return None,
                Err(e) => {
                    warn!(
                        "Skipping music {} ({}): {}",
                        target.music_id, target.difficulty, e
                    );
                    return None;
                }
            };

            let points = |score| {
                event_point(
                    input.mode,
                    score,
                    meta.event_rate,
                    input.event_bonus,
                    input.energy,
                    0,
                )
            };

            Some(SongRangeRow {
                music_id: target.music_id,
                difficulty: target.difficulty,
                range,
                min_event_point: points(range.min),
                max_event_point: points(range.max),
            })
        })
        .collect()
}

/// Keeps the difficulty with the highest max event points for each song.
pub fn best_per_song(rows: &[SongRangeRow]) -> Vec<SongRangeRow> {
    let mut best: BTreeMap<u32, SongRangeRow> = BTreeMap::new();
    for row in rows {
        best.entry(row.music_id)
            .and_modify(|cur| {
                if row.max_event_point > cur.max_event_point {
                    *cur = *row;
                }
            })
            .or_insert(*row);
    }
    best.into_values().collect()
}

/// Highest max event points first; ties keep song order.
pub fn sort_by_efficiency(rows: &mut [SongRangeRow]) {
    rows.sort_by(|a, b| {
        b.max_event_point
            .cmp(&a.max_event_point)
            .then(a.music_id.cmp(&b.music_id))
            .then(a.difficulty.cmp(&b.difficulty))
    });
}
