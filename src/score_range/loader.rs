use crate::error::CalcResult;
use crate::tables::{Difficulty, LiveMode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// One song/difficulty entry of `music_metas.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicMeta {
    pub music_id: u32,
    pub difficulty: String,
    #[serde(default)]
    pub music_time: f64,
    #[serde(default = "default_event_rate")]
    pub event_rate: u32,
    pub base_score: f64,
    pub base_score_auto: f64,
    pub skill_score_solo: Vec<f64>,
    pub skill_score_auto: Vec<f64>,
    pub skill_score_multi: Vec<f64>,
    #[serde(default)]
    pub fever_score: f64,
    #[serde(default)]
    pub fever_end_time: f64,
    #[serde(default)]
    pub tap_count: u32,
}

fn default_event_rate() -> u32 {
    100
}

impl MusicMeta {
    pub fn skill_scores(&self, mode: LiveMode) -> &[f64] {
        match mode {
            LiveMode::Solo => &self.skill_score_solo,
            LiveMode::Auto => &self.skill_score_auto,
            LiveMode::Multi => &self.skill_score_multi,
        }
    }

    pub fn base_rate(&self, mode: LiveMode) -> f64 {
        match mode {
            LiveMode::Solo => self.base_score,
            LiveMode::Auto => self.base_score_auto,
            LiveMode::Multi => self.base_score + self.fever_score * 0.5,
        }
    }
}

/// Coefficient source keyed by `(music_id, difficulty)`.
#[derive(Debug, Default, Clone)]
pub struct MusicMetaIndex {
    metas: HashMap<(u32, Difficulty), MusicMeta>,
}

impl MusicMetaIndex {
    pub fn from_metas(metas: Vec<MusicMeta>) -> Self {
        let mut map = HashMap::with_capacity(metas.len());
        let mut skipped = 0;
        for meta in metas {
            match Difficulty::from_str(&meta.difficulty) {
                Ok(diff) => {
                    map.insert((meta.music_id, diff), meta);
                }
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!("Skipped {} metas with unknown difficulty", skipped);
        }
        Self { metas: map }
    }

    pub fn from_reader<R: Read>(reader: R) -> CalcResult<Self> {
        let metas: Vec<MusicMeta> = serde_json::from_reader(reader)?;
        debug!("Loaded {} music metas", metas.len());
        Ok(Self::from_metas(metas))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CalcResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn get(&self, music_id: u32, difficulty: Difficulty) -> Option<&MusicMeta> {
        self.metas.get(&(music_id, difficulty))
    }

    /// First five coefficients for the mode, or `None` when there is no usable data.
    pub fn coefficients(
        &self,
        music_id: u32,
        difficulty: Difficulty,
        mode: LiveMode,
    ) -> Option<[f64; 5]> {
        let scores = self.get(music_id, difficulty)?.skill_scores(mode);
        scores.get(..5)?.try_into().ok()
    }

    /// Sorted, deduplicated song ids.
    pub fn song_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.metas.keys().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub fn len(&self) -> usize {
        self.metas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }
}
