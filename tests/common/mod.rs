#![allow(dead_code)]

use sekai_calc::score_art::{
    Bracket, Catalogs, Combination, EnvyDetail, EnvyItem, ItemRef, LookupTable, MySekaiDetail,
    MySekaiItem, PointItem, PowerRequirement,
};
use sekai_calc::score_range::MusicMeta;
use std::sync::Arc;

pub fn bracket(min_score: u32, max_score: u32, bonus: u32) -> Bracket {
    Bracket {
        min_score,
        max_score,
        bonus,
    }
}

/// Envy item with one detail holding the given bonus brackets (all at 0..19,999).
pub fn envy(ep: u32, bonuses: &[u32]) -> ItemRef {
    Arc::new(PointItem::Envy(EnvyItem {
        ep,
        details: vec![EnvyDetail {
            energy: 0,
            base_ep: ep,
            brackets: bonuses.iter().map(|&b| bracket(0, 19_999, b)).collect(),
        }],
    }))
}

pub fn my_sekai(ep: u32) -> ItemRef {
    Arc::new(PointItem::MySekai(MySekaiItem {
        ep,
        details: vec![MySekaiDetail {
            pt: ep,
            valid_reqs: vec![PowerRequirement {
                power_idx: 7,
                req_mult: 100,
            }],
        }],
    }))
}

pub fn catalogs(envy_eps: &[u32], my_sekai_eps: &[u32]) -> Catalogs {
    Catalogs {
        envy: envy_eps.iter().map(|&ep| envy(ep, &[25])).collect(),
        my_sekai: my_sekai_eps.iter().map(|&ep| my_sekai(ep)).collect(),
    }
}

pub fn combo(items: Vec<ItemRef>) -> Combination {
    Combination { items }
}

/// Minimal table: base points -> single bracket per bonus.
pub fn table(entries: &[(u32, &[(u32, u32, u32)])]) -> LookupTable {
    entries
        .iter()
        .map(|(ep, brackets)| {
            (
                *ep,
                brackets
                    .iter()
                    .map(|&(lo, hi, bonus)| bracket(lo, hi, bonus))
                    .collect(),
            )
        })
        .collect()
}

/// Chart with the same coefficients in every mode. The sixth value is the encore.
pub fn meta(music_id: u32, difficulty: &str, coeffs: &[f64]) -> MusicMeta {
    MusicMeta {
        music_id,
        difficulty: difficulty.to_string(),
        music_time: 120.0,
        event_rate: 100,
        base_score: 1.0,
        base_score_auto: 1.0,
        skill_score_solo: coeffs.to_vec(),
        skill_score_auto: coeffs.to_vec(),
        skill_score_multi: coeffs.to_vec(),
        fever_score: 0.0,
        fever_end_time: 0.0,
        tap_count: 800,
    }
}
