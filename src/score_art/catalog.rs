use super::types::{
    Bracket, Catalogs, EnvyDetail, EnvyItem, LookupTable, MySekaiDetail, MySekaiItem, PointItem,
    PowerRequirement,
};
use crate::config::CatalogParams;
use crate::tables::{
    energy_multiplier, power_index, ENVY_ENERGY, MY_SEKAI_POWERS, MY_SEKAI_REQ_MULTIPLIERS,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

pub const MIN_ENVY_BONUS: u32 = 25;
pub const DEFAULT_SCORE_CEILING: u32 = 1_000_000;
/// Brackets that finish under 20,000 score count as "zero score" plays.
pub const ZERO_SCORE_MAX: u32 = 19_999;
pub const MIN_MY_SEKAI_TIER: u32 = 2_500;
/// Tier listed first when available.
pub const PREFERRED_MY_SEKAI_TIER: u32 = 3_000;
/// `max_item_score` is entered in units of 10,000 points.
const SCORE_UNIT: f64 = 10_000.0;

/// Builds both catalogs from the raw table and the player's constraints.
pub fn build_catalogs(table: &LookupTable, params: &CatalogParams) -> Catalogs {
    let envy = build_envy_options(table, params);
    let my_sekai = build_my_sekai_options(params);
    debug!(
        "Catalogs: {} Envy items, {} MySekai items",
        envy.len(),
        my_sekai.len()
    );
    Catalogs {
        envy: envy
            .into_iter()
            .map(|e| Arc::new(PointItem::Envy(e)))
            .collect(),
        my_sekai: my_sekai
            .into_iter()
            .map(|m| Arc::new(PointItem::MySekai(m)))
            .collect(),
    }
}

pub fn score_ceiling(params: &CatalogParams) -> u32 {
    match params.max_item_score {
        Some(man) if man > 0.0 => (man * SCORE_UNIT).round() as u32,
        _ => DEFAULT_SCORE_CEILING,
    }
}

/// Envy items merged by final point value, largest first.
pub fn build_envy_options(table: &LookupTable, params: &CatalogParams) -> Vec<EnvyItem> {
    let ceiling = score_ceiling(params);
    let mult = energy_multiplier(ENVY_ENERGY);

    let keep = |b: &Bracket| {
        b.bonus >= MIN_ENVY_BONUS
            && b.bonus <= params.max_bonus
            && b.min_score <= ceiling
            && (!params.zero_score_only || b.max_score <= ZERO_SCORE_MAX)
    };

    let mut merged: BTreeMap<u32, Vec<EnvyDetail>> = BTreeMap::new();
    for (&base_ep, brackets) in table {
        let valid: Vec<Bracket> = brackets.iter().copied().filter(|b| keep(b)).collect();
        if valid.is_empty() {
            continue;
        }
        merged.entry(base_ep * mult).or_default().push(EnvyDetail {
            energy: ENVY_ENERGY,
            base_ep,
            brackets: valid,
        });
    }

    merged
        .into_iter()
        .rev()
        .map(|(ep, details)| EnvyItem { ep, details })
        .collect()
}

/// MySekai tiers reachable with the player's bonus (and power, when given).
pub fn build_my_sekai_options(params: &CatalogParams) -> Vec<MySekaiItem> {
    let fixed_power = params.max_power.map(power_index);

    let mut options: Vec<MySekaiItem> = MY_SEKAI_REQ_MULTIPLIERS
        .iter()
        .filter(|(pt, _)| *pt >= MIN_MY_SEKAI_TIER)
        .filter_map(|(pt, reqs)| {
            let candidates: Vec<usize> = match fixed_power {
                Some(idx) => vec![idx],
                None => (0..MY_SEKAI_POWERS.len()).collect(),
            };
            let valid_reqs: Vec<PowerRequirement> = candidates
                .into_iter()
                .filter_map(|power_idx| match reqs[power_idx] {
                    Some(req_mult) if req_mult <= params.max_bonus => Some(PowerRequirement {
                        power_idx,
                        req_mult,
                    }),
                    _ => None,
                })
                .collect();

            (!valid_reqs.is_empty()).then(|| MySekaiItem {
                ep: *pt,
                details: vec![MySekaiDetail {
                    pt: *pt,
                    valid_reqs,
                }],
            })
        })
        .collect();

    // A fixed power means the highest reachable tier always wins.
    if fixed_power.is_some() {
        if let Some(best) = options.iter().map(|o| o.ep).max() {
            options.retain(|o| o.ep == best);
        }
    }

    options.sort_by(|a, b| {
        let a_pref = a.ep == PREFERRED_MY_SEKAI_TIER;
        let b_pref = b.ep == PREFERRED_MY_SEKAI_TIER;
        b_pref.cmp(&a_pref).then(b.ep.cmp(&a.ep))
    });
    options
}
