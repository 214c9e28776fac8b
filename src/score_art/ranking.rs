use super::types::{Combination, ItemRef, PointItem};
use crate::config::SolverLimits;
use serde::Serialize;
use std::cmp::Ordering;

/// Fire spent per MySekai play. Envy plays use the 0-fire tier.
pub const MY_SEKAI_FIRE: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredSolution {
    pub combination: Combination,
    pub my_sekai_games: u32,
    pub total_my_sekai_score: u32,
    pub envy_fire: u32,
    pub envy_games: u32,
    pub total_fire: u32,
    pub total_games: u32,
    pub diversity_score: u32,
    pub is_all_envy_mod5: bool,
    /// Within `tier_window` of the best MySekai total among the candidates.
    pub is_top_tier: bool,
}

impl ScoredSolution {
    pub fn score(combination: Combination) -> Self {
        let mut s = ScoredSolution {
            combination: Combination::default(),
            my_sekai_games: 0,
            total_my_sekai_score: 0,
            envy_fire: 0,
            envy_games: 0,
            total_fire: 0,
            total_games: combination.items.len() as u32,
            diversity_score: 0,
            is_all_envy_mod5: true,
            is_top_tier: false,
        };

        for item in &combination.items {
            match item.as_ref() {
                PointItem::MySekai(m) => {
                    s.my_sekai_games += 1;
                    s.total_my_sekai_score += m.ep;
                    s.total_fire += MY_SEKAI_FIRE;
                }
                PointItem::Envy(e) => {
                    s.envy_games += 1;
                    s.diversity_score += e
                        .details
                        .iter()
                        .map(|d| d.brackets.len() as u32)
                        .sum::<u32>();
                    if !e.has_mod5_bracket() {
                        s.is_all_envy_mod5 = false;
                    }
                }
            }
        }

        s.combination = combination;
        s
    }

    /// Items with their repeat counts: MySekai first, then by points descending.
    pub fn grouped(&self) -> Vec<(ItemRef, usize)> {
        let mut groups: Vec<(ItemRef, usize)> = Vec::new();
        for item in &self.combination.items {
            match groups
                .iter_mut()
                .find(|(g, _)| g.kind() == item.kind() && g.ep() == item.ep())
            {
                Some((_, count)) => *count += 1,
                None => groups.push((ItemRef::clone(item), 1)),
            }
        }
        groups.sort_by(|(a, _), (b, _)| a.kind().cmp(&b.kind()).then(b.ep().cmp(&a.ep())));
        groups
    }
}

/// Scores and orders solutions, best first.
///
/// Mod-5-clean solutions lead unless `allow_non_mod5` is set. Solutions whose
/// MySekai total is within `tier_window` of the best one form the top tier and
/// prefer fewer MySekai plays; the rest prefer a higher MySekai total. Ties
/// fall back to fire, Envy plays and diversity. The sort is stable.
pub fn rank_solutions(
    combinations: Vec<Combination>,
    allow_non_mod5: bool,
    limits: &SolverLimits,
) -> Vec<ScoredSolution> {
    let mut scored: Vec<ScoredSolution> =
        combinations.into_iter().map(ScoredSolution::score).collect();

    let best_my_sekai = scored
        .iter()
        .map(|s| s.total_my_sekai_score)
        .max()
        .unwrap_or(0);
    let tier_floor = best_my_sekai.saturating_sub(limits.tier_window);
    for s in &mut scored {
        s.is_top_tier = s.total_my_sekai_score >= tier_floor;
    }

    scored.sort_by(|a, b| compare(a, b, allow_non_mod5));
    scored
}

fn compare(a: &ScoredSolution, b: &ScoredSolution, allow_non_mod5: bool) -> Ordering {
    let mod5 = if allow_non_mod5 {
        Ordering::Equal
    } else {
        b.is_all_envy_mod5.cmp(&a.is_all_envy_mod5)
    };

    let tier = b.is_top_tier.cmp(&a.is_top_tier).then_with(|| {
        if a.is_top_tier {
            a.my_sekai_games
                .cmp(&b.my_sekai_games)
                .then(b.total_my_sekai_score.cmp(&a.total_my_sekai_score))
        } else {
            b.total_my_sekai_score.cmp(&a.total_my_sekai_score)
        }
    });

    mod5.then(tier)
        .then(a.total_fire.cmp(&b.total_fire))
        .then(a.envy_games.cmp(&b.envy_games))
        .then(b.diversity_score.cmp(&a.diversity_score))
}
