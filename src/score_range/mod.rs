pub mod batch;
pub mod event;
pub mod live;
pub mod loader;
pub mod types;

pub use self::live::{LiveScoreFunction, MetaLiveScore};
pub use self::loader::{MusicMeta, MusicMetaIndex};
pub use self::types::{
    Assignment, CoefficientSet, DeckDetail, LiveDetail, ScoreRange, SkillActivation, SkillSet,
};

use crate::error::CalcResult;
use crate::tables::LiveMode;

/// Finds the best and worst order in which a deck's skills can fire.
pub struct ScoreRangeSolver<L> {
    pub live: L,
}

impl Default for ScoreRangeSolver<MetaLiveScore> {
    fn default() -> Self {
        Self {
            live: MetaLiveScore,
        }
    }
}

impl<L: LiveScoreFunction> ScoreRangeSolver<L> {
    pub fn new(live: L) -> Self {
        Self { live }
    }

    /// Score range for one song. `Ok(None)` when the song has no usable coefficients.
    pub fn compute(
        &self,
        skills: &[u32],
        song: Option<&MusicMeta>,
        total_power: u32,
        mode: LiveMode,
    ) -> CalcResult<Option<ScoreRange>> {
        let Some(song) = song else {
            return Ok(None);
        };
        let Ok(skill_set) = <SkillSet>::try_from(skills) else {
            return Ok(None);
        };
        let deck = DeckDetail::from_skills(total_power, &skill_set);
        let coeffs = song.skill_scores(mode);
        let coeffs = &coeffs[..coeffs.len().min(5)];
        self.compute_with_coefficients(skills, coeffs, &deck, song, mode)
    }

    /// Both inputs must hold exactly five entries, anything else is "no data".
    pub fn compute_with_coefficients(
        &self,
        skills: &[u32],
        coeffs: &[f64],
        deck: &DeckDetail,
        song: &MusicMeta,
        mode: LiveMode,
    ) -> CalcResult<Option<ScoreRange>> {
        let (Ok(skill_set), Ok(coeff_set)) =
            (<SkillSet>::try_from(skills), <CoefficientSet>::try_from(coeffs))
        else {
            return Ok(None);
        };

        let (max_assign, min_assign) = assign(&skill_set, &coeff_set);

        let max = self
            .live
            .live_score(deck, song, mode, &activations(&max_assign, &skill_set))?;
        let min = self
            .live
            .live_score(deck, song, mode, &activations(&min_assign, &skill_set))?;

        Ok(Some(ScoreRange {
            min: min.score,
            max: max.score,
            min_permutation: min_assign.slots,
            max_permutation: max_assign.slots,
            skill_coeffs: coeff_set,
        }))
    }
}

/// Rank-matches skills to slots ordered by descending coefficient.
/// Returns `(max, min)`: the max order pairs the largest skill with the largest
/// coefficient, the min order pairs the smallest skill with it.
pub fn assign(skills: &SkillSet, coeffs: &CoefficientSet) -> (Assignment, Assignment) {
    let mut slot_order = [0usize, 1, 2, 3, 4];
    slot_order.sort_by(|&a, &b| coeffs[b].total_cmp(&coeffs[a]));

    // Members sorted by skill; stable so equal skills keep deck order.
    let mut by_skill = [0usize, 1, 2, 3, 4];
    by_skill.sort_by_key(|&m| skills[m]);

    let mut max = Assignment {
        slots: [0; 5],
        members: [0; 5],
    };
    let mut min = max;

    for (rank, &slot) in slot_order.iter().enumerate() {
        let strong = by_skill[4 - rank];
        let weak = by_skill[rank];

        max.slots[slot] = skills[strong];
        max.members[slot] = strong;
        min.slots[slot] = skills[weak];
        min.members[slot] = weak;
    }

    (max, min)
}

/// Five slot activations followed by the leader encore.
pub fn activations(assignment: &Assignment, skills: &SkillSet) -> [SkillActivation; 6] {
    let mut out = [SkillActivation {
        member: 0,
        score_up: skills[0],
    }; 6];
    for (i, slot) in out.iter_mut().take(5).enumerate() {
        *slot = SkillActivation {
            member: assignment.members[i],
            score_up: assignment.slots[i],
        };
    }
    out
}

/// Sum of skill x coefficient across the five slots.
pub fn dot_product(slots: &[u32; 5], coeffs: &CoefficientSet) -> f64 {
    slots
        .iter()
        .zip(coeffs)
        .map(|(&s, &c)| f64::from(s) * c)
        .sum()
}
