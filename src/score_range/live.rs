use super::loader::MusicMeta;
use super::types::{DeckDetail, LiveDetail, SkillActivation};
use crate::error::{CalcError, CalcResult};
use crate::tables::LiveMode;

/// Scores one live given the exact skill activation order.
/// `activations` holds the five slot activations followed by the leader encore.
pub trait LiveScoreFunction {
    fn live_score(
        &self,
        deck: &DeckDetail,
        song: &MusicMeta,
        mode: LiveMode,
        activations: &[SkillActivation; 6],
    ) -> CalcResult<LiveDetail>;
}

impl<F> LiveScoreFunction for F
where
    F: Fn(&DeckDetail, &MusicMeta, LiveMode, &[SkillActivation; 6]) -> CalcResult<LiveDetail>,
{
    fn live_score(
        &self,
        deck: &DeckDetail,
        song: &MusicMeta,
        mode: LiveMode,
        activations: &[SkillActivation; 6],
    ) -> CalcResult<LiveDetail> {
        self(deck, song, mode, activations)
    }
}

const MULTI_ACTIVE_BONUS_RATE: f64 = 0.015;

/// Game scoring driven by music meta rates.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetaLiveScore;

impl LiveScoreFunction for MetaLiveScore {
    fn live_score(
        &self,
        deck: &DeckDetail,
        song: &MusicMeta,
        mode: LiveMode,
        activations: &[SkillActivation; 6],
    ) -> CalcResult<LiveDetail> {
        let skill_scores = song.skill_scores(mode);
        if skill_scores.len() < activations.len() {
            return Err(CalcError::Validation(format!(
                "music {} ({}) has {} {} skill scores, need {}",
                song.music_id,
                song.difficulty,
                skill_scores.len(),
                mode,
                activations.len()
            )));
        }
        if let Some(bad) = activations.iter().find(|a| a.member >= deck.members.len()) {
            return Err(CalcError::Validation(format!(
                "activation references member {} of a {}-card deck",
                bad.member,
                deck.members.len()
            )));
        }

        let rate = song.base_rate(mode)
            + activations
                .iter()
                .zip(skill_scores)
                .map(|(a, &coeff)| f64::from(a.score_up) * coeff / 100.0)
                .sum::<f64>();

        let power = f64::from(deck.total_power);
        let active_bonus = match mode {
            LiveMode::Multi => 5.0 * MULTI_ACTIVE_BONUS_RATE * (5.0 * power),
            LiveMode::Solo | LiveMode::Auto => 0.0,
        };

        Ok(LiveDetail {
            score: (rate * power * 4.0 + active_bonus).floor() as i64,
            life: 1000,
        })
    }
}
