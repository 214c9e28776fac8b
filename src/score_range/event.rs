use crate::tables::{energy_multiplier, LiveMode};

/// Marathon event points for one play.
///
/// `music_rate` and `deck_bonus` are percentages. In multi lives the other
/// four players are assumed to score like the player when `other_score` is 0.
pub fn event_point(
    mode: LiveMode,
    score: i64,
    music_rate: u32,
    deck_bonus: u32,
    energy: usize,
    other_score: i64,
) -> i64 {
    let score = score.max(0);
    let music_rate = f64::from(music_rate) / 100.0;
    let deck_rate = f64::from(deck_bonus) / 100.0 + 1.0;
    let boost = i64::from(energy_multiplier(energy));

    let base = match mode {
        LiveMode::Solo | LiveMode::Auto => 100 + score / 20_000,
        LiveMode::Multi => {
            let others = if other_score == 0 {
                4 * score
            } else {
                other_score
            };
            110 + score / 17_000 + (others / 340_000).min(13)
        }
    };

    (base as f64 * music_rate * deck_rate).floor() as i64 * boost
}
