mod common;

use common::meta;
use sekai_calc::error::{CalcError, CalcResult};
use sekai_calc::score_range::{
    activations, assign, DeckDetail, LiveDetail, MetaLiveScore, MusicMeta, ScoreRangeSolver,
    SkillActivation,
};
use sekai_calc::tables::LiveMode;
use std::cell::RefCell;

const COEFFS: [f64; 6] = [0.18, 0.15, 0.22, 0.20, 0.25, 0.10];
const SKILLS: [u32; 5] = [140, 120, 100, 100, 100];

/// Sums coefficient x skill over the six activations, scaled by 10.
fn dot_stub(
    _deck: &DeckDetail,
    song: &MusicMeta,
    mode: LiveMode,
    acts: &[SkillActivation; 6],
) -> CalcResult<LiveDetail> {
    let coeffs = song.skill_scores(mode);
    let sum: f64 = acts
        .iter()
        .zip(coeffs)
        .map(|(a, &c)| f64::from(a.score_up) * c)
        .sum();
    Ok(LiveDetail {
        score: (sum * 10.0).round() as i64,
        life: 1000,
    })
}

fn failing_stub(
    _deck: &DeckDetail,
    _song: &MusicMeta,
    _mode: LiveMode,
    _acts: &[SkillActivation; 6],
) -> CalcResult<LiveDetail> {
    Err(CalcError::Validation("live simulation failed".into()))
}

#[test]
fn test_end_to_end_stub_scores() {
    let song = meta(1, "master", &COEFFS);
    let solver = ScoreRangeSolver::new(dot_stub);

    let range = solver
        .compute(&SKILLS, Some(&song), 250_000, LiveMode::Auto)
        .unwrap()
        .expect("song has coefficients");

    assert_eq!(range.max, 1284);
    assert_eq!(range.min, 1236);
    assert_eq!(range.max_permutation, [100, 100, 120, 100, 140]);
    assert_eq!(range.min_permutation, [120, 140, 100, 100, 100]);
    assert_eq!(range.skill_coeffs, [0.18, 0.15, 0.22, 0.20, 0.25]);
}

#[test]
fn test_encore_always_replays_leader() {
    let song = meta(1, "master", &COEFFS);
    let seen: RefCell<Vec<SkillActivation>> = RefCell::new(Vec::new());
    let recorder = |_d: &DeckDetail,
                    _s: &MusicMeta,
                    _m: LiveMode,
                    acts: &[SkillActivation; 6]|
     -> CalcResult<LiveDetail> {
        seen.borrow_mut().push(acts[5]);
        Ok(LiveDetail { score: 0, life: 1000 })
    };

    let solver = ScoreRangeSolver::new(recorder);
    solver
        .compute(&SKILLS, Some(&song), 250_000, LiveMode::Solo)
        .unwrap();

    let encores = seen.into_inner();
    assert_eq!(encores.len(), 2, "one call for max, one for min");
    for encore in encores {
        assert_eq!(encore.member, 0);
        assert_eq!(encore.score_up, 140);
    }
}

#[test]
fn test_assignment_tracks_members() {
    let coeffs = [0.18, 0.15, 0.22, 0.20, 0.25];
    let (max, min) = assign(&SKILLS, &coeffs);

    // Slot 4 has the largest coefficient.
    assert_eq!(max.members[4], 0);
    assert_eq!(max.members[2], 1);
    assert_eq!(min.members[1], 0);
    assert_eq!(min.members[0], 1);

    for a in [max, min] {
        let mut members = a.members;
        members.sort_unstable();
        assert_eq!(members, [0, 1, 2, 3, 4], "each card fires exactly once");
        for (slot, &m) in a.members.iter().enumerate() {
            assert_eq!(a.slots[slot], SKILLS[m]);
        }
    }

    let acts = activations(&max, &SKILLS);
    assert_eq!(acts[4].score_up, 140);
    assert_eq!(acts[5].member, 0);
}

#[test]
fn test_equal_skills_collapse_range() {
    let song = meta(1, "expert", &COEFFS);
    let solver = ScoreRangeSolver::new(dot_stub);
    let range = solver
        .compute(&[100; 5], Some(&song), 250_000, LiveMode::Auto)
        .unwrap()
        .unwrap();
    assert_eq!(range.min, range.max);
}

#[test]
fn test_missing_data_yields_none() {
    let solver = ScoreRangeSolver::new(dot_stub);
    let song = meta(1, "master", &COEFFS);

    // No song
    assert!(solver
        .compute(&SKILLS, None, 250_000, LiveMode::Auto)
        .unwrap()
        .is_none());

    // Short skill list
    assert!(solver
        .compute(&SKILLS[..4], Some(&song), 250_000, LiveMode::Auto)
        .unwrap()
        .is_none());

    // Short coefficient list
    let short = meta(2, "master", &[0.1, 0.2, 0.3]);
    assert!(solver
        .compute(&SKILLS, Some(&short), 250_000, LiveMode::Auto)
        .unwrap()
        .is_none());

    // Explicit coefficients of the wrong length
    let deck = DeckDetail::from_skills(250_000, &SKILLS);
    assert!(solver
        .compute_with_coefficients(&SKILLS, &[0.1; 6], &deck, &song, LiveMode::Auto)
        .unwrap()
        .is_none());
}

#[test]
fn test_live_score_errors_propagate() {
    let song = meta(1, "master", &COEFFS);
    let solver = ScoreRangeSolver::new(failing_stub);
    let result = solver.compute(&SKILLS, Some(&song), 250_000, LiveMode::Auto);
    assert!(matches!(result, Err(CalcError::Validation(_))));
}

#[test]
fn test_meta_live_score_solo_auto() {
    let song = meta(1, "master", &[0.1; 6]);
    let solver = ScoreRangeSolver::default();
    let range = solver
        .compute(&[100; 5], Some(&song), 100_000, LiveMode::Auto)
        .unwrap()
        .unwrap();
    // (1.0 + 6 x 0.1) x 100,000 x 4
    assert_eq!(range.max, 640_000);
    assert_eq!(range.min, 640_000);
}

#[test]
fn test_meta_live_score_multi_adds_active_bonus() {
    let song = meta(1, "master", &[0.0; 6]);
    let solver = ScoreRangeSolver::default();
    let range = solver
        .compute(&[100; 5], Some(&song), 500_000, LiveMode::Multi)
        .unwrap()
        .unwrap();
    // 500,000 x 4 + 5 x 0.015 x 5 x 500,000
    assert_eq!(range.max, 2_187_500);
}

#[test]
fn test_meta_live_score_needs_encore_coefficient() {
    // Five coefficients is enough for the assignment but not for the encore.
    let song = meta(1, "master", &[0.1; 5]);
    let solver = ScoreRangeSolver::default();
    let result = solver.compute(&[100; 5], Some(&song), 100_000, LiveMode::Auto);
    assert!(matches!(result, Err(CalcError::Validation(_))));
}

#[test]
fn test_deck_power_split() {
    let deck = DeckDetail::from_skills(293_231, &SKILLS);
    let powers: Vec<u32> = deck.members.iter().map(|m| m.power).collect();
    assert_eq!(powers, vec![58_647, 58_646, 58_646, 58_646, 58_646]);
    assert_eq!(powers.iter().sum::<u32>(), 293_231);
    assert_eq!(deck.members[0].score_up, 140);
}
