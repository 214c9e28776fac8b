mod common;

use common::{meta, table};
use sekai_calc::api::{plan_score_art, score_table, ScoreArtRequest, MAX_GAP};
use sekai_calc::config::{CatalogParams, RangeParams, SolverLimits};
use sekai_calc::error::CalcError;
use sekai_calc::score_art::ItemKind;
use sekai_calc::score_range::batch::{self, BatchInput};
use sekai_calc::score_range::{MusicMetaIndex, ScoreRangeSolver};
use sekai_calc::tables::{Difficulty, LiveMode};

fn request(current: i64, target: i64) -> ScoreArtRequest {
    ScoreArtRequest {
        current,
        target,
        catalog: CatalogParams::default(),
        allow_non_mod5: false,
    }
}

fn index() -> MusicMetaIndex {
    MusicMetaIndex::from_metas(vec![
        meta(1, "master", &[0.1; 6]),
        meta(1, "expert", &[0.2; 6]),
        // Five values: the encore has no coefficient and scoring fails.
        meta(2, "master", &[0.1; 5]),
        meta(3, "hard", &[0.1, 0.1, 0.1]),
    ])
}

fn range_params() -> RangeParams {
    RangeParams {
        total_power: 100_000,
        skills: "100,100,100,100,100".to_string(),
        mode: LiveMode::Auto,
        event_bonus: 0,
        energy: 0,
    }
}

#[test]
fn test_gap_validation() {
    assert_eq!(request(1_000, 5_000).gap().unwrap(), 4_000);
    assert!(matches!(
        request(5_000, 5_000).gap(),
        Err(CalcError::Validation(_))
    ));
    assert!(matches!(
        request(5_000, 1_000).gap(),
        Err(CalcError::Validation(_))
    ));
    assert!(matches!(
        request(0, MAX_GAP).gap(),
        Err(CalcError::Validation(_))
    ));
    assert_eq!(request(0, MAX_GAP - 1).gap().unwrap(), MAX_GAP - 1);
}

#[test]
fn test_plan_score_art_sample() {
    let t = table(&[(1000, &[(0, 19_999, 25)])]);
    let plans = plan_score_art(&t, &request(10_000, 14_000), &SolverLimits::default()).unwrap();

    assert!(!plans.is_empty());
    let expected = vec![(ItemKind::MySekai, 3000), (ItemKind::Envy, 1000)];
    assert!(plans.iter().any(|p| p.combination.key() == expected));
    for plan in &plans {
        assert_eq!(plan.combination.total(), 4_000);
    }
    // Fewest MySekai plays inside the top tier leads.
    assert_eq!(plans[0].combination.key(), expected);
}

#[test]
fn test_plan_score_art_rejects_bad_limits() {
    let t = table(&[(1000, &[(0, 19_999, 25)])]);
    let limits = SolverLimits {
        band_width: 0,
        ..Default::default()
    };
    assert!(matches!(
        plan_score_art(&t, &request(0, 4_000), &limits),
        Err(CalcError::Config(_))
    ));
}

#[test]
fn test_score_table_skips_bad_charts() {
    let rows = score_table(&index(), &range_params(), None, None, false).unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.music_id == 1));
    // Expert has the larger coefficients, so it sorts first.
    assert_eq!(rows[0].difficulty, Difficulty::Expert);
    assert_eq!(rows[0].range.max, 880_000);
    assert_eq!(rows[0].max_event_point, 144);
    assert_eq!(rows[1].range.max, 640_000);
    assert_eq!(rows[1].max_event_point, 132);
}

#[test]
fn test_score_table_filters() {
    let idx = index();
    let best = score_table(&idx, &range_params(), None, None, true).unwrap();
    assert_eq!(best.len(), 1);
    assert_eq!(best[0].difficulty, Difficulty::Expert);

    let master = score_table(&idx, &range_params(), Some(1), Some(Difficulty::Master), false)
        .unwrap();
    assert_eq!(master.len(), 1);
    assert_eq!(master[0].difficulty, Difficulty::Master);

    let missing = score_table(&idx, &range_params(), Some(42), None, false).unwrap();
    assert!(missing.is_empty());
}

#[test]
fn test_score_table_bad_skills() {
    let params = RangeParams {
        skills: "100,100".to_string(),
        ..range_params()
    };
    assert!(matches!(
        score_table(&index(), &params, None, None, false),
        Err(CalcError::Config(_))
    ));
}

#[test]
fn test_batch_targets_cover_index() {
    let idx = index();
    let targets = batch::all_targets(&idx);
    assert_eq!(targets.len(), idx.len());

    let input = BatchInput {
        skills: [100; 5],
        total_power: 100_000,
        mode: LiveMode::Auto,
        event_bonus: 0,
        energy: 0,
    };
    let rows = batch::evaluate(&ScoreRangeSolver::default(), &idx, &targets, &input);
    assert_eq!(rows.len(), 2);
}
