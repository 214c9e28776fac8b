use criterion::{criterion_group, criterion_main, Criterion};
use sekai_calc::config::{CatalogParams, SolverLimits};
use sekai_calc::score_art::{build_catalogs, rank_solutions, solve_gap, Bracket, LookupTable};
use sekai_calc::score_range::{MusicMeta, ScoreRangeSolver};
use sekai_calc::tables::LiveMode;
use std::hint::black_box;

fn setup_table() -> LookupTable {
    // Roughly the shape of the real table: 20k score rows x 25..300% columns.
    let mut table = LookupTable::new();
    for row in 0..50u32 {
        let min_score = row * 20_000;
        for bonus in (25..=300).step_by(5) {
            let base_ep = 100 + row + bonus * 3;
            table.entry(base_ep).or_default().push(Bracket {
                min_score,
                max_score: min_score + 19_999,
                bonus,
            });
        }
    }
    table
}

fn setup_song() -> MusicMeta {
    MusicMeta {
        music_id: 1,
        difficulty: "master".to_string(),
        music_time: 120.0,
        event_rate: 100,
        base_score: 1.0,
        base_score_auto: 0.8,
        skill_score_solo: vec![0.18, 0.15, 0.22, 0.20, 0.25, 0.10],
        skill_score_auto: vec![0.18, 0.15, 0.22, 0.20, 0.25, 0.10],
        skill_score_multi: vec![0.18, 0.15, 0.22, 0.20, 0.25, 0.10],
        fever_score: 0.5,
        fever_end_time: 90.0,
        tap_count: 900,
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let table = setup_table();
    let catalogs = build_catalogs(&table, &CatalogParams::default());
    let limits = SolverLimits::default();

    c.bench_function("solve_gap (12,345)", |b| {
        b.iter(|| solve_gap(black_box(12_345), &catalogs, false, &limits))
    });

    let found = solve_gap(12_345, &catalogs, false, &limits);
    c.bench_function("rank_solutions", |b| {
        b.iter(|| rank_solutions(black_box(found.clone()), false, &limits))
    });

    let song = setup_song();
    let solver = ScoreRangeSolver::default();
    let skills = [140, 120, 100, 100, 100];
    c.bench_function("score_range (multi)", |b| {
        b.iter(|| solver.compute(black_box(&skills), Some(&song), 293_231, LiveMode::Multi))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
