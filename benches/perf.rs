use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use lol_review::dataset::{MatchRecord, Table};
use lol_review::icons::IconLibrary;
use lol_review::selection::{filter_by_player, players};
use lol_review::trend::build_trend;
use lol_review::view::{StatCategory, render};

const CHAMPIONS: [&str; 6] = ["Ahri", "Lux", "Azir", "Jinx", "Lee Sin", "Orianna"];

fn sample_table(players: usize, matches_per_player: usize) -> Table {
    let mut rows = Vec::with_capacity(players * matches_per_player);
    for p in 0..players {
        for m in 0..matches_per_player {
            let champion = CHAMPIONS[(p + m) % CHAMPIONS.len()];
            rows.push(
                MatchRecord::new(format!("Player {p:03}"), champion, format!("G{m}"))
                    .with_field("goldDiff@10", (m as f64 * 37.0) - 400.0)
                    .with_field("csDiff@10", (m as f64 * 1.5) - 10.0)
                    .with_field("KDA", 2.5)
                    .with_field("Vision Score", 30.0 + m as f64)
                    .with_field("Item 0", "Infinity Edge")
                    .with_field("Summoner Spell 1", "Flash"),
            );
        }
    }
    Table::new(rows)
}

fn bench_players(c: &mut Criterion) {
    let table = sample_table(200, 25);
    c.bench_function("players_sorted", |b| {
        b.iter(|| black_box(players(black_box(&table)).len()))
    });
}

fn bench_trend(c: &mut Criterion) {
    let table = sample_table(200, 25);
    c.bench_function("trend_fold", |b| {
        b.iter(|| {
            let subset = filter_by_player(black_box(&table), "Player 100");
            black_box(build_trend(&subset).points.len())
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let table = sample_table(200, 25);
    let icons = IconLibrary::new("bench_champs", "bench_items", "bench_spells");
    c.bench_function("render_view", |b| {
        b.iter(|| {
            let view = render(
                black_box(&table),
                &icons,
                "Player 100",
                "Azir",
                StatCategory::FarmGold,
            )
            .unwrap();
            black_box(view.trend.points.len())
        })
    });
}

criterion_group!(benches, bench_players, bench_trend, bench_render);
criterion_main!(benches);
