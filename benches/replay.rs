//! Benchmarks for game setup, whole-game replays and snapshots.
//!
//! Run with: `cargo bench --bench replay`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use bang_engine::core::{ActionRecord, GameConfig};
use bang_engine::game::Game;

#[path = "../tests/common/mod.rs"]
mod common;

/// Play a seeded game with the scripted bot and keep its action log.
fn record_game(config: &GameConfig, max_steps: usize) -> Vec<ActionRecord> {
    let mut game = Game::new(config.clone());
    for _ in 0..max_steps {
        if !common::autoplay_step(&mut game) {
            break;
        }
    }
    game.history().to_vec()
}

fn benchmark_setup(c: &mut Criterion) {
    let mut group = c.benchmark_group("Setup");
    for players in [4, 7] {
        group.bench_with_input(BenchmarkId::new("players", players), &players, |b, &players| {
            b.iter(|| black_box(Game::new(GameConfig::new(players).with_seed(black_box(42)))));
        });
    }
    group.finish();
}

fn benchmark_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("Replay");
    for players in [4, 7] {
        let config = GameConfig::new(players).with_seed(7);
        let history = record_game(&config, 400);
        group.bench_with_input(
            BenchmarkId::new("actions", history.len()),
            &history,
            |b, history| {
                b.iter(|| {
                    let mut game = Game::new(config.clone());
                    for record in history {
                        let _ = game.handle_action(record.player, record.action.clone());
                    }
                    black_box(game.updates().len())
                });
            },
        );
    }
    group.finish();
}

/// Cloning shares piles structurally, so it stays cheap mid-game.
fn benchmark_clone_and_snapshot(c: &mut Criterion) {
    let config = GameConfig::new(5).with_seed(3);
    let mut game = Game::new(config.clone());
    for _ in 0..100 {
        if !common::autoplay_step(&mut game) {
            break;
        }
    }

    c.bench_function("clone_mid_game", |b| b.iter(|| black_box(game.clone())));
    c.bench_function("snapshot_mid_game", |b| b.iter(|| black_box(game.snapshot())));
}

criterion_group!(benches, benchmark_setup, benchmark_replay, benchmark_clone_and_snapshot);
criterion_main!(benches);
