use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use snake_common::games::SessionRng;
use snake_common::{
    BotController, GamePhase, SnakeBotType, SnakeGameState, SnakeSettings, WallCollisionMode,
};

fn play_bot_game(field_size: usize, ticks: usize) -> u32 {
    let settings = SnakeSettings {
        field_width: field_size,
        field_height: field_size,
        ..SnakeSettings::default()
    };
    let mut state = SnakeGameState::with_seed(settings, 42).expect("bench settings are valid");
    let mut bot_rng = SessionRng::new(7);
    state.start();

    for _ in 0..ticks {
        if state.phase() == GamePhase::GameOver {
            state.start();
        }
        let snapshot = state.snapshot();
        if let Some(direction) = BotController::calculate_move(
            SnakeBotType::Efficient,
            &snapshot,
            WallCollisionMode::WrapAround,
            &mut bot_rng,
        ) {
            state.set_direction(direction);
        }
        state.tick();
    }

    state.snapshot().high_score
}

fn bench_plain_ticks() -> u64 {
    let mut state =
        SnakeGameState::with_seed(SnakeSettings::default(), 42).expect("bench settings are valid");
    state.start();
    for _ in 0..1000 {
        state.tick();
    }
    state.tick_count()
}

fn tick_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    group.bench_function("1000_plain_ticks", |b| b.iter(bench_plain_ticks));

    group.bench_function("bot_game_10x10", |b| {
        b.iter(|| play_bot_game(black_box(10), black_box(1000)))
    });

    group.bench_function("bot_game_40x40", |b| {
        b.iter(|| play_bot_game(black_box(40), black_box(1000)))
    });

    group.finish();
}

criterion_group!(benches, tick_bench);
criterion_main!(benches);
