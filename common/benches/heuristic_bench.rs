use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::time::Duration;
use odd_scoring_common::games::SessionRng;
use odd_scoring_common::games::odd_scoring::{
    calculate_move, OddScoringGameState, PlayerNumber, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};
use odd_scoring_common::protocol::{decode_message, encode_message, ProtocolMessage};

fn bench_bot_vs_bot_games() {
    let mut session_rng = SessionRng::new(42);
    for board_size in MIN_BOARD_SIZE..=MAX_BOARD_SIZE {
        let mut game = OddScoringGameState::new(board_size, PlayerNumber::One);
        while !game.is_terminal() {
            let steps = calculate_move(game.board.position(), &mut session_rng);
            let player = game.current_player;
            if game.apply_move(player, steps).is_err() {
                break;
            }
        }
        black_box(game.winner());
    }
}

fn bench_move_codec() {
    let message = ProtocolMessage::Move {
        player: PlayerNumber::Two,
        steps: 3,
        new_position: 11,
        total_steps: 8,
    };
    let bytes = encode_message(black_box(&message));
    black_box(decode_message(&bytes).ok());
}

fn heuristic_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("odd_scoring");

    group
        .sample_size(50)
        .measurement_time(Duration::from_secs(5));

    group.bench_function("bot_vs_bot_all_sizes", |b| {
        b.iter(bench_bot_vs_bot_games)
    });

    group.bench_function("move_codec", |b| {
        b.iter(bench_move_codec)
    });

    group.finish();
}

criterion_group!(benches, heuristic_bench);
criterion_main!(benches);
