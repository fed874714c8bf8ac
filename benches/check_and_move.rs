use criterion::{black_box, criterion_group, criterion_main, Criterion};
use torus_snake_bot::board::{Position, TorusBoard};
use torus_snake_bot::setup_fixture;
use torus_snake_bot::strategy::{FixedOrderPolicy, MovePolicy};
use torus_snake_bot::types::Direction;

fn bench_wrapped_shift(c: &mut Criterion) {
    let board = TorusBoard::new(32, 32, vec![Position { x: 0, y: 0 }]).unwrap();
    c.bench_function("wrapped shift", |b| {
        b.iter(|| {
            for direction in Direction::all() {
                black_box(board.shifted(black_box(Position { x: 0, y: 0 }), direction));
            }
        })
    });
}

fn bench_fixed_order_game(c: &mut Criterion) {
    let setup = setup_fixture(include_str!("../fixtures/three_by_three.txt"));
    c.bench_function("fixed order game", |b| {
        b.iter(|| {
            let mut board = TorusBoard::new(
                setup.width,
                setup.height,
                setup.starting_positions.clone(),
            )
            .unwrap();
            let mut policy = FixedOrderPolicy;
            // enough prompts to walk the snake into its own trail
            for _ in 0..6 {
                black_box(policy.choose(&mut board, setup.my_number));
            }
        })
    });
}

criterion_group!(benches, bench_wrapped_shift, bench_fixed_order_game);
criterion_main!(benches);
