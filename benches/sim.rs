use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetra_core::core::{Block, EventBus, Game, Message, TetradFactory, Well};
use tetra_core::types::{BlockId, MoveDirection, RotateDirection, ShapeKind};

fn bench_move(c: &mut Criterion) {
    let mut bus = EventBus::new();
    let mut well = Well::new();
    well.build(&mut bus);
    let mut factory = TetradFactory::new(12345);
    well.add_tetrad(factory.of_kind(ShapeKind::T), &mut bus);

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            well.move_current(black_box(MoveDirection::Left), &mut bus);
            well.move_current(black_box(MoveDirection::Right), &mut bus);
            bus.post(Message::Tick);
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut bus = EventBus::new();
    let mut well = Well::new();
    well.build(&mut bus);
    let mut factory = TetradFactory::new(12345);
    well.add_tetrad(factory.of_kind(ShapeKind::T), &mut bus);
    for _ in 0..5 {
        well.move_current(MoveDirection::Down, &mut bus);
    }

    c.bench_function("rotate_cw_ccw", |b| {
        b.iter(|| {
            well.rotate_current(black_box(RotateDirection::Cw), &mut bus);
            well.rotate_current(black_box(RotateDirection::Ccw), &mut bus);
            bus.post(Message::Tick);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_bottom_line", |b| {
        b.iter(|| {
            let mut bus = EventBus::new();
            let mut well = Well::new();
            well.build(&mut bus);
            for column in 0..9 {
                well.place_stacked_block(21, column, Block::new(BlockId(column as u32)));
            }
            let mut factory = TetradFactory::new(12345);
            well.add_tetrad(factory.of_kind(ShapeKind::I), &mut bus);
            well.rotate_current(RotateDirection::Cw, &mut bus);
            for _ in 0..4 {
                well.move_current(MoveDirection::Right, &mut bus);
            }
            well.sonic_drop_current(&mut bus);
            well.lock_current(&mut bus);
        })
    });
}

fn bench_session_ticks(c: &mut Criterion) {
    c.bench_function("session_100_ticks", |b| {
        b.iter(|| {
            let mut bus = EventBus::new();
            let _game = Game::attach(&mut bus, black_box(12345));
            bus.post(Message::GameStartRequest);
            for _ in 0..100 {
                bus.post(Message::Tick);
            }
        })
    });
}

criterion_group!(
    benches,
    bench_move,
    bench_rotate,
    bench_line_clear,
    bench_session_ticks
);
criterion_main!(benches);
