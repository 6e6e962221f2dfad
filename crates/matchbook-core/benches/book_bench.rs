use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use matchbook_core::{AddOrder, MatchingEngine, Side, Trade, TraderTag};

fn add(order_id: u64, side: Side, price: u32, quantity: u32) -> AddOrder {
    AddOrder {
        timestamp: order_id,
        order_id,
        side,
        price,
        quantity,
        trader: TraderTag::new("BENCH"),
    }
}

fn bench_non_crossing_inserts(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for &num_orders in [100u64, 1_000, 10_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("non_crossing", num_orders),
            &num_orders,
            |b, &num_orders| {
                b.iter(|| {
                    let mut engine = MatchingEngine::with_capacity(num_orders as usize);
                    let mut trades: Vec<Trade> = Vec::new();
                    for i in 0..num_orders {
                        let order = if i % 2 == 0 {
                            add(i + 1, Side::Buy, 10_000 - (i as u32 % 500), 100)
                        } else {
                            add(i + 1, Side::Sell, 10_100 + (i as u32 % 500), 100)
                        };
                        engine.submit(order, &mut trades);
                    }
                    black_box(trades.len())
                })
            },
        );
    }

    group.finish();
}

fn bench_crossing_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");

    for &depth in [10u32, 100, 1_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("sweep_levels", depth),
            &depth,
            |b, &depth| {
                b.iter_batched(
                    || {
                        let mut engine = MatchingEngine::with_capacity(depth as usize);
                        let mut trades: Vec<Trade> = Vec::new();
                        for i in 0..depth {
                            engine.submit(
                                add(u64::from(i) + 1, Side::Sell, 10_000 + i, 100),
                                &mut trades,
                            );
                        }
                        engine
                    },
                    |mut engine| {
                        let mut trades: Vec<Trade> = Vec::new();
                        engine.submit(
                            add(u64::from(depth) + 1, Side::Buy, 10_000 + depth, 100 * depth / 2),
                            &mut trades,
                        );
                        black_box(trades.len())
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_cancel_by_handle(c: &mut Criterion) {
    let mut group = c.benchmark_group("cancel");

    for &num_orders in [100u64, 1_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("resting_orders", num_orders),
            &num_orders,
            |b, &num_orders| {
                b.iter_batched(
                    || {
                        let mut engine = MatchingEngine::with_capacity(num_orders as usize);
                        let mut trades: Vec<Trade> = Vec::new();
                        for i in 0..num_orders {
                            engine.submit(add(i + 1, Side::Buy, 10_000, 100), &mut trades);
                        }
                        engine
                    },
                    |mut engine| {
                        // Every other order, from the middle of the queue.
                        for id in (1..=num_orders).step_by(2) {
                            black_box(engine.cancel(id));
                        }
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_market_data_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    let mut engine = MatchingEngine::with_capacity(2_000);
    let mut trades: Vec<Trade> = Vec::new();
    for i in 0..1_000u32 {
        engine.submit(add(u64::from(i) + 1, Side::Buy, 9_999 - i, 100), &mut trades);
        engine.submit(
            add(u64::from(i) + 1_001, Side::Sell, 10_000 + i, 100),
            &mut trades,
        );
    }

    group.bench_function("best_bid", |b| b.iter(|| black_box(engine.best_bid())));
    group.bench_function("best_ask", |b| b.iter(|| black_box(engine.best_ask())));
    group.bench_function("depth_at_best", |b| {
        b.iter(|| black_box(engine.depth_at(Side::Buy, 9_999)))
    });
    group.bench_function("top_of_book", |b| b.iter(|| black_box(engine.top_of_book())));

    group.finish();
}

criterion_group!(
    benches,
    bench_non_crossing_inserts,
    bench_crossing_sweep,
    bench_cancel_by_handle,
    bench_market_data_queries
);

criterion_main!(benches);
