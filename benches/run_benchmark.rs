//! Coordination overhead benchmarks
//!
//! Measures registering N mocks, running a scenario that consumes all of
//! them, and settling the run.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use with_fetch_mock::normalize;
use with_fetch_mock::prelude::*;

/// Build a scenario that fetches `count` times.
fn scenario(fetch: FetchMock, count: usize) -> Mock<(), usize> {
    Mock::func_async(move |_| async move {
        for i in 0..count {
            fetch.get(&format!("/item/{}", i)).await?;
        }
        Ok(count)
    })
}

/// Benchmark a full run for growing mock counts
fn bench_run(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let mut group = c.benchmark_group("with_mock_run");

    for count in [0, 1, 10, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                let fetch = FetchMock::new();
                let with_mock = WithMock::new(fetch.clone());
                let mocks = (0..count).map(|_| Response::new(200, "{}").into());
                let outcome = runtime.block_on(with_mock.run(scenario(fetch, count), mocks));
                black_box(outcome.map(|(n, responses)| n + responses.len()).ok())
            })
        });
    }

    group.finish();
}

/// Benchmark normalizing and settling each mock shape
fn bench_normalize(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let mut group = c.benchmark_group("normalize");

    group.bench_function("value", |b| {
        b.iter(|| {
            let mock = Mock::<(), u32>::value(black_box(1));
            runtime.block_on(normalize(mock, true)(())).ok()
        })
    });

    group.bench_function("function", |b| {
        b.iter(|| {
            let mock = Mock::<(), u32>::func(|_| Ok(black_box(1)));
            runtime.block_on(normalize(mock, true)(())).ok()
        })
    });

    group.bench_function("function_async", |b| {
        b.iter(|| {
            let mock = Mock::<(), u32>::func_async(|_| async { Ok(black_box(1)) });
            runtime.block_on(normalize(mock, true)(())).ok()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_run, bench_normalize);
criterion_main!(benches);
