//! Dispatch benchmarks
//!
//! Benchmarks for the per-call pipeline:
//! - Frame construction
//! - Formatter chains of increasing length
//! - Fan-out to several tapes
//! - Logger extension
//!
//! Run with: cargo bench -p vcr-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use vcr_core::{args, formatter_fn, tape_fn, Frame, Vcr};

fn bench_frame(c: &mut Criterion) {
    c.bench_function("frame_new", |b| {
        b.iter(|| Frame::new(black_box("app:info"), args!["started", 42]))
    });
}

fn bench_formatter_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatter_chain");

    for len in [0usize, 1, 4, 16] {
        let mut vcr = Vcr::new("app");
        for _ in 0..len {
            vcr.formatter(formatter_fn(|mut args: Vec<Value>| {
                args.push(json!(1));
                Ok(args)
            }));
        }
        vcr.use_tape(tape_fn(|frame| {
            black_box(frame);
            Ok(())
        }));

        group.bench_with_input(BenchmarkId::from_parameter(len), &vcr, |b, vcr| {
            b.iter(|| vcr.info(args!["payload"]).map(|_| ()))
        });
    }

    group.finish();
}

fn bench_tape_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("tape_fanout");

    for tapes in [1usize, 4, 16] {
        let mut vcr = Vcr::new("app");
        for _ in 0..tapes {
            vcr.use_tape(tape_fn(|frame| {
                black_box(&frame.args);
                Ok(())
            }));
        }

        group.bench_with_input(BenchmarkId::from_parameter(tapes), &vcr, |b, vcr| {
            b.iter(|| vcr.warn(args!["payload", { "n": 1 }]).map(|_| ()))
        });
    }

    group.finish();
}

fn bench_extend(c: &mut Criterion) {
    let mut root = Vcr::new("app");
    for _ in 0..8 {
        root.formatter(formatter_fn(Ok));
        root.use_tape(tape_fn(|_| Ok(())));
    }

    c.bench_function("extend", |b| b.iter(|| root.extend(black_box("worker"))));
}

criterion_group!(
    benches,
    bench_frame,
    bench_formatter_chain,
    bench_tape_fanout,
    bench_extend
);
criterion_main!(benches);
