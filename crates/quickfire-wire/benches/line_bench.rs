//! Benchmarks for the quiz line protocol

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quickfire_wire::{ClientLine, ServerLine};

fn bench_client_parse(c: &mut Criterion) {
    let line = "ANSWER_c the quick brown fox jumps over the lazy dog";

    c.bench_function("client_parse", |b| {
        b.iter(|| ClientLine::parse(black_box(line)))
    });
}

fn bench_client_parse_unrecognized(c: &mut Criterion) {
    let line = "NOISE_c something the protocol never defined";

    c.bench_function("client_parse_unrecognized", |b| {
        b.iter(|| ClientLine::parse(black_box(line)))
    });
}

fn bench_server_encode(c: &mut Criterion) {
    let line = ServerLine::Question("What is the capital of France?".to_string());

    c.bench_function("server_encode", |b| b.iter(|| black_box(&line).encode()));
}

criterion_group!(
    benches,
    bench_client_parse,
    bench_client_parse_unrecognized,
    bench_server_encode
);
criterion_main!(benches);
