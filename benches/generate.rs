use criterion::{criterion_group, criterion_main, Criterion};

use factorygen::{analyze, emit::emit_factory, generate, schema::parse, Config};

pub fn benchmark_generate(c: &mut Criterion) {
    let input = include_str!("../tests/schema/types.ts");
    let config = Config::default();
    c.bench_function("parse types.ts", |b| b.iter(|| parse(input)));
    c.bench_function("analyze types.ts", |b| {
        b.iter(|| analyze(input, &config).unwrap())
    });
    let kinds = analyze(input, &config).unwrap();
    c.bench_function("emit types.ts", |b| b.iter(|| emit_factory(&kinds, &config)));
    c.bench_function("generate types.ts", |b| {
        b.iter(|| generate(input, &config).unwrap())
    });
}

criterion_group!(generator, benchmark_generate);
criterion_main!(generator);
