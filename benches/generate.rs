//! Benchmark: parse + validate + generate for the pdata schemas.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdatagen::{parse, FileSpec, Generator};
use std::path::PathBuf;

fn schema_sources() -> Vec<String> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("pdata/schema");
    ["common.pdata", "logs.pdata", "logs_otlp.pdata"]
        .iter()
        .map(|name| std::fs::read_to_string(dir.join(name)).expect("read schema"))
        .collect()
}

fn bench_generate(c: &mut Criterion) {
    let sources = schema_sources();
    let files: Vec<FileSpec> = sources.iter().map(|s| parse(s).expect("parse")).collect();
    let generator = Generator::default();

    c.bench_function("parse", |b| {
        b.iter(|| {
            for s in &sources {
                black_box(parse(black_box(s)).expect("parse"));
            }
        })
    });

    c.bench_function("generate_all", |b| {
        b.iter(|| black_box(generator.generate_all(black_box(&files)).expect("generate")))
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
