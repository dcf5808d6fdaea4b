use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polysql::{qb, DialectKind, Select};

/// Build a SELECT with `n` columns and `n` bound conditions:
/// SELECT col0, col1, ... FROM t WHERE col0 = $1 AND col1 = $2 ...
fn build_select(n: usize) -> Select {
    let columns: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let refs: Vec<&str> = columns.iter().map(String::as_str).collect();
    let mut query = qb::select(&refs).unwrap().from("t").unwrap();
    for (i, col) in columns.iter().enumerate() {
        query = query.eq(col, i as i64).unwrap();
    }
    query
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/postgres");

    for n in [1, 5, 10, 50, 100] {
        let query = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
            b.iter(|| black_box(query.compile(DialectKind::Postgres).unwrap()));
        });
    }

    group.finish();
}

fn bench_build_and_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/build_and_compile");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let query = build_select(n);
                black_box(query.compile(DialectKind::Postgres).unwrap());
            });
        });
    }

    group.finish();
}

fn bench_all_dialects(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/dialects");
    let query = build_select(20);

    for kind in [DialectKind::Postgres, DialectKind::MySql, DialectKind::Sqlite] {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &query, |b, query| {
            b.iter(|| black_box(query.compile(kind).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compile, bench_build_and_compile, bench_all_dialects);
criterion_main!(benches);
