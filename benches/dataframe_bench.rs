//! DataFrame benchmarks
//!
//! Construction, sorting, permutation, joins and group-by over growing row counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use colframe::{DataFrame, Series, SeriesType};

/// Three-column frame with `rows` rows and keys cycling over 100 values
fn build_frame(rows: usize) -> DataFrame {
    DataFrame::new(vec![
        Series::new((0..rows).map(|i| (i % 100) as i64), SeriesType::Int, "key"),
        Series::new((0..rows).map(|i| i as f64 * 0.5), SeriesType::Float, "value"),
        Series::new((0..rows).map(|i| format!("val_{}", i)), SeriesType::String, "label"),
    ])
    .expect("columns have equal length")
}

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_dataframe");
    for rows in [10, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter(|| build_frame(black_box(rows)))
        });
    }
    group.finish();
}

fn bench_series_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_sort");
    for rows in [1_000, 10_000, 100_000] {
        let series = Series::new(
            (0..rows).map(|i| ((i * 7919) % rows) as i64),
            SeriesType::Int,
            "shuffled",
        );
        group.bench_with_input(BenchmarkId::from_parameter(rows), &series, |b, series| {
            b.iter(|| {
                let mut s = series.copy();
                s.sort();
                s
            })
        });
    }
    group.finish();
}

fn bench_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("dataframe_order");
    for rows in [1_000, 10_000, 100_000] {
        let df = build_frame(rows);
        let reversed: Vec<usize> = (0..rows).rev().collect();
        group.bench_with_input(BenchmarkId::from_parameter(rows), &df, |b, df| {
            b.iter(|| {
                let mut d = df.copy();
                d.order(&reversed).expect("valid permutation");
                d
            })
        });
    }
    group.finish();
}

fn bench_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("inner_join");
    for rows in [1_000, 10_000] {
        let left = build_frame(rows);
        let right = DataFrame::new(vec![
            Series::new_range(0, 100, "key"),
            Series::new((0..100).map(|i| i * 2), SeriesType::Int, "double"),
        ])
        .expect("columns have equal length");
        group.bench_with_input(BenchmarkId::from_parameter(rows), &left, |b, left| {
            b.iter(|| left.inner_join(&right, "key").expect("key exists"))
        });
    }
    group.finish();
}

fn bench_groupby(c: &mut Criterion) {
    let mut group = c.benchmark_group("groupby_groups");
    for rows in [1_000, 10_000] {
        let df = build_frame(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &df, |b, df| {
            b.iter(|| df.group_by(&["key"]).expect("key exists").groups())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_create,
    bench_series_sort,
    bench_order,
    bench_join,
    bench_groupby
);
criterion_main!(benches);
