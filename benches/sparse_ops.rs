//! Benchmarks for linked sparse matrix operations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ringmat::{multiply_with_config, sum, ArithmeticConfig, SparseMatrix};

/// Tridiagonal matrix with a sprinkling of far off-diagonal entries
fn create_test_matrix(n: usize) -> SparseMatrix<f64> {
    let mut matrix = SparseMatrix::new(n, n).unwrap();
    for i in 1..=n {
        matrix.insert(i, i, 2.0).unwrap();
        if i > 1 {
            matrix.insert(i, i - 1, -1.0).unwrap();
        }
        if i < n {
            matrix.insert(i, i + 1, -1.0).unwrap();
        }
        if i % 11 == 0 {
            matrix.insert(i, n + 1 - i, 0.5).unwrap();
        }
    }
    matrix
}

fn bench_insert_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_get");
    for n in [100, 1000] {
        group.bench_with_input(BenchmarkId::new("build", n), &n, |bench, &n| {
            bench.iter(|| black_box(create_test_matrix(n)))
        });

        let matrix = create_test_matrix(n);
        group.bench_with_input(BenchmarkId::new("get_diagonal", n), &n, |bench, &n| {
            bench.iter(|| {
                let mut total = 0.0;
                for i in 1..=n {
                    total += matrix.get(i, i).unwrap();
                }
                black_box(total)
            })
        });
    }
    group.finish();
}

fn bench_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");
    for n in [100, 1000] {
        let a = create_test_matrix(n);
        let b = create_test_matrix(n);

        group.bench_with_input(BenchmarkId::new("sum", n), &n, |bench, _| {
            bench.iter(|| black_box(sum(&a, &b).unwrap()))
        });

        for (name, config) in [
            ("multiply_dense", ArithmeticConfig::dense_only()),
            ("multiply_sort", ArithmeticConfig::sort_only()),
        ] {
            group.bench_with_input(BenchmarkId::new(name, n), &n, |bench, _| {
                bench.iter(|| black_box(multiply_with_config(&a, &b, &config).unwrap()))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_insert_get, bench_arithmetic);
criterion_main!(benches);
