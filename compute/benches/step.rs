use compute::{naive::Naive, parallel::Parallel, Model, SimulateStep};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use data::parameters::Parameters;
use std::hint::black_box;

/// Benchmark a compute backend over a range of grid sizes
fn bench_backend<Backend: SimulateStep>(
    c: &mut Criterion,
    backend_name: &str,
    make_backend: impl Fn() -> Backend,
) {
    let mut group = c.benchmark_group(format!("{backend_name}::step"));
    for size_pow2 in 4..=9 {
        let size = 2usize.pow(size_pow2);
        let num_elems = (size * size) as u64;

        let mut model = Model::with_backend(size, size, Parameters::default(), make_backend());
        let center = (size / 2) as isize;
        model.paint_default(center, center, size / 8);

        group.throughput(Throughput::Elements(num_elems));
        group.bench_function(BenchmarkId::from_parameter(num_elems), |b| {
            b.iter(|| black_box(&mut model).step());
        });
    }
    group.finish();
}

fn criterion_benchmark(c: &mut Criterion) {
    bench_backend(c, "naive", || Naive);
    bench_backend(c, "parallel", Parallel::default);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
