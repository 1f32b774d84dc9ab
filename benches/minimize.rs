use automata_minimize::{
    prelude::*,
    random::{random_instance_with_rng, RandomInstance},
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn instances(size: u32) -> Vec<RandomInstance> {
    let mut rng = fastrand::Rng::with_seed(u64::from(size));
    (0..8)
        .map(|_| random_instance_with_rng(&mut rng, size, 3))
        .collect()
}

fn minimize_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize_random");
    for size in [16u32, 64, 256, 1024] {
        let instances = instances(size);
        for order in [WorklistOrder::Lifo, WorklistOrder::Fifo] {
            let minimizer = Minimizer::new().with_order(order);
            group.bench_with_input(
                BenchmarkId::new(format!("{order:?}"), size),
                &instances,
                |b, instances| {
                    b.iter(|| {
                        for instance in instances {
                            let partition = minimizer
                                .minimize(
                                    &instance.accepting,
                                    instance.alphabet.iter().copied(),
                                    &instance.inverse,
                                )
                                .unwrap();
                            black_box(partition);
                        }
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, minimize_random);
criterion_main!(benches);
