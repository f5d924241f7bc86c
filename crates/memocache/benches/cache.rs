use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use memocache::{single_arg_key, CacheBox, LruCacheBox};

fn bench_cached_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_hit");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("hit_generic_key", |b| {
        let mut cache = CacheBox::new(|(x, y): (u64, u64)| x.wrapping_mul(y));

        // Warm the cache
        for i in 0..100u64 {
            cache.invoke((i, i + 1));
        }

        let mut counter = 0u64;
        b.iter(|| {
            let i = counter % 100;
            black_box(cache.invoke((i, i + 1)));
            counter += 1;
        });
    });

    group.bench_function("hit_single_arg_key", |b| {
        let mut cache =
            CacheBox::with_key_fn(|(x, _tag): (u64, &str)| x.wrapping_mul(3), single_arg_key);

        for i in 0..100u64 {
            cache.invoke((i, "tag"));
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.invoke((counter % 100, "tag")));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_bounded_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_miss");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("miss_with_eviction", |b| {
        let mut cache = LruCacheBox::with_max_size(|x: u64| x, 10).unwrap(); // Small cache

        let mut counter = 0u64;
        b.iter(|| {
            // Every key is new, so every call computes and evicts
            black_box(cache.invoke(counter));
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_cached_hit, bench_bounded_miss);
criterion_main!(benches);
