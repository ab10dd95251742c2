/// Performance benchmarks for restaurant scoring
///
/// Run with: cargo bench
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use partner_clusters::cluster::{score_restaurants, score_restaurants_parallel, RestaurantGroups};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Generate random partner links spread over `restaurants` groups
fn generate_groups(partners: usize, edges: usize, restaurants: i64) -> RestaurantGroups {
    let mut rng = StdRng::seed_from_u64(42);
    let from: Vec<i64> = (0..edges).map(|_| rng.gen_range(1..=partners as i64)).collect();
    let to: Vec<i64> = (0..edges).map(|_| rng.gen_range(1..=partners as i64)).collect();
    let ids: Vec<i64> = (0..edges).map(|_| rng.gen_range(0..restaurants)).collect();
    RestaurantGroups::from_lists(partners, &from, &to, &ids).unwrap()
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("restaurant_scoring");

    for edges in [1_000, 10_000, 100_000].iter() {
        let groups = generate_groups(10_000, *edges, 16);
        group.throughput(Throughput::Elements(*edges as u64));
        group.sample_size(10);

        group.bench_with_input(BenchmarkId::new("serial", edges), &groups, |b, groups| {
            b.iter(|| black_box(score_restaurants(groups).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("parallel", edges), &groups, |b, groups| {
            b.iter(|| black_box(score_restaurants_parallel(groups).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scoring);
criterion_main!(benches);
