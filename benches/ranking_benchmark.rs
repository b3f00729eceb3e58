use criterion::{black_box, criterion_group, criterion_main, Criterion};
use weatherverse_engine::{CityRanker, PriorityRanker, RawCityRecord};

fn create_test_candidates(count: usize) -> Vec<RawCityRecord> {
    (0..count)
        .map(|i| {
            let mut city = RawCityRecord::new(i as i64, format!("Test City {}", i));
            if i % 3 != 0 {
                city = city.with_region(format!("Region {}", i % 7));
            }
            if i % 2 == 0 {
                city = city.with_country("India");
            } else {
                city = city.with_country(format!("Country {}", i % 5));
            }
            city
        })
        .collect()
}

fn bench_priority_ranking(c: &mut Criterion) {
    let ranker = PriorityRanker::new();

    let candidates_15 = create_test_candidates(15);
    let candidates_50 = create_test_candidates(50);
    let candidates_100 = create_test_candidates(100);

    c.bench_function("priority_rank_15", |b| {
        b.iter(|| black_box(ranker.rank("test city", &candidates_15)));
    });

    c.bench_function("priority_rank_50", |b| {
        b.iter(|| black_box(ranker.rank("test city", &candidates_50)));
    });

    c.bench_function("priority_rank_100", |b| {
        b.iter(|| black_box(ranker.rank("test city", &candidates_100)));
    });
}

criterion_group!(benches, bench_priority_ranking);
criterion_main!(benches);
