use criterion::{criterion_group, criterion_main, Criterion};
use seatforge::arrangement::fill::populate_free_seats;
use seatforge::arrangement::{Arrangement, BonusConfig, SeatCoord, TableLayout};
use seatforge::optimizer::replica::delta::TableCache;
use seatforge::registry::{Person, PreferenceRegistry};
use seatforge::scorer::{ScoreParams, Scorer};
use std::hint::black_box;
use std::sync::Arc;

fn setup() -> (Scorer, Arrangement) {
    // 8 tables of 5+5 plus both bonus seats, 96 people with two wishes each
    let n = 96;
    let people = (0..n)
        .map(|i| {
            let prefs = vec![format!("p{}", (i + 1) % n), format!("p{}", (i + 7) % n)];
            Person::new(format!("p{}", i), prefs, 1.0 + (i % 3) as f64)
        })
        .collect();
    let registry = PreferenceRegistry::new(people).expect("valid roster");

    let params = ScoreParams {
        bonus_config: BonusConfig::Both,
        bonus_multiplier: 1.5,
        ..ScoreParams::default()
    };
    let layout = TableLayout::from_seats(12, BonusConfig::Both).expect("valid layout");
    let mut arrangement = Arrangement::empty(8, layout);
    let mut rng = fastrand::Rng::with_seed(1);
    populate_free_seats(&mut arrangement, &registry, BonusConfig::Both, &mut rng);

    let scorer = Scorer::new(Arc::new(registry), params).expect("Failed to build scorer");
    (scorer, arrangement)
}

fn criterion_benchmark(c: &mut Criterion) {
    let (scorer, arrangement) = setup();

    c.bench_function("score (8 tables, 96 people)", |b| {
        b.iter(|| scorer.score(black_box(&arrangement)))
    });

    let cache = TableCache::build(&scorer, &arrangement);
    let (a, z) = (SeatCoord::top(0, 2), SeatCoord::bottom(5, 3));
    let mut swapped = arrangement.clone();
    swapped.swap(&a, &z);

    c.bench_function("swap trial (2 tables)", |b| {
        b.iter(|| cache.try_swap(&scorer, black_box(&swapped), &a, &z).total)
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
