//! Force-allocator benchmarks: the full-recomputation path dominates tick
//! cost (O(n) oracle calls), so track it against force size.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use vanguard_core::enums::UnitKind;
use vanguard_core::snapshot::{EnemyUnit, FriendlyUnit};
use vanguard_core::types::Position;
use vanguard_tactics::allocator::allocate;
use vanguard_tactics::detector::Squad;
use vanguard_tactics::engagement::EngagementCache;
use vanguard_tactics::oracle::LanchesterOracle;

fn build_force(count: usize) -> Vec<FriendlyUnit> {
    (0..count)
        .map(|i| FriendlyUnit {
            tag: i as u64 + 1,
            kind: if i % 4 == 0 {
                UnitKind::SiegeTank
            } else {
                UnitKind::Trooper
            },
            position: Position::new(i as f64, 0.0),
            alive: true,
        })
        .collect()
}

fn build_squad(count: usize) -> Squad {
    let members: Vec<EnemyUnit> = (0..count)
        .map(|i| EnemyUnit {
            tag: 1000 + i as u64,
            kind: UnitKind::Trooper,
            position: Some(Position::new(50.0 + i as f64, 0.0)),
            ground_range: 5.0,
            is_flying: false,
            is_structure: false,
            alive: true,
        })
        .collect();
    let positions: Vec<Position> = members.iter().filter_map(|m| m.position).collect();
    Squad {
        member_tags: members.iter().map(|m| m.tag).collect(),
        centroid: vanguard_core::types::centroid(&positions),
        members,
    }
}

fn bench_full_recomputation(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocator_recompute");
    for force_size in [8usize, 24, 64] {
        let force = build_force(force_size);
        let squad = build_squad(4);
        group.bench_with_input(
            BenchmarkId::from_parameter(force_size),
            &force_size,
            |b, _| {
                b.iter_batched(
                    EngagementCache::new,
                    |mut cache| allocate(&mut cache, &LanchesterOracle, &squad, &force),
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

fn bench_exact_reuse(c: &mut Criterion) {
    let force = build_force(24);
    let squad = build_squad(4);
    // Warm the cache once; every iteration afterwards is the cheap path.
    let mut cache = EngagementCache::new();
    allocate(&mut cache, &LanchesterOracle, &squad, &force);

    c.bench_function("allocator_exact_reuse", |b| {
        b.iter(|| allocate(&mut cache, &LanchesterOracle, &squad, &force))
    });
}

criterion_group!(benches, bench_full_recomputation, bench_exact_reuse);
criterion_main!(benches);
