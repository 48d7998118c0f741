//! Benchmarks for the per-tick engine work.
//!
//! Run with: `cargo bench`

use condensate::bonding::{is_atom_atom_bond, AtomSnapshot};
use condensate::{Aabb, BondingConfig, CondensationConfig, ParticleGroup, Transform};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Quat, Vec3};
use std::f32::consts::PI;

fn populated(count: usize, half_size: f32) -> ParticleGroup {
    let config = CondensationConfig::default()
        .with_bounds(half_size)
        .with_seed(7);
    let mut group = match ParticleGroup::new(config) {
        Ok(g) => g,
        Err(e) => panic!("bench config rejected: {}", e),
    };
    group.spawn_random_atoms(count);
    group
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for count in [10, 40, 160] {
        group.bench_with_input(BenchmarkId::new("atoms", count), &count, |b, &count| {
            let mut sim = populated(count, 100.0);
            b.iter(|| {
                sim.update();
                black_box(sim.len())
            })
        });
    }

    // Dense box: most ticks have overlapping pairs to test.
    group.bench_function("dense_100", |b| {
        let mut sim = populated(100, 25.0);
        b.iter(|| {
            sim.update();
            black_box(sim.len())
        })
    });

    group.finish();
}

fn bench_bonding(c: &mut Criterion) {
    let mut group = c.benchmark_group("bonding");
    let config = BondingConfig::default();
    let snapshot = |x: f32, rotation: Quat| {
        AtomSnapshot::new(
            Transform::new(Vec3::new(x, 0.0, 0.0), rotation, 5.0).to_affine(),
            &Aabb::cube(1.0),
            Vec3::X,
        )
    };

    group.bench_function("atom_atom_touching", |b| {
        let a1 = snapshot(-2.45, Quat::IDENTITY);
        let a2 = snapshot(2.45, Quat::from_rotation_y(PI));
        b.iter(|| black_box(is_atom_atom_bond(&config, black_box(&a1), black_box(&a2))))
    });

    group.bench_function("atom_atom_apart", |b| {
        let a1 = snapshot(-40.0, Quat::IDENTITY);
        let a2 = snapshot(40.0, Quat::IDENTITY);
        b.iter(|| black_box(is_atom_atom_bond(&config, black_box(&a1), black_box(&a2))))
    });

    group.finish();
}

fn bench_instances(c: &mut Criterion) {
    let sim = populated(500, 100.0);
    c.bench_function("instances_500", |b| b.iter(|| black_box(sim.instances())));
}

criterion_group!(benches, bench_update, bench_bonding, bench_instances);
criterion_main!(benches);
