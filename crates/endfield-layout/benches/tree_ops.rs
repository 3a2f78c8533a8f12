//! Benchmark: layout tree operations on large trees.
//!
//! Builds a center area with N groups (by repeatedly splitting off a new tab)
//! and measures opening, dropping and removing at 16, 128 and 512 groups.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use endfield_core::{DockSlot, DropZone, Tab};
use endfield_layout::{node, DockLayout};

const ZONES: [DropZone; 4] = [DropZone::Right, DropZone::Bottom, DropZone::Left, DropZone::Top];

/// A center area holding `groups` groups, one tab each.
fn build_layout(groups: usize) -> DockLayout {
    let mut layout = DockLayout::empty();
    layout.open_tab(Tab::new("t0", "t0", "file"), DockSlot::Center);
    for i in 1..groups {
        let id = format!("t{i}");
        layout.open_tab(Tab::new(id.clone(), id.clone(), "file"), DockSlot::Center);
        let target = layout
            .find_tab_location(&format!("t{}", i - 1))
            .map(|(_, group)| group.id.clone());
        if let Some(target) = target {
            layout.drop_tab(&id, &target, ZONES[i % ZONES.len()]);
        }
    }
    layout
}

fn bench_open_existing(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_tab_existing");
    for &n in &[16usize, 128, 512] {
        let mut layout = build_layout(n);
        let last = Tab::new(format!("t{}", n - 1), "last", "file");
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| layout.open_tab(black_box(last.clone()), DockSlot::Center))
        });
    }
    group.finish();
}

fn bench_drop_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("drop_tab_split");
    for &n in &[16usize, 128, 512] {
        let base = build_layout(n);
        let target = base
            .find_tab_location("t0")
            .map(|(_, g)| g.id.clone())
            .unwrap_or_default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || base.clone(),
                |mut layout| {
                    layout.drop_tab(black_box(&format!("t{}", n - 1)), &target, DropZone::Right);
                    layout
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_remove_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_group");
    for &n in &[16usize, 128, 512] {
        let layout = build_layout(n);
        let root = layout.area(DockSlot::Center).root.clone();
        let victim = layout
            .find_tab_location(&format!("t{}", n / 2))
            .map(|(_, g)| g.id.clone())
            .unwrap_or_default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter_batched(
                || root.clone(),
                |root| root.and_then(|r| node::remove_group(r, black_box(&victim))),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_open_existing, bench_drop_split, bench_remove_group);
criterion_main!(benches);
