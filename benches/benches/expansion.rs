// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use understory_expansion::{Expansion, FnPathSource, VisibleSet};
use understory_path_set::{Name, Path, PathSet};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_range_usize(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        (self.next_u32() as usize) % upper_exclusive
    }
}

fn random_paths(count: usize, depth: usize, fanout: usize, seed: u64) -> PathSet {
    let mut rng = Lcg::new(seed);
    let mut set = PathSet::new();
    for _ in 0..count {
        let mut path = Path::root();
        for _ in 0..=rng.gen_range_usize(depth) {
            let name = format!("c{}", rng.gen_range_usize(fanout));
            path.push(Name::new(&name).expect("generated names are valid"));
        }
        set.add_path(&path);
    }
    set
}

/// An unbounded synthetic scene: every location has `fanout` children.
fn synthetic_scene(fanout: usize) -> FnPathSource<impl Fn(&Path) -> Vec<Name>> {
    let names: Vec<Name> = (0..fanout)
        .map(|i| Name::new(&format!("c{i}")).expect("generated names are valid"))
        .collect();
    FnPathSource(move |_: &Path| names.clone())
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_expansion");
    group.sample_size(50);

    let queries: Vec<Path> = random_paths(1_024, 10, 6, 0xE4A0_0000_0000_0003)
        .iter()
        .collect();

    let mut expansion = Expansion::new();
    expansion.expand(&random_paths(4_096, 8, 6, 0xE4A0_0000_0000_0001), true);
    expansion.pin(&random_paths(64, 4, 6, 0xE4A0_0000_0000_0002));

    group.bench_function("should_expand(unlocked)", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(expansion.should_expand(query));
            }
        });
    });

    let mut locked = expansion.clone();
    locked.lock(&random_paths(64, 3, 6, 0xE4A0_0000_0000_0004));
    group.bench_function("should_expand(locked)", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(locked.should_expand(query));
            }
        });
    });

    group.bench_function("expanded_paths(locked)", |b| {
        b.iter(|| black_box(locked.expanded_paths()));
    });

    let mut visible = VisibleSet::new();
    visible.expansions = expansion.expanded_paths();
    visible.inclusions = random_paths(32, 3, 6, 0xE4A0_0000_0000_0005);
    visible.exclusions = random_paths(32, 3, 6, 0xE4A0_0000_0000_0006);
    for depth in [0_usize, 2] {
        group.bench_function(format!("visible_match(min_depth={depth})"), |b| {
            b.iter(|| {
                for query in &queries {
                    black_box(visible.match_path(query, depth));
                }
            });
        });
    }

    group.finish();
}

fn bench_walks(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_expansion_walk");
    group.sample_size(30);

    let scene = synthetic_scene(8);
    let mut expansion = Expansion::new();
    expansion.expand(&["/c0/c1/c2/c3", "/c4/c4"].into_iter().collect(), true);
    expansion.pin(&["/c7/c7"].into_iter().collect());
    let limit = Some(20_000);

    group.bench_function("expansion_visible_paths", |b| {
        b.iter(|| black_box(expansion.visible_paths(&scene, limit)));
    });

    let mut visible = VisibleSet::new();
    visible.expansions = expansion.expanded_paths();
    visible.exclusions = ["/c0/c1/c5"].into_iter().collect();
    group.bench_function("visible_set_paths(min_depth=1)", |b| {
        b.iter(|| black_box(visible.visible_paths(&scene, 1, limit)));
    });

    group.finish();
}

criterion_group!(benches, bench_queries, bench_walks);
criterion_main!(benches);
