// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_path_set::{Name, Path, PathSet, PathSetCache};

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

/// A scene-like path: `depth` segments drawn from `fanout` names per level.
fn random_path(rng: &mut Lcg, depth: usize, fanout: usize) -> Path {
    let mut path = Path::root();
    for level in 0..depth {
        let index = rng.gen_range_usize(fanout);
        let name = Name::new(&format!("n{level}_{index}")).expect("generated names are valid");
        path.push(name);
    }
    path
}

fn random_paths(count: usize, depth: usize, fanout: usize, seed: u64) -> Vec<Path> {
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|_| {
            let depth = 1 + rng.gen_range_usize(depth);
            random_path(&mut rng, depth, fanout)
        })
        .collect()
}

fn bench_path_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_path_set");
    group.sample_size(50);

    for &(count, depth, fanout) in &[(256_usize, 6_usize, 8_usize), (16_384, 12, 16)] {
        let paths = random_paths(count, depth, fanout, 0x5CE7_E000_0000_0001);
        let set: PathSet = paths.iter().cloned().collect();
        let queries = random_paths(1_024, depth + 2, fanout, 0x5CE7_E000_0000_0002);
        let strings: Vec<String> = queries.iter().map(ToString::to_string).collect();

        group.bench_function(format!("build(n={count},d={depth})"), |b| {
            b.iter(|| {
                let set: PathSet = paths.iter().cloned().collect();
                black_box(set);
            });
        });

        group.bench_function(format!("match_path(n={count},d={depth})"), |b| {
            b.iter(|| {
                for query in &queries {
                    black_box(set.match_path(query));
                }
            });
        });

        group.bench_function(format!("match_str(n={count},d={depth})"), |b| {
            b.iter(|| {
                for query in &strings {
                    black_box(set.match_path(query.as_str()));
                }
            });
        });

        group.bench_function(format!("iter(n={count},d={depth})"), |b| {
            b.iter(|| black_box(set.iter().count()));
        });

        let cut: PathSet = paths.iter().step_by(7).cloned().collect();
        group.bench_function(format!("prune_paths(n={count},d={depth})"), |b| {
            b.iter_batched(
                || set.clone(),
                |mut set| {
                    set.prune_paths(&cut);
                    black_box(set);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_path_set_cache");
    group.sample_size(50);

    let pass_lists: Vec<Vec<String>> = (0..40)
        .map(|list| (0..64).map(|pass| format!("grp{}_pass{list}_{pass}", pass % 8)).collect())
        .collect();
    let grouping = |name: &str| -> Path {
        name.split_once('_')
            .map_or_else(Path::root, |(prefix, _)| Path::parse(prefix))
    };

    group.bench_function("grouped_names_uncached", |b| {
        b.iter(|| {
            for names in &pass_lists[..20] {
                black_box(PathSet::from_grouped_names(names, Some(&grouping)).ok());
            }
        });
    });

    group.bench_function("grouped_names_cached", |b| {
        let mut cache = PathSetCache::default();
        b.iter(|| {
            for names in &pass_lists[..20] {
                let set = cache.get_or_insert_with(names.clone(), |names| {
                    PathSet::from_grouped_names(names, Some(&grouping)).unwrap_or_default()
                });
                black_box(set.len());
            }
        });
    });

    // More distinct inputs than the default capacity forces eviction.
    group.bench_function("grouped_names_thrashing", |b| {
        let mut cache = PathSetCache::default();
        b.iter(|| {
            for names in &pass_lists {
                let set = cache.get_or_insert_with(names.clone(), |names| {
                    PathSet::from_grouped_names(names, Some(&grouping)).unwrap_or_default()
                });
                black_box(set.len());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_path_set, bench_cache);
criterion_main!(benches);
