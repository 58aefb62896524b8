use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use cuecard::engine::pool::{CategorySource, SelectionPool};
use cuecard::engine::word::{CategoryId, WordId};

fn make_list(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

fn bench_build(c: &mut Criterion) {
    let categories: Vec<CategoryId> = ["easy", "medium", "hard"]
        .into_iter()
        .map(CategoryId::new)
        .collect();
    let base = make_list("word", 2_000);
    let display = make_list("palabra", 2_000);
    // Every third word already solved
    let solved: std::collections::HashSet<WordId> = categories
        .iter()
        .flat_map(|cat| base.iter().step_by(3).map(|t| WordId::new(cat.clone(), t)))
        .collect();

    c.bench_function("pool build (3 x 2000 words)", |b| {
        b.iter(|| {
            let sources = categories.iter().map(|category| CategorySource {
                category,
                language: "es",
                words: &display,
                base_words: &base,
            });
            SelectionPool::build(black_box(sources), |id| solved.contains(id))
        })
    });
}

fn bench_pick(c: &mut Criterion) {
    let category = CategoryId::new("easy");
    let base = make_list("word", 2_000);
    let pool = SelectionPool::build(
        [CategorySource {
            category: &category,
            language: "en",
            words: &base,
            base_words: &base,
        }],
        |_| false,
    );
    let mut rng = SmallRng::seed_from_u64(7);

    c.bench_function("pool pick (2000 candidates)", |b| {
        b.iter(|| pool.pick(black_box(&mut rng)).map(|c| c.index))
    });
}

criterion_group!(benches, bench_build, bench_pick);
criterion_main!(benches);
