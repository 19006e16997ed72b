use codenames_core::*;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn corpus() -> Vec<String> {
    (0..400).map(|i| format!("word{i}")).collect()
}

fn bench_generate(c: &mut Criterion) {
    let mut seed = 0u64;
    c.bench_function("generate_assignment", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            RandomAssignmentGenerator::new(black_box(seed)).generate(BoardConfig::classic())
        })
    });
}

fn bench_deal(c: &mut Criterion) {
    let corpus = corpus();
    let history = WordHistory::from_words(corpus[..200].iter().cloned());
    let mut seed = 0u64;
    c.bench_function("deal_round_with_history", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            Round::deal(BoardConfig::classic(), &corpus, black_box(&history), seed)
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let assignment = RandomAssignmentGenerator::new(7)
        .generate(BoardConfig::classic())
        .expect("classic config is valid");
    c.bench_function("render_key", |b| {
        b.iter(|| render_key(black_box(&assignment), KeyLayout::default(), &Palette::default()))
    });
}

criterion_group!(benches, bench_generate, bench_deal, bench_render);
criterion_main!(benches);
