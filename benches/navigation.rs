// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for gallery navigation.
//!
//! Measures the performance of:
//! - Sequencing a walk through a large gallery (index + preload planning)
//! - Preload cache insertion with LRU eviction

use criterion::{criterion_group, criterion_main, Criterion};
use iced_lightbox::application::navigation::{Command, Navigation, Sequencer};
use iced_lightbox::domain::gallery::Lookahead;
use iced_lightbox::media::{ImageData, PreloadCache, PreloadConfig};
use std::hint::black_box;

const GALLERY_SIZE: usize = 1_000;

fn sources() -> Vec<String> {
    (0..GALLERY_SIZE).map(|i| format!("image-{i}.jpg")).collect()
}

fn pixel() -> ImageData {
    ImageData::from_rgba(16, 16, vec![0; 16 * 16 * 4])
}

/// Walks forward through the whole gallery, completing every fetch at once.
fn bench_forward_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");

    group.bench_function("forward_walk", |b| {
        b.iter(|| {
            let mut cache = PreloadCache::with_defaults();
            let mut sequencer = Sequencer::new(sources(), 0, Lookahead::default()).unwrap();
            sequencer.mount(&mut cache);
            loop {
                match sequencer.navigate(1, &mut cache) {
                    Navigation::Unchanged => break,
                    Navigation::Moved { commands, .. } => {
                        for command in commands {
                            if let Command::Fetch(source) = command {
                                sequencer.on_fetched(&source, Ok(pixel()), &mut cache);
                            }
                        }
                    }
                }
            }
            black_box(sequencer.index());
        });
    });

    group.bench_function("clamped_jumps", |b| {
        let mut cache = PreloadCache::new(PreloadConfig::disabled());
        let mut sequencer = Sequencer::new(sources(), 0, Lookahead::default()).unwrap();
        b.iter(|| {
            for delta in [250, -1_000, 999, isize::MAX, isize::MIN] {
                black_box(sequencer.navigate(black_box(delta), &mut cache));
            }
        });
    });

    group.finish();
}

/// Fills a small cache far beyond its image limit.
fn bench_cache_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("preload_cache");

    group.bench_function("insert_with_eviction", |b| {
        b.iter(|| {
            let mut cache = PreloadCache::new(PreloadConfig::new(64 * 1024 * 1024, 8));
            for source in sources().iter().take(200) {
                if cache.begin_fetch(source) {
                    cache.complete(source, pixel());
                }
            }
            black_box(cache.stats());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_forward_walk, bench_cache_eviction);
criterion_main!(benches);
