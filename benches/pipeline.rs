use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use timeline_explorer::pipeline::{parse_directives, run_pipeline};
use timeline_explorer::{DateRange, Entry, QueryState, SortKey};

const LAYERS: [&str; 4] = ["observability", "data-infrastructure", "performance", "video-streaming"];

/// Generate synthetic entries; every 10th is undated, every 7th has a bad date
fn generate_entries(num_entries: usize) -> Vec<Entry> {
    (0..num_entries)
        .map(|i| Entry {
            path: format!("/outputs/posts/{}_post.md", i),
            title: format!("[Tag{}] Post number {}", i % 6, num_entries - i),
            date: match i {
                i if i % 10 == 0 => None,
                i if i % 7 == 0 => Some("sometime".to_string()),
                i => Some(format!("{}-{:02}-{:02}", 2010 + i % 15, i % 12 + 1, i % 28 + 1)),
            },
            layers: vec![LAYERS[i % LAYERS.len()].to_string()],
            snippet: String::new(),
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    // Date sort only (no filters active)
    for size in [1_000, 10_000, 50_000].iter() {
        let entries = generate_entries(*size);
        let state = QueryState::new();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("newest_first", size), size, |b, _| {
            b.iter(|| run_pipeline(black_box(&entries), black_box(&state)));
        });
    }

    // Title collation sort
    for size in [1_000, 10_000, 50_000].iter() {
        let entries = generate_entries(*size);
        let state = QueryState::new().with_sort(SortKey::TitleAsc);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("title_asc", size), size, |b, _| {
            b.iter(|| run_pipeline(black_box(&entries), black_box(&state)));
        });
    }

    // Range clip and category filter before sorting
    for size in [1_000, 10_000, 50_000].iter() {
        let entries = generate_entries(*size);
        let state = QueryState::new()
            .with_date_range(DateRange::new(Some(2015), Some(2020)).unwrap())
            .with_categories(["Tag1", "Tag3"]);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("range_and_category", size), size, |b, _| {
            b.iter(|| run_pipeline(black_box(&entries), black_box(&state)));
        });
    }

    group.finish();
}

fn bench_directive_parsing(c: &mut Criterion) {
    c.bench_function("parse_directives", |b| {
        b.iter(|| {
            parse_directives(black_box(
                r#"layer:data layer:observability from:2016 to:2022 sort:oldest category:"Data Mesh""#,
            ))
            .unwrap()
        });
    });
}

criterion_group!(benches, bench_pipeline, bench_directive_parsing);
criterion_main!(benches);
