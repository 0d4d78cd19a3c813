use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lede::sentence_detector::{AbbreviationTable, FirstSentenceExtractor};
use lede::{extract_batch_with_workers, first_sentence};

const SIMPLE_TEXT: &str = "The Nile is a major north-flowing river in northeastern Africa. It flows into the Mediterranean Sea.";
const COMPLEX_TEXT: &str = "Washington, D.C. (formally the District of Columbia, i.e. the federal district) is the capital of the U.S. \
    It was named after George Washington, \"the first president. Of the nation\", in Aug. 1791. J. R. R. Tolkien never lived there.";

fn bench_single_description(c: &mut Criterion) {
    let extractor = FirstSentenceExtractor::default();
    let mut group = c.benchmark_group("first_sentence");

    for (name, text) in [("simple", SIMPLE_TEXT), ("complex", COMPLEX_TEXT)] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("extractor", name), text, |b, text| {
            b.iter(|| black_box(extractor.first_sentence(black_box(text))))
        });
    }

    // Includes the shared-table lookup on every call
    group.bench_function("free_function/complex", |b| {
        b.iter(|| black_box(first_sentence(black_box(COMPLEX_TEXT))))
    });

    group.finish();
}

// WHY: Inputs that would make a backtracking matcher go quadratic must scale linearly here
fn bench_adversarial_inputs(c: &mut Criterion) {
    let extractor = FirstSentenceExtractor::default();
    let mut group = c.benchmark_group("adversarial");

    for size in [1_000usize, 10_000, 100_000] {
        let inputs = [
            ("open_brackets", "(".repeat(size)),
            ("periods", ".".repeat(size)),
            ("quotes", "\"a. ".repeat(size / 4)),
            ("lower_periods", "a.".repeat(size / 2)),
            ("initials", "A. b".repeat(size / 4)),
        ];

        for (name, text) in inputs {
            group.throughput(Throughput::Bytes(text.len() as u64));
            group.bench_with_input(BenchmarkId::new(name, size), &text, |b, text| {
                b.iter(|| black_box(extractor.first_sentence(black_box(text))))
            });
        }
    }

    group.finish();
}

fn bench_table_construction(c: &mut Criterion) {
    c.bench_function("abbreviation_table/builtin", |b| {
        b.iter(|| black_box(AbbreviationTable::builtin()))
    });
}

fn bench_batch(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to build tokio runtime");
    let extractor = FirstSentenceExtractor::default();
    let descriptions: Vec<String> = (0..10_000)
        .map(|i| if i % 2 == 0 { SIMPLE_TEXT.to_string() } else { COMPLEX_TEXT.to_string() })
        .collect();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(descriptions.len() as u64));
    for workers in [1usize, 4] {
        let (extractor, descriptions) = (&extractor, &descriptions);
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, &workers| {
            b.to_async(&runtime).iter(|| async move {
                extract_batch_with_workers(extractor, descriptions.clone(), workers)
                    .await
                    .expect("batch extraction failed")
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_single_description,
    bench_adversarial_inputs,
    bench_table_construction,
    bench_batch
);
criterion_main!(benches);
