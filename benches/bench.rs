//! Criterion benchmarks for sarissa-analyze.
//!
//! Covers the simple and explain paths of the analyze core and batch
//! execution across requests.

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use sarissa_analyze::analyze::{AnalyzeRequest, AnalyzeService, StageSpec};
use sarissa_analyze::config::AnalyzeConfig;

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let words = [
        "Search", "engine", "the", "text", "index", "query", "document", "field", "term", "a",
        "phrase", "boolean", "of", "similarity", "relevance", "score", "analysis", "tokenization",
        "and", "normalization",
    ];

    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 50 + (i % 100);
        let mut doc_words = Vec::with_capacity(doc_length);

        for j in 0..doc_length {
            let word_idx = (i * 7 + j * 13) % words.len();
            doc_words.push(words[word_idx]);
        }

        documents.push(doc_words.join(" "));
    }

    documents
}

fn service() -> AnalyzeService {
    AnalyzeService::with_builtins(AnalyzeConfig::default()).unwrap()
}

/// Benchmark named analyzers on single documents.
fn bench_named_analyzers(c: &mut Criterion) {
    let mut group = c.benchmark_group("named_analyzers");

    let service = service();
    let texts = generate_test_documents(100);

    for analyzer in ["standard", "whitespace", "stop"] {
        let request = AnalyzeRequest::new([texts[0].clone()]).with_analyzer(analyzer);
        group.bench_function(analyzer, |b| {
            b.iter(|| black_box(service.analyze(black_box(&request))))
        });
    }

    group.finish();
}

/// Benchmark an ad-hoc chain with and without explain.
fn bench_custom_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("custom_chain");

    let service = service();
    let texts = generate_test_documents(10);

    let request = AnalyzeRequest::new(texts)
        .add_char_filter(StageSpec::definition(
            "pattern_replace",
            serde_json::json!({"pattern": "[aeiou]", "replacement": ""})
                .as_object()
                .cloned()
                .unwrap(),
        ))
        .with_tokenizer("standard")
        .add_token_filter("lowercase")
        .add_token_filter("stop");

    group.throughput(Throughput::Elements(10));
    group.bench_function("simple", |b| {
        b.iter(|| black_box(service.analyze(black_box(&request))))
    });

    let explain = request.clone().with_explain(true);
    group.bench_function("explain", |b| {
        b.iter(|| black_box(service.analyze(black_box(&explain))))
    });

    group.finish();
}

/// Benchmark parallel batch execution.
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");

    let service = service();
    let requests: Vec<AnalyzeRequest> = generate_test_documents(100)
        .into_iter()
        .map(|text| AnalyzeRequest::new([text]))
        .collect();

    group.throughput(Throughput::Elements(requests.len() as u64));
    group.bench_function("analyze_batch", |b| {
        b.iter(|| black_box(service.analyze_batch(black_box(&requests))))
    });
    group.bench_function("analyze_sequential", |b| {
        b.iter(|| {
            for request in &requests {
                let _ = black_box(service.analyze(black_box(request)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_named_analyzers, bench_custom_chain, bench_batch);
criterion_main!(benches);
