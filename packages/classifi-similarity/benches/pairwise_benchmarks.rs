//! Pairwise similarity benchmarks
//!
//! - Tokenization throughput per file size
//! - Structural and semantic comparison of one pair
//! - Full run over a class (n*(n-1)/2 pairs)

use classifi_similarity::{
    compare_semantics, compare_structure, run_analysis, tokenize, AnalysisInput, Language,
    RunConfig, SourceFile,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Python program of roughly `lines` lines, varied by `seed`
fn program(lines: usize, seed: usize) -> String {
    let mut source = String::from("import sys\n\ndef main(args):\n");
    for i in 0..lines {
        match (i + seed) % 4 {
            0 => source.push_str(&format!("    v{} = len(args) * {} + {}\n", i, seed + 1, i)),
            1 => source.push_str(&format!("    if v{} > {}:\n", i.saturating_sub(1), i)),
            2 => source.push_str(&format!("        args.append(\"item {}\")\n", i)),
            _ => source.push_str(&format!("    print(v{}, sys.argv)\n", i.saturating_sub(3))),
        }
    }
    source.push_str("    return args\n");
    source
}

fn class(size: usize, lines: usize) -> Vec<SourceFile> {
    (0..size)
        .map(|i| {
            SourceFile::new(
                i as i64 + 1,
                100 + i as i64,
                format!("sub{}.py", i + 1),
                program(lines, i % 3),
                Language::Python,
            )
        })
        .collect()
}

// ============================================================================
// Single-file / single-pair operations
// ============================================================================

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for lines in [50, 500, 5000] {
        let source = program(lines, 0);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &source, |b, source| {
            b.iter(|| {
                let stream = tokenize(black_box(source), Language::Python, None);
                black_box(stream)
            });
        });
    }

    group.finish();
}

fn bench_compare_pair(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_pair");

    for lines in [100, 1000] {
        let left = tokenize(&program(lines, 0), Language::Python, None).unwrap();
        let right = tokenize(&program(lines, 1), Language::Python, None).unwrap();

        group.bench_with_input(
            BenchmarkId::new("structural", lines),
            &(&left, &right),
            |b, (left, right)| b.iter(|| black_box(compare_structure(left, right))),
        );
        group.bench_with_input(
            BenchmarkId::new("semantic", lines),
            &(&left, &right),
            |b, (left, right)| b.iter(|| black_box(compare_semantics(left, right))),
        );
    }

    group.finish();
}

// ============================================================================
// Full runs
// ============================================================================

fn bench_run_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_analysis");
    group.sample_size(10);

    for size in [10, 40] {
        let pairs = size * (size - 1) / 2;
        group.throughput(Throughput::Elements(pairs as u64));
        let input = AnalysisInput::new(1, class(size, 120));
        group.bench_with_input(BenchmarkId::new("class", size), &input, |b, input| {
            b.iter(|| black_box(run_analysis(input)))
        });
    }

    for workers in [1, 4] {
        let input = AnalysisInput::new(1, class(20, 120))
            .with_config(RunConfig::default().with_worker_threads(workers));
        group.bench_with_input(BenchmarkId::new("workers", workers), &input, |b, input| {
            b.iter(|| black_box(run_analysis(input)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_compare_pair, bench_run_analysis);
criterion_main!(benches);
