// Diff engine benchmarks.
//
// Measures the edit script alone and the full row layout for short,
// multi-line and heavily edited inputs.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use nebula_requirements::TerminalEncoding;
use nebula_requirements::diff::{DiffGenerator, myers};

fn inputs() -> Vec<(&'static str, String, String)> {
    let lines = |suffix: &str| {
        (0..50)
            .map(|line| format!("line {line}{suffix}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    vec![
        ("short", "foosball".to_owned(), "ballroom".to_owned()),
        ("multiline", lines(""), lines(" ")),
        (
            "rewrite",
            "abcdefghij".repeat(40),
            "jihgfedcba".repeat(40),
        ),
    ]
}

fn bench_edit_script(c: &mut Criterion) {
    let mut group = c.benchmark_group("edit_script");
    for (name, actual, expected) in inputs() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &(actual, expected), |b, (a, e)| {
            b.iter(|| myers::edit_script(black_box(a), black_box(e)));
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for encoding in [TerminalEncoding::None, TerminalEncoding::Xterm256Colors] {
        let generator = DiffGenerator::new(encoding);
        for (name, actual, expected) in inputs() {
            let id = BenchmarkId::new(format!("{encoding:?}"), name);
            group.bench_with_input(id, &(actual, expected), |b, (a, e)| {
                b.iter(|| generator.diff(black_box(a), black_box(e)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_edit_script, bench_layout);
criterion_main!(benches);
