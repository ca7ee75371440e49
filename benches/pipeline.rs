//! Benchmarks for the conversion pipeline
//!
//! Run with: cargo bench --bench pipeline

use markview::markdown::{parse, DEFAULT_MARKDOWN};
use markview::pipeline::{convert, ConvertOptions, SourceText};
use markview::stats;
use markview::syntax::highlight_html;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// The welcome document repeated `copies` times
fn sample(copies: usize) -> String {
    let mut text = String::with_capacity(DEFAULT_MARKDOWN.len() * copies);
    for _ in 0..copies {
        text.push_str(DEFAULT_MARKDOWN);
        text.push('\n');
    }
    text
}

// ============================================================================
// Full conversion
// ============================================================================

#[divan::bench(args = [1, 10, 50])]
fn convert_document(bencher: divan::Bencher, copies: usize) {
    let source = SourceText::new(1, sample(copies));
    let options = ConvertOptions::default();
    bencher.bench(|| convert(divan::black_box(&source), &options));
}

#[divan::bench(args = [1, 10, 50])]
fn convert_without_highlighting(bencher: divan::Bencher, copies: usize) {
    let source = SourceText::new(1, sample(copies));
    let options = ConvertOptions {
        highlight_code: false,
    };
    bencher.bench(|| convert(divan::black_box(&source), &options));
}

// ============================================================================
// Individual stages
// ============================================================================

#[divan::bench(args = [1, 10, 50])]
fn parse_markdown(bencher: divan::Bencher, copies: usize) {
    let text = sample(copies);
    bencher.bench(|| parse(divan::black_box(&text)));
}

#[divan::bench(args = [1, 10, 50])]
fn highlight_parsed(bencher: divan::Bencher, copies: usize) {
    let html = parse(&sample(copies)).html;
    bencher.bench(|| highlight_html(divan::black_box(&html)));
}

#[divan::bench]
fn rehighlight_is_cheap(bencher: divan::Bencher) {
    let html = highlight_html(&parse(&sample(10)).html);
    bencher.bench(|| highlight_html(divan::black_box(&html)));
}

#[divan::bench(args = [1, 10, 50])]
fn count_stats(bencher: divan::Bencher, copies: usize) {
    let text = sample(copies);
    bencher.bench(|| stats::count(divan::black_box(&text)));
}
