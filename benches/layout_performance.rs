//! Layout engine micro-benchmarks
//!
//! Measures text wrapping and whole-document builds for growing content sizes.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use image::{ImageFormat, Rgb, RgbImage};
use serde_json::json;
use shotdoc::{BuildRequest, SchemaType, ShotRecord, build_document};
use shotdoc_layout::{StandardFont, wrap_paragraphs};
use std::hint::black_box;
use std::io::Cursor;

fn png_data_url(width: u32, height: u32) -> String {
    let image = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).expect("Failed to encode PNG");
    format!("data:image/png;base64,{}", STANDARD.encode(bytes.into_inner()))
}

/// A tutorial with `steps` steps, each showing its own screenshot when `with_shots`.
fn tutorial_request(steps: usize, with_shots: bool) -> BuildRequest {
    let body: Vec<_> = (1..=steps)
        .map(|i| {
            json!({
                "title": format!("Step title {}", i),
                "description": "Open the settings page and change the value. ".repeat(6),
                "screenshotIds": if with_shots { vec![format!("shot-{}", i)] } else { vec![] },
            })
        })
        .collect();
    let text = json!({"title": "Benchmark Guide", "summary": "Generated for benchmarking.", "steps": body});

    let mut request = BuildRequest::new(SchemaType::Tutorial, text.to_string());
    if with_shots {
        let data_url = png_data_url(800, 500);
        request.shots = (1..=steps)
            .map(|i| ShotRecord::new(format!("shot-{}", i), data_url.clone()))
            .collect();
    }
    request
}

fn benchmark_wrap_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrap_paragraphs");

    for word_count in [10, 100, 1000] {
        let text = "screenshot ".repeat(word_count);
        group.bench_with_input(BenchmarkId::new("words", word_count), &text, |b, text| {
            b.iter(|| wrap_paragraphs(black_box(text), &StandardFont::Helvetica, 11.0, 483.0))
        });
    }

    group.finish();
}

fn benchmark_text_only_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_text_only");

    for steps in [1, 10, 100] {
        let request = tutorial_request(steps, false);
        group.bench_with_input(BenchmarkId::new("steps", steps), &request, |b, request| {
            b.iter(|| build_document(black_box(request)).expect("Failed to build document"))
        });
    }

    group.finish();
}

fn benchmark_documents_with_screenshots(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_with_screenshots");
    group.sample_size(10);

    for steps in [1, 10, 25] {
        let mut request = tutorial_request(steps, true);
        request.options.document.include_cover = true;
        group.bench_with_input(BenchmarkId::new("steps", steps), &request, |b, request| {
            b.iter(|| build_document(black_box(request)).expect("Failed to build document"))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_wrap_text,
    benchmark_text_only_documents,
    benchmark_documents_with_screenshots
);
criterion_main!(benches);
