use criterion::{criterion_group, criterion_main, Criterion};
use glyphmatch::image::io::bitmap_to_gray;
use glyphmatch::{
    segment, Bitmap, MatchConfig, Matcher, Pixel, Recognizer, RecognizerConfig, Template,
    TemplateLibrary,
};
use std::hint::black_box;
use std::io::Cursor;
use std::sync::Arc;

fn make_glyph(seed: usize, width: usize, height: usize) -> Bitmap {
    Bitmap::from_fn(width, height, |x, y| {
        if ((x * 11) ^ (y * 3) ^ (x * y * seed)) % 3 == 0 {
            Pixel::Foreground
        } else {
            Pixel::Background
        }
    })
    .unwrap()
}

fn make_library(count: usize) -> Arc<TemplateLibrary> {
    let templates = (0..count)
        .map(|seed| Template::new(format!("{seed:02}"), make_glyph(seed + 1, 12, 16)).unwrap());
    Arc::new(TemplateLibrary::from_templates(templates).unwrap())
}

fn make_captcha(library: &TemplateLibrary, picks: &[&str]) -> Vec<u8> {
    let mut captcha = Bitmap::blank(80, 24).unwrap();
    for (i, label) in picks.iter().enumerate() {
        let glyph = library.get(label).unwrap().bitmap();
        for (x, y) in glyph.ink_points() {
            captcha.set(4 + i * 18 + x, 4 + y, Pixel::Foreground);
        }
    }
    let mut bytes = Vec::new();
    bitmap_to_gray(&captcha)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn bench_matcher(c: &mut Criterion) {
    let library = make_library(36);
    let glyph = library.get("07").unwrap().bitmap().clone();

    let matcher = Matcher::new(library.clone());
    c.bench_function("match_glyph_36_templates", |b| {
        b.iter(|| black_box(matcher.match_glyph(black_box(&glyph))));
    });

    let bytes = make_captcha(&library, &["03", "11", "20", "35"]);
    let recognizer = Recognizer::new(library.clone());
    c.bench_function("classify_4_glyphs", |b| {
        b.iter(|| black_box(recognizer.classify(black_box(&bytes)).unwrap()));
    });

    let binarized = glyphmatch::binarize(&bytes, 94).unwrap();
    c.bench_function("segment_4_glyphs", |b| {
        b.iter(|| black_box(segment(black_box(&binarized)).unwrap()));
    });

    if cfg!(feature = "rayon") {
        let parallel = Recognizer::new(library).with_config(RecognizerConfig {
            matching: MatchConfig {
                parallel: true,
                ..MatchConfig::default()
            },
            ..RecognizerConfig::default()
        });
        c.bench_function("classify_4_glyphs_parallel", |b| {
            b.iter(|| black_box(parallel.classify(black_box(&bytes)).unwrap()));
        });
    }
}

criterion_group!(benches, bench_matcher);
criterion_main!(benches);
