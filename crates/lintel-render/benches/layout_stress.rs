use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use lintel_core::{ConfigOverrides, Document, DocumentInput, EndpointRef, LinkInput, WordInput};
use lintel_render::{LayoutOptions, layout_document, repack_document};

/// A sentence of `words` tokens with a chain of short arcs, a few long ones and arcs on arcs.
fn fixture(words: usize) -> DocumentInput {
    let word_inputs: Vec<WordInput> = (0..words)
        .map(|i| WordInput::new(format!("w{i}"), format!("token{}", i % 7)))
        .collect();

    let mut links = Vec::new();
    for i in 1..words {
        links.push(LinkInput::new(
            format!("dep{i}"),
            EndpointRef::word(format!("w{}", i - 1)),
            EndpointRef::word(format!("w{i}")),
        ));
    }
    for i in (0..words.saturating_sub(12)).step_by(5) {
        links.push(LinkInput::new(
            format!("long{i}"),
            EndpointRef::word(format!("w{i}")),
            EndpointRef::word(format!("w{}", i + 12)),
        ));
    }
    for i in (2..words).step_by(9) {
        links.push(LinkInput::new(
            format!("rel{i}"),
            EndpointRef::link(format!("dep{}", i - 1)),
            EndpointRef::link(format!("dep{i}")),
        ));
    }

    DocumentInput {
        words: word_inputs,
        links,
        clusters: Vec::new(),
    }
}

fn bench_full_layout(c: &mut Criterion) {
    let options = LayoutOptions::default();

    let mut group = c.benchmark_group("full_layout");
    for size in [50usize, 200, 800] {
        let input = fixture(size);
        group.bench_function(format!("words_{size}"), |b| {
            b.iter_batched(
                || Document::from_input(input.clone(), 900.0).unwrap(),
                |mut doc| {
                    let scene = layout_document(&mut doc, &options).unwrap();
                    black_box(scene);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_canvas_resize(c: &mut Criterion) {
    // Word-interval collisions pack more arcs per level on wide canvases.
    let options = LayoutOptions::default().with_overrides(&ConfigOverrides::from_value(
        serde_json::json!({ "links": { "slotCollision": "words" } }),
    ));
    let mut doc = Document::from_input(fixture(200), 900.0).unwrap();
    layout_document(&mut doc, &options).unwrap();

    c.bench_function("canvas_resize/words_200", |b| {
        let mut wide = false;
        b.iter(|| {
            wide = !wide;
            doc.canvas_width = if wide { 1400.0 } else { 700.0 };
            black_box(repack_document(&mut doc, &options).unwrap());
        });
    });
}

criterion_group!(benches, bench_full_layout, bench_canvas_resize);
criterion_main!(benches);
