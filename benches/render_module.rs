//! Rendering benchmarks.
//!
//! Run with: cargo bench

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use learning_platform::{Component, ComponentRegistry, Dispatcher};
use serde_json::{json, Value};

/// A module page with a mix of every common variant, repeated `sections` times.
fn sample_module(sections: usize) -> Vec<Component> {
    let mut components = Vec::with_capacity(sections * 6);
    for i in 0..sections {
        let rows: Vec<Value> = (0..20).map(|r| json!([format!("row {}", r), r * 5, "ok"])).collect();
        components.push(Component::new(
            "moduleHeader",
            json!({"title": format!("Modul {}", i), "description": "Layout and widgets"}),
        ));
        components.push(Component::new(
            "info",
            json!({"title": format!("Notes {}", i), "content": "<p>Read the <code>README</code> first.</p>"}),
        ));
        components.push(Component::new(
            "table",
            json!({"title": format!("Scores {}", i), "headers": ["Name", "Score", "Status"], "rows": rows}),
        ));
        components.push(Component::new(
            "code",
            json!({"title": format!("Example {}", i), "filePath": "./src/main.dart", "language": "dart"}),
        ));
        components.push(Component::new(
            "accordionSection",
            json!({
                "title": format!("FAQ {}", i),
                "items": [
                    {"title": "Why?", "content": "<p>Because.</p>"},
                    {"title": "How?", "content": "<p>Like this.</p>"}
                ]
            }),
        ));
        components.push(Component::new(
            "video",
            json!({"title": format!("Intro {}", i), "videoId": "abc123"}),
        ));
    }
    components
}

fn bench_render_components(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(Arc::new(ComponentRegistry::standard()));
    let mut group = c.benchmark_group("render_components");
    for sections in [1, 10, 50] {
        let components = sample_module(sections);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &components, |b, components| {
            b.iter(|| dispatcher.render_components(black_box(components)));
        });
    }
    group.finish();
}

fn bench_parse_document(c: &mut Criterion) {
    let doc = json!({"title": "Modul 1", "components": serde_json::to_value(sample_module(10)).unwrap_or_default()});
    let text = doc.to_string();
    c.bench_function("parse_document", |b| {
        b.iter(|| learning_platform::ModuleDocument::from_json(black_box(&text)));
    });
}

criterion_group!(benches, bench_render_components, bench_parse_document);
criterion_main!(benches);
