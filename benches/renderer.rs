use criterion::{Criterion, criterion_group, criterion_main};
use star_schema_diagram::config::Config;
use star_schema_diagram::layout::compute_layout;
use star_schema_diagram::render::render_svg;
use star_schema_diagram::schema::StarSchema;
use std::hint::black_box;

fn bench_layout(c: &mut Criterion) {
    let config = Config::default();
    let schema = StarSchema::retail_sales().expect("schema");
    c.bench_function("layout/star_schema", |b| {
        b.iter(|| compute_layout(black_box(&schema), black_box(&config.layout)).expect("layout"))
    });
}

fn bench_render(c: &mut Criterion) {
    let config = Config::default();
    let schema = StarSchema::retail_sales().expect("schema");
    let layout = compute_layout(&schema, &config.layout).expect("layout");
    c.bench_function("render/svg", |b| {
        b.iter(|| render_svg(black_box(&layout), &config.theme, &config.render))
    });
}

criterion_group!(benches, bench_layout, bench_render);
criterion_main!(benches);
