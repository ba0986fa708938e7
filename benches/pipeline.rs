//! Benchmarks for the nanopages pipeline.

use std::fs;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

use nanopages::frontmatter::parse_document;
use nanopages::{render_markdown, resolve, Context, PageCollection};

/// A small site: an index, a blog index and `n` posts.
fn fixture_site(posts: usize) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("index.md"), "---\ntitle: Home\n---\n# Welcome").unwrap();
    fs::create_dir(root.join("blog")).unwrap();
    fs::write(root.join("blog/index.html"), "<h1>{{ title }}</h1>").unwrap();
    for i in 0..posts {
        fs::write(
            root.join(format!("blog/post-{}.md", i)),
            format!("---\ntitle: Post {}\n---\n# Post {}\n\nBody text.", i, i),
        )
        .unwrap();
    }

    dir
}

// -- Parsing benchmarks --

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    let extra = Context::new();

    let plain = "---\ntitle: Cookies\nauthor: Ada\n---\n# Cookies\n\nMix, bake, cool.";
    let json = "---json\n{\"title\": \"Cookies\", \"tags\": [\"baking\"]}\n---\n# Cookies";
    let none = "# Cookies\n\nNo frontmatter here.";

    group.bench_function("parse_plain", |b| {
        b.iter(|| parse_document(black_box(plain), &extra).unwrap())
    });

    group.bench_function("parse_json", |b| {
        b.iter(|| parse_document(black_box(json), &extra).unwrap())
    });

    #[cfg(feature = "yaml")]
    {
        let yaml = "---yaml\ntitle: Cookies\ntags:\n  - baking\n---\n# Cookies";
        group.bench_function("parse_yaml", |b| {
            b.iter(|| parse_document(black_box(yaml), &extra).unwrap())
        });
    }

    group.bench_function("parse_passthrough", |b| {
        b.iter(|| parse_document(black_box(none), &extra).unwrap())
    });

    group.finish();
}

// -- Resolution benchmarks --

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");
    let site = fixture_site(50);

    group.bench_function("resolve_post", |b| {
        b.iter(|| resolve(site.path(), black_box("blog/post-25")))
    });

    group.bench_function("resolve_index", |b| {
        b.iter(|| resolve(site.path(), black_box("blog")))
    });

    group.bench_function("resolve_escape", |b| {
        b.iter(|| resolve(site.path(), black_box("../../etc/passwd")))
    });

    let collection = PageCollection::in_dir(site.path(), ".");
    group.bench_function("request_paths", |b| b.iter(|| collection.request_paths()));

    group.finish();
}

// -- Rendering benchmarks --

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");

    let mut long = String::new();
    for i in 0..100 {
        long.push_str(&format!("## Section {}\n\nSome *emphasis* and a [link](/x/).\n\n", i));
    }

    group.bench_function("markdown_short", |b| {
        b.iter(|| render_markdown(black_box("# Heading\n\nParagraph.")))
    });

    group.bench_function("markdown_long", |b| {
        b.iter(|| render_markdown(black_box(&long)))
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_resolution, bench_rendering);
criterion_main!(benches);
