//! Criterion benchmarks for the pattern rewriter and redirect closure.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use entmine_analysis::closure::{close_redirects, RedirectMap};
use entmine_analysis::text::PatternRewriter;
use entmine_core::events::EventDispatcher;
use entmine_core::types::{TitleId, TitleInterner};

fn article(paragraphs: usize) -> String {
    let paragraph = "The caf&eacute; on Stra&szlig;e 5 &ndash; &quot;open&quot; &#8220;daily&#8221; \
                     &amp; since 1900 &copy; AT&T &notin; &#x1F600; plain text follows here. ";
    paragraph.repeat(paragraphs)
}

fn bench_html_entities(c: &mut Criterion) {
    let rewriter = PatternRewriter::html_entities();
    let text = article(100);
    c.bench_function("html_entities_16kb", |b| {
        b.iter(|| rewriter.rewrite(black_box(&text)).len())
    });

    let plain = "no references in this text at all ".repeat(400);
    c.bench_function("html_entities_passthrough", |b| {
        b.iter(|| rewriter.rewrite(black_box(&plain)).len())
    });
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("html_entities_build", |b| {
        b.iter(|| PatternRewriter::html_entities().pattern_count())
    });
}

fn bench_closure(c: &mut Criterion) {
    let mut interner = TitleInterner::with_capacity(10_000);
    let ids: Vec<TitleId> = (0..10_000)
        .map(|i| TitleId::new(interner.intern_or_get(&format!("Title {i}"))))
        .collect();
    let interner = interner.freeze();
    let mut map = RedirectMap::new();
    // Chains of length 10, the last chain closing into a cycle.
    for chunk in ids.chunks(10) {
        for pair in chunk.windows(2) {
            map.insert(pair[0], pair[1]);
        }
    }
    map.insert(ids[9_999], ids[9_990]);
    let events = EventDispatcher::new();

    c.bench_function("close_redirects_10k", |b| {
        b.iter(|| {
            let mut m = map.clone();
            close_redirects(&mut m, &interner, &events).edges
        })
    });
}

criterion_group!(benches, bench_html_entities, bench_build, bench_closure);
criterion_main!(benches);
