use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use harsan_core::{
    HarDocument, HarSanitizer, NameTagRedactor, Wordlist, default_mime_scrublist,
    default_wordlist, redact_words_in_text,
};
use serde_json::{Value, json};
use std::hint::black_box;

/// Builds a capture with `entries` entries, each carrying cookies, headers,
/// query parameters and a JSON body mentioning a few sensitive words.
fn capture(entries: usize) -> HarDocument {
    let entries: Vec<Value> = (0..entries)
        .map(|index| {
            json!({
                "request": {
                    "method": "GET",
                    "url": format!("https://example.com/api/{index}?access_token=t{index}&page={index}"),
                    "cookies": [{"name": "session", "value": format!("s{index}")}],
                    "headers": [
                        {"name": "Authorization", "value": format!("Bearer t{index}")},
                        {"name": "Accept", "value": "application/json"},
                        {"name": "Cookie", "value": format!("session=s{index}; theme=dark")}
                    ],
                    "queryString": [
                        {"name": "access_token", "value": format!("t{index}")},
                        {"name": "page", "value": index.to_string()}
                    ]
                },
                "response": {
                    "cookies": [],
                    "headers": [{"name": "Content-Type", "value": "application/json"}],
                    "content": {
                        "mimeType": if index % 4 == 0 { "text/javascript" } else { "application/json" },
                        "text": format!(
                            "{{\"access_token\": \"t{index}\", \"state\": \"ok\", \"items\": [{index}], \"password\": null}}"
                        )
                    }
                }
            })
        })
        .collect();

    match HarDocument::parse(json!({"log": {"version": "1.2", "entries": entries}})) {
        Ok(har) => har,
        Err(error) => panic!("benchmark capture should be valid: {error}"),
    }
}

fn benchmark_sanitize_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize_all");
    let sanitizer = HarSanitizer::default();
    let wordlist = default_wordlist();
    let scrublist = default_mime_scrublist();

    for size in [10, 100, 1_000] {
        let har = capture(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &har, |b, har| {
            b.iter(|| {
                let clean = sanitizer.sanitize_all(black_box(har.clone()), &wordlist, &scrublist);
                black_box(clean);
            });
        });
    }

    group.finish();
}

fn benchmark_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("listing");
    let sanitizer = HarSanitizer::default();
    let har = capture(100);
    let wordlist = default_wordlist();

    group.bench_function("scrub_headers", |b| {
        b.iter(|| black_box(sanitizer.scrub_headers(black_box(&har))));
    });
    group.bench_function("matched_body_words", |b| {
        b.iter(|| black_box(sanitizer.matched_body_words(black_box(&har), &wordlist)));
    });
    group.bench_function("trim_wordlist", |b| {
        b.iter(|| black_box(wordlist.trim(black_box(&har))));
    });

    group.finish();
}

fn benchmark_word_redaction(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_redaction");
    let text = "access_token=abc&state=xyz ".repeat(200);

    for words in [1, 10, 36] {
        let wordlist: Wordlist = default_wordlist().iter().take(words).collect();
        group.bench_with_input(BenchmarkId::from_parameter(words), &wordlist, |b, wordlist| {
            b.iter(|| black_box(redact_words_in_text(black_box(&text), wordlist, &NameTagRedactor)));
        });
    }

    group.finish();
}

criterion_group!(
    sanitize,
    benchmark_sanitize_all,
    benchmark_listing,
    benchmark_word_redaction
);

criterion_main!(sanitize);
