//! Throughput of the SSE decoder.
//!
//! Feeds a chat-sized reply through `SseDecoder` split into chunks of
//! different sizes, including chunk sizes that cut lines and multi-byte
//! characters in half. Run with: cargo bench

use std::sync::Arc;

use claudeapi::adapters::mock::RecordingSink;
use claudeapi::sse::SseDecoder;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// A reply of `events` completion events with some non-ASCII text.
fn generate_body(events: usize) -> Vec<u8> {
    (0..events)
        .map(|i| {
            format!(
                "event: completion\ndata: {{\"completion\":\"token {} – naïve ☃ \",\"stop_reason\":null}}\n\n",
                i
            )
        })
        .collect::<String>()
        .into_bytes()
}

fn bench_decode_chunked(c: &mut Criterion) {
    let body = generate_body(500);
    let mut group = c.benchmark_group("sse_decode_chunked");
    group.throughput(Throughput::Bytes(body.len() as u64));

    for chunk_size in [7, 64, 1024, 16 * 1024].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut decoder = SseDecoder::new(Arc::new(RecordingSink::new()));
                    let mut count = 0;
                    for chunk in body.chunks(chunk_size) {
                        count += decoder.feed(black_box(chunk)).len();
                    }
                    count += decoder.finish().len();
                    black_box(count)
                });
            },
        );
    }

    group.finish();
}

/// One large `data:` line trickling in, as with a long tool result.
fn bench_long_line(c: &mut Criterion) {
    let body = format!("data: \"{}\"\n", "a".repeat(400 * 1024)).into_bytes();
    let mut group = c.benchmark_group("sse_decode_long_line");
    group.throughput(Throughput::Bytes(body.len() as u64));

    for chunk_size in [4, 16, 256].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut decoder = SseDecoder::new(Arc::new(RecordingSink::new()));
                    let mut count = 0;
                    for chunk in body.chunks(chunk_size) {
                        count += decoder.feed(black_box(chunk)).len();
                    }
                    black_box(count)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_decode_chunked, bench_long_line);
criterion_main!(benches);
