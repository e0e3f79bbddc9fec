//! Criterion benchmarks for logship

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use logship::prelude::*;
use std::sync::Arc;
use std::time::Duration;

/// Transport that discards every batch, so benchmarks measure the client
/// rather than the network.
struct NullTransport;

impl Transport for NullTransport {
    fn send(&mut self, _batch: &Batch) -> logship::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn bench_client() -> LogClient {
    LogClient::builder()
        .project_id("bench")
        .host("http://localhost:4610")
        .min_level(LogLevel::Info)
        .queue_capacity(1_000_000)
        .transport(Box::new(NullTransport))
        .build()
        .expect("valid configuration")
}

// ============================================================================
// Context Chaining Benchmarks
// ============================================================================

fn bench_context_chaining(c: &mut Criterion) {
    let mut group = c.benchmark_group("context_chaining");
    group.throughput(Throughput::Elements(1));

    let root = ContextNode::root();

    group.bench_function("derive", |b| {
        b.iter(|| {
            let child = root.derive(black_box(
                Fields::new().with_field("request_id", "req_123"),
            ));
            black_box(child)
        });
    });

    let shallow = root.derive(Fields::new().with_field("session_id", "s1"));
    group.bench_function("resolve_depth_2", |b| {
        b.iter(|| black_box(shallow.resolve()));
    });

    let mut deep = root.derive(Fields::new().with_field("layer", 0));
    for i in 1..8 {
        deep = deep.derive(Fields::new().with_field(format!("layer_{}", i), i));
    }
    group.bench_function("resolve_depth_9", |b| {
        b.iter(|| black_box(deep.resolve()));
    });

    group.finish();
}

// ============================================================================
// Event Encoding Benchmarks
// ============================================================================

fn bench_event_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_encoding");
    group.throughput(Throughput::Elements(1));

    let root = ContextNode::root();
    let context = root.derive(
        Fields::new()
            .with_field("session_id", "sess_abc")
            .with_field("region", "eu-1"),
    );

    group.bench_function("bare", |b| {
        b.iter(|| {
            let event = LogEvent::assemble(
                black_box(LogLevel::Info),
                black_box("benchmark message".to_string()),
                &root,
                Fields::new(),
                "bench",
            );
            black_box(event)
        });
    });

    group.bench_function("with_context_and_fields", |b| {
        b.iter(|| {
            let event = LogEvent::assemble(
                black_box(LogLevel::Info),
                black_box("benchmark message".to_string()),
                &context,
                Fields::new()
                    .with_field("attempt", 3)
                    .with_field("elapsed_ms", 12.5),
                "bench",
            );
            black_box(event)
        });
    });

    let event = LogEvent::assemble(
        LogLevel::Info,
        "benchmark message".to_string(),
        &context,
        Fields::new().with_field("attempt", 3),
        "bench",
    );
    group.bench_function("to_json", |b| {
        b.iter(|| {
            let json = event.to_json().unwrap();
            black_box(json)
        });
    });

    group.finish();
}

// ============================================================================
// Delivery Queue Benchmarks
// ============================================================================

fn bench_delivery_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("delivery_queue");
    group.throughput(Throughput::Elements(1));

    let root = ContextNode::root();
    let event = LogEvent::assemble(
        LogLevel::Info,
        "queued message".to_string(),
        &root,
        Fields::new(),
        "bench",
    );

    let metrics = Arc::new(ClientMetrics::new());
    let spacious = DeliveryQueue::new(
        10_000_000,
        OverflowPolicy::DropOldest,
        None,
        Arc::clone(&metrics),
    );
    group.bench_function("enqueue", |b| {
        b.iter(|| {
            spacious.enqueue(black_box(event.clone()));
        });
    });

    // Capacity 1 keeps every enqueue on the eviction path.
    let metrics = Arc::new(ClientMetrics::new());
    let full = DeliveryQueue::new(1, OverflowPolicy::DropOldest, None, metrics);
    full.enqueue(event.clone());
    group.bench_function("enqueue_drop_oldest", |b| {
        b.iter(|| {
            full.enqueue(black_box(event.clone()));
        });
    });

    group.finish();
}

// ============================================================================
// Logging Call Benchmarks
// ============================================================================

fn bench_logging_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging_calls");
    group.throughput(Throughput::Elements(1));

    let mut client = bench_client();
    let logger = client.logger();

    group.bench_function("below_threshold", |b| {
        b.iter(|| {
            logger.debug(black_box("filtered out"));
        });
    });

    group.bench_function("info", |b| {
        b.iter(|| {
            logger.info(black_box("accepted"));
        });
    });

    let scoped = logger.with_context(
        Fields::new()
            .with_field("session_id", "sess_abc")
            .with_field("region", "eu-1"),
    );
    group.bench_function("info_with_context", |b| {
        b.iter(|| {
            scoped.info_with(
                black_box("accepted"),
                Fields::new().with_field("attempt", 3),
            );
        });
    });

    group.bench_function("with_context", |b| {
        b.iter(|| {
            let child = logger.with_context(black_box(
                Fields::new().with_field("request_id", "req_123"),
            ));
            black_box(child)
        });
    });

    group.finish();
    client.close(Duration::from_secs(5));
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_context_chaining,
    bench_event_encoding,
    bench_delivery_queue,
    bench_logging_calls
);

criterion_main!(benches);
