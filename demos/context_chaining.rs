//! Context chaining example
//!
//! Demonstrates deriving scoped loggers with `with_context`: children
//! extend the parent's fields, collisions resolve to the deepest value,
//! and handles stay independent across threads.
//!
//! Run with: cargo run --example context_chaining

use logship::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Logship - Context Chaining Example ===\n");

    let mut client = LogClient::builder()
        .project_id("demo-project")
        .host("http://localhost:4610")
        .min_level(LogLevel::Info)
        .build()?;

    let root = client.logger();

    // Each derivation extends the chain; the parent handle is untouched
    println!("1. Deriving scoped loggers:");
    let session = root.with_context(
        Fields::new()
            .with_field("session_id", "sess_abc")
            .with_field("user_id", 42),
    );
    let request = session.with_context(Fields::new().with_field("request_id", "req_001"));

    root.info("no context fields");
    session.info("carries session_id and user_id");
    request.info("carries session_id, user_id, and request_id");
    println!(
        "   request context depth: {}",
        request.context().depth()
    );

    // The deepest value wins when a key appears at several depths
    println!("\n2. Field shadowing:");
    let staging = root.with_context(Fields::new().with_field("env", "production"));
    let canary = staging.with_context(Fields::new().with_field("env", "canary"));
    staging.info("env=production here");
    canary.info("env=canary here, the child shadows the parent");

    // Call-site fields override context fields the same way
    canary.info_with(
        "env=one-off for this event only",
        Fields::new().with_field("env", "one-off"),
    );

    // Handles are cheap clones; each thread can scope its own
    println!("\n3. Concurrent scoped loggers:");
    let mut workers = Vec::new();
    for worker_id in 0..4 {
        let logger = root.with_context(Fields::new().with_field("worker_id", worker_id));
        workers.push(std::thread::spawn(move || {
            for task in 0..3 {
                logger.info_with(
                    "task finished",
                    Fields::new().with_field("task", task),
                );
            }
        }));
    }
    for worker in workers {
        worker.join().expect("worker thread panicked");
    }
    println!("   4 workers logged 3 events each through their own context");

    println!("\n4. Shutting down:");
    println!(
        "   Events enqueued: {}",
        client.metrics().events_enqueued()
    );
    if client.close(Duration::from_secs(10)) {
        println!("   Shipper drained cleanly");
    } else {
        println!("   Shutdown timed out; remaining events were abandoned");
    }

    println!("\n=== Example completed! ===");

    Ok(())
}
