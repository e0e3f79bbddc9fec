//! Basic client usage example
//!
//! Demonstrates building a client, leveled logging, structured fields, and
//! a clean shutdown. Point it at a running collector to see the events
//! arrive; without one the shipper retries and reports dropped batches.
//!
//! Run with: cargo run --example basic_usage

use logship::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Logship - Basic Usage Example ===\n");

    // Build a client for one project
    let mut client = LogClient::builder()
        .project_id("demo-project")
        .host("http://localhost:4610")
        .api_key("demo-key")
        .min_level(LogLevel::Debug)
        .build()?;

    let logger = client.logger();

    // Log messages at different levels
    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.critical("This is a critical message");

    // Attach structured fields to individual calls
    println!("\n2. Logging with structured fields:");
    logger.info_with(
        "user signed in",
        Fields::new()
            .with_field("user_id", 42)
            .with_field("method", "oauth"),
    );
    logger.warning_with(
        "payment slow",
        Fields::new().with_field("processing_time_ms", 5000),
    );

    // Format-style macros
    println!("\n3. Logging through macros:");
    let port = 8080;
    logship::info!(logger, "Server listening on port {}", port);
    logship::error!(logger, "Request failed with status {}", 502);

    // Events below the threshold are filtered before any work happens
    println!("\n4. Threshold filtering:");
    let quiet = LogClient::builder()
        .project_id("demo-project")
        .host("http://localhost:4610")
        .min_level(LogLevel::Error)
        .build()?;
    quiet.logger().info("hidden below the threshold");
    quiet.logger().error("visible at ERROR");
    println!(
        "   Quiet client enqueued {} events (the info call was filtered)",
        quiet.metrics().events_enqueued()
    );
    drop(quiet);

    // Drain and shut down
    println!("\n5. Shutting down:");
    let metrics = client.metrics().clone();
    println!("   Events enqueued:  {}", metrics.events_enqueued());
    println!("   Events delivered: {}", metrics.events_delivered());
    println!("   Events dropped:   {}", metrics.events_dropped());

    if client.close(Duration::from_secs(10)) {
        println!("   Shipper drained cleanly");
    } else {
        println!("   Shutdown timed out; remaining events were abandoned");
    }

    println!("\n=== Example completed! ===");

    Ok(())
}
