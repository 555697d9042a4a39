// Example demonstrating the logger
//
// Run with: cargo run --example logging_demo

use chanlog::logging::global;
use chanlog::{log_error, log_info, log_warn, Level, Logger, LoggerConfig};
use std::thread;

fn main() -> anyhow::Result<()> {
    println!("=== chanlog Logging Demo ===\n");

    let dir = std::env::temp_dir().join("chanlog-demo");
    let path = dir.join("demo.log");

    println!("1. Owned logger mirrored to the console:");
    let logger = Logger::new(Level::Info, &path, true, false, 1000)?;
    logger.info("Logger started");
    logger.warn("Disk usage above 80%");
    logger.error("Failed to reach upstream");

    println!("\n2. Macros with format arguments:");
    log_info!(logger, "Serving {} clients", 3);
    log_warn!(logger, "Slow request took {}ms", 812);

    println!("\n3. Handles shared across threads:");
    let workers: Vec<_> = (0..3)
        .map(|id| {
            let handle = logger.handle();
            thread::spawn(move || log_info!(handle, "worker {} reporting", id))
        })
        .collect();
    for worker in workers {
        let _ = worker.join();
    }
    logger.shutdown();
    println!("stats: {:?}", logger.stats());

    println!("\n4. Calls after shutdown are ignored:");
    logger.error("never written");

    println!("\n5. Process-wide logger with debug info:");
    let config = LoggerConfig {
        debug: true,
        mirror_to_console: true,
        ..LoggerConfig::new(dir.join("global.log"))
    };
    let global_logger = global::init(&config)?;
    log_error!(global_logger, "with caller location");
    global::shutdown();

    println!("\nLog files written under {}", dir.display());
    Ok(())
}
