// SPDX-License-Identifier: Apache-2.0 OR MIT
use anyhow::{Context, Result};
use chanlog::{Level, Logger, LoggerConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Logger configuration file (JSON5)
    #[arg(long, short)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Append a single message to the log
    Write {
        #[arg(long, default_value = "info")]
        level: Level,
        message: String,
    },
    /// Flood the logger from several threads and report writer statistics
    Stress {
        #[arg(long, default_value_t = 4)]
        threads: usize,
        #[arg(long, default_value_t = 10_000)]
        records: usize,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = LoggerConfig::load_from_file(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let logger = Logger::from_config(&config).context("starting logger")?;

    match args.command {
        Command::Write { level, message } => {
            logger.log(level, &message);
            logger.shutdown();
        }
        Command::Stress { threads, records } => {
            let started = Instant::now();
            let producers: Vec<_> = (0..threads)
                .map(|id| {
                    let handle = logger.handle();
                    thread::spawn(move || {
                        for seq in 0..records {
                            chanlog::log_error!(handle, "producer {} record {}", id, seq);
                        }
                    })
                })
                .collect();
            for producer in producers {
                if producer.join().is_err() {
                    anyhow::bail!("producer thread panicked");
                }
            }
            logger.shutdown();

            let stats = logger.stats();
            println!("{}", serde_json::to_string_pretty(&stats)?);
            println!("elapsed: {:?}", started.elapsed());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_parsing() {
        let args = Args::parse_from(["chanlog", "--config", "log.json5", "write", "hello"]);
        assert_eq!(args.config, PathBuf::from("log.json5"));
        assert_eq!(
            args.command,
            Command::Write {
                level: Level::Info,
                message: "hello".to_string()
            }
        );

        let args = Args::parse_from([
            "chanlog",
            "-c",
            "log.json5",
            "stress",
            "--threads",
            "2",
            "--records",
            "50",
        ]);
        assert_eq!(
            args.command,
            Command::Stress {
                threads: 2,
                records: 50
            }
        );
    }

    #[test]
    fn test_level_argument() {
        let args = Args::parse_from([
            "chanlog", "-c", "x", "write", "--level", "warning", "careful",
        ]);
        assert_eq!(
            args.command,
            Command::Write {
                level: Level::Warn,
                message: "careful".to_string()
            }
        );
    }
}
