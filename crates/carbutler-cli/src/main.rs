//! CarButler - personal vehicle maintenance tracker
//!
//! Tracks vehicles and their odometer readings, reports which services are
//! due, and schedules appointments through calendar and email backends.

mod cli;
mod commands;
mod interactive;
mod output;
mod prompt;

use std::thread;

use clap::Parser;
use cli::Cli;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Log to stderr so table/JSON output on stdout stays clean
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Exit cleanly on Ctrl+C. Every mutation is saved as soon as it happens,
/// so there is nothing to flush.
fn spawn_interrupt_handler() {
    let spawned = thread::Builder::new()
        .name("ctrl-c".to_string())
        .spawn(|| {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    debug!("No Ctrl+C handler: {}", e);
                    return;
                }
            };
            if runtime.block_on(tokio::signal::ctrl_c()).is_ok() {
                println!("\n\n👋 Goodbye!");
                std::process::exit(0);
            }
        });
    if let Err(e) = spawned {
        debug!("No Ctrl+C handler: {}", e);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    spawn_interrupt_handler();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
