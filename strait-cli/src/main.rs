//! Strait CLI — validate table images and inspect the reference
//! program.
//!
//! This is a development harness, not the flight framework's table
//! loader: it reads a raw table image from disk, runs a validator over
//! it, prints the emitted events, and exits with a status a shell can
//! test.
//!
//! Exit codes:
//! - 0: table image is valid
//! - 1: usage or input error
//! - 2: table image is invalid
//! - 3: the hosted program hit a runtime error

mod commands;

use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=debug surfaces the VM's program-counter diagnostics.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "validate" => commands::validate(&args[2..]),
        "program" => commands::program(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: strait <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  validate <image> [--native]   Validate a raw table image");
    eprintln!("  program                       Print the reference program listing");
}
