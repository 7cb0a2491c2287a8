//! Oxo CLI Binary
//!
//! Command-line interface for the password-gated agent directory.

use clap::Parser;
use oxo::logging::init_logging;
use oxo::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    // CLI context loads config; build it first so the logging flags can be
    // merged over the file-provided logging section.
    let context = match CliContext::new(cli.workspace.clone(), cli.config.clone(), cli.storage.clone())
    {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing storage: {}", e);
            process::exit(1);
        }
    };

    let mut logging = context.config().logging.clone();
    if let Some(level) = cli.log_level {
        logging.level = level;
    }
    if let Some(format) = cli.log_format {
        logging.format = format;
    }
    if let Some(output) = cli.log_output {
        logging.output = output;
    }
    if let Some(file) = cli.log_file {
        logging.file = Some(file);
    }
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
