//! # Delivery Studio Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        delivery-studio                                  │
//! │                                                                         │
//! │  main.rs ────► tracing, clap parse, exit status                         │
//! │                                                                         │
//! │  lib.rs ─────► config, catalog, dispatch                                │
//! │                                                                         │
//! │  commands/ ──► quote, scenario, policies, support                       │
//! │                                                                         │
//! │  delivery-core ► calculate_price (pure)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;
use delivery_studio::Cli;

fn main() -> ExitCode {
    delivery_studio::init_tracing();

    let cli = Cli::parse();
    let json = cli.json_output();

    // The actual work is in lib.rs for better testability
    match delivery_studio::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", delivery_studio::render_error(&err, json));
            ExitCode::from(err.code.exit_code())
        }
    }
}
