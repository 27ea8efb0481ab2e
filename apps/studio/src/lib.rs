//! # Delivery Studio Library
//!
//! Command-line front end for the delivery pricing engine.
//!
//! ## Module Organization
//! ```text
//! delivery_studio/
//! ├── lib.rs          ◄─── You are here (CLI definition & dispatch)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Environment configuration
//! │   ├── catalog.rs  ◄─── Named pricing policies
//! │   └── support.rs  ◄─── Ticket board state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── quote.rs    ◄─── Pricing a single order
//! │   ├── policies.rs ◄─── Catalog listing
//! │   └── support.rs  ◄─── Support session
//! └── error.rs        ◄─── Unified error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::quote::{quote, render_quote, resolve_policy, QuoteRequest, Scenario};
use error::{StudioError, StudioResult};
use state::{PolicyCatalog, StudioConfig, SupportState, TicketBoard};

/// Delivery pricing studio.
#[derive(Debug, Parser)]
#[command(name = "delivery-studio", version, about = "Price deliveries and work the support queue")]
pub struct Cli {
    /// Directory of extra policy files (overrides STUDIO_POLICY_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub policy_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price one order
    Quote {
        /// Cart value in euros
        #[arg(long, value_name = "EUR", default_value = "0", allow_hyphen_values = true)]
        cart: String,

        /// Delivery distance in meters
        #[arg(long, value_name = "METERS", default_value = "0", allow_hyphen_values = true)]
        distance: String,

        /// Number of items
        #[arg(long, value_name = "N", default_value = "0", allow_hyphen_values = true)]
        items: String,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },

    /// Price one of the preset orders
    Scenario {
        #[arg(value_enum)]
        scenario: Scenario,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available policies
    Policies {
        /// Print one policy as JSON
        #[arg(long, value_name = "NAME")]
        show: Option<String>,
    },

    /// Interactive support ticket board
    Support,
}

impl Cli {
    /// Whether the subcommand asked for JSON output.
    pub fn json_output(&self) -> bool {
        match self.command {
            Command::Quote { json, .. } | Command::Scenario { json, .. } => json,
            Command::Policies { .. } | Command::Support => false,
        }
    }
}

/// Policy selection shared by `quote` and `scenario`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PolicyArgs {
    /// Policy name from the catalog (overrides STUDIO_POLICY)
    #[arg(long, value_name = "NAME")]
    pub policy: Option<String>,

    /// Price against a policy file instead of the catalog
    #[arg(long, value_name = "PATH", conflicts_with = "policy")]
    pub policy_file: Option<PathBuf>,
}

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load StudioConfig from the environment                              │
/// │  2. --policy-dir overrides the configured policy directory              │
/// │  3. Build the PolicyCatalog (built-ins + directory)                     │
/// │  4. Dispatch the subcommand, writing results to stdout                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> StudioResult<()> {
    let mut config = StudioConfig::from_env()?;
    if cli.policy_dir.is_some() {
        config.policy_dir = cli.policy_dir;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Quote {
            cart,
            distance,
            items,
            policy,
            json,
        } => {
            let request = QuoteRequest::new(cart, distance, items);
            price(&config, &request, &policy, json, &mut out)
        }
        Command::Scenario {
            scenario,
            policy,
            json,
        } => price(&config, &scenario.request(), &policy, json, &mut out),
        Command::Policies { show } => {
            let catalog = PolicyCatalog::load(config.policy_dir.as_deref())?;
            match show {
                Some(name) => {
                    writeln!(out, "{}", commands::policies::show_policy(&catalog, &name)?)?
                }
                None => {
                    let summaries =
                        commands::policies::list_policies(&catalog, &config.default_policy);
                    write!(out, "{}", commands::policies::render_policy_list(&summaries))?
                }
            }
            Ok(())
        }
        Command::Support => {
            let now = Utc::now();
            let support = SupportState::new(TicketBoard::seeded(now));
            let stdin = io::stdin();
            commands::support::run_session(&support, stdin.lock(), &mut out, now)
        }
    }
}

fn price<W: Write>(
    config: &StudioConfig,
    request: &QuoteRequest,
    args: &PolicyArgs,
    json: bool,
    out: &mut W,
) -> StudioResult<()> {
    let catalog = PolicyCatalog::load(config.policy_dir.as_deref())?;
    let (name, policy) = resolve_policy(
        &catalog,
        config,
        args.policy.as_deref(),
        args.policy_file.as_deref(),
    )?;

    let quote = quote(request, &name, &policy);
    info!(policy = %name, total = quote.result.total_cents, "Quote computed");

    if json {
        print_json(out, &quote)
    } else {
        write!(out, "{}", render_quote(&quote))?;
        Ok(())
    }
}

/// Formats a failure for stderr: `{code, message}` JSON when the command
/// asked for JSON, `[CODE] message` otherwise.
pub fn render_error(err: &StudioError, json: bool) -> String {
    if json {
        if let Ok(text) = serde_json::to_string(err) {
            return text;
        }
    }
    err.to_string()
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> StudioResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=delivery_studio=trace` - Trace the studio only
/// - Default: warnings, plus info from the studio
///
/// Logs go to stderr so stdout stays clean for `--json`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,delivery_studio=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
