//! # Commands Module
//!
//! Everything the `delivery-studio` subcommands do, minus argument parsing.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── quote.rs     ◄─── quote, scenario
//! ├── policies.rs  ◄─── policies, policies --show
//! └── support.rs   ◄─── support session
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Needs catalog + config
//! resolve_policy(&catalog, &config, policy, policy_file)
//!
//! // Needs catalog only
//! show_policy(&catalog, name)
//!
//! // Needs the board only
//! run_session(&support, stdin, &mut stdout, now)
//! ```
//!
//! Commands return strings or serializable values; printing happens in
//! `lib.rs` so the same functions serve text and `--json` output.

pub mod policies;
pub mod quote;
pub mod support;
