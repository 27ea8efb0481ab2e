//! # State Module
//!
//! State held by the studio for the lifetime of one invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  StudioConfig    │  │  PolicyCatalog   │  │   SupportState       │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  default policy  │  │  name → policy   │  │  Arc<Mutex<          │  │
//! │  │  policy dir      │  │  (validated)     │  │    TicketBoard       │  │
//! │  │  (read-only)     │  │  (read-only)     │  │  >>                  │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  Pricing commands need config + catalog. The support session only      │
//! │  needs the board.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod support;

pub use catalog::{
    load_policy_file, parse_policy, CatalogEntry, PolicyCatalog, PolicyError, PolicySource,
};
pub use config::{ConfigError, StudioConfig, DEFAULT_POLICY};
pub use support::{
    age_label, Assignee, BoardCounts, Priority, SupportError, SupportState, Task, Ticket,
    TicketBoard, TicketStatus,
};
