//! # Support Board State
//!
//! In-memory ticket queue for the support ops workflow.
//!
//! Nothing here is persisted and nothing here touches pricing. The board is
//! seeded fresh for every `support` session.
//!
//! ## Ticket Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ticket Board Operations                              │
//! │                                                                         │
//! │  Agent Action             Board Method             State Change         │
//! │  ────────────             ────────────             ────────────         │
//! │                                                                         │
//! │  show T-1001 ────────────► select() ─────────────► selected = T-1001    │
//! │  assign T-1001 ──────────► assign() ─────────────► assigned_to = Me     │
//! │  resolve T-1001 ─────────► resolve() ────────────► status = Resolved    │
//! │  toggle T-1001 a ────────► toggle_task() ────────► task.done = !done    │
//! │  task-assign T-1001 a ───► assign_task() ────────► task.assignee = Me   │
//! │                                                                         │
//! │  NOTE: Every write goes through SupportState::with_board_mut, which    │
//! │        holds the mutex for the duration of the closure only.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Ticket Types
// =============================================================================

/// Who a ticket or task is assigned to. The board has a single agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assignee {
    Me,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    #[default]
    Open,
    Resolved,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            TicketStatus::Open => "open",
            TicketStatus::Resolved => "resolved",
        })
    }
}

/// A checklist item on a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub done: bool,
    pub assignee: Option<Assignee>,
}

impl Task {
    fn new(id: &str, title: &str) -> Self {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            done: false,
            assignee: None,
        }
    }
}

/// A customer support ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub customer: String,
    pub priority: Priority,
    pub issue: String,
    pub status: TicketStatus,
    pub assigned_to: Option<Assignee>,
    pub created_at: DateTime<Utc>,
    pub tasks: Vec<Task>,
}

impl Ticket {
    fn task_mut(&mut self, task_id: &str) -> Result<&mut Task, SupportError> {
        let ticket_id = self.id.clone();
        self.tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| SupportError::TaskNotFound {
                ticket_id,
                task_id: task_id.to_string(),
            })
    }
}

/// Ticket board errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupportError {
    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    #[error("Task '{task_id}' not found on ticket {ticket_id}")]
    TaskNotFound { ticket_id: String, task_id: String },

    #[error("Unknown command: {0} (try 'help')")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// Header counters shown above the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCounts {
    pub open: usize,
    pub assigned: usize,
    pub resolved: usize,
}

// =============================================================================
// Ticket Board
// =============================================================================

/// The ticket queue plus the currently selected ticket.
///
/// ## Invariants
/// - Ticket ids are unique
/// - `selected` always names an existing ticket when the board is non-empty
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketBoard {
    tickets: Vec<Ticket>,
    selected: Option<String>,
}

impl TicketBoard {
    /// Creates a board from tickets, selecting the first one.
    pub fn new(tickets: Vec<Ticket>) -> Self {
        let selected = tickets.first().map(|t| t.id.clone());
        TicketBoard { tickets, selected }
    }

    /// The demo queue: three open, unassigned tickets of mixed priority.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let ticket = |id: &str, customer: &str, priority, issue: &str, age: Duration, tasks| Ticket {
            id: id.to_string(),
            customer: customer.to_string(),
            priority,
            issue: issue.to_string(),
            status: TicketStatus::Open,
            assigned_to: None,
            created_at: now - age,
            tasks,
        };

        TicketBoard::new(vec![
            ticket(
                "T-1001",
                "Anya",
                Priority::High,
                "Late delivery, customer asking for ETA",
                Duration::minutes(35),
                vec![
                    Task::new("a", "Check courier timeline"),
                    Task::new("b", "Send apology + updated ETA"),
                ],
            ),
            ticket(
                "T-1002",
                "Mika",
                Priority::Medium,
                "Missing item, merchant packed fewer items",
                Duration::hours(2),
                vec![
                    Task::new("a", "Confirm merchant packing list"),
                    Task::new("b", "Offer refund/credit options"),
                ],
            ),
            ticket(
                "T-1003",
                "Sara",
                Priority::Low,
                "Account login issue",
                Duration::minutes(10),
                vec![
                    Task::new("a", "Verify account email"),
                    Task::new("b", "Send reset instructions"),
                ],
            ),
        ])
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn get(&self, id: &str) -> Result<&Ticket, SupportError> {
        self.tickets
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| SupportError::TicketNotFound(id.to_string()))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Ticket, SupportError> {
        self.tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| SupportError::TicketNotFound(id.to_string()))
    }

    /// Makes `id` the selected ticket.
    pub fn select(&mut self, id: &str) -> Result<&Ticket, SupportError> {
        self.get(id)?;
        self.selected = Some(id.to_string());
        self.get(id)
    }

    pub fn selected(&self) -> Option<&Ticket> {
        self.selected.as_deref().and_then(|id| self.get(id).ok())
    }

    pub fn assign(&mut self, id: &str) -> Result<(), SupportError> {
        self.get_mut(id)?.assigned_to = Some(Assignee::Me);
        Ok(())
    }

    pub fn unassign(&mut self, id: &str) -> Result<(), SupportError> {
        self.get_mut(id)?.assigned_to = None;
        Ok(())
    }

    pub fn resolve(&mut self, id: &str) -> Result<(), SupportError> {
        self.get_mut(id)?.status = TicketStatus::Resolved;
        Ok(())
    }

    pub fn reopen(&mut self, id: &str) -> Result<(), SupportError> {
        self.get_mut(id)?.status = TicketStatus::Open;
        Ok(())
    }

    /// Flips a task's done flag. Returns the new value.
    pub fn toggle_task(&mut self, ticket_id: &str, task_id: &str) -> Result<bool, SupportError> {
        let task = self.get_mut(ticket_id)?.task_mut(task_id)?;
        task.done = !task.done;
        Ok(task.done)
    }

    pub fn assign_task(&mut self, ticket_id: &str, task_id: &str) -> Result<(), SupportError> {
        self.get_mut(ticket_id)?.task_mut(task_id)?.assignee = Some(Assignee::Me);
        Ok(())
    }

    pub fn unassign_task(&mut self, ticket_id: &str, task_id: &str) -> Result<(), SupportError> {
        self.get_mut(ticket_id)?.task_mut(task_id)?.assignee = None;
        Ok(())
    }

    /// Open tickets, tickets assigned to me, resolved tickets.
    pub fn counts(&self) -> BoardCounts {
        BoardCounts {
            open: self
                .tickets
                .iter()
                .filter(|t| t.status == TicketStatus::Open)
                .count(),
            assigned: self.tickets.iter().filter(|t| t.assigned_to.is_some()).count(),
            resolved: self
                .tickets
                .iter()
                .filter(|t| t.status == TicketStatus::Resolved)
                .count(),
        }
    }
}

/// Relative age of a ticket, rounded to the nearest minute.
///
/// ## Example
/// ```rust
/// use chrono::{Duration, Utc};
/// use delivery_studio::state::age_label;
///
/// let now = Utc::now();
/// assert_eq!(age_label(now - Duration::minutes(35), now), "35m ago");
/// assert_eq!(age_label(now, now), "just now");
/// ```
pub fn age_label(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let millis = (now - created_at).num_milliseconds();
    let minutes = (millis as f64 / 60_000.0).round() as i64;
    if minutes <= 0 {
        "just now".to_string()
    } else {
        format!("{minutes}m ago")
    }
}

// =============================================================================
// Shared State Wrapper
// =============================================================================

/// Shared handle to the ticket board.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<TicketBoard>>` so a session can hand the board to
/// helpers without cloning it. Almost every operation writes, so a RwLock
/// buys nothing.
#[derive(Debug, Clone)]
pub struct SupportState {
    board: Arc<Mutex<TicketBoard>>,
}

impl SupportState {
    pub fn new(board: TicketBoard) -> Self {
        SupportState {
            board: Arc::new(Mutex::new(board)),
        }
    }

    /// Executes a function with read access to the board.
    pub fn with_board<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TicketBoard) -> R,
    {
        let board = self.board.lock().expect("Support board mutex poisoned");
        f(&board)
    }

    /// Executes a function with write access to the board.
    pub fn with_board_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TicketBoard) -> R,
    {
        let mut board = self.board.lock().expect("Support board mutex poisoned");
        f(&mut board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> TicketBoard {
        TicketBoard::seeded(Utc::now())
    }

    #[test]
    fn test_seeded_board() {
        let board = board();
        assert_eq!(board.tickets().len(), 3);
        assert_eq!(board.selected().unwrap().id, "T-1001");
        assert_eq!(
            board.counts(),
            BoardCounts {
                open: 3,
                assigned: 0,
                resolved: 0
            }
        );
        assert!(board.tickets().iter().all(|t| t.tasks.len() == 2));
    }

    #[test]
    fn test_assign_and_unassign() {
        let mut board = board();
        board.assign("T-1002").unwrap();
        assert_eq!(board.get("T-1002").unwrap().assigned_to, Some(Assignee::Me));
        assert_eq!(board.counts().assigned, 1);

        board.unassign("T-1002").unwrap();
        assert_eq!(board.get("T-1002").unwrap().assigned_to, None);
        assert_eq!(board.counts().assigned, 0);
    }

    #[test]
    fn test_resolve_and_reopen() {
        let mut board = board();
        board.resolve("T-1001").unwrap();
        assert_eq!(board.counts().open, 2);
        assert_eq!(board.counts().resolved, 1);

        board.reopen("T-1001").unwrap();
        assert_eq!(board.get("T-1001").unwrap().status, TicketStatus::Open);
        assert_eq!(board.counts().resolved, 0);
    }

    #[test]
    fn test_task_operations() {
        let mut board = board();
        assert!(board.toggle_task("T-1003", "a").unwrap());
        assert!(!board.toggle_task("T-1003", "a").unwrap());

        board.assign_task("T-1003", "b").unwrap();
        let ticket = board.get("T-1003").unwrap();
        assert_eq!(ticket.tasks[1].assignee, Some(Assignee::Me));
        // Task assignment does not assign the ticket
        assert_eq!(ticket.assigned_to, None);

        board.unassign_task("T-1003", "b").unwrap();
        assert_eq!(board.get("T-1003").unwrap().tasks[1].assignee, None);
    }

    #[test]
    fn test_unknown_ids() {
        let mut board = board();
        assert_eq!(
            board.assign("T-9999"),
            Err(SupportError::TicketNotFound("T-9999".to_string()))
        );
        assert_eq!(
            board.toggle_task("T-1001", "z"),
            Err(SupportError::TaskNotFound {
                ticket_id: "T-1001".to_string(),
                task_id: "z".to_string()
            })
        );
        assert!(board.select("nope").is_err());
        assert_eq!(board.selected().unwrap().id, "T-1001");
    }

    #[test]
    fn test_select() {
        let mut board = board();
        board.select("T-1003").unwrap();
        assert_eq!(board.selected().unwrap().customer, "Sara");
    }

    #[test]
    fn test_age_label() {
        let now = Utc::now();
        assert_eq!(age_label(now - Duration::hours(2), now), "120m ago");
        assert_eq!(age_label(now - Duration::seconds(20), now), "just now");
        assert_eq!(age_label(now - Duration::seconds(31), now), "1m ago");
        assert_eq!(age_label(now + Duration::minutes(5), now), "just now");
    }

    #[test]
    fn test_state_wrapper() {
        let state = SupportState::new(board());
        let handle = state.clone();
        handle.with_board_mut(|b| b.resolve("T-1002")).unwrap();
        assert_eq!(state.with_board(|b| b.counts().resolved), 1);
    }
}
