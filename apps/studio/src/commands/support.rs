//! # Support Commands
//!
//! Line-oriented session over the ticket board.
//!
//! ## Session Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  support> assign T-1001                                                 │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  SupportCommand::from_str ──► execute ──► with_board_mut(assign)        │
//! │      │                            │                                     │
//! │      │ (parse error)              ▼                                     │
//! │      └──────────────► "[VALIDATION_ERROR] ..."   render_ticket          │
//! │                                                                         │
//! │  The loop ends on `quit` or end of input. Command errors are printed    │
//! │  and the session keeps going.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{StudioError, StudioResult};
use crate::state::{age_label, Assignee, SupportError, SupportState, Ticket, TicketBoard};

const HELP: &str = "\
Commands:
  list                          show the queue
  show <id>                     select a ticket and show its tasks
  assign <id> | unassign <id>   take or release a ticket
  resolve <id> | reopen <id>    change ticket status
  toggle <id> <task>            mark a task done or not done
  task-assign <id> <task>       take a task
  task-unassign <id> <task>     release a task
  help                          this text
  quit                          leave the session
";

/// One parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportCommand {
    List,
    Show(String),
    Assign(String),
    Unassign(String),
    Resolve(String),
    Reopen(String),
    ToggleTask { ticket: String, task: String },
    AssignTask { ticket: String, task: String },
    UnassignTask { ticket: String, task: String },
    Help,
    Quit,
}

impl FromStr for SupportCommand {
    type Err = SupportError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(SupportError::Usage("help"));
        };
        let args: Vec<String> = words.map(str::to_string).collect();

        let one = |usage: &'static str| match args.as_slice() {
            [id] => Ok(id.clone()),
            _ => Err(SupportError::Usage(usage)),
        };
        let two = |usage: &'static str| match args.as_slice() {
            [ticket, task] => Ok((ticket.clone(), task.clone())),
            _ => Err(SupportError::Usage(usage)),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => SupportCommand::List,
            "show" => SupportCommand::Show(one("show <id>")?),
            "assign" => SupportCommand::Assign(one("assign <id>")?),
            "unassign" => SupportCommand::Unassign(one("unassign <id>")?),
            "resolve" => SupportCommand::Resolve(one("resolve <id>")?),
            "reopen" => SupportCommand::Reopen(one("reopen <id>")?),
            "toggle" => {
                let (ticket, task) = two("toggle <id> <task>")?;
                SupportCommand::ToggleTask { ticket, task }
            }
            "task-assign" => {
                let (ticket, task) = two("task-assign <id> <task>")?;
                SupportCommand::AssignTask { ticket, task }
            }
            "task-unassign" => {
                let (ticket, task) = two("task-unassign <id> <task>")?;
                SupportCommand::UnassignTask { ticket, task }
            }
            "help" | "?" => SupportCommand::Help,
            "quit" | "exit" => SupportCommand::Quit,
            other => return Err(SupportError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Quit,
}

/// Applies one command to the board.
pub fn execute(
    state: &SupportState,
    command: SupportCommand,
    now: DateTime<Utc>,
) -> Result<Outcome, SupportError> {
    debug!(?command, "support command");

    let output = match command {
        SupportCommand::List => state.with_board(|board| render_board(board, now)),
        SupportCommand::Show(id) => {
            state.with_board_mut(|board| board.select(&id).map(|t| render_ticket(t, now)))?
        }
        SupportCommand::Assign(id) => update(state, &id, now, |b| b.assign(&id))?,
        SupportCommand::Unassign(id) => update(state, &id, now, |b| b.unassign(&id))?,
        SupportCommand::Resolve(id) => update(state, &id, now, |b| b.resolve(&id))?,
        SupportCommand::Reopen(id) => update(state, &id, now, |b| b.reopen(&id))?,
        SupportCommand::ToggleTask { ticket, task } => {
            update(state, &ticket, now, |b| b.toggle_task(&ticket, &task).map(|_| ()))?
        }
        SupportCommand::AssignTask { ticket, task } => {
            update(state, &ticket, now, |b| b.assign_task(&ticket, &task))?
        }
        SupportCommand::UnassignTask { ticket, task } => {
            update(state, &ticket, now, |b| b.unassign_task(&ticket, &task))?
        }
        SupportCommand::Help => HELP.to_string(),
        SupportCommand::Quit => return Ok(Outcome::Quit),
    };

    Ok(Outcome::Output(output))
}

/// Runs a write against the board and renders the touched ticket.
fn update<F>(
    state: &SupportState,
    id: &str,
    now: DateTime<Utc>,
    f: F,
) -> Result<String, SupportError>
where
    F: FnOnce(&mut TicketBoard) -> Result<(), SupportError>,
{
    state.with_board_mut(|board| {
        f(board)?;
        board.get(id).map(|ticket| render_ticket(ticket, now))
    })
}

/// Reads commands from `input` until `quit` or end of input.
///
/// `now` is the clock used for ticket ages for the whole session.
pub fn run_session<R, W>(
    state: &SupportState,
    input: R,
    output: &mut W,
    now: DateTime<Utc>,
) -> StudioResult<()>
where
    R: BufRead,
    W: Write,
{
    info!("Support session started");
    write!(output, "{}", state.with_board(|board| render_board(board, now)))?;
    write!(output, "support> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(output, "support> ")?;
            output.flush()?;
            continue;
        }

        match line.parse().and_then(|command| execute(state, command, now)) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Output(text)) => write!(output, "{}", text)?,
            Err(err) => writeln!(output, "{}", StudioError::from(err))?,
        }
        write!(output, "support> ")?;
        output.flush()?;
    }

    writeln!(output)?;
    info!("Support session ended");
    Ok(())
}

// =============================================================================
// Rendering
// =============================================================================

fn assignee_label(assignee: Option<Assignee>) -> &'static str {
    match assignee {
        Some(Assignee::Me) => "me",
        None => "-",
    }
}

/// Counters header plus one line per ticket. `>` marks the selection.
pub fn render_board(board: &TicketBoard, now: DateTime<Utc>) -> String {
    let counts = board.counts();
    let selected = board.selected().map(|t| t.id.as_str());

    let mut out = format!(
        "Open {}  Assigned {}  Resolved {}\n",
        counts.open, counts.assigned, counts.resolved
    );
    for ticket in board.tickets() {
        out.push_str(&format!(
            "{} {:<7} {:<6} {:<8} {:<2} {:<6} {:<10} {}\n",
            if selected == Some(ticket.id.as_str()) { '>' } else { ' ' },
            ticket.id,
            ticket.priority,
            ticket.status,
            assignee_label(ticket.assigned_to),
            ticket.customer,
            age_label(ticket.created_at, now),
            ticket.issue
        ));
    }
    out
}

/// Ticket header and its task checklist.
pub fn render_ticket(ticket: &Ticket, now: DateTime<Utc>) -> String {
    let mut out = format!(
        "{} [{}] {} - {} ({}, {})\n  {}\n",
        ticket.id,
        ticket.priority,
        ticket.customer,
        ticket.status,
        assignee_label(ticket.assigned_to),
        age_label(ticket.created_at, now),
        ticket.issue
    );
    for task in &ticket.tasks {
        out.push_str(&format!(
            "  [{}] {} {} ({})\n",
            if task.done { 'x' } else { ' ' },
            task.id,
            task.title,
            assignee_label(task.assignee)
        ));
    }
    out
}
