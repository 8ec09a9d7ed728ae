use super::{
    models::{timestamp_now, Board, Column, Ticket},
    store::Store,
};
use crate::error::Result;

pub const DEFAULT_BOARD_ID: &str = "default-board";
pub const DEFAULT_BOARD_NAME: &str = "Opus1 Task Board";

const DEFAULT_COLUMNS: [(&str, &str, i32); 3] = [
    ("col-1", "To Do", 0),
    ("col-2", "In Progress", 1),
    ("col-3", "Done", 2),
];

// (id, column, title, description, position)
const DEFAULT_TICKETS: [(&str, &str, &str, &str, i32); 7] = [
    (
        "ticket-1",
        "col-1",
        "Prompt LLM to init",
        "Use bolt.new to provide quick greenfield project",
        0,
    ),
    ("ticket-2", "col-1", "Make adjustments", "Adjust LLM code where appropriate", 1),
    ("ticket-3", "col-2", "Go for a walk", "Grab some water, too", 0),
    ("ticket-4", "col-3", "Prompt LLM to write test cases", "Use bolt.new for initial tests", 0),
    ("ticket-5", "col-3", "Fix LLMS test cases", "Struggling with best practices", 1),
    ("ticket-6", "col-3", "Test e2e", "Dont forget different browsers", 2),
    ("ticket-7", "col-3", "Document work", "Include next steps & tech debt", 3),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded,
    AlreadySeeded,
}

/// Puts the default board in place unless some board already exists.
///
/// Columns and tickets are written before the board, and the board is what
/// the existence probe looks for. A run that fails partway therefore leaves
/// no board behind, and the next run writes everything again over the same
/// fixed ids. Two processes seeding an empty store at once both write the
/// same records, which ends in the same state.
pub async fn seed_default_board<S: Store + ?Sized>(store: &S) -> Result<SeedOutcome> {
    if store.has_any_board().await? {
        tracing::info!("data already seeded");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    for (id, name, position) in DEFAULT_COLUMNS {
        store
            .put_column(&Column {
                id: id.to_string(),
                board_id: DEFAULT_BOARD_ID.to_string(),
                name: name.to_string(),
                position,
                created_at: timestamp_now(),
            })
            .await?;
    }

    for (id, column_id, title, description, position) in DEFAULT_TICKETS {
        store
            .put_ticket(&Ticket {
                id: id.to_string(),
                column_id: column_id.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                position,
                created_at: timestamp_now(),
            })
            .await?;
    }

    store
        .put_board(&Board {
            id: DEFAULT_BOARD_ID.to_string(),
            name: DEFAULT_BOARD_NAME.to_string(),
            created_at: timestamp_now(),
        })
        .await?;

    tracing::info!(
        board = DEFAULT_BOARD_ID,
        columns = DEFAULT_COLUMNS.len(),
        tickets = DEFAULT_TICKETS.len(),
        "seeded initial data"
    );
    Ok(SeedOutcome::Seeded)
}
