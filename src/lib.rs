//! Data access for a kanban board: boards own columns, columns own tickets.
//!
//! [`Repository`] is the surface an API layer calls. It sits on a
//! [`Store`], either [`PgStore`] for PostgreSQL or [`InMemoryStore`].
//!
//! ```
//! use kanban_store::{InMemoryStore, Repository};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> kanban_store::error::Result<()> {
//! let repo = Repository::new(InMemoryStore::new());
//! let board = repo.create_board("B", None).await?;
//! let todo = repo.create_column(&board.id, "Todo", 0).await?;
//! repo.create_ticket(&todo.id, "later", "", 1).await?;
//! repo.create_ticket(&todo.id, "first", "", 0).await?;
//!
//! let tickets = repo.list_tickets_by_column(&todo.id).await?;
//! assert_eq!(tickets[0].title, "first");
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate diesel;

pub mod config;
pub mod db;
pub mod error;
pub mod repository;

pub use db::{
    memory::InMemoryStore,
    models::{Board, BoardPatch, Column, ColumnPatch, Ticket, TicketPatch},
    pg_store::PgStore,
    seed::{seed_default_board, SeedOutcome},
    store::Store,
};
pub use error::{Error, Result};
pub use repository::Repository;
