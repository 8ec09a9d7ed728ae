//! The storage adapter contract.
//!
//! A store exposes three table-like collections keyed by `id`, plus one
//! secondary lookup per child relationship (columns by `board_id`, tickets
//! by `column_id`). Every call touches a single record or a single index
//! lookup; nothing here spans records, so nothing here is transactional.

use async_trait::async_trait;

use super::models::{Board, BoardPatch, Column, ColumnPatch, Ticket, TicketPatch};
use crate::error::Result;

#[async_trait]
pub trait Store: Send + Sync {
    /// Creates the collections and indexes. Existing ones are left as they are.
    async fn create_tables(&self) -> Result<()>;

    /// Cheap probe: does at least one board exist?
    async fn has_any_board(&self) -> Result<bool>;

    async fn get_board(&self, id: &str) -> Result<Option<Board>>;
    async fn scan_boards(&self) -> Result<Vec<Board>>;
    async fn put_board(&self, board: &Board) -> Result<()>;
    /// Returns the updated record, or `None` if there is no board `id`.
    /// An empty patch changes nothing and returns the stored record.
    async fn update_board_fields(&self, id: &str, patch: &BoardPatch) -> Result<Option<Board>>;
    /// Returns whether a record was removed.
    async fn delete_board(&self, id: &str) -> Result<bool>;

    async fn get_column(&self, id: &str) -> Result<Option<Column>>;
    async fn query_columns_by_board(&self, board_id: &str) -> Result<Vec<Column>>;
    async fn put_column(&self, column: &Column) -> Result<()>;
    async fn update_column_fields(&self, id: &str, patch: &ColumnPatch) -> Result<Option<Column>>;
    async fn delete_column(&self, id: &str) -> Result<bool>;

    async fn get_ticket(&self, id: &str) -> Result<Option<Ticket>>;
    async fn query_tickets_by_column(&self, column_id: &str) -> Result<Vec<Ticket>>;
    async fn put_ticket(&self, ticket: &Ticket) -> Result<()>;
    async fn update_ticket_fields(&self, id: &str, patch: &TicketPatch) -> Result<Option<Ticket>>;
    async fn delete_ticket(&self, id: &str) -> Result<bool>;
}
