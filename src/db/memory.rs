//! In-memory store.
//!
//! Backs tests and local experiments. Collections are hash maps keyed by id;
//! the secondary indexes are kept in sync on every write. It can also be told
//! to start failing, which is how cascade behaviour under a dying store is
//! exercised.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{
    models::{Board, BoardPatch, Column, ColumnPatch, Ticket, TicketPatch},
    store::Store,
};
use crate::error::{Error, Result};

#[derive(Debug, Default)]
struct Tables {
    boards: HashMap<String, Board>,
    columns: HashMap<String, Column>,
    tickets: HashMap<String, Ticket>,
    columns_by_board: BTreeMap<String, BTreeSet<String>>,
    tickets_by_column: BTreeMap<String, BTreeSet<String>>,
    unavailable: bool,
    /// Deletes still allowed before every further delete fails.
    delete_budget: Option<usize>,
    /// Same for puts.
    put_budget: Option<usize>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

fn unavailable(op: &str) -> Error {
    Error::StoreUnavailable(format!("in-memory store refused {op}").into())
}

fn index_insert(index: &mut BTreeMap<String, BTreeSet<String>>, parent: &str, id: &str) {
    index
        .entry(parent.to_owned())
        .or_default()
        .insert(id.to_owned());
}

fn index_remove(index: &mut BTreeMap<String, BTreeSet<String>>, parent: &str, id: &str) {
    if let Some(ids) = index.get_mut(parent) {
        ids.remove(id);
        if ids.is_empty() {
            index.remove(parent);
        }
    }
}

fn spend(budget: &mut Option<usize>, op: &str) -> Result<()> {
    match budget {
        Some(0) => Err(unavailable(op)),
        Some(left) => {
            *left -= 1;
            Ok(())
        }
        None => Ok(()),
    }
}

impl Tables {
    fn check(&self, op: &str) -> Result<()> {
        if self.unavailable {
            return Err(unavailable(op));
        }
        Ok(())
    }

    fn check_delete(&mut self, op: &str) -> Result<()> {
        self.check(op)?;
        spend(&mut self.delete_budget, op)
    }

    fn check_put(&mut self, op: &str) -> Result<()> {
        self.check(op)?;
        spend(&mut self.put_budget, op)
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes every following call fail with `StoreUnavailable` (or recover).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.write().unavailable = unavailable;
    }

    /// Lets `n` more deletes succeed, then fails all deletes.
    pub fn fail_deletes_after(&self, n: usize) {
        self.write().delete_budget = Some(n);
    }

    /// Lifts the delete limit set by [`fail_deletes_after`](Self::fail_deletes_after).
    pub fn allow_deletes(&self) {
        self.write().delete_budget = None;
    }

    /// Lets `n` more puts succeed, then fails all puts.
    pub fn fail_puts_after(&self, n: usize) {
        self.write().put_budget = Some(n);
    }

    pub fn allow_puts(&self) {
        self.write().put_budget = None;
    }

    pub fn board_count(&self) -> usize {
        self.read().boards.len()
    }

    pub fn column_count(&self) -> usize {
        self.read().columns.len()
    }

    pub fn ticket_count(&self) -> usize {
        self.read().tickets.len()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn create_tables(&self) -> Result<()> {
        self.read().check("create_tables")
    }

    async fn has_any_board(&self) -> Result<bool> {
        let tables = self.read();
        tables.check("has_any_board")?;
        Ok(!tables.boards.is_empty())
    }

    async fn get_board(&self, id: &str) -> Result<Option<Board>> {
        let tables = self.read();
        tables.check("get_board")?;
        Ok(tables.boards.get(id).cloned())
    }

    async fn scan_boards(&self) -> Result<Vec<Board>> {
        let tables = self.read();
        tables.check("scan_boards")?;
        Ok(tables.boards.values().cloned().collect())
    }

    async fn put_board(&self, board: &Board) -> Result<()> {
        let mut tables = self.write();
        tables.check_put("put_board")?;
        tables.boards.insert(board.id.clone(), board.clone());
        Ok(())
    }

    async fn update_board_fields(&self, id: &str, patch: &BoardPatch) -> Result<Option<Board>> {
        let mut tables = self.write();
        tables.check("update_board_fields")?;
        Ok(tables.boards.get_mut(id).map(|board| {
            patch.apply(board);
            board.clone()
        }))
    }

    async fn delete_board(&self, id: &str) -> Result<bool> {
        let mut tables = self.write();
        tables.check_delete("delete_board")?;
        Ok(tables.boards.remove(id).is_some())
    }

    async fn get_column(&self, id: &str) -> Result<Option<Column>> {
        let tables = self.read();
        tables.check("get_column")?;
        Ok(tables.columns.get(id).cloned())
    }

    async fn query_columns_by_board(&self, board_id: &str) -> Result<Vec<Column>> {
        let tables = self.read();
        tables.check("query_columns_by_board")?;
        Ok(tables
            .columns_by_board
            .get(board_id)
            .into_iter()
            .flatten()
            .filter_map(|id| tables.columns.get(id).cloned())
            .collect())
    }

    async fn put_column(&self, column: &Column) -> Result<()> {
        let mut tables = self.write();
        tables.check_put("put_column")?;
        let Tables { columns, columns_by_board, .. } = &mut *tables;
        if let Some(old) = columns.insert(column.id.clone(), column.clone()) {
            index_remove(columns_by_board, &old.board_id, &old.id);
        }
        index_insert(columns_by_board, &column.board_id, &column.id);
        Ok(())
    }

    async fn update_column_fields(&self, id: &str, patch: &ColumnPatch) -> Result<Option<Column>> {
        let mut tables = self.write();
        tables.check("update_column_fields")?;
        Ok(tables.columns.get_mut(id).map(|column| {
            patch.apply(column);
            column.clone()
        }))
    }

    async fn delete_column(&self, id: &str) -> Result<bool> {
        let mut tables = self.write();
        tables.check_delete("delete_column")?;
        let Tables { columns, columns_by_board, .. } = &mut *tables;
        match columns.remove(id) {
            Some(old) => {
                index_remove(columns_by_board, &old.board_id, &old.id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_ticket(&self, id: &str) -> Result<Option<Ticket>> {
        let tables = self.read();
        tables.check("get_ticket")?;
        Ok(tables.tickets.get(id).cloned())
    }

    async fn query_tickets_by_column(&self, column_id: &str) -> Result<Vec<Ticket>> {
        let tables = self.read();
        tables.check("query_tickets_by_column")?;
        Ok(tables
            .tickets_by_column
            .get(column_id)
            .into_iter()
            .flatten()
            .filter_map(|id| tables.tickets.get(id).cloned())
            .collect())
    }

    async fn put_ticket(&self, ticket: &Ticket) -> Result<()> {
        let mut tables = self.write();
        tables.check_put("put_ticket")?;
        let Tables { tickets, tickets_by_column, .. } = &mut *tables;
        if let Some(old) = tickets.insert(ticket.id.clone(), ticket.clone()) {
            index_remove(tickets_by_column, &old.column_id, &old.id);
        }
        index_insert(tickets_by_column, &ticket.column_id, &ticket.id);
        Ok(())
    }

    async fn update_ticket_fields(&self, id: &str, patch: &TicketPatch) -> Result<Option<Ticket>> {
        let mut tables = self.write();
        tables.check("update_ticket_fields")?;
        let Tables { tickets, tickets_by_column, .. } = &mut *tables;
        let ticket = match tickets.get_mut(id) {
            Some(ticket) => ticket,
            None => return Ok(None),
        };
        let previous_column = ticket.column_id.clone();
        patch.apply(ticket);
        if ticket.column_id != previous_column {
            index_remove(tickets_by_column, &previous_column, id);
            index_insert(tickets_by_column, &ticket.column_id, id);
        }
        Ok(Some(ticket.clone()))
    }

    async fn delete_ticket(&self, id: &str) -> Result<bool> {
        let mut tables = self.write();
        tables.check_delete("delete_ticket")?;
        let Tables { tickets, tickets_by_column, .. } = &mut *tables;
        match tickets.remove(id) {
            Some(old) => {
                index_remove(tickets_by_column, &old.column_id, &old.id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ticket(id: &str, column_id: &str, position: i32) -> Ticket {
        Ticket {
            id: id.to_string(),
            column_id: column_id.to_string(),
            title: format!("title {id}"),
            description: String::new(),
            position,
            created_at: Utc::now(),
        }
    }

    fn ids(tickets: Vec<Ticket>) -> Vec<String> {
        let mut ids: Vec<String> = tickets.into_iter().map(|t| t.id).collect();
        ids.sort();
        ids
    }

    #[tokio::test]
    async fn index_follows_ticket_moves() {
        let store = InMemoryStore::new();
        store.put_ticket(&ticket("t1", "a", 0)).await.unwrap();
        store.put_ticket(&ticket("t2", "a", 1)).await.unwrap();

        let patch = TicketPatch { column_id: Some("b".to_string()), ..Default::default() };
        let moved = store.update_ticket_fields("t1", &patch).await.unwrap().unwrap();
        assert_eq!(moved.column_id, "b");
        assert_eq!(moved.title, "title t1");

        assert_eq!(ids(store.query_tickets_by_column("a").await.unwrap()), vec!["t2"]);
        assert_eq!(ids(store.query_tickets_by_column("b").await.unwrap()), vec!["t1"]);
    }

    #[tokio::test]
    async fn put_overwrites_and_reindexes() {
        let store = InMemoryStore::new();
        store.put_ticket(&ticket("t1", "a", 0)).await.unwrap();
        store.put_ticket(&ticket("t1", "b", 5)).await.unwrap();

        assert!(store.query_tickets_by_column("a").await.unwrap().is_empty());
        assert_eq!(store.ticket_count(), 1);
        assert_eq!(store.get_ticket("t1").await.unwrap().unwrap().position, 5);
    }

    #[tokio::test]
    async fn missing_records() {
        let store = InMemoryStore::new();
        assert!(store.get_board("nope").await.unwrap().is_none());
        assert!(!store.delete_column("nope").await.unwrap());
        let patch = ColumnPatch { position: Some(1), ..Default::default() };
        assert!(store.update_column_fields("nope", &patch).await.unwrap().is_none());
        assert!(store.query_columns_by_board("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_patch_returns_stored_record() {
        let store = InMemoryStore::new();
        let stored = ticket("t1", "a", 0);
        store.put_ticket(&stored).await.unwrap();

        let same = store.update_ticket_fields("t1", &TicketPatch::default()).await.unwrap();
        assert_eq!(same, Some(stored));
        let none = store.update_ticket_fields("t2", &TicketPatch::default()).await.unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn delete_budget_runs_out() {
        let store = InMemoryStore::new();
        store.put_ticket(&ticket("t1", "a", 0)).await.unwrap();
        store.put_ticket(&ticket("t2", "a", 1)).await.unwrap();
        store.fail_deletes_after(1);

        assert!(store.delete_ticket("t1").await.unwrap());
        let err = store.delete_ticket("t2").await.unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable(_)));
        assert_eq!(store.ticket_count(), 1);

        store.allow_deletes();
        assert!(store.delete_ticket("t2").await.unwrap());
    }

    #[tokio::test]
    async fn unavailable_store_fails_everything() {
        let store = InMemoryStore::new();
        store.set_unavailable(true);
        assert!(store.create_tables().await.is_err());
        assert!(store.has_any_board().await.is_err());
        assert!(store.scan_boards().await.is_err());

        store.set_unavailable(false);
        assert!(!store.has_any_board().await.unwrap());
    }
}
