use async_trait::async_trait;
use diesel::{PgConnection, QueryResult, RunQueryDsl};

use super::{
    connection::PgPool,
    models::{Board, BoardPatch, Column, ColumnPatch, Ticket, TicketPatch},
    repos::{board::BoardRecords, column::ColumnRecords, ticket::TicketRecords},
    schema::CREATE_TABLES,
    store::Store,
};
use crate::error::Result;

/// PostgreSQL-backed store. diesel is blocking, so every call checks a
/// connection out of the pool on the blocking thread pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    async fn run<T, F>(&self, query: F) -> Result<T>
    where
        F: FnOnce(&PgConnection) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<T> {
            let db_connection = pool.get()?;
            Ok(query(&*db_connection)?)
        })
        .await?
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_tables(&self) -> Result<()> {
        self.run(|db_connection| {
            for statement in CREATE_TABLES {
                diesel::sql_query(*statement).execute(db_connection)?;
            }
            Ok(())
        })
        .await?;
        tracing::info!(statements = CREATE_TABLES.len(), "tables ready");
        Ok(())
    }

    async fn has_any_board(&self) -> Result<bool> {
        self.run(|db_connection| Board::any(db_connection)).await
    }

    async fn get_board(&self, id: &str) -> Result<Option<Board>> {
        let id = id.to_owned();
        self.run(move |db_connection| Board::find(&id, db_connection)).await
    }

    async fn scan_boards(&self) -> Result<Vec<Board>> {
        self.run(|db_connection| Board::scan(db_connection)).await
    }

    async fn put_board(&self, board: &Board) -> Result<()> {
        let board = board.clone();
        self.run(move |db_connection| board.put(db_connection)).await
    }

    async fn update_board_fields(&self, id: &str, patch: &BoardPatch) -> Result<Option<Board>> {
        if patch.is_empty() {
            return self.get_board(id).await;
        }
        let (id, patch) = (id.to_owned(), patch.clone());
        self.run(move |db_connection| Board::update(&id, &patch, db_connection)).await
    }

    async fn delete_board(&self, id: &str) -> Result<bool> {
        let id = id.to_owned();
        self.run(move |db_connection| Board::delete(&id, db_connection)).await
    }

    async fn get_column(&self, id: &str) -> Result<Option<Column>> {
        let id = id.to_owned();
        self.run(move |db_connection| Column::find(&id, db_connection)).await
    }

    async fn query_columns_by_board(&self, board_id: &str) -> Result<Vec<Column>> {
        let board_id = board_id.to_owned();
        self.run(move |db_connection| Column::by_board(&board_id, db_connection)).await
    }

    async fn put_column(&self, column: &Column) -> Result<()> {
        let column = column.clone();
        self.run(move |db_connection| column.put(db_connection)).await
    }

    async fn update_column_fields(&self, id: &str, patch: &ColumnPatch) -> Result<Option<Column>> {
        if patch.is_empty() {
            return self.get_column(id).await;
        }
        let (id, patch) = (id.to_owned(), patch.clone());
        self.run(move |db_connection| Column::update(&id, &patch, db_connection)).await
    }

    async fn delete_column(&self, id: &str) -> Result<bool> {
        let id = id.to_owned();
        self.run(move |db_connection| Column::delete(&id, db_connection)).await
    }

    async fn get_ticket(&self, id: &str) -> Result<Option<Ticket>> {
        let id = id.to_owned();
        self.run(move |db_connection| Ticket::find(&id, db_connection)).await
    }

    async fn query_tickets_by_column(&self, column_id: &str) -> Result<Vec<Ticket>> {
        let column_id = column_id.to_owned();
        self.run(move |db_connection| Ticket::by_column(&column_id, db_connection)).await
    }

    async fn put_ticket(&self, ticket: &Ticket) -> Result<()> {
        let ticket = ticket.clone();
        self.run(move |db_connection| ticket.put(db_connection)).await
    }

    async fn update_ticket_fields(&self, id: &str, patch: &TicketPatch) -> Result<Option<Ticket>> {
        if patch.is_empty() {
            return self.get_ticket(id).await;
        }
        let (id, patch) = (id.to_owned(), patch.clone());
        self.run(move |db_connection| Ticket::update(&id, &patch, db_connection)).await
    }

    async fn delete_ticket(&self, id: &str) -> Result<bool> {
        let id = id.to_owned();
        self.run(move |db_connection| Ticket::delete(&id, db_connection)).await
    }
}
