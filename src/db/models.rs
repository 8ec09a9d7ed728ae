use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::schema::{boards, columns, tickets};

/// Current time at the precision `TIMESTAMPTZ` keeps (microseconds), so a
/// record returned from a create compares equal to the one read back later.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[derive(Debug, Clone, PartialEq, Queryable, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Queryable, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub board_id: String,
    pub name: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Queryable, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub column_id: String,
    pub title: String,
    pub description: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name="boards"]
pub struct NewBoard<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name="columns"]
pub struct NewColumn<'a> {
    pub id: &'a str,
    pub board_id: &'a str,
    pub name: &'a str,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name="tickets"]
pub struct NewTicket<'a> {
    pub id: &'a str,
    pub column_id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Board> for NewBoard<'a> {
    fn from(board: &'a Board) -> Self {
        NewBoard {
            id: &board.id,
            name: &board.name,
            created_at: board.created_at,
        }
    }
}

impl<'a> From<&'a Column> for NewColumn<'a> {
    fn from(column: &'a Column) -> Self {
        NewColumn {
            id: &column.id,
            board_id: &column.board_id,
            name: &column.name,
            position: column.position,
            created_at: column.created_at,
        }
    }
}

impl<'a> From<&'a Ticket> for NewTicket<'a> {
    fn from(ticket: &'a Ticket) -> Self {
        NewTicket {
            id: &ticket.id,
            column_id: &ticket.column_id,
            title: &ticket.title,
            description: &ticket.description,
            position: ticket.position,
            created_at: ticket.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, AsChangeset, Deserialize)]
#[table_name="boards"]
pub struct BoardPatch {
    pub name: Option<String>,
}

/// Fields of a column to change. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset, Deserialize)]
#[table_name="columns"]
pub struct ColumnPatch {
    pub name: Option<String>,
    pub position: Option<i32>,
}

/// Fields of a ticket to change. Setting `column_id` moves the ticket.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset, Deserialize)]
#[table_name="tickets"]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub column_id: Option<String>,
    pub position: Option<i32>,
}

impl BoardPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    pub fn apply(&self, board: &mut Board) {
        if let Some(name) = &self.name {
            board.name = name.clone();
        }
    }
}

impl ColumnPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.position.is_none()
    }

    pub fn apply(&self, column: &mut Column) {
        if let Some(name) = &self.name {
            column.name = name.clone();
        }
        if let Some(position) = self.position {
            column.position = position;
        }
    }
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.column_id.is_none()
            && self.position.is_none()
    }

    pub fn apply(&self, ticket: &mut Ticket) {
        if let Some(title) = &self.title {
            ticket.title = title.clone();
        }
        if let Some(description) = &self.description {
            ticket.description = description.clone();
        }
        if let Some(column_id) = &self.column_id {
            ticket.column_id = column_id.clone();
        }
        if let Some(position) = self.position {
            ticket.position = position;
        }
    }
}
