table! {
    boards (id) {
        id -> Varchar,
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

table! {
    columns (id) {
        id -> Varchar,
        board_id -> Varchar,
        name -> Varchar,
        position -> Int4,
        created_at -> Timestamptz,
    }
}

table! {
    tickets (id) {
        id -> Varchar,
        column_id -> Varchar,
        title -> Varchar,
        description -> Text,
        position -> Int4,
        created_at -> Timestamptz,
    }
}

allow_tables_to_appear_in_same_query!(
    boards,
    columns,
    tickets,
);

/// DDL run by `create_tables`. Every statement tolerates an existing object.
pub const CREATE_TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS boards (
        id VARCHAR PRIMARY KEY,
        name VARCHAR NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS columns (
        id VARCHAR PRIMARY KEY,
        board_id VARCHAR NOT NULL,
        name VARCHAR NOT NULL,
        position INTEGER NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS columns_board_id_idx ON columns (board_id)",
    "CREATE TABLE IF NOT EXISTS tickets (
        id VARCHAR PRIMARY KEY,
        column_id VARCHAR NOT NULL,
        title VARCHAR NOT NULL,
        description TEXT NOT NULL,
        position INTEGER NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS tickets_column_id_idx ON tickets (column_id)",
];
