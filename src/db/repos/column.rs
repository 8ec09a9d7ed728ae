use crate::db;
use db::models::{Column, ColumnPatch, NewColumn};
use db::schema::columns;

use diesel::{
    pg::upsert::excluded,
    PgConnection,
    RunQueryDsl,
    QueryDsl,
    QueryResult,
    OptionalExtension,
    ExpressionMethods,
    insert_into,
    update,
    delete
};

/// Row-level access to the `columns` table and its `board_id` index.
pub trait ColumnRecords: Sized {
    fn find(column_id: &str, db_connection: &PgConnection) -> QueryResult<Option<Self>>;
    fn by_board(board_id: &str, db_connection: &PgConnection) -> QueryResult<Vec<Self>>;
    fn put(&self, db_connection: &PgConnection) -> QueryResult<()>;
    fn update(
        column_id: &str,
        change_set: &ColumnPatch,
        db_connection: &PgConnection
    ) -> QueryResult<Option<Self>>;
    fn delete(column_id: &str, db_connection: &PgConnection) -> QueryResult<bool>;
}

impl ColumnRecords for Column {
    fn find(column_id: &str, db_connection: &PgConnection) -> QueryResult<Option<Column>> {
        columns::table
            .find(column_id)
            .first::<Column>(db_connection)
            .optional()
    }

    fn by_board(board_id: &str, db_connection: &PgConnection) -> QueryResult<Vec<Column>> {
        columns::table
            .filter(columns::board_id.eq(board_id))
            .load::<Column>(db_connection)
    }

    fn put(&self, db_connection: &PgConnection) -> QueryResult<()> {
        insert_into(columns::table)
            .values(NewColumn::from(self))
            .on_conflict(columns::id)
            .do_update()
            .set((
                columns::board_id.eq(excluded(columns::board_id)),
                columns::name.eq(excluded(columns::name)),
                columns::position.eq(excluded(columns::position)),
                columns::created_at.eq(excluded(columns::created_at)),
            ))
            .execute(db_connection)?;
        Ok(())
    }

    fn update(
        column_id: &str,
        change_set: &ColumnPatch,
        db_connection: &PgConnection
    ) -> QueryResult<Option<Column>> {
        update(columns::table.find(column_id))
            .set(change_set)
            .get_result::<Column>(db_connection)
            .optional()
    }

    fn delete(column_id: &str, db_connection: &PgConnection) -> QueryResult<bool> {
        let deleted = delete(columns::table.find(column_id))
            .execute(db_connection)?;
        Ok(deleted > 0)
    }
}
