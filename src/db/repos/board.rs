use crate::db;
use db::models::{Board, BoardPatch, NewBoard};
use db::schema::boards;

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

/// Row-level access to the `boards` table.
pub trait BoardRecords: Sized {
    fn find(board_id: &str, db_connection: &PgConnection) -> QueryResult<Option<Self>>;
    fn scan(db_connection: &PgConnection) -> QueryResult<Vec<Self>>;
    fn any(db_connection: &PgConnection) -> QueryResult<bool>;
    fn put(&self, db_connection: &PgConnection) -> QueryResult<()>;
    fn update(
        board_id: &str,
        change_set: &BoardPatch,
        db_connection: &PgConnection
    ) -> QueryResult<Option<Self>>;
    fn delete(board_id: &str, db_connection: &PgConnection) -> QueryResult<bool>;
}

impl BoardRecords for Board {
    fn find(board_id: &str, db_connection: &PgConnection) -> QueryResult<Option<Board>> {
        boards::table
            .find(board_id)
            .first::<Board>(db_connection)
            .optional()
    }

    fn scan(db_connection: &PgConnection) -> QueryResult<Vec<Board>> {
        boards::table.load::<Board>(db_connection)
    }

    fn any(db_connection: &PgConnection) -> QueryResult<bool> {
        let ids: Vec<String> = boards::table
            .select(boards::id)
            .limit(1)
            .load(db_connection)?;
        Ok(!ids.is_empty())
    }

    fn put(&self, db_connection: &PgConnection) -> QueryResult<()> {
        insert_into(boards::table)
            .values(NewBoard::from(self))
            .on_conflict(boards::id)
            .do_update()
            .set((
                boards::name.eq(excluded(boards::name)),
                boards::created_at.eq(excluded(boards::created_at)),
            ))
            .execute(db_connection)?;
        Ok(())
    }

    fn update(
        board_id: &str,
        change_set: &BoardPatch,
        db_connection: &PgConnection
    ) -> QueryResult<Option<Board>> {
        update(boards::table.find(board_id))
            .set(change_set)
            .get_result::<Board>(db_connection)
            .optional()
    }

    fn delete(board_id: &str, db_connection: &PgConnection) -> QueryResult<bool> {
        let deleted = delete(boards::table.find(board_id))
            .execute(db_connection)?;
        Ok(deleted > 0)
    }
}
