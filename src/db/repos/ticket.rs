use crate::db;
use db::models::{Ticket, TicketPatch, NewTicket};
use db::schema::tickets;

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

/// Row-level access to the `tickets` table and its `column_id` index.
pub trait TicketRecords: Sized {
    fn find(ticket_id: &str, db_connection: &PgConnection) -> QueryResult<Option<Self>>;
    fn by_column(column_id: &str, db_connection: &PgConnection) -> QueryResult<Vec<Self>>;
    fn put(&self, db_connection: &PgConnection) -> QueryResult<()>;
    fn update(
        ticket_id: &str,
        change_set: &TicketPatch,
        db_connection: &PgConnection
    ) -> QueryResult<Option<Self>>;
    fn delete(ticket_id: &str, db_connection: &PgConnection) -> QueryResult<bool>;
}

impl TicketRecords for Ticket {
    fn find(ticket_id: &str, db_connection: &PgConnection) -> QueryResult<Option<Ticket>> {
        tickets::table
            .find(ticket_id)
            .first::<Ticket>(db_connection)
            .optional()
    }

    fn by_column(column_id: &str, db_connection: &PgConnection) -> QueryResult<Vec<Ticket>> {
        tickets::table
            .filter(tickets::column_id.eq(column_id))
            .load::<Ticket>(db_connection)
    }

    fn put(&self, db_connection: &PgConnection) -> QueryResult<()> {
        insert_into(tickets::table)
            .values(NewTicket::from(self))
            .on_conflict(tickets::id)
            .do_update()
            .set((
                tickets::column_id.eq(excluded(tickets::column_id)),
                tickets::title.eq(excluded(tickets::title)),
                tickets::description.eq(excluded(tickets::description)),
                tickets::position.eq(excluded(tickets::position)),
                tickets::created_at.eq(excluded(tickets::created_at)),
            ))
            .execute(db_connection)?;
        Ok(())
    }

    fn update(
        ticket_id: &str,
        change_set: &TicketPatch,
        db_connection: &PgConnection
    ) -> QueryResult<Option<Ticket>> {
        update(tickets::table.find(ticket_id))
            .set(change_set)
            .get_result::<Ticket>(db_connection)
            .optional()
    }

    fn delete(ticket_id: &str, db_connection: &PgConnection) -> QueryResult<bool> {
        let deleted = delete(tickets::table.find(ticket_id))
            .execute(db_connection)?;
        Ok(deleted > 0)
    }
}
