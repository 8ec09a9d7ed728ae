use futures::future::try_join_all;

use super::{new_id, Repository};
use crate::{
    db::{
        models::{timestamp_now, Ticket, TicketPatch},
        store::Store,
    },
    error::{Entity, Error, Result},
};

impl<S: Store> Repository<S> {
    pub async fn create_ticket(
        &self,
        column_id: &str,
        title: &str,
        description: &str,
        position: i32,
    ) -> Result<Ticket> {
        self.require_column(column_id).await?;
        let ticket = Ticket {
            id: new_id(),
            column_id: column_id.to_owned(),
            title: title.to_owned(),
            description: description.to_owned(),
            position,
            created_at: timestamp_now(),
        };
        self.store.put_ticket(&ticket).await?;
        Ok(ticket)
    }

    pub async fn get_ticket(&self, id: &str) -> Result<Option<Ticket>> {
        self.store.get_ticket(id).await
    }

    /// Changes only the fields present in `patch`. A `column_id` moves the
    /// ticket to that column, which must exist.
    pub async fn update_ticket(&self, id: &str, patch: TicketPatch) -> Result<Ticket> {
        if patch.is_empty() {
            return Err(Error::InvalidUpdate(
                "ticket update needs at least one field".to_owned(),
            ));
        }
        if let Some(column_id) = &patch.column_id {
            self.require_column(column_id).await?;
        }
        self.store
            .update_ticket_fields(id, &patch)
            .await?
            .ok_or_else(|| Error::not_found(Entity::Ticket, id))
    }

    pub async fn delete_ticket(&self, id: &str) -> Result<()> {
        self.store.delete_ticket(id).await?;
        Ok(())
    }

    /// Tickets of a column, lowest position first.
    pub async fn list_tickets_by_column(&self, column_id: &str) -> Result<Vec<Ticket>> {
        let mut tickets = self.store.query_tickets_by_column(column_id).await?;
        tickets.sort_by_key(|ticket| ticket.position);
        Ok(tickets)
    }

    /// Every ticket on a board, grouped by column in column order. Positions
    /// are only ordered within each column's run.
    pub async fn list_all_tickets_by_board(&self, board_id: &str) -> Result<Vec<Ticket>> {
        let columns = self.list_columns_by_board(board_id).await?;
        let per_column = try_join_all(
            columns
                .iter()
                .map(|column| self.list_tickets_by_column(&column.id)),
        )
        .await?;
        Ok(per_column.into_iter().flatten().collect())
    }

    async fn require_column(&self, column_id: &str) -> Result<()> {
        match self.store.get_column(column_id).await? {
            Some(_) => Ok(()),
            None => Err(Error::not_found(Entity::Column, column_id)),
        }
    }
}
