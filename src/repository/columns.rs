use super::{new_id, Repository};
use crate::{
    db::{
        models::{timestamp_now, Column, ColumnPatch},
        store::Store,
    },
    error::{Entity, Error, Result},
};

impl<S: Store> Repository<S> {
    pub async fn create_column(&self, board_id: &str, name: &str, position: i32) -> Result<Column> {
        if self.store.get_board(board_id).await?.is_none() {
            return Err(Error::not_found(Entity::Board, board_id));
        }
        let column = Column {
            id: new_id(),
            board_id: board_id.to_owned(),
            name: name.to_owned(),
            position,
            created_at: timestamp_now(),
        };
        self.store.put_column(&column).await?;
        Ok(column)
    }

    pub async fn get_column(&self, id: &str) -> Result<Option<Column>> {
        self.store.get_column(id).await
    }

    /// Changes only the fields present in `patch`.
    pub async fn update_column(&self, id: &str, patch: ColumnPatch) -> Result<Column> {
        if patch.is_empty() {
            return Err(Error::InvalidUpdate(
                "column update needs a name or a position".to_owned(),
            ));
        }
        self.store
            .update_column_fields(id, &patch)
            .await?
            .ok_or_else(|| Error::not_found(Entity::Column, id))
    }

    /// Deletes the column and every ticket in it.
    pub async fn delete_column(&self, id: &str) -> Result<()> {
        for ticket in self.list_tickets_by_column(id).await? {
            self.store.delete_ticket(&ticket.id).await?;
        }
        self.store.delete_column(id).await?;
        Ok(())
    }

    /// Columns of a board, lowest position first.
    pub async fn list_columns_by_board(&self, board_id: &str) -> Result<Vec<Column>> {
        let mut columns = self.store.query_columns_by_board(board_id).await?;
        columns.sort_by_key(|column| column.position);
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::models::ColumnPatch;
    use crate::error::{Entity, Error};
    use crate::repository::test_support::repository;

    #[tokio::test]
    async fn listed_by_position() {
        let repo = repository();
        let board = repo.create_board("B", None).await.unwrap();
        for (name, position) in [("c", 2), ("a", 0), ("d", 3), ("b", 1)] {
            repo.create_column(&board.id, name, position).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_columns_by_board(&board.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn create_needs_existing_board() {
        let repo = repository();
        let err = repo.create_column("ghost", "Todo", 0).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: Entity::Board, .. }));
        assert_eq!(repo.store().column_count(), 0);
    }

    #[tokio::test]
    async fn partial_updates() {
        let repo = repository();
        let board = repo.create_board("B", None).await.unwrap();
        let column = repo.create_column(&board.id, "Todo", 0).await.unwrap();

        let moved = repo
            .update_column(&column.id, ColumnPatch { position: Some(5), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(moved.name, "Todo");
        assert_eq!(moved.position, 5);

        let renamed = repo
            .update_column(
                &column.id,
                ColumnPatch { name: Some("Doing".to_owned()), ..Default::default() },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Doing");
        assert_eq!(renamed.position, 5);
        assert_eq!(renamed.board_id, board.id);
    }

    #[tokio::test]
    async fn empty_update_is_rejected() {
        let repo = repository();
        let board = repo.create_board("B", None).await.unwrap();
        let column = repo.create_column(&board.id, "Todo", 0).await.unwrap();

        let err = repo.update_column(&column.id, ColumnPatch::default()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidUpdate(_)));

        let err = repo
            .update_column("ghost", ColumnPatch { position: Some(1), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: Entity::Column, .. }));
    }

    #[tokio::test]
    async fn delete_takes_tickets_along() {
        let repo = repository();
        let board = repo.create_board("B", None).await.unwrap();
        let doomed = repo.create_column(&board.id, "Doomed", 0).await.unwrap();
        let kept = repo.create_column(&board.id, "Kept", 1).await.unwrap();
        repo.create_ticket(&doomed.id, "a", "", 0).await.unwrap();
        repo.create_ticket(&doomed.id, "b", "", 1).await.unwrap();
        repo.create_ticket(&kept.id, "c", "", 0).await.unwrap();

        repo.delete_column(&doomed.id).await.unwrap();
        repo.delete_column(&doomed.id).await.unwrap();

        assert!(repo.get_column(&doomed.id).await.unwrap().is_none());
        assert!(repo.list_tickets_by_column(&doomed.id).await.unwrap().is_empty());
        assert_eq!(repo.list_tickets_by_column(&kept.id).await.unwrap().len(), 1);
        assert_eq!(repo.list_columns_by_board(&board.id).await.unwrap(), vec![kept]);
    }
}
