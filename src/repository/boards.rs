use super::{new_id, Repository};
use crate::{
    db::{
        models::{timestamp_now, Board, BoardPatch},
        store::Store,
    },
    error::{Entity, Error, Result},
};

impl<S: Store> Repository<S> {
    /// Creates a board. A random id is generated unless one is given.
    pub async fn create_board(&self, name: &str, id: Option<&str>) -> Result<Board> {
        let id = match id {
            Some(id) if !id.is_empty() => id.to_owned(),
            _ => new_id(),
        };
        let board = Board {
            id,
            name: name.to_owned(),
            created_at: timestamp_now(),
        };
        self.store.put_board(&board).await?;
        Ok(board)
    }

    pub async fn get_board(&self, id: &str) -> Result<Option<Board>> {
        self.store.get_board(id).await
    }

    /// All boards, in no particular order.
    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        self.store.scan_boards().await
    }

    pub async fn update_board(&self, id: &str, name: &str) -> Result<Board> {
        let patch = BoardPatch { name: Some(name.to_owned()) };
        self.store
            .update_board_fields(id, &patch)
            .await?
            .ok_or_else(|| Error::not_found(Entity::Board, id))
    }

    /// Deletes the board with all of its columns and their tickets.
    pub async fn delete_board(&self, id: &str) -> Result<()> {
        for column in self.list_columns_by_board(id).await? {
            self.delete_column(&column.id).await?;
        }
        self.store.delete_board(id).await?;
        Ok(())
    }
}
