//! Round trip against a live PostgreSQL. Needs `DATABASE_URL`:
//!
//! ```sh
//! DATABASE_URL=postgres://localhost/kanban_test cargo test --test pg_store -- --ignored
//! ```

use kanban_store::{
    config::Settings, db::connection::establish_connection, BoardPatch, ColumnPatch, PgStore,
    Repository, Store, TicketPatch,
};

fn repository() -> Repository<PgStore> {
    let settings = Settings::from_env().expect("DATABASE_URL must be set for pg tests");
    let pool = establish_connection(&settings).expect("pool");
    Repository::new(PgStore::new(pool))
}

#[tokio::test(flavor = "multi_thread")]
#[ignore]
async fn crud_and_cascade() {
    let repo = repository();
    repo.store().create_tables().await.unwrap();
    repo.store().create_tables().await.unwrap();

    let board = repo.create_board("pg board", None).await.unwrap();
    assert_eq!(repo.get_board(&board.id).await.unwrap(), Some(board.clone()));

    let todo = repo.create_column(&board.id, "Todo", 1).await.unwrap();
    let done = repo.create_column(&board.id, "Done", 0).await.unwrap();
    assert_eq!(repo.get_column(&todo.id).await.unwrap(), Some(todo.clone()));

    let second = repo.create_ticket(&todo.id, "second", "", 1).await.unwrap();
    let first = repo.create_ticket(&todo.id, "first", "", 0).await.unwrap();
    assert_eq!(repo.get_ticket(&first.id).await.unwrap(), Some(first.clone()));

    let columns = repo.list_columns_by_board(&board.id).await.unwrap();
    let column_ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(column_ids, vec![done.id.as_str(), todo.id.as_str()]);
    let tickets = repo.list_tickets_by_column(&todo.id).await.unwrap();
    let ticket_ids: Vec<&str> = tickets.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ticket_ids, vec![first.id.as_str(), second.id.as_str()]);

    let renamed = repo
        .update_column(
            &todo.id,
            ColumnPatch { name: Some("Doing".to_owned()), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(renamed.position, 1);

    let moved = repo
        .update_ticket(
            &first.id,
            TicketPatch { column_id: Some(done.id.clone()), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(moved.column_id, done.id);
    assert_eq!(repo.list_tickets_by_column(&done.id).await.unwrap().len(), 1);

    repo.delete_board(&board.id).await.unwrap();
    assert!(repo.get_board(&board.id).await.unwrap().is_none());
    assert!(repo.list_columns_by_board(&board.id).await.unwrap().is_empty());
    assert!(repo.get_ticket(&second.id).await.unwrap().is_none());
    assert!(repo.get_ticket(&first.id).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
#[ignore]
async fn empty_patch_reads_back_the_record() {
    let repo = repository();
    repo.store().create_tables().await.unwrap();
    let store = repo.store();

    let board = repo.create_board("untouched", None).await.unwrap();
    let column = repo.create_column(&board.id, "Todo", 0).await.unwrap();
    let ticket = repo.create_ticket(&column.id, "t", "d", 0).await.unwrap();

    let same = store.update_board_fields(&board.id, &BoardPatch::default()).await.unwrap();
    assert_eq!(same, Some(board.clone()));
    let same = store.update_column_fields(&column.id, &ColumnPatch::default()).await.unwrap();
    assert_eq!(same, Some(column));
    let same = store.update_ticket_fields(&ticket.id, &TicketPatch::default()).await.unwrap();
    assert_eq!(same, Some(ticket));
    let missing = store.update_board_fields("ghost", &BoardPatch::default()).await.unwrap();
    assert!(missing.is_none());

    repo.delete_board(&board.id).await.unwrap();
}
