use kanban_store::{
    config::Settings,
    db::connection::establish_connection,
    seed_default_board,
    PgStore,
    Repository,
    Store,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let pool = establish_connection(&settings)?;
    let store = PgStore::new(pool);

    store.create_tables().await?;
    if settings.seed {
        seed_default_board(&store).await?;
    } else {
        tracing::info!("seeding disabled");
    }

    let repository = Repository::new(store);
    let boards = repository.list_boards().await?;
    for board in &boards {
        let columns = repository.list_columns_by_board(&board.id).await?;
        let tickets = repository.list_all_tickets_by_board(&board.id).await?;
        tracing::info!(
            board = %board.id,
            name = %board.name,
            columns = columns.len(),
            tickets = tickets.len(),
            "board ready"
        );
    }
    tracing::info!(boards = boards.len(), "store ready");

    Ok(())
}
