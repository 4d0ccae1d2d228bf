use dotenvy::dotenv;
use service_booking::{
    admin::{self, AdminCommand},
    config::{
        Settings,
        catalog::load_catalog_or_builtin,
        database::{create_connection, create_tables},
    },
    core::{
        persistence::{DatabaseSnapshotStore, StatePersistence},
        submission::SimulatedGateway,
        wizard::BookingWizard,
    },
    errors::Result,
};
use std::env;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file, non-fatal since vars can be set externally
    dotenv().ok();

    // 3. Settings and catalog
    let settings = Settings::from_env()?;
    debug!(?settings, "Loaded settings");
    let catalog = load_catalog_or_builtin(&settings.catalog_path)
        .inspect_err(|e| error!("Failed to load catalog: {}", e))?;

    // 4. Parse the command before touching the database
    let command = AdminCommand::parse(env::args().skip(1))?;

    // 5. Database and persisted wizard state
    let db = create_connection(&settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    create_tables(&db).await?;
    info!("Database initialized successfully.");

    let persistence = StatePersistence::new(DatabaseSnapshotStore::new(db));
    let mut wizard = BookingWizard::load(persistence).await;

    // 6. Run the command
    let gateway = SimulatedGateway::new(settings.submission_delay);
    let today = chrono::Utc::now().date_naive();
    let output = admin::run(command, &mut wizard, &catalog, &gateway, today).await?;
    print!("{output}");

    Ok(())
}
