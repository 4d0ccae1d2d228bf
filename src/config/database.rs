//! Database connection and schema setup.
//!
//! The wizard only needs one table: `state_snapshots`, a key-value store for
//! serialized state. It is created from the entity definition with SeaORM's
//! `Schema::create_table_from_entity`, so the SQL always matches the Rust model.

use crate::entities::StateSnapshot;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

/// Connects to the database at `database_url`.
///
/// For a file-backed `SQLite` URL the parent directory is created first so
/// that `?mode=rwc` can create the file itself.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(dir) = sqlite_parent_dir(database_url) {
        tokio::fs::create_dir_all(dir).await?;
    }

    debug!("Connecting to database at {database_url}");
    let db = Database::connect(database_url).await?;
    info!("Database connection established");
    Ok(db)
}

/// Creates all tables that do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut snapshot_table = schema.create_table_from_entity(StateSnapshot);
    snapshot_table.if_not_exists();

    db.execute(builder.build(&snapshot_table)).await?;
    Ok(())
}

fn sqlite_parent_dir(database_url: &str) -> Option<&str> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    let (dir, _file) = path.rsplit_once('/')?;
    (!dir.is_empty()).then_some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::state_snapshot::Model as StateSnapshotModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<StateSnapshotModel> = StateSnapshot::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir("sqlite://data/service_booking.sqlite?mode=rwc"),
            Some("data")
        );
        assert_eq!(sqlite_parent_dir("sqlite://booking.sqlite"), None);
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_parent_dir("postgres://localhost/booking"), None);
    }
}
