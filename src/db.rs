//! Database bootstrap: connect and create the `persons` table if missing.

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use tracing::info;

use crate::person;

/// # Errors
///
/// Returns the driver error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    info!(backend = ?db.get_database_backend(), "Connected to database");
    Ok(db)
}

/// Creates the `persons` table from the entity definition. Existing tables are
/// left untouched.
///
/// # Errors
///
/// Returns the driver error if the statement fails.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let statement = Schema::new(backend)
        .create_table_from_entity(person::Entity)
        .if_not_exists()
        .to_owned();

    db.execute(backend.build(&statement)).await?;
    Ok(())
}
