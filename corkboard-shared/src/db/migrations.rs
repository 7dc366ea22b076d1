/// Schema migrations
///
/// The workspace `migrations/` directory holds ordered
/// `.up.sql`/`.down.sql` pairs: each up file creates tables before
/// adding constraints, each down file drops constraints before tables in
/// reverse dependency order. The whole set is embedded at compile time,
/// so the binary never depends on the directory being present at
/// runtime.
///
/// # Example
///
/// ```no_run
/// use corkboard_shared::db::migrations::{apply_migrations, create_database_if_missing};
/// use corkboard_shared::db::pool::{connect, PoolSettings};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let url = std::env::var("DATABASE_URL")?;
///     create_database_if_missing(&url).await?;
///
///     let pool = connect(PoolSettings { url, max_connections: 10 }).await?;
///     let version = apply_migrations(&pool).await?;
///     println!("schema at version {:?}", version);
///     Ok(())
/// }
/// ```
use sqlx::migrate::{MigrateDatabase, MigrateError, Migrator};
use sqlx::{PgPool, Postgres};
use tracing::info;

/// The embedded migration set
static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Creates the target database when it does not exist yet
///
/// A development convenience so a fresh checkout runs against a bare
/// PostgreSQL server; production databases should already exist.
///
/// # Errors
///
/// Returns an error when the server is unreachable or creation is denied
pub async fn create_database_if_missing(url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(url).await? {
        return Ok(());
    }

    info!("Database does not exist, creating it");
    Postgres::create_database(url).await?;
    info!("Database created");
    Ok(())
}

/// Applies pending migrations from the embedded set
///
/// Safe to call on every startup: already-applied migrations are
/// skipped.
///
/// # Returns
///
/// The version of the newest known migration once the schema is current
///
/// # Errors
///
/// Returns an error when a migration fails to execute; the failing
/// migration is rolled back
pub async fn apply_migrations(pool: &PgPool) -> Result<Option<i64>, MigrateError> {
    let known = MIGRATOR
        .iter()
        .filter(|m| m.migration_type.is_up_migration())
        .count();
    info!(known_migrations = known, "Applying schema migrations");

    MIGRATOR.run(pool).await?;

    let latest = MIGRATOR.iter().map(|m| m.version).max();
    info!(schema_version = ?latest, "Schema is current");
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn up_versions() -> Vec<i64> {
        MIGRATOR
            .iter()
            .filter(|m| m.migration_type.is_up_migration())
            .map(|m| m.version)
            .collect()
    }

    #[test]
    fn test_embedded_set_has_schema_and_auth_token_migrations() {
        assert_eq!(up_versions(), vec![20260112154329, 20260121080000]);
    }

    #[test]
    fn test_migrations_are_strictly_ordered() {
        let versions = up_versions();
        assert!(versions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_every_migration_is_reversible() {
        let ups = up_versions().len();
        let downs = MIGRATOR
            .iter()
            .filter(|m| !m.migration_type.is_up_migration())
            .count();
        assert_eq!(ups, downs);
    }
}
