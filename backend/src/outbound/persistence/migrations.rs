//! Embedded schema migrations.
//!
//! Migrations are compiled in from `backend/migrations` so the `folio-migrate`
//! binary needs no files at runtime. They run over a blocking `PgConnection`;
//! callers on an async runtime should use `tokio::task::spawn_blocking`.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Every migration shipped with this crate.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// Could not open a connection to the target database.
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },

    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply every pending migration and return the applied versions.
///
/// # Errors
///
/// Returns [`MigrationError::Connect`] when the database is unreachable and
/// [`MigrationError::Apply`] when a migration fails.
pub fn run_pending_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut connection =
        PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
            message: err.to_string(),
        })?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();

    info!(count = applied.len(), "applied pending migrations");
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::migration::MigrationSource;
    use rstest::rstest;

    #[rstest]
    fn schema_migration_is_embedded() {
        let migrations: Vec<_> =
            MigrationSource::<diesel::pg::Pg>::migrations(&MIGRATIONS).expect("embedded");

        assert!(
            migrations
                .iter()
                .any(|migration| migration.name().to_string().contains("create_folio_schema"))
        );
    }

    #[rstest]
    fn unreachable_databases_report_connect_errors() {
        let err = run_pending_migrations("postgres://folio@127.0.0.1:1/folio")
            .expect_err("nothing listens on port 1");

        assert!(matches!(err, MigrationError::Connect { .. }));
    }
}
