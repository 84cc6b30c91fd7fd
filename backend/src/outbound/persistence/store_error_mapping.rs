//! Diesel and pool error mapping shared by every resource repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::ResourceStoreError;

use super::pool::PoolError;

/// Map pool errors into connection failures.
pub(super) fn map_pool_error(error: PoolError) -> ResourceStoreError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    ResourceStoreError::connection(message)
}

/// Map a Diesel failure onto the store error taxonomy.
///
/// Unique violations only ever come from the case-insensitive title indexes,
/// so they surface as [`ResourceStoreError::DuplicateTitle`].
pub(super) fn map_diesel_error(error: DieselError) -> ResourceStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ResourceStoreError::missing("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            ResourceStoreError::duplicate_title(
                info.constraint_name().unwrap_or("title index").to_owned(),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            ResourceStoreError::missing("parent record not found")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ResourceStoreError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => ResourceStoreError::query("database query error"),
        _ => ResourceStoreError::query("database error"),
    }
}

/// Lets transaction bodies return store errors while Diesel reports its own
/// commit and rollback failures through `?`.
impl From<DieselError> for ResourceStoreError {
    fn from(error: DieselError) -> Self {
        map_diesel_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct Info(&'static str, Option<&'static str>);

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.1
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info("boom", constraint)))
    }

    #[rstest]
    fn unique_violations_become_duplicate_titles() {
        let mapped = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("categories_portfolio_title_key"),
        ));

        assert_eq!(
            mapped,
            ResourceStoreError::duplicate_title("categories_portfolio_title_key")
        );
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(
        database_error(DatabaseErrorKind::ForeignKeyViolation, None),
        "parent record not found"
    )]
    fn absent_rows_become_missing(#[case] error: DieselError, #[case] message: &str) {
        assert_eq!(map_diesel_error(error), ResourceStoreError::missing(message));
    }

    #[rstest]
    fn closed_connections_map_to_connection_errors() {
        let mapped = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection, None));

        assert!(matches!(mapped, ResourceStoreError::Connection { .. }));
    }

    #[rstest]
    fn other_database_errors_are_query_errors() {
        let mapped = map_diesel_error(database_error(DatabaseErrorKind::CheckViolation, None));

        assert_eq!(mapped, ResourceStoreError::query("database error"));
    }

    #[rstest]
    #[case(PoolError::checkout("timed out"))]
    #[case(PoolError::build("bad url"))]
    fn pool_errors_are_connection_errors(#[case] error: PoolError) {
        assert!(matches!(
            map_pool_error(error),
            ResourceStoreError::Connection { .. }
        ));
    }
}
