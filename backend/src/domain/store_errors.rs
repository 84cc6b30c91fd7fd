//! Mapping from repository failures to the domain error taxonomy.

use tracing::debug;

use super::ports::ResourceStoreError;
use super::{EntityKind, Error};

/// Translate a repository failure, prefixing the entity and operation.
///
/// A storage-level title uniqueness violation is the authoritative
/// [`Conflict`](super::ErrorCode::Conflict); a row that vanished mid-call is
/// reported as not found.
pub fn map_store_error(entity: EntityKind, operation: &str, error: ResourceStoreError) -> Error {
    debug!(
        entity = entity.as_str(),
        operation,
        error = %error,
        "resource store call failed",
    );
    let mapped = match error {
        ResourceStoreError::DuplicateTitle { message } => {
            Error::conflict(format!("title already in use: {message}"))
        }
        ResourceStoreError::Missing { message } => {
            Error::not_found(format!("{entity} not found: {message}"))
        }
        ResourceStoreError::Connection { message } => {
            Error::internal(format!("storage unavailable: {message}"))
        }
        ResourceStoreError::Query { message } => {
            Error::internal(format!("storage query failed: {message}"))
        }
    };
    mapped.context(format!("{operation} {entity}"))
}

/// Closure form of [`map_store_error`] for `map_err`.
pub fn store_failure(
    entity: EntityKind,
    operation: &'static str,
) -> impl FnOnce(ResourceStoreError) -> Error {
    move |error| map_store_error(entity, operation, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(ResourceStoreError::duplicate_title("sections_portfolio_title"), ErrorCode::Conflict)]
    #[case(ResourceStoreError::missing("section 4"), ErrorCode::NotFound)]
    #[case(ResourceStoreError::connection("pool timed out"), ErrorCode::Internal)]
    #[case(ResourceStoreError::query("syntax"), ErrorCode::Internal)]
    fn maps_each_variant(#[case] error: ResourceStoreError, #[case] expected: ErrorCode) {
        let mapped = map_store_error(EntityKind::Section, "update", error);
        assert_eq!(mapped.code(), expected);
        assert!(mapped.message().starts_with("update section: "));
    }
}
