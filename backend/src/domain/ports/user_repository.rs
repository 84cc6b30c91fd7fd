//! Port abstraction for user persistence.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::ResourceStoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the stored record.
    async fn create(&self, user: &NewUser) -> Result<User, ResourceStoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ResourceStoreError>;

    /// Fetch a user by identity-provider subject.
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, ResourceStoreError>;

    /// Replace the mutable fields of an existing user.
    ///
    /// Fails with [`ResourceStoreError::Missing`] when the row is gone.
    async fn update(&self, user: &User) -> Result<User, ResourceStoreError>;
}
