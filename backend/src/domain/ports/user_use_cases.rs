//! Driving ports for user identity use cases.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Identity asserted by the external provider after authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    pub external_id: String,
    pub email: String,
    pub name: String,
}

/// Input for [`UserCommand::update_profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    pub caller: UserId,
    pub id: UserId,
    pub email: String,
    pub name: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Create the user on first sign-in, otherwise refresh email and name.
    async fn sync_identity(&self, identity: ExternalIdentity) -> Result<User, Error>;

    async fn update_profile(&self, request: UpdateProfileRequest) -> Result<User, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Self-only read.
    async fn get(&self, id: UserId, caller: UserId) -> Result<User, Error>;
}
