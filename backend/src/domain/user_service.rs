//! User identity use cases.
//!
//! A user record is created the first time an external identity signs in and
//! refreshed from the provider's claims on later sign-ins.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    ExternalIdentity, Mutation, UpdateProfileRequest, UserCommand, UserQuery,
};
use crate::domain::resource_core::not_found;
use crate::domain::sinks::snapshot;
use crate::domain::store_errors::store_failure;
use crate::domain::validation::{normalise_email, require_text};
use crate::domain::{Access, EntityKind, Error, NewUser, ResourceCore, User, UserId};

const ENTITY: EntityKind = EntityKind::User;

/// User service implementing the driving ports.
#[derive(Clone)]
pub struct UserService {
    core: Arc<ResourceCore>,
}

impl UserService {
    pub fn new(core: Arc<ResourceCore>) -> Self {
        Self { core }
    }

    async fn load(&self, id: UserId) -> Result<User, Error> {
        self.core
            .stores
            .users
            .find_by_id(id)
            .await
            .map_err(store_failure(ENTITY, "get"))?
            .ok_or_else(|| not_found(id))
    }

    async fn write_profile(&self, user: User, actor: UserId) -> Result<User, Error> {
        let updated = self
            .core
            .stores
            .users
            .update(&user)
            .await
            .map_err(store_failure(ENTITY, "update"))?;
        self.core
            .finish_mutation(
                ENTITY,
                updated.id.get(),
                actor,
                Mutation::Updated,
                snapshot(ENTITY, &updated),
            )
            .await;
        Ok(updated)
    }
}

#[async_trait]
impl UserCommand for UserService {
    async fn sync_identity(&self, identity: ExternalIdentity) -> Result<User, Error> {
        let external_id = require_text("external id", &identity.external_id)?;
        let email = normalise_email(&identity.email)?;
        let name = require_text("name", &identity.name)?;

        let existing = self
            .core
            .stores
            .users
            .find_by_external_id(&external_id)
            .await
            .map_err(store_failure(ENTITY, "look up"))?;

        match existing {
            Some(user) if user.email == email && user.name == name => Ok(user),
            Some(user) => {
                let actor = user.id;
                let refreshed = User {
                    email,
                    name,
                    updated_at: self.core.sinks.now(),
                    ..user
                };
                self.write_profile(refreshed, actor).await
            }
            None => {
                let created = self
                    .core
                    .stores
                    .users
                    .create(&NewUser {
                        external_id,
                        email,
                        name,
                        created_at: self.core.sinks.now(),
                    })
                    .await
                    .map_err(store_failure(ENTITY, "create"))?;
                info!(user_id = %created.id, "user created from external identity");
                self.core
                    .finish_mutation(
                        ENTITY,
                        created.id.get(),
                        created.id,
                        Mutation::Created,
                        snapshot(ENTITY, &created),
                    )
                    .await;
                Ok(created)
            }
        }
    }

    async fn update_profile(&self, request: UpdateProfileRequest) -> Result<User, Error> {
        let email = normalise_email(&request.email)?;
        let name = require_text("name", &request.name)?;
        self.core
            .gate
            .authorize_self(request.caller, request.id, Access::Write)
            .await?;

        let current = self.load(request.id).await?;
        self.write_profile(
            User {
                email,
                name,
                updated_at: self.core.sinks.now(),
                ..current
            },
            request.caller,
        )
        .await
    }
}

#[async_trait]
impl UserQuery for UserService {
    async fn get(&self, id: UserId, caller: UserId) -> Result<User, Error> {
        self.core
            .gate
            .authorize_self(caller, id, Access::Read)
            .await?;
        self.load(id).await
    }
}
