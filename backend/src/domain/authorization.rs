//! Caller-versus-owner access decisions.
//!
//! The gate compares the caller with the owner derived by
//! [`OwnershipResolver`]. Every denial emits exactly one access-denied audit
//! event before the error is returned. Grants are audited only on
//! audit-sensitive reads; write paths audit the completed mutation instead.
//!
//! Unauthenticated public reads never pass through the gate.

use tracing::warn;

use super::{
    EntityId, EntityKind, Error, OwnershipResolver, ResolvedOwner, ResourceRef, Sinks, UserId,
};

/// Whether a granted decision should be audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Audit-sensitive read; grants are recorded.
    Read,
    /// Mutation; the caller audits the completed write.
    Write,
}

#[derive(Clone)]
pub struct AuthorizationGate {
    resolver: OwnershipResolver,
    sinks: Sinks,
}

impl AuthorizationGate {
    pub fn new(resolver: OwnershipResolver, sinks: Sinks) -> Self {
        Self { resolver, sinks }
    }

    /// Authorize a write against `resource`.
    pub async fn authorize(
        &self,
        caller: UserId,
        resource: impl Into<ResourceRef>,
    ) -> Result<ResolvedOwner, Error> {
        self.check(caller, resource.into(), Access::Write).await
    }

    /// Authorize an audit-sensitive read of `resource`.
    pub async fn authorize_read(
        &self,
        caller: UserId,
        resource: impl Into<ResourceRef>,
    ) -> Result<ResolvedOwner, Error> {
        self.check(caller, resource.into(), Access::Read).await
    }

    /// Users may only read or edit their own record.
    pub async fn authorize_self(
        &self,
        caller: UserId,
        subject: UserId,
        access: Access,
    ) -> Result<(), Error> {
        caller.ensure_set()?;
        subject.ensure_set()?;
        let allowed = caller == subject;
        if !allowed || access == Access::Read {
            self.sinks
                .access(EntityKind::User, subject.get(), caller, allowed)
                .await;
        }
        if !allowed {
            return Err(Error::unauthorized(format!(
                "user {caller} may not access user {subject}"
            )));
        }
        Ok(())
    }

    async fn check(
        &self,
        caller: UserId,
        resource: ResourceRef,
        access: Access,
    ) -> Result<ResolvedOwner, Error> {
        caller.ensure_set()?;
        let resolved = self.resolver.resolve(resource).await?;
        report_drift(resource, &resolved);

        let allowed = resolved.owner == caller;
        if !allowed || access == Access::Read {
            self.sinks
                .access(resource.kind(), resource.raw_id(), caller, allowed)
                .await;
        }
        if !allowed {
            return Err(Error::unauthorized(format!(
                "{resource} is not owned by user {caller}"
            )));
        }
        Ok(resolved)
    }
}

fn report_drift(resource: ResourceRef, resolved: &ResolvedOwner) {
    for drift in &resolved.drift {
        warn!(
            requested = %resource,
            resource = %drift.resource,
            recorded_owner = %drift.recorded_owner,
            owner = %resolved.owner,
            portfolio = %resolved.portfolio,
            "denormalised owner differs from portfolio owner",
        );
    }
}

#[cfg(test)]
mod tests;
