//! Domain primitives, core services and use cases.
//!
//! Purpose: own every rule about who may touch which resource, how siblings
//! are ordered, and which titles collide. Storage, audit and metrics are
//! reached only through [`ports`].
//!
//! Public surface:
//! - Identifiers ([`UserId`], [`PortfolioId`], ...) and entities.
//! - [`Error`] / [`ErrorCode`], the transport-agnostic error taxonomy.
//! - [`OwnershipResolver`], [`AuthorizationGate`], [`DuplicateGuard`] and
//!   [`PositionManager`], composed by [`ResourceCore`].
//! - One service per entity implementing the driving ports.

pub mod authorization;
pub mod category;
pub mod category_service;
pub mod duplicate_guard;
pub mod error;
pub mod ids;
pub mod ownership;
pub mod portfolio;
pub mod portfolio_service;
pub mod ports;
pub mod positions;
pub mod project;
pub mod project_service;
pub mod resource;
pub mod resource_core;
pub mod section;
pub mod section_content;
pub mod section_content_service;
pub mod section_service;
pub mod sinks;
pub mod store_errors;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use self::authorization::{Access, AuthorizationGate};
pub use self::category::{Category, NewCategory};
pub use self::category_service::CategoryService;
pub use self::duplicate_guard::{DuplicateGuard, TitleScope};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{
    CategoryId, EntityId, PortfolioId, ProjectId, SectionContentId, SectionId, UserId,
};
pub use self::ownership::{OwnerDrift, OwnershipResolver, ResolvedOwner};
pub use self::portfolio::{NewPortfolio, Portfolio};
pub use self::portfolio_service::PortfolioService;
pub use self::positions::{PositionManager, PositionUpdate, Positioned, SiblingStore};
pub use self::project::{NewProject, Project, ProjectMetadata};
pub use self::project_service::ProjectService;
pub use self::resource::{EntityKind, ResourceRef};
pub use self::resource_core::ResourceCore;
pub use self::section::{NewSection, Section};
pub use self::section_content::{ContentKind, NewSectionContent, SectionContent};
pub use self::section_content_service::SectionContentService;
pub use self::section_service::SectionService;
pub use self::sinks::Sinks;
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, User};
pub use self::user_service::UserService;
