//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.
//!
//! Each repository implements one domain port and holds a clone of the shared
//! [`DbPool`]. Row structs never leave this module; conversions into domain
//! entities are checked and fail as query errors.
//!
//! Cascading deletes and the case-insensitive title indexes are enforced by
//! the schema in `backend/migrations`.

mod diesel_category_repository;
mod diesel_portfolio_repository;
mod diesel_project_repository;
mod diesel_section_content_repository;
mod diesel_section_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;
mod store_error_mapping;

use std::sync::Arc;

use crate::domain::ports::ResourceStores;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_portfolio_repository::DieselPortfolioRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_section_content_repository::DieselSectionContentRepository;
pub use diesel_section_repository::DieselSectionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

/// Bundle Diesel repositories sharing one pool.
pub fn diesel_stores(pool: &DbPool) -> ResourceStores {
    ResourceStores {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        portfolios: Arc::new(DieselPortfolioRepository::new(pool.clone())),
        categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
        sections: Arc::new(DieselSectionRepository::new(pool.clone())),
        projects: Arc::new(DieselProjectRepository::new(pool.clone())),
        section_contents: Arc::new(DieselSectionContentRepository::new(pool.clone())),
    }
}
