//! Bundle of every repository port the core reads and writes.

use std::sync::Arc;

use super::{
    CategoryRepository, PortfolioRepository, ProjectRepository, SectionContentRepository,
    SectionRepository, UserRepository,
};

/// Shared handles to the six repository ports.
#[derive(Clone)]
pub struct ResourceStores {
    pub users: Arc<dyn UserRepository>,
    pub portfolios: Arc<dyn PortfolioRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub sections: Arc<dyn SectionRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub section_contents: Arc<dyn SectionContentRepository>,
}

impl ResourceStores {
    /// Serve every port from one adapter.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: UserRepository
            + PortfolioRepository
            + CategoryRepository
            + SectionRepository
            + ProjectRepository
            + SectionContentRepository
            + 'static,
    {
        Self {
            users: store.clone(),
            portfolios: store.clone(),
            categories: store.clone(),
            sections: store.clone(),
            projects: store.clone(),
            section_contents: store,
        }
    }
}
