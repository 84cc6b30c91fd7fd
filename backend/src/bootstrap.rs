//! Composition root wiring the core services to their adapters.
//!
//! Inbound adapters receive a [`FolioServices`] and talk to the domain only
//! through the driving port traits it exposes.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use crate::config::{FolioSettings, SettingsError};
use crate::domain::ports::{
    AuditRecorder, CategoryCommand, CategoryQuery, NoOpResourceMetrics, PortfolioCommand,
    PortfolioQuery, ProjectCommand, ProjectQuery, ResourceMetrics, ResourceStores,
    SectionCommand, SectionContentCommand, SectionContentQuery, SectionQuery, UserCommand,
    UserQuery,
};
use crate::domain::{
    CategoryService, PortfolioService, ProjectService, ResourceCore, SectionContentService,
    SectionService, Sinks, UserService,
};
use crate::outbound::audit::TracingAuditRecorder;
use crate::outbound::persistence::{DbPool, PoolError, diesel_stores};

/// Failures while assembling the services.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// The Prometheus counter could not be registered.
    #[error("failed to register metrics: {message}")]
    Metrics { message: String },
}

/// Every use case, sharing one resolver, gate, guard and position manager.
#[derive(Clone)]
pub struct FolioServices {
    pub users: Arc<dyn UserCommand>,
    pub user_queries: Arc<dyn UserQuery>,
    pub portfolios: Arc<dyn PortfolioCommand>,
    pub portfolio_queries: Arc<dyn PortfolioQuery>,
    pub categories: Arc<dyn CategoryCommand>,
    pub category_queries: Arc<dyn CategoryQuery>,
    pub sections: Arc<dyn SectionCommand>,
    pub section_queries: Arc<dyn SectionQuery>,
    pub projects: Arc<dyn ProjectCommand>,
    pub project_queries: Arc<dyn ProjectQuery>,
    pub section_contents: Arc<dyn SectionContentCommand>,
    pub section_content_queries: Arc<dyn SectionContentQuery>,
}

impl FolioServices {
    /// Wire the services over explicit adapters.
    pub fn new(
        stores: ResourceStores,
        audit: Arc<dyn AuditRecorder>,
        metrics: Arc<dyn ResourceMetrics>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let core = Arc::new(ResourceCore::new(stores, Sinks::new(audit, metrics, clock)));

        let users = Arc::new(UserService::new(Arc::clone(&core)));
        let portfolios = Arc::new(PortfolioService::new(Arc::clone(&core)));
        let categories = Arc::new(CategoryService::new(Arc::clone(&core)));
        let sections = Arc::new(SectionService::new(Arc::clone(&core)));
        let projects = Arc::new(ProjectService::new(Arc::clone(&core)));
        let section_contents = Arc::new(SectionContentService::new(core));

        Self {
            users: users.clone(),
            user_queries: users,
            portfolios: portfolios.clone(),
            portfolio_queries: portfolios,
            categories: categories.clone(),
            category_queries: categories,
            sections: sections.clone(),
            section_queries: sections,
            projects: projects.clone(),
            project_queries: projects,
            section_contents: section_contents.clone(),
            section_content_queries: section_contents,
        }
    }

    /// Build the PostgreSQL-backed services described by `settings`.
    ///
    /// Audit events go to the tracing sink and the system clock stamps
    /// timestamps.
    ///
    /// # Errors
    ///
    /// Fails when the database URL is missing, the pool cannot be built, or
    /// the metrics counter cannot be registered.
    pub async fn connect(settings: &FolioSettings) -> Result<Self, BootstrapError> {
        let pool = DbPool::new(settings.pool_config()?).await?;
        let metrics = metrics_sink(settings)?;
        info!(
            pool_max_size = settings.pool_max_size,
            metrics_enabled = settings.metrics_enabled(),
            "folio services connected"
        );

        Ok(Self::new(
            diesel_stores(&pool),
            Arc::new(TracingAuditRecorder::new()),
            metrics,
            Arc::new(DefaultClock),
        ))
    }
}

#[cfg(feature = "metrics")]
fn metrics_sink(settings: &FolioSettings) -> Result<Arc<dyn ResourceMetrics>, BootstrapError> {
    use crate::outbound::metrics::PrometheusResourceMetrics;

    if !settings.metrics_enabled() {
        return Ok(Arc::new(NoOpResourceMetrics));
    }
    let metrics = PrometheusResourceMetrics::new(prometheus::default_registry()).map_err(
        |err| BootstrapError::Metrics {
            message: err.to_string(),
        },
    )?;
    Ok(Arc::new(metrics))
}

#[cfg(not(feature = "metrics"))]
fn metrics_sink(settings: &FolioSettings) -> Result<Arc<dyn ResourceMetrics>, BootstrapError> {
    if settings.metrics_enabled() {
        tracing::warn!("metrics enabled but the `metrics` feature is not compiled in");
    }
    Ok(Arc::new(NoOpResourceMetrics))
}
