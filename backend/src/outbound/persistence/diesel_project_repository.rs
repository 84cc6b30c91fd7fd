//! PostgreSQL-backed `ProjectRepository` implementation using Diesel ORM.
//!
//! Project metadata lives in plain columns: `TEXT[]` for media URLs and
//! skills, nullable text for the client and project URL.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{ProjectRepository, ResourceStoreError};
use crate::domain::{CategoryId, NewProject, Project, ProjectId};

use super::models::{
    NewProjectRow, ProjectChangeset, ProjectRow, convert_rows, db_id, page_bounds, page_total,
};
use super::pool::DbPool;
use super::schema::projects;
use super::store_error_mapping::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the project repository port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn create(&self, project: &NewProject) -> Result<Project, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewProjectRow {
            category_id: db_id(project.category_id.get())?,
            owner_id: db_id(project.owner_id.get())?,
            title: &project.title,
            description: &project.description,
            media_urls: &project.metadata.media_urls,
            skills: &project.metadata.skills,
            client: project.metadata.client.as_deref(),
            project_url: project.metadata.project_url.as_deref(),
            created_at: project.created_at,
            updated_at: project.created_at,
        };

        diesel::insert_into(projects::table)
            .values(&row)
            .returning(ProjectRow::as_returning())
            .get_result::<ProjectRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .try_into()
    }

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        projects::table
            .find(db_id(id.get())?)
            .select(ProjectRow::as_select())
            .first::<ProjectRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Project::try_from)
            .transpose()
    }

    async fn list_by_category(
        &self,
        category_id: CategoryId,
        page: PageRequest,
    ) -> Result<Page<Project>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let category = db_id(category_id.get())?;
        let (offset, limit) = page_bounds(page)?;

        let total: i64 = projects::table
            .filter(projects::category_id.eq(category))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<ProjectRow> = projects::table
            .filter(projects::category_id.eq(category))
            .order(projects::id.asc())
            .offset(offset)
            .limit(limit)
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Page::new(convert_rows(rows)?, page_total(total)?, page))
    }

    async fn update(&self, project: &Project) -> Result<Project, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(projects::table.find(db_id(project.id.get())?))
            .set(&ProjectChangeset::from_project(project))
            .returning(ProjectRow::as_returning())
            .get_result::<ProjectRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| ResourceStoreError::missing(format!("project {}", project.id)))?
            .try_into()
    }

    async fn delete(&self, id: ProjectId) -> Result<bool, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(projects::table.find(db_id(id.get())?))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
