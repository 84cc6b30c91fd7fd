//! PostgreSQL-backed `SectionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageRequest};

use crate::domain::ports::{SectionRepository, ResourceStoreError};
use crate::domain::validation::title_key;
use crate::domain::{NewSection, PortfolioId, PositionUpdate, Section, SectionId};

use super::models::{
    NewSectionRow, SectionChangeset, SectionRow, convert_rows, db_id, db_ids, db_position, lower,
    page_bounds, page_total,
};
use super::pool::DbPool;
use super::schema::sections;
use super::store_error_mapping::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the section repository port.
#[derive(Clone)]
pub struct DieselSectionRepository {
    pool: DbPool,
}

impl DieselSectionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SectionRepository for DieselSectionRepository {
    async fn create(&self, section: &NewSection) -> Result<Section, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewSectionRow {
            portfolio_id: db_id(section.portfolio_id.get())?,
            owner_id: db_id(section.owner_id.get())?,
            title: &section.title,
            description: &section.description,
            position: db_position(section.position),
            created_at: section.created_at,
            updated_at: section.created_at,
        };

        diesel::insert_into(sections::table)
            .values(&row)
            .returning(SectionRow::as_returning())
            .get_result::<SectionRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .try_into()
    }

    async fn find_by_id(&self, id: SectionId) -> Result<Option<Section>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        sections::table
            .find(db_id(id.get())?)
            .select(SectionRow::as_select())
            .first::<SectionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Section::try_from)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[SectionId]) -> Result<Vec<Section>, ResourceStoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SectionRow> = sections::table
            .filter(sections::id.eq_any(db_ids(ids)?))
            .select(SectionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }

    async fn list_by_portfolio(
        &self,
        portfolio_id: PortfolioId,
        page: PageRequest,
    ) -> Result<Page<Section>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let portfolio = db_id(portfolio_id.get())?;
        let (offset, limit) = page_bounds(page)?;

        let total: i64 = sections::table
            .filter(sections::portfolio_id.eq(portfolio))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<SectionRow> = sections::table
            .filter(sections::portfolio_id.eq(portfolio))
            .order((sections::position.asc(), sections::id.asc()))
            .offset(offset)
            .limit(limit)
            .select(SectionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Page::new(convert_rows(rows)?, page_total(total)?, page))
    }

    async fn update(&self, section: &Section) -> Result<Section, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = SectionChangeset {
            title: &section.title,
            description: &section.description,
            updated_at: section.updated_at,
        };

        diesel::update(sections::table.find(db_id(section.id.get())?))
            .set(&changes)
            .returning(SectionRow::as_returning())
            .get_result::<SectionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| ResourceStoreError::missing(format!("section {}", section.id)))?
            .try_into()
    }

    async fn update_position(
        &self,
        id: SectionId,
        position: u32,
    ) -> Result<(), ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(sections::table.find(db_id(id.get())?))
            .set(sections::position.eq(db_position(position)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(ResourceStoreError::missing(format!("section {id}")));
        }
        Ok(())
    }

    async fn bulk_update_positions(
        &self,
        updates: &[PositionUpdate<SectionId>],
    ) -> Result<(), ResourceStoreError> {
        let rows = updates
            .iter()
            .map(|update| {
                Ok((
                    update.id,
                    db_id(update.id.get())?,
                    db_position(update.position),
                ))
            })
            .collect::<Result<Vec<_>, ResourceStoreError>>()?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Any missing row rolls back every write before it.
        conn.transaction(|conn| {
            async move {
                for (id, key, position) in rows {
                    let updated = diesel::update(sections::table.find(key))
                        .set(sections::position.eq(position))
                        .execute(conn)
                        .await?;
                    if updated == 0 {
                        return Err(ResourceStoreError::missing(format!("section {id}")));
                    }
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: SectionId) -> Result<bool, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(sections::table.find(db_id(id.get())?))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn title_exists(
        &self,
        portfolio_id: PortfolioId,
        title: &str,
        exclude: Option<SectionId>,
    ) -> Result<bool, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = sections::table
            .filter(sections::portfolio_id.eq(db_id(portfolio_id.get())?))
            .filter(lower(sections::title).eq(title_key(title)))
            .into_boxed();
        if let Some(excluded) = exclude {
            query = query.filter(sections::id.ne(db_id(excluded.get())?));
        }

        let found = query
            .select(sections::id)
            .first::<i64>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(found.is_some())
    }
}
