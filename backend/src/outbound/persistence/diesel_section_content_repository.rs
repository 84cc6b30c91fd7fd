//! PostgreSQL-backed `SectionContentRepository` implementation using Diesel ORM.
//!
//! The domain `order` field is stored in the `sort_order` column.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageRequest};

use crate::domain::ports::{ResourceStoreError, SectionContentRepository};
use crate::domain::{NewSectionContent, PositionUpdate, SectionContent, SectionContentId, SectionId};

use super::models::{
    NewSectionContentRow, SectionContentChangeset, SectionContentRow, convert_rows, db_id, db_ids,
    db_position, page_bounds, page_total,
};
use super::pool::DbPool;
use super::schema::section_contents;
use super::store_error_mapping::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the section content repository port.
#[derive(Clone)]
pub struct DieselSectionContentRepository {
    pool: DbPool,
}

impl DieselSectionContentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SectionContentRepository for DieselSectionContentRepository {
    async fn create(
        &self,
        content: &NewSectionContent,
    ) -> Result<SectionContent, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewSectionContentRow {
            section_id: db_id(content.section_id.get())?,
            owner_id: db_id(content.owner_id.get())?,
            kind: content.kind.as_str(),
            content: &content.content,
            sort_order: db_position(content.order),
            created_at: content.created_at,
            updated_at: content.created_at,
        };

        diesel::insert_into(section_contents::table)
            .values(&row)
            .returning(SectionContentRow::as_returning())
            .get_result::<SectionContentRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .try_into()
    }

    async fn find_by_id(
        &self,
        id: SectionContentId,
    ) -> Result<Option<SectionContent>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        section_contents::table
            .find(db_id(id.get())?)
            .select(SectionContentRow::as_select())
            .first::<SectionContentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(SectionContent::try_from)
            .transpose()
    }

    async fn find_by_ids(
        &self,
        ids: &[SectionContentId],
    ) -> Result<Vec<SectionContent>, ResourceStoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SectionContentRow> = section_contents::table
            .filter(section_contents::id.eq_any(db_ids(ids)?))
            .select(SectionContentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }

    async fn list_by_section(
        &self,
        section_id: SectionId,
        page: PageRequest,
    ) -> Result<Page<SectionContent>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let section = db_id(section_id.get())?;
        let (offset, limit) = page_bounds(page)?;

        let total: i64 = section_contents::table
            .filter(section_contents::section_id.eq(section))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<SectionContentRow> = section_contents::table
            .filter(section_contents::section_id.eq(section))
            .order((section_contents::sort_order.asc(), section_contents::id.asc()))
            .offset(offset)
            .limit(limit)
            .select(SectionContentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Page::new(convert_rows(rows)?, page_total(total)?, page))
    }

    async fn update(&self, content: &SectionContent) -> Result<SectionContent, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = SectionContentChangeset {
            kind: content.kind.as_str(),
            content: &content.content,
            updated_at: content.updated_at,
        };

        diesel::update(section_contents::table.find(db_id(content.id.get())?))
            .set(&changes)
            .returning(SectionContentRow::as_returning())
            .get_result::<SectionContentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| ResourceStoreError::missing(format!("section content {}", content.id)))?
            .try_into()
    }

    async fn update_order(
        &self,
        id: SectionContentId,
        order: u32,
    ) -> Result<(), ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(section_contents::table.find(db_id(id.get())?))
            .set(section_contents::sort_order.eq(db_position(order)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(ResourceStoreError::missing(format!("section content {id}")));
        }
        Ok(())
    }

    async fn bulk_update_orders(
        &self,
        updates: &[PositionUpdate<SectionContentId>],
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

        conn.transaction(|conn| {
            async move {
                for (id, key, order) in rows {
                    let updated = diesel::update(section_contents::table.find(key))
                        .set(section_contents::sort_order.eq(order))
                        .execute(conn)
                        .await?;
                    if updated == 0 {
                        return Err(ResourceStoreError::missing(format!("section content {id}")));
                    }
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: SectionContentId) -> Result<bool, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(section_contents::table.find(db_id(id.get())?))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
