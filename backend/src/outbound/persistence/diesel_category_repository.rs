//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageRequest};

use crate::domain::ports::{CategoryRepository, ResourceStoreError};
use crate::domain::validation::title_key;
use crate::domain::{Category, CategoryId, NewCategory, PortfolioId, PositionUpdate};

use super::models::{
    CategoryChangeset, CategoryRow, NewCategoryRow, convert_rows, db_id, db_ids, db_position,
    lower, page_bounds, page_total,
};
use super::pool::DbPool;
use super::schema::categories;
use super::store_error_mapping::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the category repository port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn create(&self, category: &NewCategory) -> Result<Category, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCategoryRow {
            portfolio_id: db_id(category.portfolio_id.get())?,
            owner_id: db_id(category.owner_id.get())?,
            title: &category.title,
            description: &category.description,
            position: db_position(category.position),
            created_at: category.created_at,
            updated_at: category.created_at,
        };

        diesel::insert_into(categories::table)
            .values(&row)
            .returning(CategoryRow::as_returning())
            .get_result::<CategoryRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .try_into()
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        categories::table
            .find(db_id(id.get())?)
            .select(CategoryRow::as_select())
            .first::<CategoryRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Category::try_from)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[CategoryId]) -> Result<Vec<Category>, ResourceStoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = categories::table
            .filter(categories::id.eq_any(db_ids(ids)?))
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }

    async fn list_by_portfolio(
        &self,
        portfolio_id: PortfolioId,
        page: PageRequest,
    ) -> Result<Page<Category>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let portfolio = db_id(portfolio_id.get())?;
        let (offset, limit) = page_bounds(page)?;

        let total: i64 = categories::table
            .filter(categories::portfolio_id.eq(portfolio))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<CategoryRow> = categories::table
            .filter(categories::portfolio_id.eq(portfolio))
            .order((categories::position.asc(), categories::id.asc()))
            .offset(offset)
            .limit(limit)
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Page::new(convert_rows(rows)?, page_total(total)?, page))
    }

    async fn update(&self, category: &Category) -> Result<Category, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = CategoryChangeset {
            title: &category.title,
            description: &category.description,
            updated_at: category.updated_at,
        };

        diesel::update(categories::table.find(db_id(category.id.get())?))
            .set(&changes)
            .returning(CategoryRow::as_returning())
            .get_result::<CategoryRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| ResourceStoreError::missing(format!("category {}", category.id)))?
            .try_into()
    }

    async fn update_position(
        &self,
        id: CategoryId,
        position: u32,
    ) -> Result<(), ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(categories::table.find(db_id(id.get())?))
            .set(categories::position.eq(db_position(position)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(ResourceStoreError::missing(format!("category {id}")));
        }
        Ok(())
    }

    async fn bulk_update_positions(
        &self,
        updates: &[PositionUpdate<CategoryId>],
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
                    let updated = diesel::update(categories::table.find(key))
                        .set(categories::position.eq(position))
                        .execute(conn)
                        .await?;
                    if updated == 0 {
                        return Err(ResourceStoreError::missing(format!("category {id}")));
                    }
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(categories::table.find(db_id(id.get())?))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn title_exists(
        &self,
        portfolio_id: PortfolioId,
        title: &str,
        exclude: Option<CategoryId>,
    ) -> Result<bool, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = categories::table
            .filter(categories::portfolio_id.eq(db_id(portfolio_id.get())?))
            .filter(lower(categories::title).eq(title_key(title)))
            .into_boxed();
        if let Some(excluded) = exclude {
            query = query.filter(categories::id.ne(db_id(excluded.get())?));
        }

        let found = query
            .select(categories::id)
            .first::<i64>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(found.is_some())
    }
}
