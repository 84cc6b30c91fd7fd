//! PostgreSQL-backed `PortfolioRepository` implementation using Diesel ORM.
//!
//! Deleting a portfolio removes its categories, sections, projects and
//! section contents through `ON DELETE CASCADE`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{PortfolioRepository, ResourceStoreError};
use crate::domain::validation::title_key;
use crate::domain::{NewPortfolio, Portfolio, PortfolioId, UserId};

use super::models::{
    NewPortfolioRow, PortfolioChangeset, PortfolioRow, convert_rows, db_id, lower, page_bounds,
    page_total,
};
use super::pool::DbPool;
use super::schema::portfolios;
use super::store_error_mapping::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the portfolio repository port.
#[derive(Clone)]
pub struct DieselPortfolioRepository {
    pool: DbPool,
}

impl DieselPortfolioRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortfolioRepository for DieselPortfolioRepository {
    async fn create(&self, portfolio: &NewPortfolio) -> Result<Portfolio, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPortfolioRow {
            owner_id: db_id(portfolio.owner_id.get())?,
            title: &portfolio.title,
            description: &portfolio.description,
            created_at: portfolio.created_at,
            updated_at: portfolio.created_at,
        };

        diesel::insert_into(portfolios::table)
            .values(&row)
            .returning(PortfolioRow::as_returning())
            .get_result::<PortfolioRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .try_into()
    }

    async fn find_by_id(&self, id: PortfolioId) -> Result<Option<Portfolio>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        portfolios::table
            .find(db_id(id.get())?)
            .select(PortfolioRow::as_select())
            .first::<PortfolioRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Portfolio::try_from)
            .transpose()
    }

    async fn list_by_owner(
        &self,
        owner_id: UserId,
        page: PageRequest,
    ) -> Result<Page<Portfolio>, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = db_id(owner_id.get())?;
        let (offset, limit) = page_bounds(page)?;

        let total: i64 = portfolios::table
            .filter(portfolios::owner_id.eq(owner))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<PortfolioRow> = portfolios::table
            .filter(portfolios::owner_id.eq(owner))
            .order(portfolios::id.asc())
            .offset(offset)
            .limit(limit)
            .select(PortfolioRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Page::new(convert_rows(rows)?, page_total(total)?, page))
    }

    async fn update(&self, portfolio: &Portfolio) -> Result<Portfolio, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = PortfolioChangeset {
            title: &portfolio.title,
            description: &portfolio.description,
            updated_at: portfolio.updated_at,
        };

        diesel::update(portfolios::table.find(db_id(portfolio.id.get())?))
            .set(&changes)
            .returning(PortfolioRow::as_returning())
            .get_result::<PortfolioRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| ResourceStoreError::missing(format!("portfolio {}", portfolio.id)))?
            .try_into()
    }

    async fn delete(&self, id: PortfolioId) -> Result<bool, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(portfolios::table.find(db_id(id.get())?))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn title_exists(
        &self,
        owner_id: UserId,
        title: &str,
        exclude: Option<PortfolioId>,
    ) -> Result<bool, ResourceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = portfolios::table
            .filter(portfolios::owner_id.eq(db_id(owner_id.get())?))
            .filter(lower(portfolios::title).eq(title_key(title)))
            .into_boxed();
        if let Some(excluded) = exclude {
            query = query.filter(portfolios::id.ne(db_id(excluded.get())?));
        }

        let found = query
            .select(portfolios::id)
            .first::<i64>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(found.is_some())
    }
}
