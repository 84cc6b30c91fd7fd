//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Identifiers and positions are `BIGINT`.
//! Every `u32` position fits, so only conversions out of the database and
//! identifier conversions into it are checked.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use pagination::PageRequest;

use crate::domain::ports::ResourceStoreError;
use crate::domain::{
    Category, ContentKind, EntityId, Portfolio, Project, ProjectMetadata, Section,
    SectionContent, User,
};

use super::schema::{categories, portfolios, projects, section_contents, sections, users};

/// Convert a domain identifier into its column value.
pub(crate) fn db_id(raw: u64) -> Result<i64, ResourceStoreError> {
    i64::try_from(raw).map_err(|_| ResourceStoreError::query(format!("id {raw} out of range")))
}

/// Convert a column value into a domain identifier.
pub(crate) fn domain_id<I: From<u64>>(raw: i64) -> Result<I, ResourceStoreError> {
    u64::try_from(raw)
        .map(I::from)
        .map_err(|_| ResourceStoreError::query(format!("stored id {raw} is negative")))
}

pub(crate) fn db_position(position: u32) -> i64 {
    i64::from(position)
}

fn domain_position(raw: i64) -> Result<u32, ResourceStoreError> {
    u32::try_from(raw)
        .map_err(|_| ResourceStoreError::query(format!("stored position {raw} out of range")))
}

/// Convert a slice of domain identifiers for `eq_any` filters.
pub(crate) fn db_ids<I: EntityId>(ids: &[I]) -> Result<Vec<i64>, ResourceStoreError> {
    ids.iter().map(|id| db_id(id.raw())).collect()
}

/// Offset and limit columns for one page of a listing.
pub(crate) fn page_bounds(page: PageRequest) -> Result<(i64, i64), ResourceStoreError> {
    let offset = i64::try_from(page.offset())
        .map_err(|_| ResourceStoreError::query(format!("page {} out of range", page.page())))?;
    Ok((offset, i64::from(page.limit())))
}

/// Convert a `COUNT(*)` result into a page total.
pub(crate) fn page_total(count: i64) -> Result<u64, ResourceStoreError> {
    u64::try_from(count).map_err(|_| ResourceStoreError::query("negative row count"))
}

diesel::define_sql_function! {
    /// SQL `lower()`, used for case-insensitive title lookups.
    fn lower(value: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub external_id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = ResourceStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: domain_id(row.id)?,
            external_id: row.external_id,
            email: row.email,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub external_id: &'a str,
    pub email: &'a str,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Portfolios
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = portfolios)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PortfolioRow {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PortfolioRow> for Portfolio {
    type Error = ResourceStoreError;

    fn try_from(row: PortfolioRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: domain_id(row.id)?,
            owner_id: domain_id(row.owner_id)?,
            title: row.title,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = portfolios)]
pub(crate) struct NewPortfolioRow<'a> {
    pub owner_id: i64,
    pub title: &'a str,
    pub description: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = portfolios)]
pub(crate) struct PortfolioChangeset<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Categories and sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i64,
    pub portfolio_id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = ResourceStoreError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: domain_id(row.id)?,
            portfolio_id: domain_id(row.portfolio_id)?,
            owner_id: domain_id(row.owner_id)?,
            title: row.title,
            description: row.description,
            position: domain_position(row.position)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub portfolio_id: i64,
    pub owner_id: i64,
    pub title: &'a str,
    pub description: &'a str,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = categories)]
pub(crate) struct CategoryChangeset<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SectionRow {
    pub id: i64,
    pub portfolio_id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SectionRow> for Section {
    type Error = ResourceStoreError;

    fn try_from(row: SectionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: domain_id(row.id)?,
            portfolio_id: domain_id(row.portfolio_id)?,
            owner_id: domain_id(row.owner_id)?,
            title: row.title,
            description: row.description,
            position: domain_position(row.position)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sections)]
pub(crate) struct NewSectionRow<'a> {
    pub portfolio_id: i64,
    pub owner_id: i64,
    pub title: &'a str,
    pub description: &'a str,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = sections)]
pub(crate) struct SectionChangeset<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: i64,
    pub category_id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub media_urls: Vec<String>,
    pub skills: Vec<String>,
    pub client: Option<String>,
    pub project_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = ResourceStoreError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: domain_id(row.id)?,
            category_id: domain_id(row.category_id)?,
            owner_id: domain_id(row.owner_id)?,
            title: row.title,
            description: row.description,
            metadata: ProjectMetadata {
                media_urls: row.media_urls,
                skills: row.skills,
                client: row.client,
                project_url: row.project_url,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub(crate) struct NewProjectRow<'a> {
    pub category_id: i64,
    pub owner_id: i64,
    pub title: &'a str,
    pub description: &'a str,
    pub media_urls: &'a [String],
    pub skills: &'a [String],
    pub client: Option<&'a str>,
    pub project_url: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full replacement of a project's editable columns.
///
/// `treat_none_as_null` so clearing `client` or `project_url` is persisted.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProjectChangeset<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub media_urls: &'a [String],
    pub skills: &'a [String],
    pub client: Option<&'a str>,
    pub project_url: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> ProjectChangeset<'a> {
    pub(crate) fn from_project(project: &'a Project) -> Self {
        Self {
            title: &project.title,
            description: &project.description,
            media_urls: &project.metadata.media_urls,
            skills: &project.metadata.skills,
            client: project.metadata.client.as_deref(),
            project_url: project.metadata.project_url.as_deref(),
            updated_at: project.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Section contents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = section_contents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SectionContentRow {
    pub id: i64,
    pub section_id: i64,
    pub owner_id: i64,
    pub kind: String,
    pub content: String,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SectionContentRow> for SectionContent {
    type Error = ResourceStoreError;

    fn try_from(row: SectionContentRow) -> Result<Self, Self::Error> {
        let kind = row
            .kind
            .parse::<ContentKind>()
            .map_err(|err| ResourceStoreError::query(err.to_string()))?;
        Ok(Self {
            id: domain_id(row.id)?,
            section_id: domain_id(row.section_id)?,
            owner_id: domain_id(row.owner_id)?,
            kind,
            content: row.content,
            order: domain_position(row.sort_order)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = section_contents)]
pub(crate) struct NewSectionContentRow<'a> {
    pub section_id: i64,
    pub owner_id: i64,
    pub kind: &'a str,
    pub content: &'a str,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = section_contents)]
pub(crate) struct SectionContentChangeset<'a> {
    pub kind: &'a str,
    pub content: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Collect converted rows, failing on the first bad one.
pub(crate) fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, ResourceStoreError>
where
    T: TryFrom<R, Error = ResourceStoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryId, UserId};
    use chrono::TimeZone;
    use rstest::rstest;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    fn identifiers_beyond_bigint_are_rejected() {
        assert!(db_id(u64::MAX).is_err());
        assert_eq!(db_id(42).expect("fits"), 42);
    }

    #[rstest]
    fn negative_stored_values_are_query_errors() {
        assert!(domain_id::<UserId>(-1).is_err());
        assert!(domain_position(-3).is_err());
    }

    #[rstest]
    #[case::zero(0)]
    #[case::beyond_int4(2_147_483_648)]
    #[case::largest(u32::MAX)]
    fn every_domain_position_is_storable(#[case] position: u32) {
        assert_eq!(domain_position(db_position(position)), Ok(position));
    }

    #[rstest]
    fn category_rows_convert_to_domain() {
        let category = Category::try_from(CategoryRow {
            id: 4,
            portfolio_id: 1,
            owner_id: 7,
            title: "Web".to_owned(),
            description: String::new(),
            position: 2,
            created_at: timestamp(),
            updated_at: timestamp(),
        })
        .expect("valid row");

        assert_eq!(category.id, CategoryId::new(4));
        assert_eq!(category.owner_id, UserId::new(7));
        assert_eq!(category.position, 2);
    }

    #[rstest]
    fn unknown_content_kinds_fail_conversion() {
        let result = SectionContent::try_from(SectionContentRow {
            id: 1,
            section_id: 1,
            owner_id: 1,
            kind: "gif".to_owned(),
            content: "x".to_owned(),
            sort_order: 0,
            created_at: timestamp(),
            updated_at: timestamp(),
        });

        assert!(matches!(result, Err(ResourceStoreError::Query { .. })));
    }
}
