//! Sibling title uniqueness.
//!
//! The check and the following write are separate storage calls, so two
//! concurrent writers can both pass. Storage carries a unique index on the
//! same scope and its violation is mapped to `Conflict` as well; this guard
//! only gives the common case a clean error before any write.

use super::ports::ResourceStores;
use super::store_errors::store_failure;
use super::{CategoryId, EntityKind, Error, PortfolioId, SectionId, UserId};

/// Uniqueness scope of a title, with the record to ignore on rename.
///
/// `exclude` is `None` on create and the record's own ID on update, so
/// keeping the current title never collides with itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleScope {
    Portfolio {
        owner: UserId,
        exclude: Option<PortfolioId>,
    },
    Category {
        portfolio: PortfolioId,
        exclude: Option<CategoryId>,
    },
    Section {
        portfolio: PortfolioId,
        exclude: Option<SectionId>,
    },
}

impl TitleScope {
    pub const fn entity(self) -> EntityKind {
        match self {
            Self::Portfolio { .. } => EntityKind::Portfolio,
            Self::Category { .. } => EntityKind::Category,
            Self::Section { .. } => EntityKind::Section,
        }
    }

    fn describe(self) -> String {
        match self {
            Self::Portfolio { owner, .. } => format!("user {owner}"),
            Self::Category { portfolio, .. } | Self::Section { portfolio, .. } => {
                format!("portfolio {portfolio}")
            }
        }
    }
}

#[derive(Clone)]
pub struct DuplicateGuard {
    stores: ResourceStores,
}

impl DuplicateGuard {
    pub fn new(stores: ResourceStores) -> Self {
        Self { stores }
    }

    /// Whether another sibling in `scope` already uses `title`.
    ///
    /// Comparison ignores case and surrounding whitespace.
    pub async fn check_duplicate(&self, title: &str, scope: TitleScope) -> Result<bool, Error> {
        let title = title.trim();
        let failure = store_failure(scope.entity(), "check title of");
        match scope {
            TitleScope::Portfolio { owner, exclude } => self
                .stores
                .portfolios
                .title_exists(owner, title, exclude)
                .await
                .map_err(failure),
            TitleScope::Category { portfolio, exclude } => self
                .stores
                .categories
                .title_exists(portfolio, title, exclude)
                .await
                .map_err(failure),
            TitleScope::Section { portfolio, exclude } => self
                .stores
                .sections
                .title_exists(portfolio, title, exclude)
                .await
                .map_err(failure),
        }
    }

    /// Fail with `Conflict` when `title` is taken in `scope`.
    pub async fn ensure_unique(&self, title: &str, scope: TitleScope) -> Result<(), Error> {
        if self.check_duplicate(title, scope).await? {
            return Err(Error::conflict(format!(
                "a {} titled `{}` already exists for {}",
                scope.entity(),
                title.trim(),
                scope.describe()
            ))
            .with_details(serde_json::json!({ "field": "title" })));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::test_helpers::{MockStores, OWNER};
    use mockall::predicate::eq;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn create_checks_without_exclusion() {
        let mut mocks = MockStores::default();
        mocks
            .sections
            .expect_title_exists()
            .with(eq(PortfolioId::new(3)), eq("Intro"), eq(None::<SectionId>))
            .times(1)
            .return_once(|_, _, _| Ok(true));
        let guard = DuplicateGuard::new(mocks.into_stores());

        let err = guard
            .ensure_unique(
                "  Intro ",
                TitleScope::Section {
                    portfolio: PortfolioId::new(3),
                    exclude: None,
                },
            )
            .await
            .expect_err("duplicate");

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(
            err.message(),
            "a section titled `Intro` already exists for portfolio 3"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn rename_passes_its_own_id_as_exclusion() {
        let mut mocks = MockStores::default();
        mocks
            .categories
            .expect_title_exists()
            .with(
                eq(PortfolioId::new(3)),
                eq("Web"),
                eq(Some(CategoryId::new(9))),
            )
            .times(1)
            .return_once(|_, _, _| Ok(false));
        let guard = DuplicateGuard::new(mocks.into_stores());

        guard
            .ensure_unique(
                "Web",
                TitleScope::Category {
                    portfolio: PortfolioId::new(3),
                    exclude: Some(CategoryId::new(9)),
                },
            )
            .await
            .expect("own title is not a duplicate");
    }

    #[rstest]
    #[tokio::test]
    async fn portfolio_titles_are_scoped_by_owner() {
        let mut mocks = MockStores::default();
        mocks
            .portfolios
            .expect_title_exists()
            .with(eq(OWNER), eq("Main"), eq(None::<PortfolioId>))
            .times(1)
            .return_once(|_, _, _| Ok(false));
        let guard = DuplicateGuard::new(mocks.into_stores());

        let duplicate = guard
            .check_duplicate(
                "Main",
                TitleScope::Portfolio {
                    owner: OWNER,
                    exclude: None,
                },
            )
            .await
            .expect("checked");
        assert!(!duplicate);
    }
}
