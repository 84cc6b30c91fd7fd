//! In-memory implementation of every repository port.
//!
//! Behaves like the PostgreSQL schema: identifiers come from per-table
//! sequences, deletes cascade down the tree, titles are unique per scope
//! ignoring case, and bulk position writes are all-or-nothing. One-shot
//! failures can be injected per entity and operation.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    CategoryRepository, PortfolioRepository, ProjectRepository, ResourceStoreError,
    SectionContentRepository, SectionRepository, UserRepository,
};
use crate::domain::validation::title_key;
use crate::domain::{
    Category, CategoryId, EntityKind, NewCategory, NewPortfolio, NewProject, NewSection,
    NewSectionContent, NewUser, Portfolio, PortfolioId, PositionUpdate, Project, ProjectId,
    Section, SectionContent, SectionContentId, SectionId, User, UserId,
};

/// Repository operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    Create,
    FindById,
    FindByIds,
    FindByExternalId,
    List,
    Update,
    UpdatePosition,
    BulkUpdatePositions,
    Delete,
    TitleExists,
}

struct Table<T> {
    rows: BTreeMap<u64, T>,
    last_id: u64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(u64) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    fn get(&self, id: u64) -> Option<T> {
        self.rows.get(&id).cloned()
    }
}

#[derive(Default)]
struct State {
    users: Table<User>,
    portfolios: Table<Portfolio>,
    categories: Table<Category>,
    sections: Table<Section>,
    projects: Table<Project>,
    section_contents: Table<SectionContent>,
}

impl State {
    fn delete_project_rows(&mut self, category: CategoryId) {
        self.projects.rows.retain(|_, project| project.category_id != category);
    }

    fn delete_content_rows(&mut self, section: SectionId) {
        self.section_contents
            .rows
            .retain(|_, content| content.section_id != section);
    }

    fn delete_category(&mut self, id: CategoryId) -> bool {
        let removed = self.categories.rows.remove(&id.get()).is_some();
        if removed {
            self.delete_project_rows(id);
        }
        removed
    }

    fn delete_section(&mut self, id: SectionId) -> bool {
        let removed = self.sections.rows.remove(&id.get()).is_some();
        if removed {
            self.delete_content_rows(id);
        }
        removed
    }

    fn delete_portfolio(&mut self, id: PortfolioId) -> bool {
        if self.portfolios.rows.remove(&id.get()).is_none() {
            return false;
        }
        let categories: Vec<CategoryId> = self
            .categories
            .rows
            .values()
            .filter(|category| category.portfolio_id == id)
            .map(|category| category.id)
            .collect();
        for category in categories {
            self.delete_category(category);
        }
        let sections: Vec<SectionId> = self
            .sections
            .rows
            .values()
            .filter(|section| section.portfolio_id == id)
            .map(|section| section.id)
            .collect();
        for section in sections {
            self.delete_section(section);
        }
        true
    }
}

/// Thread-safe in-memory store backing all six repository ports.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    faults: Mutex<HashMap<(EntityKind, StoreOperation), ResourceStoreError>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(_) => panic!("in-memory store mutex"),
    }
}

fn paginate<T: Clone>(mut rows: Vec<T>, page: PageRequest) -> Page<T> {
    let total = u64::try_from(rows.len()).unwrap_or(u64::MAX);
    let start = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    let items = if start >= rows.len() {
        Vec::new()
    } else {
        rows.drain(start..).take(limit).collect()
    };
    Page::new(items, total, page)
}

fn duplicate(entity: EntityKind, title: &str) -> ResourceStoreError {
    ResourceStoreError::duplicate_title(format!("{entity} title `{title}`"))
}

fn missing(entity: EntityKind, id: impl std::fmt::Display) -> ResourceStoreError {
    ResourceStoreError::missing(format!("{entity} {id}"))
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `operation` on `entity` with `error`.
    pub fn inject_failure(
        &self,
        entity: EntityKind,
        operation: StoreOperation,
        error: ResourceStoreError,
    ) {
        lock(&self.faults).insert((entity, operation), error);
    }

    fn check_fault(
        &self,
        entity: EntityKind,
        operation: StoreOperation,
    ) -> Result<(), ResourceStoreError> {
        match lock(&self.faults).remove(&(entity, operation)) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        lock(&self.state)
    }

    /// Overwrite a category's stored owner, simulating denormalisation drift.
    pub fn overwrite_category_owner(&self, id: CategoryId, owner: UserId) {
        if let Some(category) = self.state().categories.rows.get_mut(&id.get()) {
            category.owner_id = owner;
        }
    }

    /// Snapshot of a portfolio's categories ordered by position, then ID.
    pub fn categories_of(&self, portfolio: PortfolioId) -> Vec<Category> {
        let mut rows: Vec<Category> = self
            .state()
            .categories
            .rows
            .values()
            .filter(|category| category.portfolio_id == portfolio)
            .cloned()
            .collect();
        rows.sort_by_key(|category| (category.position, category.id));
        rows
    }

    /// Snapshot of a section's contents ordered by `order`, then ID.
    pub fn contents_of(&self, section: SectionId) -> Vec<SectionContent> {
        let mut rows: Vec<SectionContent> = self
            .state()
            .section_contents
            .rows
            .values()
            .filter(|content| content.section_id == section)
            .cloned()
            .collect();
        rows.sort_by_key(|content| (content.order, content.id));
        rows
    }

    /// Number of stored rows per entity.
    pub fn row_count(&self, entity: EntityKind) -> usize {
        let state = self.state();
        match entity {
            EntityKind::User => state.users.rows.len(),
            EntityKind::Portfolio => state.portfolios.rows.len(),
            EntityKind::Category => state.categories.rows.len(),
            EntityKind::Section => state.sections.rows.len(),
            EntityKind::Project => state.projects.rows.len(),
            EntityKind::SectionContent => state.section_contents.rows.len(),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, ResourceStoreError> {
        self.check_fault(EntityKind::User, StoreOperation::Create)?;
        let mut state = self.state();
        if state
            .users
            .rows
            .values()
            .any(|existing| existing.external_id == user.external_id)
        {
            return Err(ResourceStoreError::query("external id already linked"));
        }
        Ok(state.users.insert_with(|id| User {
            id: UserId::new(id),
            external_id: user.external_id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
            updated_at: user.created_at,
        }))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ResourceStoreError> {
        self.check_fault(EntityKind::User, StoreOperation::FindById)?;
        Ok(self.state().users.get(id.get()))
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, ResourceStoreError> {
        self.check_fault(EntityKind::User, StoreOperation::FindByExternalId)?;
        Ok(self
            .state()
            .users
            .rows
            .values()
            .find(|user| user.external_id == external_id)
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<User, ResourceStoreError> {
        self.check_fault(EntityKind::User, StoreOperation::Update)?;
        let mut state = self.state();
        let stored = state
            .users
            .rows
            .get_mut(&user.id.get())
            .ok_or_else(|| missing(EntityKind::User, user.id))?;
        stored.email.clone_from(&user.email);
        stored.name.clone_from(&user.name);
        stored.updated_at = user.updated_at;
        Ok(stored.clone())
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryStore {
    async fn create(&self, portfolio: &NewPortfolio) -> Result<Portfolio, ResourceStoreError> {
        self.check_fault(EntityKind::Portfolio, StoreOperation::Create)?;
        let mut state = self.state();
        if state.users.get(portfolio.owner_id.get()).is_none() {
            return Err(missing(EntityKind::User, portfolio.owner_id));
        }
        let key = title_key(&portfolio.title);
        if state
            .portfolios
            .rows
            .values()
            .any(|row| row.owner_id == portfolio.owner_id && title_key(&row.title) == key)
        {
            return Err(duplicate(EntityKind::Portfolio, &portfolio.title));
        }
        Ok(state.portfolios.insert_with(|id| Portfolio {
            id: PortfolioId::new(id),
            owner_id: portfolio.owner_id,
            title: portfolio.title.clone(),
            description: portfolio.description.clone(),
            created_at: portfolio.created_at,
            updated_at: portfolio.created_at,
        }))
    }

    async fn find_by_id(&self, id: PortfolioId) -> Result<Option<Portfolio>, ResourceStoreError> {
        self.check_fault(EntityKind::Portfolio, StoreOperation::FindById)?;
        Ok(self.state().portfolios.get(id.get()))
    }

    async fn list_by_owner(
        &self,
        owner_id: UserId,
        page: PageRequest,
    ) -> Result<Page<Portfolio>, ResourceStoreError> {
        self.check_fault(EntityKind::Portfolio, StoreOperation::List)?;
        let rows = self
            .state()
            .portfolios
            .rows
            .values()
            .filter(|row| row.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn update(&self, portfolio: &Portfolio) -> Result<Portfolio, ResourceStoreError> {
        self.check_fault(EntityKind::Portfolio, StoreOperation::Update)?;
        let mut state = self.state();
        let key = title_key(&portfolio.title);
        let Some(current) = state.portfolios.get(portfolio.id.get()) else {
            return Err(missing(EntityKind::Portfolio, portfolio.id));
        };
        if state.portfolios.rows.values().any(|row| {
            row.id != portfolio.id && row.owner_id == current.owner_id && title_key(&row.title) == key
        }) {
            return Err(duplicate(EntityKind::Portfolio, &portfolio.title));
        }
        let stored = state
            .portfolios
            .rows
            .get_mut(&portfolio.id.get())
            .ok_or_else(|| missing(EntityKind::Portfolio, portfolio.id))?;
        stored.title.clone_from(&portfolio.title);
        stored.description.clone_from(&portfolio.description);
        stored.updated_at = portfolio.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, id: PortfolioId) -> Result<bool, ResourceStoreError> {
        self.check_fault(EntityKind::Portfolio, StoreOperation::Delete)?;
        Ok(self.state().delete_portfolio(id))
    }

    async fn title_exists(
        &self,
        owner_id: UserId,
        title: &str,
        exclude: Option<PortfolioId>,
    ) -> Result<bool, ResourceStoreError> {
        self.check_fault(EntityKind::Portfolio, StoreOperation::TitleExists)?;
        let key = title_key(title);
        Ok(self.state().portfolios.rows.values().any(|row| {
            row.owner_id == owner_id && Some(row.id) != exclude && title_key(&row.title) == key
        }))
    }
}

/// Category and section tables share their shape; this generates both
/// repository impls.
macro_rules! positioned_repository {
    (
        $trait:ident, $entity:ident, $kind:expr, $table:ident, $id:ident, $new:ident, $delete:ident
    ) => {
        #[async_trait]
        impl $trait for InMemoryStore {
            async fn create(&self, row: &$new) -> Result<$entity, ResourceStoreError> {
                self.check_fault($kind, StoreOperation::Create)?;
                let mut state = self.state();
                if state.portfolios.get(row.portfolio_id.get()).is_none() {
                    return Err(missing(EntityKind::Portfolio, row.portfolio_id));
                }
                let key = title_key(&row.title);
                if state.$table.rows.values().any(|existing| {
                    existing.portfolio_id == row.portfolio_id && title_key(&existing.title) == key
                }) {
                    return Err(duplicate($kind, &row.title));
                }
                Ok(state.$table.insert_with(|id| $entity {
                    id: $id::new(id),
                    portfolio_id: row.portfolio_id,
                    owner_id: row.owner_id,
                    title: row.title.clone(),
                    description: row.description.clone(),
                    position: row.position,
                    created_at: row.created_at,
                    updated_at: row.created_at,
                }))
            }

            async fn find_by_id(&self, id: $id) -> Result<Option<$entity>, ResourceStoreError> {
                self.check_fault($kind, StoreOperation::FindById)?;
                Ok(self.state().$table.get(id.get()))
            }

            async fn find_by_ids(&self, ids: &[$id]) -> Result<Vec<$entity>, ResourceStoreError> {
                self.check_fault($kind, StoreOperation::FindByIds)?;
                let state = self.state();
                Ok(ids.iter().filter_map(|id| state.$table.get(id.get())).collect())
            }

            async fn list_by_portfolio(
                &self,
                portfolio_id: PortfolioId,
                page: PageRequest,
            ) -> Result<Page<$entity>, ResourceStoreError> {
                self.check_fault($kind, StoreOperation::List)?;
                let mut rows: Vec<$entity> = self
                    .state()
                    .$table
                    .rows
                    .values()
                    .filter(|row| row.portfolio_id == portfolio_id)
                    .cloned()
                    .collect();
                rows.sort_by_key(|row| (row.position, row.id));
                Ok(paginate(rows, page))
            }

            async fn update(&self, row: &$entity) -> Result<$entity, ResourceStoreError> {
                self.check_fault($kind, StoreOperation::Update)?;
                let mut state = self.state();
                let key = title_key(&row.title);
                let Some(current) = state.$table.get(row.id.get()) else {
                    return Err(missing($kind, row.id));
                };
                if state.$table.rows.values().any(|existing| {
                    existing.id != row.id
                        && existing.portfolio_id == current.portfolio_id
                        && title_key(&existing.title) == key
                }) {
                    return Err(duplicate($kind, &row.title));
                }
                let stored = state
                    .$table
                    .rows
                    .get_mut(&row.id.get())
                    .ok_or_else(|| missing($kind, row.id))?;
                stored.title.clone_from(&row.title);
                stored.description.clone_from(&row.description);
                stored.updated_at = row.updated_at;
                Ok(stored.clone())
            }

            async fn update_position(
                &self,
                id: $id,
                position: u32,
            ) -> Result<(), ResourceStoreError> {
                self.check_fault($kind, StoreOperation::UpdatePosition)?;
                let mut state = self.state();
                let stored = state
                    .$table
                    .rows
                    .get_mut(&id.get())
                    .ok_or_else(|| missing($kind, id))?;
                stored.position = position;
                Ok(())
            }

            async fn bulk_update_positions(
                &self,
                updates: &[PositionUpdate<$id>],
            ) -> Result<(), ResourceStoreError> {
                self.check_fault($kind, StoreOperation::BulkUpdatePositions)?;
                let mut state = self.state();
                if let Some(absent) = updates
                    .iter()
                    .find(|update| !state.$table.rows.contains_key(&update.id.get()))
                {
                    return Err(missing($kind, absent.id));
                }
                for update in updates {
                    if let Some(stored) = state.$table.rows.get_mut(&update.id.get()) {
                        stored.position = update.position;
                    }
                }
                Ok(())
            }

            async fn delete(&self, id: $id) -> Result<bool, ResourceStoreError> {
                self.check_fault($kind, StoreOperation::Delete)?;
                Ok(self.state().$delete(id))
            }

            async fn title_exists(
                &self,
                portfolio_id: PortfolioId,
                title: &str,
                exclude: Option<$id>,
            ) -> Result<bool, ResourceStoreError> {
                self.check_fault($kind, StoreOperation::TitleExists)?;
                let key = title_key(title);
                Ok(self.state().$table.rows.values().any(|row| {
                    row.portfolio_id == portfolio_id
                        && Some(row.id) != exclude
                        && title_key(&row.title) == key
                }))
            }
        }
    };
}

positioned_repository!(
    CategoryRepository,
    Category,
    EntityKind::Category,
    categories,
    CategoryId,
    NewCategory,
    delete_category
);
positioned_repository!(
    SectionRepository,
    Section,
    EntityKind::Section,
    sections,
    SectionId,
    NewSection,
    delete_section
);

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn create(&self, project: &NewProject) -> Result<Project, ResourceStoreError> {
        self.check_fault(EntityKind::Project, StoreOperation::Create)?;
        let mut state = self.state();
        if state.categories.get(project.category_id.get()).is_none() {
            return Err(missing(EntityKind::Category, project.category_id));
        }
        Ok(state.projects.insert_with(|id| Project {
            id: ProjectId::new(id),
            category_id: project.category_id,
            owner_id: project.owner_id,
            title: project.title.clone(),
            description: project.description.clone(),
            metadata: project.metadata.clone(),
            created_at: project.created_at,
            updated_at: project.created_at,
        }))
    }

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, ResourceStoreError> {
        self.check_fault(EntityKind::Project, StoreOperation::FindById)?;
        Ok(self.state().projects.get(id.get()))
    }

    async fn list_by_category(
        &self,
        category_id: CategoryId,
        page: PageRequest,
    ) -> Result<Page<Project>, ResourceStoreError> {
        self.check_fault(EntityKind::Project, StoreOperation::List)?;
        let rows = self
            .state()
            .projects
            .rows
            .values()
            .filter(|row| row.category_id == category_id)
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn update(&self, project: &Project) -> Result<Project, ResourceStoreError> {
        self.check_fault(EntityKind::Project, StoreOperation::Update)?;
        let mut state = self.state();
        let stored = state
            .projects
            .rows
            .get_mut(&project.id.get())
            .ok_or_else(|| missing(EntityKind::Project, project.id))?;
        stored.title.clone_from(&project.title);
        stored.description.clone_from(&project.description);
        stored.metadata = project.metadata.clone();
        stored.updated_at = project.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, id: ProjectId) -> Result<bool, ResourceStoreError> {
        self.check_fault(EntityKind::Project, StoreOperation::Delete)?;
        Ok(self.state().projects.rows.remove(&id.get()).is_some())
    }
}

#[async_trait]
impl SectionContentRepository for InMemoryStore {
    async fn create(
        &self,
        content: &NewSectionContent,
    ) -> Result<SectionContent, ResourceStoreError> {
        self.check_fault(EntityKind::SectionContent, StoreOperation::Create)?;
        let mut state = self.state();
        if state.sections.get(content.section_id.get()).is_none() {
            return Err(missing(EntityKind::Section, content.section_id));
        }
        Ok(state.section_contents.insert_with(|id| SectionContent {
            id: SectionContentId::new(id),
            section_id: content.section_id,
            owner_id: content.owner_id,
            kind: content.kind,
            content: content.content.clone(),
            order: content.order,
            created_at: content.created_at,
            updated_at: content.created_at,
        }))
    }

    async fn find_by_id(
        &self,
        id: SectionContentId,
    ) -> Result<Option<SectionContent>, ResourceStoreError> {
        self.check_fault(EntityKind::SectionContent, StoreOperation::FindById)?;
        Ok(self.state().section_contents.get(id.get()))
    }

    async fn find_by_ids(
        &self,
        ids: &[SectionContentId],
    ) -> Result<Vec<SectionContent>, ResourceStoreError> {
        self.check_fault(EntityKind::SectionContent, StoreOperation::FindByIds)?;
        let state = self.state();
        Ok(ids
            .iter()
            .filter_map(|id| state.section_contents.get(id.get()))
            .collect())
    }

    async fn list_by_section(
        &self,
        section_id: SectionId,
        page: PageRequest,
    ) -> Result<Page<SectionContent>, ResourceStoreError> {
        self.check_fault(EntityKind::SectionContent, StoreOperation::List)?;
        let mut rows: Vec<SectionContent> = self
            .state()
            .section_contents
            .rows
            .values()
            .filter(|row| row.section_id == section_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.order, row.id));
        Ok(paginate(rows, page))
    }

    async fn update(&self, content: &SectionContent) -> Result<SectionContent, ResourceStoreError> {
        self.check_fault(EntityKind::SectionContent, StoreOperation::Update)?;
        let mut state = self.state();
        let stored = state
            .section_contents
            .rows
            .get_mut(&content.id.get())
            .ok_or_else(|| missing(EntityKind::SectionContent, content.id))?;
        stored.kind = content.kind;
        stored.content.clone_from(&content.content);
        stored.updated_at = content.updated_at;
        Ok(stored.clone())
    }

    async fn update_order(
        &self,
        id: SectionContentId,
        order: u32,
    ) -> Result<(), ResourceStoreError> {
        self.check_fault(EntityKind::SectionContent, StoreOperation::UpdatePosition)?;
        let mut state = self.state();
        let stored = state
            .section_contents
            .rows
            .get_mut(&id.get())
            .ok_or_else(|| missing(EntityKind::SectionContent, id))?;
        stored.order = order;
        Ok(())
    }

    async fn bulk_update_orders(
        &self,
        updates: &[PositionUpdate<SectionContentId>],
    ) -> Result<(), ResourceStoreError> {
        self.check_fault(EntityKind::SectionContent, StoreOperation::BulkUpdatePositions)?;
        let mut state = self.state();
        if let Some(absent) = updates
            .iter()
            .find(|update| !state.section_contents.rows.contains_key(&update.id.get()))
        {
            return Err(missing(EntityKind::SectionContent, absent.id));
        }
        for update in updates {
            if let Some(stored) = state.section_contents.rows.get_mut(&update.id.get()) {
                stored.order = update.position;
            }
        }
        Ok(())
    }

    async fn delete(&self, id: SectionContentId) -> Result<bool, ResourceStoreError> {
        self.check_fault(EntityKind::SectionContent, StoreOperation::Delete)?;
        Ok(self.state().section_contents.rows.remove(&id.get()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    async fn seed_portfolio(store: &InMemoryStore, title: &str) -> Portfolio {
        if UserRepository::find_by_id(store, UserId::new(1))
            .await
            .expect("lookup")
            .is_none()
        {
            UserRepository::create(
                store,
                &NewUser {
                    external_id: "auth0|ada".to_owned(),
                    email: "ada@example.com".to_owned(),
                    name: "Ada".to_owned(),
                    created_at: Utc::now(),
                },
            )
            .await
            .expect("user");
        }
        PortfolioRepository::create(
            store,
            &NewPortfolio {
                owner_id: UserId::new(1),
                title: title.to_owned(),
                description: String::new(),
                created_at: Utc::now(),
            },
        )
        .await
        .expect("portfolio")
    }

    async fn seed_category(store: &InMemoryStore, portfolio: PortfolioId, title: &str) -> Category {
        CategoryRepository::create(
            store,
            &NewCategory {
                portfolio_id: portfolio,
                owner_id: UserId::new(1),
                title: title.to_owned(),
                description: String::new(),
                position: 0,
                created_at: Utc::now(),
            },
        )
        .await
        .expect("category")
    }

    #[rstest]
    #[tokio::test]
    async fn titles_collide_ignoring_case(store: InMemoryStore) {
        let portfolio = seed_portfolio(&store, "Main").await;
        seed_category(&store, portfolio.id, "Web").await;

        let err = CategoryRepository::create(
            &store,
            &NewCategory {
                portfolio_id: portfolio.id,
                owner_id: UserId::new(1),
                title: "WEB".to_owned(),
                description: String::new(),
                position: 1,
                created_at: Utc::now(),
            },
        )
        .await
        .expect_err("duplicate");

        assert!(matches!(err, ResourceStoreError::DuplicateTitle { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_portfolio_cascades(store: InMemoryStore) {
        let portfolio = seed_portfolio(&store, "Main").await;
        seed_category(&store, portfolio.id, "Web").await;
        seed_category(&store, portfolio.id, "Print").await;

        assert!(
            PortfolioRepository::delete(&store, portfolio.id)
                .await
                .expect("deleted")
        );
        assert_eq!(store.row_count(EntityKind::Category), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn bulk_updates_are_all_or_nothing(store: InMemoryStore) {
        let portfolio = seed_portfolio(&store, "Main").await;
        let web = seed_category(&store, portfolio.id, "Web").await;

        let err = CategoryRepository::bulk_update_positions(
            &store,
            &[
                PositionUpdate::new(web.id, 5),
                PositionUpdate::new(CategoryId::new(99), 6),
            ],
        )
        .await
        .expect_err("missing row");

        assert!(matches!(err, ResourceStoreError::Missing { .. }));
        assert_eq!(store.categories_of(portfolio.id)[0].position, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn injected_failures_fire_once(store: InMemoryStore) {
        store.inject_failure(
            EntityKind::Portfolio,
            StoreOperation::FindById,
            ResourceStoreError::connection("down"),
        );

        assert!(
            PortfolioRepository::find_by_id(&store, PortfolioId::new(1))
                .await
                .is_err()
        );
        assert!(
            PortfolioRepository::find_by_id(&store, PortfolioId::new(1))
                .await
                .is_ok()
        );
    }

    #[rstest]
    fn pages_slice_after_sorting() {
        let page = paginate((1..=25).collect::<Vec<u32>>(), PageRequest::new(3, 10));

        assert_eq!(page.items, (21..=25).collect::<Vec<_>>());
        assert_eq!(page.total, 25);
    }
}
