//! Entity kinds and typed references to owned resources.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, PortfolioId, ProjectId, SectionContentId, SectionId};

/// Every entity type the backend persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Portfolio,
    Category,
    Section,
    Project,
    SectionContent,
}

impl EntityKind {
    /// Label used in audit records, log fields and metric labels.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Portfolio => "portfolio",
            Self::Category => "category",
            Self::Section => "section",
            Self::Project => "project",
            Self::SectionContent => "section_content",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a resource that sits somewhere in a portfolio tree.
///
/// Users are identity anchors rather than owned resources, so they have no
/// variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceRef {
    Portfolio(PortfolioId),
    Category(CategoryId),
    Section(SectionId),
    Project(ProjectId),
    SectionContent(SectionContentId),
}

impl ResourceRef {
    /// Entity type of the referenced resource.
    pub const fn kind(self) -> EntityKind {
        match self {
            Self::Portfolio(_) => EntityKind::Portfolio,
            Self::Category(_) => EntityKind::Category,
            Self::Section(_) => EntityKind::Section,
            Self::Project(_) => EntityKind::Project,
            Self::SectionContent(_) => EntityKind::SectionContent,
        }
    }

    /// Raw numeric identifier of the referenced resource.
    pub const fn raw_id(self) -> u64 {
        match self {
            Self::Portfolio(id) => id.get(),
            Self::Category(id) => id.get(),
            Self::Section(id) => id.get(),
            Self::Project(id) => id.get(),
            Self::SectionContent(id) => id.get(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.raw_id())
    }
}

macro_rules! resource_ref_from {
    ($($id:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$id> for ResourceRef {
                fn from(value: $id) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

resource_ref_from! {
    PortfolioId => Portfolio,
    CategoryId => Category,
    SectionId => Section,
    ProjectId => Project,
    SectionContentId => SectionContent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ResourceRef::from(PortfolioId::new(1)), EntityKind::Portfolio, 1)]
    #[case(ResourceRef::from(CategoryId::new(2)), EntityKind::Category, 2)]
    #[case(ResourceRef::from(SectionId::new(3)), EntityKind::Section, 3)]
    #[case(ResourceRef::from(ProjectId::new(4)), EntityKind::Project, 4)]
    #[case(ResourceRef::from(SectionContentId::new(5)), EntityKind::SectionContent, 5)]
    fn references_report_kind_and_id(
        #[case] reference: ResourceRef,
        #[case] kind: EntityKind,
        #[case] raw: u64,
    ) {
        assert_eq!(reference.kind(), kind);
        assert_eq!(reference.raw_id(), raw);
    }

    #[rstest]
    fn display_names_the_kind() {
        let reference = ResourceRef::SectionContent(SectionContentId::new(9));
        assert_eq!(reference.to_string(), "section_content 9");
    }
}
