//! Section content: ordered content blocks rendered inside a section.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Error, SectionContentId, SectionId, UserId};

/// Kind of content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Image,
    Video,
    Link,
    Code,
}

impl ContentKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Link => "link",
            Self::Code => "code",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "link" => Ok(Self::Link),
            "code" => Ok(Self::Code),
            other => Err(Error::invalid_input(format!(
                "unknown content type `{other}`"
            ))),
        }
    }
}

/// Persisted content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionContent {
    pub id: SectionContentId,
    pub section_id: SectionId,
    /// Creation-time copy of the portfolio owner.
    pub owner_id: UserId,
    pub kind: ContentKind,
    pub content: String,
    pub order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for [`SectionContent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSectionContent {
    pub section_id: SectionId,
    pub owner_id: UserId,
    pub kind: ContentKind,
    pub content: String,
    pub order: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("text", ContentKind::Text)]
    #[case(" Image ", ContentKind::Image)]
    #[case("CODE", ContentKind::Code)]
    fn parses_known_kinds(#[case] raw: &str, #[case] expected: ContentKind) {
        assert_eq!(raw.parse::<ContentKind>().expect("known"), expected);
    }

    #[rstest]
    fn unknown_kinds_are_invalid_input() {
        let err = "gif".parse::<ContentKind>().expect_err("unknown");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidInput);
    }
}
