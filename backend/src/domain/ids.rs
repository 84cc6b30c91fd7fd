//! Numeric identifiers for every persisted entity.
//!
//! Storage hands out positive `u64` keys. The value `0` is reserved as the
//! "unset" marker that inbound adapters produce when a caller omits an ID;
//! use-case services reject it with [`ErrorCode::InvalidInput`] before doing
//! any I/O.
//!
//! [`ErrorCode::InvalidInput`]: super::ErrorCode::InvalidInput

use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::{EntityKind, Error};

/// Behaviour shared by the identifier newtypes.
pub trait EntityId:
    Copy + Eq + Hash + Ord + Debug + Display + Send + Sync + 'static
{
    /// Entity type this identifier addresses.
    const KIND: EntityKind;

    /// Raw storage key.
    fn raw(self) -> u64;

    /// Reject the unset sentinel.
    fn ensure_set(self) -> Result<Self, Error> {
        if self.raw() == 0 {
            return Err(Error::invalid_input(format!(
                "{} id must be a positive integer",
                Self::KIND
            )));
        }
        Ok(self)
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw storage key.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Raw storage key.
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Whether this is the `0` sentinel.
            pub const fn is_unset(self) -> bool {
                self.0 == 0
            }
        }

        impl EntityId for $name {
            const KIND: EntityKind = EntityKind::$kind;

            fn raw(self) -> u64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`User`](super::User).
    UserId => User
);
define_id!(
    /// Identifier of a [`Portfolio`](super::Portfolio).
    PortfolioId => Portfolio
);
define_id!(
    /// Identifier of a [`Category`](super::Category).
    CategoryId => Category
);
define_id!(
    /// Identifier of a [`Section`](super::Section).
    SectionId => Section
);
define_id!(
    /// Identifier of a [`Project`](super::Project).
    ProjectId => Project
);
define_id!(
    /// Identifier of a [`SectionContent`](super::SectionContent).
    SectionContentId => SectionContent
);
