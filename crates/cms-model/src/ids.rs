//! Typed identifiers
//!
//! Every entity collection is keyed by its own newtype so a PEO id can never
//! be passed where a PO id is expected.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Identifier minted locally as `max(existing) + 1`
///
/// The scheme is only collision-free within one editing session: two clients
/// editing the same document can mint the same id before either submits.
pub trait SequentialId: Copy + Ord {
    /// Wrap a raw value
    fn from_raw(raw: u32) -> Self;

    /// Unwrap to the raw value
    fn raw(self) -> u32;

    /// Next id after everything in `existing` (1 when empty)
    #[must_use]
    fn next_after<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let max = existing.into_iter().map(Self::raw).max().unwrap_or(0);
        Self::from_raw(max.saturating_add(1))
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Create from raw value
            #[inline]
            #[must_use]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Raw value
            #[inline]
            #[must_use]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl SequentialId for $name {
            #[inline]
            fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            #[inline]
            fn raw(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

define_id!(
    /// Program educational objective id
    PeoId,
    "PEO"
);
define_id!(
    /// Program outcome id
    PoId,
    "PO"
);
define_id!(
    /// Institutional mission id
    MissionId,
    "M"
);
define_id!(
    /// Graduate attribute id
    GaId,
    "GA"
);
define_id!(
    /// Course category id (server-assigned)
    CategoryId,
    "CAT"
);
define_id!(
    /// Course outcome id
    CourseOutcomeId,
    "CO"
);
define_id!(
    /// Assessment (TLA) task id
    TaskId,
    "T"
);
define_id!(
    /// Teaching method catalog id
    TeachingMethodId,
    "TM"
);
define_id!(
    /// Learning resource catalog id
    LearningResourceId,
    "LR"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_after_empty_is_one() {
        assert_eq!(PeoId::next_after(std::iter::empty()), PeoId(1));
    }

    #[test]
    fn next_after_takes_max_not_len() {
        let ids = [PeoId(1), PeoId(7), PeoId(3)];
        assert_eq!(PeoId::next_after(ids), PeoId(8));
    }

    #[test]
    fn display_uses_prefix() {
        assert_eq!(PoId(4).to_string(), "PO4");
        assert_eq!(CourseOutcomeId(2).to_string(), "CO2");
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&GaId(12)).unwrap();
        assert_eq!(json, "12");
        let back: GaId = serde_json::from_str("12").unwrap();
        assert_eq!(back, GaId(12));
    }
}
