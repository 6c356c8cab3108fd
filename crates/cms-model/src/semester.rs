//! Semester slots
//!
//! A slot is the grouping and sort key for curriculum courses: year ascending,
//! then `first < second < midyear`.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Term within an academic year
///
/// Declaration order is the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Semester {
    /// First semester
    #[default]
    First,
    /// Second semester
    Second,
    /// Summer / midyear term
    Midyear,
}

impl Semester {
    /// Wire name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Midyear => "midyear",
        }
    }
}

impl Display for Semester {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (year, semester) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SemesterSlot {
    /// Curriculum year, starting at 1
    pub year: u8,
    /// Term within the year
    pub sem: Semester,
}

impl SemesterSlot {
    /// Create slot
    #[inline]
    #[must_use]
    pub const fn new(year: u8, sem: Semester) -> Self {
        Self { year, sem }
    }
}

impl Default for SemesterSlot {
    fn default() -> Self {
        Self::new(1, Semester::First)
    }
}

impl Display for SemesterSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "year {} {}", self.year, self.sem)
    }
}
