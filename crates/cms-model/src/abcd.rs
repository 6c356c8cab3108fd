//! ABCD framing of a course outcome statement
//!
//! Audience / Behavior / Condition / Degree. The validity rule is a UI-level
//! business rule: behavior, condition and degree must each occur literally in
//! the CO statement, at positions that do not overlap one another. Storage
//! never enforces it; callers evaluate [`Abcd::validate`] when they need it.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::ops::Range;

/// The four ABCD fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abcd {
    /// Who performs the behavior
    #[serde(default)]
    pub audience: String,
    /// Observable verb phrase
    #[serde(default)]
    pub behavior: String,
    /// Circumstances of performance
    #[serde(default)]
    pub condition: String,
    /// Acceptance criterion
    #[serde(default)]
    pub degree: String,
}

/// Field checked by the predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbcdField {
    /// Behavior
    Behavior,
    /// Condition
    Condition,
    /// Degree
    Degree,
}

impl Display for AbcdField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Behavior => "behavior",
            Self::Condition => "condition",
            Self::Degree => "degree",
        })
    }
}

/// ABCD predicate failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbcdError {
    /// Field left blank
    #[error("{0} is empty")]
    Empty(AbcdField),

    /// Field text does not occur in the statement
    #[error("{field} {text:?} does not appear in the outcome statement")]
    NotInStatement {
        /// Offending field
        field: AbcdField,
        /// Its text
        text: String,
    },

    /// No placement keeps the three fields apart
    #[error("{first} and {second} overlap in the outcome statement")]
    Overlapping {
        /// First field of the clashing pair
        first: AbcdField,
        /// Second field of the clashing pair
        second: AbcdField,
    },
}

impl Abcd {
    /// Check the fields against `statement`
    ///
    /// Every occurrence of each field is considered, so a phrase repeated in
    /// the statement passes as long as some placement is disjoint.
    ///
    /// # Errors
    /// Returns the first rule the fields break
    pub fn validate(&self, statement: &str) -> Result<(), AbcdError> {
        let fields = [
            (AbcdField::Behavior, self.behavior.trim()),
            (AbcdField::Condition, self.condition.trim()),
            (AbcdField::Degree, self.degree.trim()),
        ];

        let mut spans: Vec<Vec<Range<usize>>> = Vec::with_capacity(fields.len());
        for (field, text) in fields {
            if text.is_empty() {
                return Err(AbcdError::Empty(field));
            }
            let found: Vec<Range<usize>> = statement
                .match_indices(text)
                .map(|(start, m)| start..start + m.len())
                .collect();
            if found.is_empty() {
                return Err(AbcdError::NotInStatement {
                    field,
                    text: text.to_string(),
                });
            }
            spans.push(found);
        }

        for b in &spans[0] {
            for c in &spans[1] {
                if overlaps(b, c) {
                    continue;
                }
                if spans[2].iter().any(|d| !overlaps(b, d) && !overlaps(c, d)) {
                    return Ok(());
                }
            }
        }

        Err(first_clash(&spans, &fields))
    }

    /// Predicate as a boolean
    #[inline]
    #[must_use]
    pub fn is_valid_for(&self, statement: &str) -> bool {
        self.validate(statement).is_ok()
    }
}

#[inline]
fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Name the pair that cannot be separated
fn first_clash(spans: &[Vec<Range<usize>>], fields: &[(AbcdField, &str); 3]) -> AbcdError {
    let pairs = [(0, 1), (0, 2), (1, 2)];
    for (i, j) in pairs {
        let separable = spans[i]
            .iter()
            .any(|a| spans[j].iter().any(|b| !overlaps(a, b)));
        if !separable {
            return AbcdError::Overlapping {
                first: fields[i].0,
                second: fields[j].0,
            };
        }
    }
    AbcdError::Overlapping {
        first: fields[0].0,
        second: fields[2].0,
    }
}
