//! Monotonic stamps for naming new fields.
//!
//! A new field is named `field-<millis>`. Wall-clock milliseconds alone
//! collide when two fields are created inside the same millisecond, so
//! [`FieldStamp::tick`] never returns a value at or below its predecessor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix of every generated field name.
pub const FIELD_NAME_PREFIX: &str = "field-";

/// Milliseconds since the Unix epoch, strictly increasing under [`tick`](Self::tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldStamp(u64);

fn wall_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl FieldStamp {
    /// Creates a stamp at the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self(wall_millis())
    }

    /// Creates a stamp from a raw millisecond value.
    #[must_use]
    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the millisecond value.
    #[must_use]
    pub const fn millis(&self) -> u64 {
        self.0
    }

    /// Generates the next stamp: the current time, or one past `self` if
    /// the clock has not moved forward.
    #[must_use]
    pub fn tick(&self) -> Self {
        let now = wall_millis();
        if now > self.0 {
            Self(now)
        } else {
            Self(self.0.saturating_add(1))
        }
    }

    /// The field name a field created at this stamp receives.
    #[must_use]
    pub fn field_name(&self) -> String {
        format!("{FIELD_NAME_PREFIX}{}", self.0)
    }
}

impl fmt::Display for FieldStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
