//! Wizard step numbers.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A wizard step in the range `1..=7`.
///
/// Serialized as a bare number. Out-of-range values fail to decode, which
/// sends a stale snapshot down the load fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Step(u8);

impl Step {
    pub const CATEGORY: Self = Self(1);
    pub const SERVICE: Self = Self(2);
    pub const LOCATION: Self = Self(3);
    pub const SCHEDULE: Self = Self(4);
    pub const DETAILS: Self = Self(5);
    pub const ADDRESS: Self = Self(6);
    pub const REVIEW: Self = Self(7);

    pub const FIRST: Self = Self::CATEGORY;
    pub const LAST: Self = Self::REVIEW;

    /// Returns `None` when `number` is outside `1..=7`.
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        if number >= Self::FIRST.0 && number <= Self::LAST.0 {
            Some(Self(number))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// The following step, or `None` on the review step.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// The preceding step, or `None` on the first step.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        Self::new(self.0.saturating_sub(1))
    }

    /// Label shown in the progress stepper.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self.0 {
            1 => "Category",
            2 => "Service",
            3 => "Location",
            4 => "Date & Time",
            5 => "Details",
            6 => "Address",
            _ => "Review",
        }
    }

    /// All steps in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::FIRST.0..=Self::LAST.0).map(Self)
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for Step {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value).ok_or(Error::InvalidStep { step: value })
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
