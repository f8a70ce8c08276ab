use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseDuration {
    SixMonths,
    SixWeeks,
}

impl CourseDuration {
    /// Display label, e.g. `"6 months"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SixMonths => "6 months",
            Self::SixWeeks => "6 weeks",
        }
    }

    /// Key of the selectable course group, e.g. `"6-month"`.
    pub fn group_key(&self) -> &'static str {
        match self {
            Self::SixMonths => "6-month",
            Self::SixWeeks => "6-week",
        }
    }

    /// Human title of the group as shown on the course plan.
    pub fn group_title(&self) -> &'static str {
        match self {
            Self::SixMonths => "Six-Month Courses",
            Self::SixWeeks => "Six-Week Courses",
        }
    }

    pub fn all() -> &'static [CourseDuration] {
        &[Self::SixMonths, Self::SixWeeks]
    }

    /// Accepts either the display label or the group key, ignoring case and
    /// surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "6 months" | "6-month" => Some(Self::SixMonths),
            "6 weeks" | "6-week" => Some(Self::SixWeeks),
            _ => None,
        }
    }
}

/// A catalogue entry. Immutable once the catalogue is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub fee: Decimal,
    pub duration: CourseDuration,
}

impl Course {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        fee: Decimal,
        duration: CourseDuration,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            fee,
            duration,
        }
    }
}
