//! Small composite types shared by several objects.

use anilist_core::{ArgValue, Argument};
use anilist_macros::Entity;
use chrono::NaiveDate;

/// A date where any part may be unknown, e.g. only the year of a release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Entity)]
pub struct FuzzyDate {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub day: Option<i32>,
}

impl FuzzyDate {
    /// Whether no part of the date is known.
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }

    /// The calendar date, when all three parts are known and valid.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let month = u32::try_from(self.month?).ok()?;
        let day = u32::try_from(self.day?).ok()?;
        NaiveDate::from_ymd_opt(self.year?, month, day)
    }
}

impl From<NaiveDate> for FuzzyDate {
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            year: Some(date.year()),
            month: Some(date.month() as i32),
            day: Some(date.day() as i32),
        }
    }
}

impl From<FuzzyDate> for ArgValue {
    /// Renders only the known parts, as a `FuzzyDateInput` literal.
    fn from(date: FuzzyDate) -> Self {
        let parts = [("year", date.year), ("month", date.month), ("day", date.day)];
        ArgValue::Object(
            parts
                .into_iter()
                .filter_map(|(name, part)| part.map(|value| Argument::new(name, value)))
                .collect(),
        )
    }
}

/// Image URLs in the sizes AniList serves.
#[derive(Debug, Clone, Default, PartialEq, Entity)]
pub struct Image {
    pub large: Option<String>,
    pub medium: Option<String>,
}

impl Image {
    /// The largest available URL.
    pub fn best(&self) -> Option<&str> {
        self.large.as_deref().or(self.medium.as_deref())
    }
}

/// Name of a character or staff member.
#[derive(Debug, Clone, Default, PartialEq, Entity)]
pub struct Name {
    pub first: Option<String>,
    pub middle: Option<String>,
    pub last: Option<String>,
    pub full: Option<String>,
    pub native: Option<String>,
    pub alternative: Option<Vec<String>>,
    pub user_preferred: Option<String>,
}

impl Name {
    /// The user-preferred name, falling back to the full name.
    pub fn preferred(&self) -> Option<&str> {
        self.user_preferred.as_deref().or(self.full.as_deref())
    }
}
