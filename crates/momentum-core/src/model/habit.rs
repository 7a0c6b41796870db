//! Habit entity and the frequency evaluator.
//!
//! `Habit::applies_on` is the single applicability check shared by the
//! statistics engine, UI availability queries, and tests. It is a pure
//! function of the habit's frequency settings and the date; it never looks
//! at "today" or any other ambient state.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::color::Color;

/// How often a habit recurs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Applies every day
    #[default]
    Daily,
    /// Applies on the weekdays listed in `Habit::weekdays`
    Weekly,
    /// Applies on the day of month in `Habit::day_of_month`
    Monthly,
}

/// A recurring habit with calendar-day completion records.
///
/// `completed_dates` holds one entry per calendar day; being a set, repeat
/// completions for the same day are deduplicated by construction. Entries
/// are only added for dates where [`Habit::applies_on`] is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier, assigned at creation and never changed
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Free-form category label
    pub category: String,
    pub frequency: Frequency,
    /// Accent color shown by the UI and the widget
    pub color: Color,
    /// Inactive habits are kept but excluded from the widget projection
    pub active: bool,
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp, also the merge token for widget sync
    pub updated_at: DateTime<Utc>,
    /// Calendar days on which the habit was completed
    #[serde(default)]
    pub completed_dates: BTreeSet<NaiveDate>,
    /// Weekday indices (0=Sunday..6=Saturday); used when frequency is weekly
    #[serde(default)]
    pub weekdays: BTreeSet<u8>,
    /// Target day of month (1-31); required when frequency is monthly
    #[serde(default)]
    pub day_of_month: Option<u32>,
}

impl Habit {
    /// Create a new active daily habit.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Habit {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            category: String::new(),
            frequency: Frequency::Daily,
            color: Color::default(),
            active: true,
            created_at: now,
            updated_at: now,
            completed_dates: BTreeSet::new(),
            weekdays: BTreeSet::new(),
            day_of_month: None,
        }
    }

    /// Whether the habit counts on `date`.
    ///
    /// - Daily: always true.
    /// - Weekly: true iff the date's weekday (0=Sunday) is selected.
    /// - Monthly: true iff the day of month matches exactly. A target day
    ///   past the end of a month never matches that month; there is no
    ///   clamping.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        match self.frequency {
            Frequency::Daily => true,
            Frequency::Weekly => {
                let weekday = date.weekday().num_days_from_sunday() as u8;
                self.weekdays.contains(&weekday)
            }
            Frequency::Monthly => self.day_of_month == Some(date.day()),
        }
    }

    /// Whether a completion is recorded for `date`.
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// Toggle the completion record for `date`.
    ///
    /// Marking an already-marked day removes the entry, so two toggles for
    /// the same day restore the original set. Dates where the habit does
    /// not apply are ignored; returns whether the set changed.
    pub fn toggle_completion(&mut self, date: NaiveDate) -> bool {
        if !self.applies_on(date) {
            return false;
        }
        if !self.completed_dates.remove(&date) {
            self.completed_dates.insert(date);
        }
        self.updated_at = Utc::now();
        true
    }
}
