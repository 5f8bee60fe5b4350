//! Module with schedule and exam models compatible with the scheduling backend's REST API
use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Weekday a calendar date falls on.
    pub fn of(date: NaiveDate) -> Self {
        Self::ALL[date.weekday().num_days_from_monday() as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.name() == s)
            .ok_or_else(|| format!("unknown weekday {s:?}"))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    #[default]
    Published,
    Draft,
}

/// A recurring lecture, held on every day of `days` between `start_time` and `end_time`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: u32,
    pub event_type: String,
    pub start_time: String,
    pub end_time: String,
    pub days: BTreeSet<Weekday>,
    pub academic_year: String,
    pub year: u32,
    #[serde(default)]
    pub status: ScheduleStatus,
    pub subject_name: String,
    pub instructor_name: String,
    pub semester_name: String,
    pub location_name: String,
    /// Ids behind the names, needed to edit or publish the record.
    pub subject_id: u32,
    pub instructor_id: u32,
    pub semester_id: u32,
    pub location_id: u32,
}

/// A single exam sitting on `date` at `hour`, within the exam period `afati`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExamItem {
    pub id: u32,
    pub event_type: String,
    pub academic_year: String,
    pub year: u32,
    #[serde(deserialize_with = "calendar_date")]
    pub date: NaiveDate,
    pub hour: String,
    pub afati: String,
    pub subject: String,
    pub instructor: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub afati_id: u32,
    #[serde(default)]
    pub subject_id: u32,
    #[serde(default)]
    pub instructor_id: u32,
}

/// Accepts both `2025-01-20` and full timestamps such as `2025-01-20T00:00:00.000Z`,
/// keeping only the calendar date.
fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let date_part = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(serde::de::Error::custom)
}
