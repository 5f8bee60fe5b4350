use std::{error::Error, fs::File, io::BufReader, path::Path};

use chrono::{Datelike, Days, NaiveDate};
use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::viewer::{
    models::{
        schedule_model::{ExamItem, ScheduleItem, ScheduleStatus, Weekday},
        FilterOptions, Selection, ViewMode,
    },
    render::EventItem,
};

/// Anything that can be placed on a calendar day.
pub trait CalendarEvent {
    fn occurs_on(&self, date: NaiveDate) -> bool;
    fn start_time(&self) -> &str;
    fn to_event_item(&self) -> EventItem;
}

/// Fields the filter panel restricts on.
pub trait Filterable {
    fn academic_year(&self) -> &str;
    /// Semester for schedules, afati for exams.
    fn term(&self) -> &str;
    fn study_year(&self) -> u32;
}

impl CalendarEvent for ScheduleItem {
    fn occurs_on(&self, date: NaiveDate) -> bool {
        self.days.contains(&Weekday::of(date))
    }

    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn to_event_item(&self) -> EventItem {
        EventItem::from_schedule(self)
    }
}

impl CalendarEvent for ExamItem {
    fn occurs_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    fn start_time(&self) -> &str {
        &self.hour
    }

    fn to_event_item(&self) -> EventItem {
        EventItem::from_exam(self)
    }
}

impl Filterable for ScheduleItem {
    fn academic_year(&self) -> &str {
        &self.academic_year
    }

    fn term(&self) -> &str {
        &self.semester_name
    }

    fn study_year(&self) -> u32 {
        self.year
    }
}

impl Filterable for ExamItem {
    fn academic_year(&self) -> &str {
        &self.academic_year
    }

    fn term(&self) -> &str {
        &self.afati
    }

    fn study_year(&self) -> u32 {
        self.year
    }
}

/// Minutes since midnight of an `HH:MM` or `HH:MM:SS` string. Malformed input counts as 0.
pub fn parse_minutes(time: &str) -> u32 {
    let mut parts = time.trim().split(':');
    let (Some(hour), Some(minute)) = (parts.next(), parts.next()) else {
        return 0;
    };
    match (hour.parse::<u32>(), minute.parse::<u32>()) {
        (Ok(hour), Ok(minute)) => hour
            .checked_mul(60)
            .and_then(|minutes| minutes.checked_add(minute))
            .unwrap_or(0),
        _ => 0,
    }
}

/// "Year 2" -> 2. `None` when there are no digits at all.
pub fn extract_study_year(raw: &str) -> Option<u32> {
    raw.chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .ok()
}

fn selection_matches(selection: &Selection, value: &str) -> bool {
    match selection {
        Selection::All => true,
        Selection::Only(wanted) => wanted == value,
    }
}

pub fn matches_filter<T: Filterable>(item: &T, filter: &FilterOptions) -> bool {
    let study_year_matches = match &filter.study_year {
        Selection::All => true,
        Selection::Only(wanted) => extract_study_year(wanted) == Some(item.study_year()),
    };
    selection_matches(&filter.academic_year, item.academic_year())
        && selection_matches(&filter.term, item.term())
        && study_year_matches
}

/// Whether any record is filed under the selected term. Always true for the sentinel.
pub fn names_term<T: Filterable>(items: &[T], term: &Selection) -> bool {
    match term {
        Selection::All => true,
        Selection::Only(wanted) => items.iter().any(|item| item.term() == wanted),
    }
}

/// Filters for lectures and exams shown together. A term selection restricts only the kind
/// it names: a semester leaves exams alone, an afati leaves lectures alone. A term named by
/// neither kind or by both restricts both.
pub fn split_term_filter(
    schedules: &[ScheduleItem],
    exams: &[ExamItem],
    filter: &FilterOptions,
) -> (FilterOptions, FilterOptions) {
    let names_semester = names_term(schedules, &filter.term);
    let names_afati = names_term(exams, &filter.term);
    let schedule_filter = if names_afati && !names_semester {
        filter.without_term()
    } else {
        filter.clone()
    };
    let exam_filter = if names_semester && !names_afati {
        filter.without_term()
    } else {
        filter.clone()
    };
    (schedule_filter, exam_filter)
}

/// Records passing `filter`, in input order. The fetched list itself is left untouched.
pub fn apply_filter<'a, T: Filterable>(items: &'a [T], filter: &FilterOptions) -> Vec<&'a T> {
    let passed = items
        .iter()
        .filter(|item| matches_filter(*item, filter))
        .collect::<Vec<_>>();
    debug!("{} of {} records passed {:?}", passed.len(), items.len(), filter);
    passed
}

/// Drafts stay out of the calendar until they are published.
pub fn published_only(items: Vec<ScheduleItem>) -> Vec<ScheduleItem> {
    items
        .into_iter()
        .filter(|item| item.status == ScheduleStatus::Published)
        .collect()
}

/// Events held on `date`, ascending by start time. Equal start times keep input order.
pub fn events_on<'a, T, I>(items: I, date: NaiveDate) -> Vec<&'a T>
where
    T: CalendarEvent + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut day_events = items
        .into_iter()
        .filter(|event| event.occurs_on(date))
        .collect::<Vec<_>>();
    day_events.sort_by_key(|event| parse_minutes(event.start_time()));
    day_events
}

/// The Monday-anchored week containing `reference`.
pub fn week_days(reference: NaiveDate) -> Vec<NaiveDate> {
    let monday = reference
        .checked_sub_days(Days::new(reference.weekday().num_days_from_monday().into()))
        .unwrap_or(reference);
    monday.iter_days().take(7).collect()
}

/// Every day of the month containing `reference`.
pub fn month_days(reference: NaiveDate) -> Vec<NaiveDate> {
    let first = reference.with_day(1).unwrap_or(reference);
    first
        .iter_days()
        .take_while(|day| day.month() == first.month())
        .collect()
}

pub fn days_for_view(view: ViewMode, reference: NaiveDate) -> Vec<NaiveDate> {
    match view {
        ViewMode::Day => vec![reference],
        ViewMode::Week => week_days(reference),
        ViewMode::Month => month_days(reference),
    }
}

/// Partitions `items` over `days`, each day sorted by start time.
pub fn group_by_day<'a, T: CalendarEvent>(
    items: &[&'a T],
    days: &[NaiveDate],
) -> Vec<(NaiveDate, Vec<&'a T>)> {
    days.iter()
        .map(|day| (*day, events_on(items.iter().copied(), *day)))
        .collect()
}

/// Reads a JSON document, e.g. a dump of `/schedules` or a form filled in by hand.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    info!(
        "Reading {} from {}",
        path.file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default(),
        std::path::absolute(path)?.display()
    );
    let file = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(file)?)
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
