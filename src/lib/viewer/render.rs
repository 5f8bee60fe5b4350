use std::{error::Error, fs::File, io::Write, path::Path};

use chrono::NaiveDate;
use log::info;

use crate::viewer::{
    helpers::{parse_minutes, CalendarEvent},
    models::schedule_model::{ExamItem, ScheduleItem, Weekday},
};

/// Presentational form of a lecture or an exam.
#[derive(Debug, Clone, PartialEq)]
pub struct EventItem {
    pub title: String,
    pub event_type: String,
    pub time_label: String,
    pub start_minutes: u32,
    pub details: Vec<(&'static str, String)>,
}

pub type DayItems = Vec<(NaiveDate, Vec<EventItem>)>;

/// `HH:MM:SS` -> `HH:MM`, anything shorter is returned as is.
pub fn short_time(time: &str) -> &str {
    time.get(..5).unwrap_or(time)
}

impl EventItem {
    pub fn from_schedule(item: &ScheduleItem) -> Self {
        Self {
            title: item.subject_name.clone(),
            event_type: item.event_type.clone(),
            time_label: format!(
                "{}-{}",
                short_time(&item.start_time),
                short_time(&item.end_time)
            ),
            start_minutes: parse_minutes(&item.start_time),
            details: vec![
                ("Instructor", item.instructor_name.clone()),
                ("Location", item.location_name.clone()),
                ("Semester", item.semester_name.clone()),
                ("Study year", item.year.to_string()),
            ],
        }
    }

    pub fn from_exam(item: &ExamItem) -> Self {
        let mut details = vec![
            ("Instructor", item.instructor.clone()),
            ("Afati", item.afati.clone()),
        ];
        if let Some(location) = &item.location {
            details.push(("Location", location.clone()));
        }
        details.push(("Study year", item.year.to_string()));
        Self {
            title: item.subject.clone(),
            event_type: item.event_type.clone(),
            time_label: short_time(&item.hour).to_owned(),
            start_minutes: parse_minutes(&item.hour),
            details,
        }
    }
}

pub fn to_day_items<T: CalendarEvent>(grouped: &[(NaiveDate, Vec<&T>)]) -> DayItems {
    grouped
        .iter()
        .map(|(day, events)| {
            (
                *day,
                events.iter().map(|event| event.to_event_item()).collect(),
            )
        })
        .collect()
}

/// Puts lectures and exams of the same days side by side, keeping each day sorted by start
/// time. On equal start times items of `first` come before items of `second`.
pub fn merge_days(first: DayItems, second: DayItems) -> DayItems {
    let mut merged = first;
    for (day, items) in second {
        match merged.iter_mut().find(|(merged_day, _)| *merged_day == day) {
            Some((_, merged_items)) => merged_items.extend(items),
            None => merged.push((day, items)),
        }
    }
    merged.sort_by_key(|(day, _)| *day);
    for (_, items) in merged.iter_mut() {
        items.sort_by_key(|item| item.start_minutes);
    }
    merged
}

fn day_header(day: NaiveDate) -> String {
    format!("{}, {}", Weekday::of(day), day.format("%Y-%m-%d"))
}

/* form string of information about a single event */
fn format_event_as_string(item: &EventItem) -> String {
    let mut out = format!(
        "  {}  [{}] {}\n",
        item.time_label, item.event_type, item.title
    );
    for (label, value) in &item.details {
        out.push_str(&format!("      {}: {}\n", label, value));
    }
    out
}

/// Plain text view for the terminal. Empty days are omitted when `skip_empty` is set.
pub fn render_days_text(days: &DayItems, skip_empty: bool) -> String {
    let mut acc = Vec::new();
    for (day, items) in days {
        if items.is_empty() && skip_empty {
            continue;
        }
        let mut block = format!("{}\n", day_header(*day));
        if items.is_empty() {
            block.push_str("  No events\n");
        }
        for item in items {
            block.push_str(&format_event_as_string(item));
        }
        acc.push(block);
    }
    if acc.is_empty() {
        return "No events\n".to_owned();
    }
    acc.join("\n")
}

pub fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn format_event_as_html(item: &EventItem) -> String {
    let details = item
        .details
        .iter()
        .map(|(label, value)| format!("<b>{}:</b> {}", label, escape_html(value)))
        .collect::<Vec<_>>()
        .join("<br>");
    format!(
        "<div class=\"event\"><b>{}</b> <em>{}</em> {}<br>{}</div>",
        escape_html(&item.time_label),
        escape_html(&item.event_type),
        escape_html(&item.title),
        details
    )
}

/// Printable HTML document of a view, one section per day.
pub fn render_days_html(title: &str, days: &DayItems) -> String {
    let sections = days
        .iter()
        .map(|(day, items)| {
            let body = if items.is_empty() {
                "<p>No events</p>".to_owned()
            } else {
                items
                    .iter()
                    .map(format_event_as_html)
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            format!(
                "<section><h2>{}</h2>\n{}\n</section>",
                escape_html(&day_header(*day)),
                body
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{0}</title></head>\n<body>\n<h1>{0}</h1>\n{1}\n</body>\n</html>\n",
        escape_html(title),
        sections
    )
}

pub fn write_html_export(path: &Path, html: &str) -> Result<(), Box<dyn Error>> {
    info!(
        "Writing HTML export to {}",
        std::path::absolute(path)?.display()
    );
    let mut file = File::create(path)?;
    file.write_all(html.as_bytes())?;
    Ok(())
}
