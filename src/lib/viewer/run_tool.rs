use std::error::Error;

use chrono::NaiveDate;
use futures::future;
use log::{error, info};

use super::{
    helpers::{
        apply_filter, days_for_view, group_by_day, published_only, split_term_filter,
        CalendarEvent, Filterable,
    },
    models::{Args, EventKind, FilterOptions, ViewMode},
    render::{
        merge_days, render_days_html, render_days_text, to_day_items, write_html_export,
        DayItems,
    },
    schedule_getter::ScheduleGetter,
};

fn day_items_for<T: CalendarEvent + Filterable>(
    items: &[T],
    filter: &FilterOptions,
    days: &[NaiveDate],
) -> DayItems {
    let filtered = apply_filter(items, filter);
    to_day_items(&group_by_day(&filtered, days))
}

fn view_title(view: ViewMode, kind: EventKind, reference: NaiveDate) -> String {
    let what = match kind {
        EventKind::Schedules => "Lectures",
        EventKind::Exams => "Exams",
        EventKind::All => "Lectures and exams",
    };
    match view {
        ViewMode::Day => format!("{} on {}", what, reference.format("%Y-%m-%d")),
        ViewMode::Week => format!("{} in the week of {}", what, reference.format("%Y-%m-%d")),
        ViewMode::Month => format!("{} in {}", what, reference.format("%B %Y")),
    }
}

/// Fetches, filters and renders one calendar view. Returns the text shown on the terminal.
///
/// With [`EventKind::All`] both lists are fetched concurrently; a failed fetch is logged and
/// reported in the output while the other list is still shown.
pub async fn run<SG: ScheduleGetter>(
    schedule_getter: &SG,
    args: &Args,
    today: NaiveDate,
) -> Result<String, Box<dyn Error>> {
    let reference = args.date.unwrap_or(today);
    let filter = args.filter_options();
    let days = days_for_view(args.view, reference);
    let mut notices = Vec::new();

    let day_items = match args.kind {
        EventKind::Schedules => {
            let schedules = published_only(schedule_getter.get_schedules().await?);
            day_items_for(&schedules, &filter, &days)
        }
        EventKind::Exams => day_items_for(&schedule_getter.get_exams().await?, &filter, &days),
        EventKind::All => {
            let (schedules, exams) = future::join(
                schedule_getter.get_schedules(),
                schedule_getter.get_exams(),
            )
            .await;
            let schedules = published_only(schedules.unwrap_or_else(|err| {
                error!("Could not load schedules: {}", err);
                notices.push(format!("! Could not load schedules: {}", err));
                Vec::new()
            }));
            let exams = exams.unwrap_or_else(|err| {
                error!("Could not load exams: {}", err);
                notices.push(format!("! Could not load exams: {}", err));
                Vec::new()
            });
            let (schedule_filter, exam_filter) = split_term_filter(&schedules, &exams, &filter);
            merge_days(
                day_items_for(&schedules, &schedule_filter, &days),
                day_items_for(&exams, &exam_filter, &days),
            )
        }
    };
    info!(
        "Rendering {} day(s) with {} event(s)",
        day_items.len(),
        day_items.iter().map(|(_, items)| items.len()).sum::<usize>()
    );

    let title = view_title(args.view, args.kind, reference);
    if let Some(export_path) = &args.export_html_path {
        write_html_export(export_path, &render_days_html(&title, &day_items))?;
    }

    let mut out = format!("{}\n\n", title);
    for notice in &notices {
        out.push_str(notice);
        out.push('\n');
    }
    out.push_str(&render_days_text(
        &day_items,
        args.view == ViewMode::Month,
    ));
    Ok(out)
}
