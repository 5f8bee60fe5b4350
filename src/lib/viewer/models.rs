use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

pub mod schedule_model;

pub const ALL_ACADEMIC_YEARS: &str = "All Academic Years";
pub const ALL_TERMS: &str = "All Semesters";
pub const ALL_STUDY_YEARS: &str = "All Years";

/// Value of one filter dimension: either the match-all sentinel or a concrete key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Anything starting with `All` ("All Academic Years", "All Afati", ...) and the
    /// empty string select everything.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == "All" || raw.starts_with("All ") {
            Selection::All
        } else {
            Selection::Only(raw.to_owned())
        }
    }
}

/// A model for describing the viewer's filter panel.
/// Consists of:
/// 1. Academic year the records belong to
/// 2. Semester for schedules, exam period (afati) for exams
/// 3. Study year, usually written as "Year N"
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub academic_year: Selection,
    pub term: Selection,
    pub study_year: Selection,
}

impl FilterOptions {
    pub fn new(academic_year: &str, term: &str, study_year: &str) -> Self {
        Self {
            academic_year: Selection::parse(academic_year),
            term: Selection::parse(term),
            study_year: Selection::parse(study_year),
        }
    }

    pub fn without_term(&self) -> Self {
        Self {
            term: Selection::All,
            ..self.clone()
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Day,
    Week,
    Month,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Schedules,
    Exams,
    All,
}

/// A model for describing ARGS of the viewer.
/// Consists of:
/// 1. Path to config.json, that holds the backend address.
/// 2. Calendar view and the kind of records to show.
/// 3. Reference date of the view, today when omitted.
/// 4. Filter selections, "All ..." meaning no restriction.
/// 5. Optional path of an HTML export of the rendered view.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
    #[arg(long, value_enum, default_value_t = ViewMode::Week)]
    pub view: ViewMode,
    #[arg(long, value_enum, default_value_t = EventKind::Schedules)]
    pub kind: EventKind,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
    #[arg(long, default_value = ALL_ACADEMIC_YEARS)]
    pub academic_year: String,
    /// Semester of lectures or afati of exams. With `--kind all` it only restricts the kind
    /// it names.
    #[arg(long, default_value = ALL_TERMS)]
    pub term: String,
    #[arg(long, default_value = ALL_STUDY_YEARS)]
    pub study_year: String,
    #[arg(long, value_name = "FILE")]
    pub export_html_path: Option<PathBuf>,
}

impl Args {
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::new(&self.academic_year, &self.term, &self.study_year)
    }
}
