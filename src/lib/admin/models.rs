use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

pub mod resource_model;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Semesters,
    Instructors,
    Subjects,
    ClassLocations,
    AcademicYears,
    Afati,
    Schedules,
    Exams,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and keep the bearer token for later runs
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored bearer token
    Logout,
    /// List every record of a resource
    List {
        #[arg(value_enum)]
        resource: ResourceKind,
    },
    /// Create a record from a JSON form
    Create {
        #[arg(value_enum)]
        resource: ResourceKind,
        #[arg(long, value_name = "FILE")]
        form_json_path: PathBuf,
    },
    /// Edit a record; fields missing from the JSON form keep their current value
    Update {
        #[arg(value_enum)]
        resource: ResourceKind,
        id: u32,
        #[arg(long, value_name = "FILE")]
        form_json_path: PathBuf,
    },
    /// Delete a record after confirmation
    Delete {
        #[arg(value_enum)]
        resource: ResourceKind,
        id: u32,
    },
    /// List draft schedules
    Drafts,
    /// Publish a draft schedule
    Publish { id: u32 },
    /// Create a preview link for draft schedules
    PreviewLink {
        #[arg(required = true)]
        ids: Vec<u32>,
    },
    /// Show the frozen bundle behind a preview token
    Preview { token: String },
    /// Email a preview link
    Share {
        #[arg(long)]
        link: String,
        #[arg(long)]
        to: String,
    },
    /// Show how the drafts would change the week of a date
    DraftDiff {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
}

/// A model for describing ARGS of the admin tool.
/// Consists of:
/// 1. Path to config.json, that holds the backend address and the token location.
/// 2. Whether destructive actions are confirmed without asking.
/// 3. The action to perform.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
    #[arg(long, short)]
    pub yes: bool,
    #[command(subcommand)]
    pub command: Command,
}
