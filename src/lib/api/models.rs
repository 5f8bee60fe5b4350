use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use serde::Deserialize;

/// Paths of the REST endpoints served by the scheduling backend.
pub mod endpoints {
    pub const SEMESTERS: &str = "/semesters";
    pub const INSTRUCTORS: &str = "/instructors";
    pub const SUBJECTS: &str = "/subjects";
    pub const CLASS_LOCATIONS: &str = "/class-locations";
    pub const ACADEMIC_YEARS: &str = "/academic-year";
    pub const AFATI: &str = "/afati";
    pub const SCHEDULES: &str = "/schedules";
    pub const SCHEDULE_PREVIEW: &str = "/schedules/preview";
    pub const EXAMS: &str = "/exams";
    pub const LOGIN: &str = "/auth/login";
    pub const EMAIL: &str = "/email/send";
}

/// A model for describing configuration of the tools.
/// Consists of:
/// 1. Base URL of the scheduling REST backend
/// 2. Base URL that preview tokens are appended to when a link is shared
/// 3. Path to the file that keeps the bearer token between runs
/// 4. Timeout for a single request, in seconds
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    #[serde(default)]
    pub preview_base_url: String,
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_token_path() -> PathBuf {
    PathBuf::from("token.json")
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Reads `config.json` and lets `SCHED_`-prefixed environment variables override it.
    pub fn load(config_json_path: &Path) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Json::file(config_json_path))
            .merge(Env::prefixed("SCHED_"))
            .extract()
    }
}
