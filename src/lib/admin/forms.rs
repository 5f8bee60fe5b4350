use std::{collections::BTreeSet, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    admin::time_mask::{is_valid_time, normalize_time_field},
    viewer::{
        helpers::parse_minutes,
        models::schedule_model::{ScheduleStatus, Weekday},
    },
};

/// Inline message attached to a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_owned(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A form that has to pass validation before anything is sent to the backend.
pub trait Validate {
    /// Field clean-up done when the user leaves the form, e.g. time masks.
    fn normalize(&mut self) {}
    fn validate(&self) -> Vec<FieldError>;
}

fn require(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "is required"));
    }
}

fn require_id(errors: &mut Vec<FieldError>, field: &'static str, id: u32) {
    if id == 0 {
        errors.push(FieldError::new(field, "must be selected"));
    }
}

fn require_time(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(FieldError::new(field, "is required"));
    } else if !is_valid_time(value) {
        errors.push(FieldError::new(field, "must be a time in HH:MM form"));
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SemesterForm {
    pub name: String,
    pub academic_year_id: Option<u32>,
}

impl Validate for SemesterForm {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        errors
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct InstructorForm {
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub email: Option<String>,
}

impl Validate for InstructorForm {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "firstName", &self.first_name);
        require(&mut errors, "lastName", &self.last_name);
        if let Some(email) = &self.email {
            if !email.is_empty() && !email.contains('@') {
                errors.push(FieldError::new("email", "is not an email address"));
            }
        }
        errors
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SubjectForm {
    pub name: String,
    pub code: Option<String>,
    pub semester_id: Option<u32>,
}

impl Validate for SubjectForm {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        errors
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassLocationForm {
    pub room: String,
    pub building: Option<String>,
}

impl Validate for ClassLocationForm {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "room", &self.room);
        errors
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AcademicYearForm {
    pub name: String,
    pub is_active: bool,
}

impl Validate for AcademicYearForm {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        errors
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AfatiForm {
    pub name: String,
}

impl Validate for AfatiForm {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        errors
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleForm {
    pub event_type: String,
    pub start_time: String,
    pub end_time: String,
    pub days: BTreeSet<Weekday>,
    pub academic_year: String,
    pub year: u32,
    pub status: ScheduleStatus,
    pub subject_id: u32,
    pub instructor_id: u32,
    pub semester_id: u32,
    pub location_id: u32,
}

impl Validate for ScheduleForm {
    fn normalize(&mut self) {
        self.start_time = normalize_time_field(&self.start_time);
        self.end_time = normalize_time_field(&self.end_time);
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "eventType", &self.event_type);
        require(&mut errors, "academicYear", &self.academic_year);
        require_time(&mut errors, "startTime", &self.start_time);
        require_time(&mut errors, "endTime", &self.end_time);
        if is_valid_time(&self.start_time)
            && is_valid_time(&self.end_time)
            && parse_minutes(&self.end_time) <= parse_minutes(&self.start_time)
        {
            errors.push(FieldError::new("endTime", "must be after the start time"));
        }
        if self.days.is_empty() {
            errors.push(FieldError::new("days", "at least one day must be selected"));
        }
        if self.year == 0 {
            errors.push(FieldError::new("year", "must be at least 1"));
        }
        require_id(&mut errors, "subjectId", self.subject_id);
        require_id(&mut errors, "instructorId", self.instructor_id);
        require_id(&mut errors, "semesterId", self.semester_id);
        require_id(&mut errors, "locationId", self.location_id);
        errors
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ExamForm {
    pub event_type: String,
    pub academic_year: String,
    pub year: u32,
    pub date: Option<NaiveDate>,
    pub hour: String,
    pub afati_id: u32,
    pub subject_id: u32,
    pub instructor_id: u32,
    pub location: Option<String>,
}

impl Validate for ExamForm {
    fn normalize(&mut self) {
        self.hour = normalize_time_field(&self.hour);
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "eventType", &self.event_type);
        require(&mut errors, "academicYear", &self.academic_year);
        require_time(&mut errors, "hour", &self.hour);
        if self.date.is_none() {
            errors.push(FieldError::new("date", "is required"));
        }
        if self.year == 0 {
            errors.push(FieldError::new("year", "must be at least 1"));
        }
        require_id(&mut errors, "afatiId", self.afati_id);
        require_id(&mut errors, "subjectId", self.subject_id);
        require_id(&mut errors, "instructorId", self.instructor_id);
        errors
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
