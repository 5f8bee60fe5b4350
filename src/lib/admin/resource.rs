use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    admin::{
        forms::{
            AcademicYearForm, AfatiForm, ClassLocationForm, ExamForm, InstructorForm,
            ScheduleForm, SemesterForm, SubjectForm, Validate,
        },
        models::resource_model::{
            AcademicYear, Afati, ClassLocation, Instructor, Semester, Subject,
        },
        time_mask::TimeMask,
    },
    api::models::endpoints,
    viewer::models::schedule_model::{ExamItem, ScheduleItem},
};

/// A resource type editable from the admin dashboard.
///
/// `Record` is what the backend lists, `Form` is what create and update send.
pub trait Resource {
    const ENDPOINT: &'static str;
    const LABEL: &'static str;
    type Record: DeserializeOwned + Serialize + Debug + Clone;
    type Form: DeserializeOwned + Serialize + Validate + Debug + Clone;

    fn record_id(record: &Self::Record) -> u32;
    /// Form shown when an existing record is selected for editing.
    fn prefill(record: &Self::Record) -> Self::Form;
}

pub struct Semesters;
pub struct Instructors;
pub struct Subjects;
pub struct ClassLocations;
pub struct AcademicYears;
pub struct AfatiPeriods;
pub struct Schedules;
pub struct Exams;

impl Resource for Semesters {
    const ENDPOINT: &'static str = endpoints::SEMESTERS;
    const LABEL: &'static str = "semester";
    type Record = Semester;
    type Form = SemesterForm;

    fn record_id(record: &Semester) -> u32 {
        record.id
    }

    fn prefill(record: &Semester) -> SemesterForm {
        SemesterForm {
            name: record.name.clone(),
            academic_year_id: record.academic_year_id,
        }
    }
}

impl Resource for Instructors {
    const ENDPOINT: &'static str = endpoints::INSTRUCTORS;
    const LABEL: &'static str = "instructor";
    type Record = Instructor;
    type Form = InstructorForm;

    fn record_id(record: &Instructor) -> u32 {
        record.id
    }

    fn prefill(record: &Instructor) -> InstructorForm {
        InstructorForm {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            title: record.title.clone(),
            email: record.email.clone(),
        }
    }
}

impl Resource for Subjects {
    const ENDPOINT: &'static str = endpoints::SUBJECTS;
    const LABEL: &'static str = "subject";
    type Record = Subject;
    type Form = SubjectForm;

    fn record_id(record: &Subject) -> u32 {
        record.id
    }

    fn prefill(record: &Subject) -> SubjectForm {
        SubjectForm {
            name: record.name.clone(),
            code: record.code.clone(),
            semester_id: record.semester_id,
        }
    }
}

impl Resource for ClassLocations {
    const ENDPOINT: &'static str = endpoints::CLASS_LOCATIONS;
    const LABEL: &'static str = "class location";
    type Record = ClassLocation;
    type Form = ClassLocationForm;

    fn record_id(record: &ClassLocation) -> u32 {
        record.id
    }

    fn prefill(record: &ClassLocation) -> ClassLocationForm {
        ClassLocationForm {
            room: record.room.clone(),
            building: record.building.clone(),
        }
    }
}

impl Resource for AcademicYears {
    const ENDPOINT: &'static str = endpoints::ACADEMIC_YEARS;
    const LABEL: &'static str = "academic year";
    type Record = AcademicYear;
    type Form = AcademicYearForm;

    fn record_id(record: &AcademicYear) -> u32 {
        record.id
    }

    fn prefill(record: &AcademicYear) -> AcademicYearForm {
        AcademicYearForm {
            name: record.name.clone(),
            is_active: record.is_active,
        }
    }
}

impl Resource for AfatiPeriods {
    const ENDPOINT: &'static str = endpoints::AFATI;
    const LABEL: &'static str = "afati";
    type Record = Afati;
    type Form = AfatiForm;

    fn record_id(record: &Afati) -> u32 {
        record.id
    }

    fn prefill(record: &Afati) -> AfatiForm {
        AfatiForm {
            name: record.name.clone(),
        }
    }
}

impl Resource for Schedules {
    const ENDPOINT: &'static str = endpoints::SCHEDULES;
    const LABEL: &'static str = "schedule";
    type Record = ScheduleItem;
    type Form = ScheduleForm;

    fn record_id(record: &ScheduleItem) -> u32 {
        record.id
    }

    fn prefill(record: &ScheduleItem) -> ScheduleForm {
        ScheduleForm {
            event_type: record.event_type.clone(),
            start_time: TimeMask::from_value(&record.start_time).blur(),
            end_time: TimeMask::from_value(&record.end_time).blur(),
            days: record.days.clone(),
            academic_year: record.academic_year.clone(),
            year: record.year,
            status: record.status,
            subject_id: record.subject_id,
            instructor_id: record.instructor_id,
            semester_id: record.semester_id,
            location_id: record.location_id,
        }
    }
}

impl Resource for Exams {
    const ENDPOINT: &'static str = endpoints::EXAMS;
    const LABEL: &'static str = "exam";
    type Record = ExamItem;
    type Form = ExamForm;

    fn record_id(record: &ExamItem) -> u32 {
        record.id
    }

    fn prefill(record: &ExamItem) -> ExamForm {
        ExamForm {
            event_type: record.event_type.clone(),
            academic_year: record.academic_year.clone(),
            year: record.year,
            date: Some(record.date),
            hour: TimeMask::from_value(&record.hour).blur(),
            afati_id: record.afati_id,
            subject_id: record.subject_id,
            instructor_id: record.instructor_id,
            location: record.location.clone(),
        }
    }
}
