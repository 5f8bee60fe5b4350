use log::info;

use crate::api::{models::endpoints, ApiClient, ApiError};

use super::models::schedule_model::{ExamItem, ScheduleItem};

/// A trait, necessary for every entity that will be used for getting actual schedules and exams.
#[allow(async_fn_in_trait)]
pub trait ScheduleGetter {
    async fn get_schedules(&self) -> Result<Vec<ScheduleItem>, ApiError>;
    async fn get_exams(&self) -> Result<Vec<ExamItem>, ApiError>;
}

/// Allows to use ApiClient for getting the full lists from the backend, with no caching.
impl ScheduleGetter for ApiClient {
    async fn get_schedules(&self) -> Result<Vec<ScheduleItem>, ApiError> {
        let schedules: Vec<ScheduleItem> = self.get_json(endpoints::SCHEDULES).await?;
        info!("Collected {} schedules", schedules.len());
        Ok(schedules)
    }

    async fn get_exams(&self) -> Result<Vec<ExamItem>, ApiError> {
        let exams: Vec<ExamItem> = self.get_json(endpoints::EXAMS).await?;
        info!("Collected {} exams", exams.len());
        Ok(exams)
    }
}
