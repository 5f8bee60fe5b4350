use serde::Serialize;

use super::{client::ApiClient, error::ApiError, models::endpoints};

/// Body of `/email/send`. The backend owns the actual mail delivery.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EmailRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl ApiClient {
    pub async fn send_email(&self, email: &EmailRequest) -> Result<(), ApiError> {
        self.post(endpoints::EMAIL, email).await
    }
}
