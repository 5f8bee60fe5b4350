//! Draft schedules and the preview links used to share them before publishing.
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use similar::TextDiff;

use crate::{
    api::{email::EmailRequest, models::endpoints, ApiClient, ApiError},
    viewer::{
        helpers::{group_by_day, week_days},
        models::schedule_model::{ScheduleItem, ScheduleStatus},
        render::{render_days_text, to_day_items},
    },
};

use super::{
    crud::{AdminError, ResourceBackend, ResourceEditor},
    resource::Schedules,
};

const MAX_TOKEN_LEN: usize = 256;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PreviewMetadata {
    pub title: Option<String>,
    pub academic_year: Option<String>,
    pub created_at: Option<String>,
    pub expires_at: Option<String>,
}

/// Frozen bundle served for a preview token.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftPreview {
    pub schedules: Vec<ScheduleItem>,
    #[serde(default)]
    pub metadata: PreviewMetadata,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewState {
    Ready(DraftPreview),
    NotFound,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PreviewLinkRequest<'a> {
    schedule_ids: &'a [u32],
}

#[derive(Deserialize, Debug)]
struct PreviewLinkResponse {
    token: String,
}

/// Tokens are opaque, but only URL-safe ones can have been issued by the backend.
pub fn is_well_formed_token(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= MAX_TOKEN_LEN
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub fn preview_link(preview_base_url: &str, token: &str) -> String {
    format!("{}/{}", preview_base_url.trim_end_matches('/'), token)
}

pub async fn list_drafts(client: &ApiClient) -> Result<Vec<ScheduleItem>, ApiError> {
    let drafts: Vec<ScheduleItem> = client
        .get_json_with_query(endpoints::SCHEDULES, &[("status", "draft")])
        .await?;
    info!("Found {} draft schedules", drafts.len());
    Ok(drafts)
}

/// Asks the backend for a token freezing `schedule_ids` and returns the shareable link.
pub async fn create_preview_link(
    client: &ApiClient,
    preview_base_url: &str,
    schedule_ids: &[u32],
) -> Result<String, ApiError> {
    let response: PreviewLinkResponse = client
        .post_json(endpoints::SCHEDULE_PREVIEW, &PreviewLinkRequest { schedule_ids })
        .await?;
    Ok(preview_link(preview_base_url, &response.token))
}

/// Unknown, expired and malformed tokens all end up as [`PreviewState::NotFound`].
pub async fn fetch_preview(client: &ApiClient, token: &str) -> Result<PreviewState, ApiError> {
    if !is_well_formed_token(token) {
        warn!("Rejected malformed preview token");
        return Ok(PreviewState::NotFound);
    }
    match client
        .get_json::<DraftPreview>(&format!("{}/{}", endpoints::SCHEDULE_PREVIEW, token))
        .await
    {
        Ok(preview) => Ok(PreviewState::Ready(preview)),
        Err(ApiError::NotFound(_)) => Ok(PreviewState::NotFound),
        Err(err) => Err(err),
    }
}

/// Marks a draft as published through the regular schedule form.
pub async fn publish<B: ResourceBackend>(
    editor: &mut ResourceEditor<'_, Schedules, B>,
    id: u32,
) -> Result<(), AdminError> {
    if editor.records().is_empty() {
        editor.refetch().await?;
    }
    let mut form = editor.select(id)?;
    form.status = ScheduleStatus::Published;
    editor.submit(form).await
}

pub async fn share_preview(
    client: &ApiClient,
    link: &str,
    recipient: &str,
) -> Result<(), ApiError> {
    let email = EmailRequest {
        to: recipient.to_owned(),
        subject: "Schedule draft preview".to_owned(),
        body: format!(
            "A draft of the schedule is ready for review:\n{}\n\nThe draft is not published yet.",
            link
        ),
    };
    client.send_email(&email).await?;
    info!("Shared preview link with {}", recipient);
    Ok(())
}

/// Published schedules with the drafts applied: a draft replaces the record with the same id,
/// other drafts are added.
pub fn apply_drafts(published: &[ScheduleItem], drafts: &[ScheduleItem]) -> Vec<ScheduleItem> {
    let mut out = published
        .iter()
        .filter(|item| !drafts.iter().any(|draft| draft.id == item.id))
        .cloned()
        .collect::<Vec<_>>();
    out.extend(drafts.iter().cloned());
    out
}

fn render_week(items: &[ScheduleItem], reference: NaiveDate) -> String {
    let refs = items.iter().collect::<Vec<_>>();
    let days = week_days(reference);
    render_days_text(&to_day_items(&group_by_day(&refs, &days)), false)
}

/// Unified diff between the published week and the same week once the drafts are published.
/// `None` when the drafts change nothing in that week.
pub fn draft_changes(
    published: &[ScheduleItem],
    drafts: &[ScheduleItem],
    reference: NaiveDate,
) -> Option<String> {
    let published = published
        .iter()
        .filter(|item| item.status == ScheduleStatus::Published)
        .cloned()
        .collect::<Vec<_>>();
    let old_week = render_week(&published, reference);
    let new_week = render_week(&apply_drafts(&published, drafts), reference);
    let diff = TextDiff::from_lines(&old_week, &new_week);
    if diff.ratio() == 1.0 {
        return None;
    }
    Some(
        diff.unified_diff()
            .header("published", "with drafts")
            .to_string(),
    )
}
