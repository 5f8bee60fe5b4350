use std::{error::Error, path::Path};

use chrono::NaiveDate;
use futures::future;
use log::info;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    api::{auth::remove_token, models::Config, ApiClient},
    viewer::{
        helpers::{group_by_day, read_json, week_days},
        render::{render_days_text, to_day_items},
        schedule_getter::ScheduleGetter,
    },
};

use super::{
    crud::{AssumeYes, Confirm, ResourceBackend, ResourceEditor, StdinConfirm},
    drafts::{
        create_preview_link, draft_changes, fetch_preview, list_drafts, publish, share_preview,
        DraftPreview, PreviewState,
    },
    models::{Args, Command, ResourceKind},
    resource::{
        AcademicYears, AfatiPeriods, ClassLocations, Exams, Instructors, Resource, Schedules,
        Semesters, Subjects,
    },
};

/* run `$body` with `$resource` aliased to the marker type of `$kind` */
macro_rules! with_resource {
    ($kind:expr, $resource:ident => $body:expr) => {
        match $kind {
            ResourceKind::Semesters => {
                type $resource = Semesters;
                $body
            }
            ResourceKind::Instructors => {
                type $resource = Instructors;
                $body
            }
            ResourceKind::Subjects => {
                type $resource = Subjects;
                $body
            }
            ResourceKind::ClassLocations => {
                type $resource = ClassLocations;
                $body
            }
            ResourceKind::AcademicYears => {
                type $resource = AcademicYears;
                $body
            }
            ResourceKind::Afati => {
                type $resource = AfatiPeriods;
                $body
            }
            ResourceKind::Schedules => {
                type $resource = Schedules;
                $body
            }
            ResourceKind::Exams => {
                type $resource = Exams;
                $body
            }
        }
    };
}

/// Overlays the fields present in `overrides` on a pre-filled form.
pub fn merge_form<F>(prefilled: &F, overrides: Value) -> Result<F, serde_json::Error>
where
    F: Serialize + DeserializeOwned,
{
    let mut merged = serde_json::to_value(prefilled)?;
    if let (Value::Object(base), Value::Object(patch)) = (&mut merged, overrides) {
        for (field, value) in patch {
            base.insert(field, value);
        }
    }
    serde_json::from_value(merged)
}

pub async fn list_resource<R: Resource, B: ResourceBackend>(
    backend: &B,
) -> Result<String, Box<dyn Error>> {
    let mut editor = ResourceEditor::<R, B>::new(backend);
    let records = editor.refetch().await?;
    Ok(serde_json::to_string_pretty(records)?)
}

pub async fn create_resource<R: Resource, B: ResourceBackend>(
    backend: &B,
    form_json_path: &Path,
) -> Result<String, Box<dyn Error>> {
    let form: R::Form = read_json(form_json_path)?;
    let mut editor = ResourceEditor::<R, B>::new(backend);
    editor.submit(form).await?;
    Ok(format!(
        "Created {}, {} record(s) in total",
        R::LABEL,
        editor.records().len()
    ))
}

pub async fn update_resource<R: Resource, B: ResourceBackend>(
    backend: &B,
    id: u32,
    form_json_path: &Path,
) -> Result<String, Box<dyn Error>> {
    let overrides: Value = read_json(form_json_path)?;
    let mut editor = ResourceEditor::<R, B>::new(backend);
    editor.refetch().await?;
    let form = merge_form(&editor.select(id)?, overrides)?;
    editor.submit(form).await?;
    Ok(format!("Updated {} {}", R::LABEL, id))
}

pub async fn delete_resource<R: Resource, B: ResourceBackend, C: Confirm>(
    backend: &B,
    id: u32,
    confirm: &C,
) -> Result<String, Box<dyn Error>> {
    let mut editor = ResourceEditor::<R, B>::new(backend);
    if editor.delete(id, confirm).await? {
        Ok(format!(
            "Deleted {} {}, {} record(s) left",
            R::LABEL,
            id,
            editor.records().len()
        ))
    } else {
        Ok(format!("Kept {} {}", R::LABEL, id))
    }
}

fn describe_preview(preview: &DraftPreview, reference: NaiveDate) -> String {
    let metadata = &preview.metadata;
    let mut out = format!(
        "{}\n",
        metadata.title.as_deref().unwrap_or("Schedule draft preview")
    );
    if let Some(academic_year) = &metadata.academic_year {
        out.push_str(&format!("Academic year: {}\n", academic_year));
    }
    if let Some(created_at) = &metadata.created_at {
        out.push_str(&format!("Created: {}\n", created_at));
    }
    if let Some(expires_at) = &metadata.expires_at {
        out.push_str(&format!("Expires: {}\n", expires_at));
    }
    let refs = preview.schedules.iter().collect::<Vec<_>>();
    let grouped = group_by_day(&refs, &week_days(reference));
    out.push('\n');
    out.push_str(&render_days_text(&to_day_items(&grouped), true));
    out
}

/// Performs one admin command. Returns the text reported back to the user.
pub async fn run(
    args: &Args,
    config: &Config,
    client: &mut ApiClient,
    today: NaiveDate,
) -> Result<String, Box<dyn Error>> {
    match &args.command {
        Command::Login { username, password } => {
            client.login(username, password, &config.token_path).await?;
            Ok(format!("Logged in as {}", username))
        }
        Command::Logout => {
            client.set_token(None);
            if remove_token(&config.token_path)? {
                Ok("Logged out".to_owned())
            } else {
                Ok("No stored token".to_owned())
            }
        }
        Command::List { resource } => {
            with_resource!(*resource, R => list_resource::<R, _>(&*client).await)
        }
        Command::Create {
            resource,
            form_json_path,
        } => with_resource!(*resource, R => create_resource::<R, _>(&*client, form_json_path).await),
        Command::Update {
            resource,
            id,
            form_json_path,
        } => {
            with_resource!(*resource, R => update_resource::<R, _>(&*client, *id, form_json_path).await)
        }
        Command::Delete { resource, id } => {
            if args.yes {
                with_resource!(*resource, R => delete_resource::<R, _, _>(&*client, *id, &AssumeYes).await)
            } else {
                with_resource!(*resource, R => delete_resource::<R, _, _>(&*client, *id, &StdinConfirm).await)
            }
        }
        Command::Drafts => {
            let drafts = list_drafts(client).await?;
            Ok(serde_json::to_string_pretty(&drafts)?)
        }
        Command::Publish { id } => {
            let mut editor = ResourceEditor::<Schedules, ApiClient>::new(client);
            publish(&mut editor, *id).await?;
            Ok(format!("Published schedule {}", id))
        }
        Command::PreviewLink { ids } => {
            Ok(create_preview_link(client, &config.preview_base_url, ids).await?)
        }
        Command::Preview { token } => match fetch_preview(client, token).await? {
            PreviewState::Ready(preview) => Ok(describe_preview(&preview, today)),
            PreviewState::NotFound => Ok("Preview not found".to_owned()),
        },
        Command::Share { link, to } => {
            share_preview(client, link, to).await?;
            Ok(format!("Sent {} to {}", link, to))
        }
        Command::DraftDiff { date } => {
            let reference = date.unwrap_or(today);
            let (schedules, drafts) =
                future::join(client.get_schedules(), list_drafts(client)).await;
            let changes = draft_changes(&schedules?, &drafts?, reference);
            info!("Compared drafts against the week of {}", reference);
            Ok(changes.unwrap_or_else(|| {
                format!("Drafts do not change the week of {}", reference)
            }))
        }
    }
}
