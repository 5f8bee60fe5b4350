use std::{
    io::{self, BufRead, Write},
    marker::PhantomData,
};

use log::{debug, info};
use thiserror::Error;

use crate::api::{ApiClient, ApiError};

use super::{
    forms::{FieldError, Validate},
    resource::Resource,
};

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Form is invalid: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Validation(Vec<FieldError>),

    #[error("No {label} with id {id}")]
    UnknownRecord { label: &'static str, id: u32 },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A trait, necessary for every entity that stores admin resources.
#[allow(async_fn_in_trait)]
pub trait ResourceBackend {
    async fn list<R: Resource>(&self) -> Result<Vec<R::Record>, ApiError>;
    async fn create<R: Resource>(&self, form: &R::Form) -> Result<(), ApiError>;
    async fn update<R: Resource>(&self, id: u32, form: &R::Form) -> Result<(), ApiError>;
    async fn delete<R: Resource>(&self, id: u32) -> Result<(), ApiError>;
}

/// Allows ApiClient to store resources via plain REST calls on the resource endpoint.
impl ResourceBackend for ApiClient {
    async fn list<R: Resource>(&self) -> Result<Vec<R::Record>, ApiError> {
        self.get_json(R::ENDPOINT).await
    }

    async fn create<R: Resource>(&self, form: &R::Form) -> Result<(), ApiError> {
        self.post(R::ENDPOINT, form).await
    }

    async fn update<R: Resource>(&self, id: u32, form: &R::Form) -> Result<(), ApiError> {
        self.put(&format!("{}/{}", R::ENDPOINT, id), form).await
    }

    async fn delete<R: Resource>(&self, id: u32) -> Result<(), ApiError> {
        ApiClient::delete(self, &format!("{}/{}", R::ENDPOINT, id)).await
    }
}

/// Interactive confirmation asked before destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirms everything, for `--yes`.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Asks on the terminal, anything but `y`/`yes` declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// State of one admin page: the fetched list and the record selected for editing.
///
/// Every successful write is followed by a full refetch of the list.
pub struct ResourceEditor<'a, R: Resource, B: ResourceBackend> {
    backend: &'a B,
    records: Vec<R::Record>,
    selected: Option<u32>,
    resource: PhantomData<R>,
}

impl<'a, R: Resource, B: ResourceBackend> ResourceEditor<'a, R, B> {
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            records: Vec::new(),
            selected: None,
            resource: PhantomData,
        }
    }

    pub fn records(&self) -> &[R::Record] {
        &self.records
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub async fn refetch(&mut self) -> Result<&[R::Record], AdminError> {
        self.records = self.backend.list::<R>().await?;
        info!("Fetched {} {} record(s)", self.records.len(), R::LABEL);
        Ok(&self.records)
    }

    /// Selects a record for editing and returns the pre-filled form.
    pub fn select(&mut self, id: u32) -> Result<R::Form, AdminError> {
        let record = self
            .records
            .iter()
            .find(|record| R::record_id(record) == id)
            .ok_or(AdminError::UnknownRecord { label: R::LABEL, id })?;
        self.selected = Some(id);
        Ok(R::prefill(record))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Creates a record, or updates the selected one. Invalid forms never reach the backend.
    pub async fn submit(&mut self, mut form: R::Form) -> Result<(), AdminError> {
        form.normalize();
        let errors = form.validate();
        if !errors.is_empty() {
            debug!("Rejected {} form: {:?}", R::LABEL, errors);
            return Err(AdminError::Validation(errors));
        }

        match self.selected {
            Some(id) => {
                self.backend.update::<R>(id, &form).await?;
                info!("Updated {} {}", R::LABEL, id);
            }
            None => {
                self.backend.create::<R>(&form).await?;
                info!("Created a new {}", R::LABEL);
            }
        }
        self.selected = None;
        self.refetch().await?;
        Ok(())
    }

    /// Deletes after confirmation. Returns `false` when the user declined.
    pub async fn delete<C: Confirm>(&mut self, id: u32, confirm: &C) -> Result<bool, AdminError> {
        if !confirm.confirm(&format!("Delete {} {}?", R::LABEL, id)) {
            info!("Deletion of {} {} cancelled", R::LABEL, id);
            return Ok(false);
        }
        self.backend.delete::<R>(id).await?;
        info!("Deleted {} {}", R::LABEL, id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.refetch().await?;
        Ok(true)
    }
}
