//! Thin client for the scheduling REST backend.
pub mod auth;
pub mod client;
pub mod email;
pub mod error;
pub mod models;

pub use client::ApiClient;
pub use error::ApiError;
