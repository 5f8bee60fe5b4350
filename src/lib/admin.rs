pub mod crud;
pub mod drafts;
pub mod forms;
pub mod models;
pub mod resource;
pub mod run_tool;
pub mod time_mask;
