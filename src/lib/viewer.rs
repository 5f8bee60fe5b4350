pub mod helpers;
pub mod models;
pub mod render;
pub mod run_tool;
pub mod schedule_getter;
