//! Course and exam scheduling client: a calendar viewer over lectures and exams
//! and an admin toolkit for the scheduling REST backend.
pub mod admin;
pub mod api;
pub mod viewer;
