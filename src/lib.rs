//! Circulate - membership and book-lending core
//!
//! The lending subsystem of a contact-management application: membership
//! statuses, the book lending state machine, and overdue computation. The
//! surrounding UI and command layers construct persons and books here,
//! mutate lending state through the service, and read the results back
//! verbatim for display.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared with the host UI and command layers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
