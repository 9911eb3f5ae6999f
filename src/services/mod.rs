//! Business logic services

pub mod lending;

use crate::{config::LendingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub lending: lending::LendingService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository, lending_config: &LendingConfig) -> Self {
        Self {
            lending: lending::LendingService::new(repository, lending_config.loan_period_days),
        }
    }
}
