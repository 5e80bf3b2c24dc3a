//! Business logic services

pub mod auth;
pub mod catalog;
pub mod ledger;

use std::sync::Arc;

use crate::{config::AuthConfig, repository::LibraryStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub ledger: ledger::LedgerService,
}

impl Services {
    /// Create all services on top of the given store
    pub fn new(store: Arc<dyn LibraryStore>, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(auth_config),
            catalog: catalog::CatalogService::new(store.clone()),
            ledger: ledger::LedgerService::new(store),
        }
    }
}
