//! Application state for dependency injection.

use std::sync::Arc;

use user_service_lib::infra::Database;
use user_service_lib::service::{Services, UserProfileService, UserService};

use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub profiles: Arc<dyn UserProfileService>,
    pub database: Database,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(services: Services, database: Database, config: GatewayConfig) -> Self {
        Self {
            users: services.users,
            profiles: services.profiles,
            database,
            config,
        }
    }
}
