//! Service container - centralized access to the application services.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{UserManager, UserProfileManager, UserProfileService, UserService};
use crate::repository::{UserProfileStore, UserStore};

/// Services shared by every request handler.
#[derive(Clone)]
pub struct Services {
    pub users: Arc<dyn UserService>,
    pub profiles: Arc<dyn UserProfileService>,
}

impl Services {
    pub fn new(users: Arc<dyn UserService>, profiles: Arc<dyn UserProfileService>) -> Self {
        Self { users, profiles }
    }

    /// Wire repositories and services over one database connection pool
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let profile_repo = Arc::new(UserProfileStore::new(db));

        let users = Arc::new(UserManager::new(user_repo.clone()));
        let profiles = Arc::new(UserProfileManager::new(profile_repo, user_repo));

        Self { users, profiles }
    }
}
