//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{NewUser, UpdateUser, User};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Get user by public identifier
    async fn get_user_by_public_id(&self, public_id: i64) -> AppResult<User>;

    /// Get user by email
    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Register a new user (credentials are stored as given)
    async fn register_user(&self, user: NewUser) -> AppResult<User>;

    /// Update user details
    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_user_by_public_id(&self, public_id: i64) -> AppResult<User> {
        self.repo
            .find_by_public_id(public_id)
            .await?
            .ok_or_not_found()
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.repo.find_by_email(email).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn register_user(&self, user: NewUser) -> AppResult<User> {
        if self.repo.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        if let Some(public_id) = user.public_id {
            if self.repo.find_by_public_id(public_id).await?.is_some() {
                return Err(AppError::conflict("Public ID"));
            }
        }

        let user = self.repo.create(user).await?;
        tracing::info!(user_id = %user.id, public_id = user.public_id, "User registered");
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        if changes.is_empty() {
            return self.get_user(id).await;
        }
        self.repo.update(id, changes).await
    }
}
