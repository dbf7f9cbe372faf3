//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{NewUser, UpdateUser, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by public identifier
    async fn find_by_public_id(&self, public_id: i64) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user, assigning the next public id when none is given
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Apply a partial update
    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    /// List all users ordered by public id
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn next_public_id(&self) -> AppResult<i64> {
        let max: Option<i64> = UserEntity::find()
            .select_only()
            .column_as(user::Column::PublicId.max(), "max_public_id")
            .into_tuple::<Option<i64>>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .flatten();

        Ok(max.map_or(1, |id| id + 1))
    }
}

/// Convert a stored row, treating an unknown provider as corrupt data.
fn into_user(model: user::Model) -> AppResult<User> {
    let id = model.id;
    User::try_from(model).map_err(|e| {
        AppError::internal(format!("User {} has an invalid stored provider: {}", id, e))
    })
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(into_user).transpose()
    }

    async fn find_by_public_id(&self, public_id: i64) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::PublicId.eq(public_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(into_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(into_user).transpose()
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let public_id = match user.public_id {
            Some(id) => id,
            None => self.next_public_id().await?,
        };
        let user = User::new(Uuid::new_v4(), public_id, user);

        let active_model = ActiveModel {
            id: Set(user.id),
            public_id: Set(user.public_id),
            name: Set(user.name),
            age: Set(user.age),
            email: Set(user.email),
            image_url: Set(user.image_url),
            email_verified: Set(user.email_verified),
            password: Set(user.password),
            hidden_from_search: Set(user.hidden_from_search),
            provider: Set(user.provider.as_str().to_string()),
            provider_id: Set(user.provider_id),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_db_write(e, "User"))?;
        into_user(model)
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(age) = changes.age {
            active.age = Set(age);
        }
        if let Some(image_url) = changes.image_url {
            active.image_url = Set(Some(image_url));
        }
        if let Some(hidden) = changes.hidden_from_search {
            active.hidden_from_search = Set(hidden);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        into_user(model)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::PublicId)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(into_user).collect()
    }
}
