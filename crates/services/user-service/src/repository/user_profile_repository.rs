//! Profile store: profile persistence and filtered lookups for search.
//!
//! Every lookup returns each matching profile once, ordered by profile id,
//! with its full technology list. Profiles of users hidden from search are
//! never returned by the search lookups.

use async_trait::async_trait;
use sea_orm::{
    sea_query::{Query, SimpleExpr},
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, LoaderTrait,
    ModelTrait, QueryFilter, QueryOrder, Select, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::{
    user,
    user_profile::{self, Entity as UserProfileEntity},
    user_technology::{self, Entity as UserTechnologyEntity},
};
use common::{is_unique_violation, AppError, AppResult};
use domain::{UserProfile, UserRole};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Profile repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Find the profile owned by a user
    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Persist a new profile together with its technologies
    async fn create(&self, profile: UserProfile) -> AppResult<UserProfile>;

    /// Change the role of an existing profile
    async fn update_role(&self, profile_id: Uuid, role: UserRole) -> AppResult<UserProfile>;

    /// Attach a technology to a profile
    async fn add_technology(
        &self,
        profile_id: Uuid,
        technology_name: String,
    ) -> AppResult<UserProfile>;

    /// Detach a technology from a profile
    async fn remove_technology(
        &self,
        profile_id: Uuid,
        technology_name: String,
    ) -> AppResult<UserProfile>;

    /// Profiles having at least one of the given technologies
    async fn find_by_technology_names_in(&self, names: Vec<String>)
        -> AppResult<Vec<UserProfile>>;

    /// Profiles whose role is one of the given roles
    async fn find_by_user_role_in(&self, roles: Vec<UserRole>) -> AppResult<Vec<UserProfile>>;

    /// Profiles having at least one of the technologies AND one of the roles
    async fn find_by_technology_names_in_and_user_role_in(
        &self,
        names: Vec<String>,
        roles: Vec<UserRole>,
    ) -> AppResult<Vec<UserProfile>>;
}

/// Concrete implementation of UserProfileRepository
pub struct UserProfileStore {
    db: DatabaseConnection,
}

impl UserProfileStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn search(&self, condition: SimpleExpr) -> AppResult<Vec<UserProfile>> {
        let models = searchable_profiles()
            .filter(condition)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        hydrate(&self.db, models).await
    }

    async fn find_by_id(&self, profile_id: Uuid) -> AppResult<UserProfile> {
        let model = UserProfileEntity::find_by_id(profile_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        hydrate_one(&self.db, model).await
    }
}

/// Base query for search: visible users only, stable order.
fn searchable_profiles() -> Select<UserProfileEntity> {
    UserProfileEntity::find()
        .filter(
            user_profile::Column::UserId.in_subquery(
                Query::select()
                    .column(user::Column::Id)
                    .from(user::Entity)
                    .and_where(user::Column::HiddenFromSearch.eq(false))
                    .to_owned(),
            ),
        )
        .order_by_asc(user_profile::Column::Id)
}

/// Profile has any of the technologies.
///
/// Expressed as a subquery so a profile matching several names is returned once.
fn technology_in(names: Vec<String>) -> SimpleExpr {
    user_profile::Column::Id.in_subquery(
        Query::select()
            .column(user_technology::Column::ProfileId)
            .from(user_technology::Entity)
            .and_where(user_technology::Column::TechnologyName.is_in(names))
            .to_owned(),
    )
}

fn role_in(roles: Vec<UserRole>) -> SimpleExpr {
    user_profile::Column::UserRole.is_in(roles.into_iter().map(|role| role.as_str()))
}

/// Load technologies for each profile row and convert to domain profiles.
async fn hydrate<C: ConnectionTrait>(
    db: &C,
    models: Vec<user_profile::Model>,
) -> AppResult<Vec<UserProfile>> {
    let technologies = models
        .load_many(
            UserTechnologyEntity::find().order_by_asc(user_technology::Column::TechnologyName),
            db,
        )
        .await
        .map_err(AppError::from)?;

    models
        .into_iter()
        .zip(technologies)
        .map(|(model, technologies)| {
            let id = model.id;
            model.into_domain(technologies).map_err(|e| {
                AppError::internal(format!("Profile {} has an invalid stored role: {}", id, e))
            })
        })
        .collect()
}

async fn hydrate_one<C: ConnectionTrait>(
    db: &C,
    model: user_profile::Model,
) -> AppResult<UserProfile> {
    hydrate(db, vec![model])
        .await?
        .pop()
        .ok_or_else(|| AppError::internal("Profile vanished while loading technologies"))
}

#[async_trait]
impl UserProfileRepository for UserProfileStore {
    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let model = UserProfileEntity::find()
            .filter(user_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        match model {
            Some(model) => Ok(Some(hydrate_one(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, profile: UserProfile) -> AppResult<UserProfile> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let model = user_profile::ActiveModel {
            id: Set(profile.id),
            user_id: Set(profile.user_id),
            user_role: Set(profile.user_role.as_str().to_string()),
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::from_db_write(e, "Profile"))?;

        let technologies: Vec<user_technology::ActiveModel> = profile
            .technologies
            .into_iter()
            .map(|technology| user_technology::ActiveModel {
                id: Set(technology.id),
                profile_id: Set(model.id),
                technology_name: Set(technology.technology_name),
            })
            .collect();

        if !technologies.is_empty() {
            UserTechnologyEntity::insert_many(technologies)
                .exec(&txn)
                .await
                .map_err(|e| AppError::from_db_write(e, "Technology"))?;
        }

        let created = hydrate_one(&txn, model).await?;
        txn.commit().await.map_err(AppError::from)?;

        tracing::debug!(profile_id = %created.id, user_id = %created.user_id, "Profile created");
        Ok(created)
    }

    async fn update_role(&self, profile_id: Uuid, role: UserRole) -> AppResult<UserProfile> {
        let model = UserProfileEntity::find_by_id(profile_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: user_profile::ActiveModel = model.into();
        active.user_role = Set(role.as_str().to_string());
        let model = active.update(&self.db).await.map_err(AppError::from)?;

        hydrate_one(&self.db, model).await
    }

    async fn add_technology(
        &self,
        profile_id: Uuid,
        technology_name: String,
    ) -> AppResult<UserProfile> {
        let profile = UserProfileEntity::find_by_id(profile_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let already_attached = profile
            .find_related(UserTechnologyEntity)
            .filter(user_technology::Column::TechnologyName.eq(technology_name.as_str()))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .is_some();

        if !already_attached {
            let inserted = user_technology::ActiveModel {
                id: Set(Uuid::new_v4()),
                profile_id: Set(profile.id),
                technology_name: Set(technology_name),
            }
            .insert(&self.db)
            .await;

            match inserted {
                Ok(_) => {}
                // Attached by a concurrent request in the meantime
                Err(e) if is_unique_violation(&e) => {}
                Err(e) => return Err(AppError::from(e)),
            }
        }

        hydrate_one(&self.db, profile).await
    }

    async fn remove_technology(
        &self,
        profile_id: Uuid,
        technology_name: String,
    ) -> AppResult<UserProfile> {
        let result = UserTechnologyEntity::delete_many()
            .filter(user_technology::Column::ProfileId.eq(profile_id))
            .filter(user_technology::Column::TechnologyName.eq(technology_name))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        self.find_by_id(profile_id).await
    }

    async fn find_by_technology_names_in(
        &self,
        names: Vec<String>,
    ) -> AppResult<Vec<UserProfile>> {
        self.search(technology_in(names)).await
    }

    async fn find_by_user_role_in(&self, roles: Vec<UserRole>) -> AppResult<Vec<UserProfile>> {
        self.search(role_in(roles)).await
    }

    async fn find_by_technology_names_in_and_user_role_in(
        &self,
        names: Vec<String>,
        roles: Vec<UserRole>,
    ) -> AppResult<Vec<UserProfile>> {
        self.search(technology_in(names).and(role_in(roles))).await
    }
}
