//! Profile service - profile management and profile search.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{ProfileSearchRequest, UserProfile, UserRole, UserTechnology};

use crate::repository::{UserProfileRepository, UserRepository};

/// Profile service trait for dependency injection.
#[async_trait]
pub trait UserProfileService: Send + Sync {
    /// Select profiles matching the requested technologies and/or roles.
    ///
    /// Fails with a bad request if any role name is outside the vocabulary.
    /// An empty request selects nothing.
    async fn selection_for_searching(
        &self,
        request: ProfileSearchRequest,
    ) -> AppResult<Vec<UserProfile>>;

    /// Get the profile owned by a user
    async fn get_profile(&self, user_id: Uuid) -> AppResult<UserProfile>;

    /// Create the profile for a user
    async fn create_profile(
        &self,
        user_id: Uuid,
        role: String,
        technologies: Vec<String>,
    ) -> AppResult<UserProfile>;

    /// Change the role of a user's profile
    async fn change_role(&self, user_id: Uuid, role: String) -> AppResult<UserProfile>;

    /// Attach a technology to a user's profile (no-op if already attached)
    async fn add_technology(&self, user_id: Uuid, technology_name: String)
        -> AppResult<UserProfile>;

    /// Detach a technology from a user's profile
    async fn remove_technology(
        &self,
        user_id: Uuid,
        technology_name: String,
    ) -> AppResult<UserProfile>;
}

/// Concrete implementation of UserProfileService using repositories.
pub struct UserProfileManager {
    profiles: Arc<dyn UserProfileRepository>,
    users: Arc<dyn UserRepository>,
}

impl UserProfileManager {
    /// Create new profile service instance with repositories
    pub fn new(profiles: Arc<dyn UserProfileRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { profiles, users }
    }
}

#[async_trait]
impl UserProfileService for UserProfileManager {
    async fn selection_for_searching(
        &self,
        request: ProfileSearchRequest,
    ) -> AppResult<Vec<UserProfile>> {
        let ProfileSearchRequest {
            technologies,
            roles,
        } = request;

        // Reject the whole request before touching the store
        let roles = UserRole::parse_all(&roles)?;

        tracing::debug!(
            technologies = technologies.len(),
            roles = roles.len(),
            "Selecting profiles for search"
        );

        match (technologies.is_empty(), roles.is_empty()) {
            (false, false) => {
                self.profiles
                    .find_by_technology_names_in_and_user_role_in(technologies, roles)
                    .await
            }
            (false, true) => self.profiles.find_by_technology_names_in(technologies).await,
            (true, false) => self.profiles.find_by_user_role_in(roles).await,
            (true, true) => Ok(Vec::new()),
        }
    }

    async fn get_profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        self.profiles
            .find_by_user_id(user_id)
            .await?
            .ok_or_not_found()
    }

    async fn create_profile(
        &self,
        user_id: Uuid,
        role: String,
        technologies: Vec<String>,
    ) -> AppResult<UserProfile> {
        let role = UserRole::parse(&role)?;

        self.users.find_by_id(user_id).await?.ok_or_not_found()?;
        if self.profiles.find_by_user_id(user_id).await?.is_some() {
            return Err(AppError::conflict("Profile"));
        }

        let mut profile = UserProfile::new(user_id, role);
        for name in technologies {
            profile.add_technology(UserTechnology::new(name));
        }

        self.profiles.create(profile).await
    }

    async fn change_role(&self, user_id: Uuid, role: String) -> AppResult<UserProfile> {
        let role = UserRole::parse(&role)?;
        let profile = self.get_profile(user_id).await?;

        if profile.user_role == role {
            return Ok(profile);
        }
        self.profiles.update_role(profile.id, role).await
    }

    async fn add_technology(
        &self,
        user_id: Uuid,
        technology_name: String,
    ) -> AppResult<UserProfile> {
        let profile = self.get_profile(user_id).await?;

        if profile.has_technology(&technology_name) {
            return Ok(profile);
        }
        self.profiles.add_technology(profile.id, technology_name).await
    }

    async fn remove_technology(
        &self,
        user_id: Uuid,
        technology_name: String,
    ) -> AppResult<UserProfile> {
        let profile = self.get_profile(user_id).await?;

        if !profile.has_technology(&technology_name) {
            return Err(AppError::NotFound);
        }
        self.profiles
            .remove_technology(profile.id, technology_name)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    use domain::{AuthProvider, User};

    use crate::repository::{MockUserProfileRepository, MockUserRepository};

    fn mentor_with_java() -> UserProfile {
        let mut profile = UserProfile::new(Uuid::new_v4(), UserRole::Mentor);
        profile.add_technology(UserTechnology::new("Java"));
        profile
    }

    fn test_user(id: Uuid) -> User {
        User {
            id,
            public_id: 1,
            name: "Test".to_string(),
            age: 18,
            email: "test2@test.com".to_string(),
            image_url: None,
            email_verified: true,
            password: Some("Test%123".to_string()),
            hidden_from_search: false,
            provider: AuthProvider::Google,
            provider_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(profiles: MockUserProfileRepository) -> UserProfileManager {
        service_with_users(profiles, MockUserRepository::new())
    }

    fn service_with_users(
        profiles: MockUserProfileRepository,
        users: MockUserRepository,
    ) -> UserProfileManager {
        UserProfileManager::new(Arc::new(profiles), Arc::new(users))
    }

    fn search(technologies: &[&str], roles: &[&str]) -> ProfileSearchRequest {
        ProfileSearchRequest::new(
            technologies.iter().map(|s| s.to_string()).collect(),
            roles.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn assert_pick_from_list(result: AppResult<Vec<UserProfile>>) {
        let err = assert_err!(result);
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "Pick value from List");
    }

    // =========================================================================
    // selection_for_searching
    // =========================================================================

    #[tokio::test]
    async fn test_search_by_role_and_technology() {
        let profile = mentor_with_java();
        let expected = profile.clone();

        let mut repo = MockUserProfileRepository::new();
        repo.expect_find_by_technology_names_in_and_user_role_in()
            .with(eq(vec!["Java".to_string()]), eq(vec![UserRole::Mentor]))
            .times(1)
            .returning(move |_, _| Ok(vec![profile.clone()]));

        let result = service(repo)
            .selection_for_searching(search(&["Java"], &["MENTOR"]))
            .await;

        assert_eq!(assert_ok!(result), vec![expected]);
    }

    #[tokio::test]
    async fn test_search_by_technology_without_match_is_empty() {
        let mut repo = MockUserProfileRepository::new();
        repo.expect_find_by_technology_names_in()
            .with(eq(vec!["TechnologyNotExist".to_string()]))
            .times(1)
            .returning(|_| Ok(vec![]));

        let result = service(repo)
            .selection_for_searching(search(&["TechnologyNotExist"], &[]))
            .await;

        assert!(assert_ok!(result).is_empty());
    }

    #[tokio::test]
    async fn test_search_with_unknown_role_and_technology_fails_before_lookup() {
        // No expectations: any store call panics
        let repo = MockUserProfileRepository::new();

        let result = service(repo)
            .selection_for_searching(search(&["Java"], &["RoleDoesNotExist"]))
            .await;

        assert_pick_from_list(result);
    }

    #[tokio::test]
    async fn test_search_by_role_and_technology_without_match_is_empty() {
        let mut repo = MockUserProfileRepository::new();
        repo.expect_find_by_technology_names_in_and_user_role_in()
            .with(eq(vec!["Java".to_string()]), eq(vec![UserRole::Junior]))
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let result = service(repo)
            .selection_for_searching(search(&["Java"], &["JUNIOR"]))
            .await;

        assert!(assert_ok!(result).is_empty());
    }

    #[tokio::test]
    async fn test_search_by_role_only() {
        let profile = mentor_with_java();
        let expected = profile.clone();

        let mut repo = MockUserProfileRepository::new();
        repo.expect_find_by_user_role_in()
            .with(eq(vec![UserRole::Mentor]))
            .times(1)
            .returning(move |_| Ok(vec![profile.clone()]));

        let result = service(repo)
            .selection_for_searching(search(&[], &["MENTOR"]))
            .await;

        assert_eq!(assert_ok!(result), vec![expected]);
    }

    #[tokio::test]
    async fn test_search_by_technology_only() {
        let profile = mentor_with_java();
        let expected = profile.clone();

        let mut repo = MockUserProfileRepository::new();
        repo.expect_find_by_technology_names_in()
            .with(eq(vec!["Java".to_string()]))
            .times(1)
            .returning(move |_| Ok(vec![profile.clone()]));

        let result = service(repo)
            .selection_for_searching(search(&["Java"], &[]))
            .await;

        assert_eq!(assert_ok!(result), vec![expected]);
    }

    #[tokio::test]
    async fn test_search_with_unknown_role_only_fails() {
        let repo = MockUserProfileRepository::new();

        let result = service(repo)
            .selection_for_searching(search(&[], &["RoleDoesNotExist"]))
            .await;

        assert_pick_from_list(result);
    }

    #[tokio::test]
    async fn test_search_with_one_bad_role_among_good_ones_fails() {
        let repo = MockUserProfileRepository::new();

        let result = service(repo)
            .selection_for_searching(search(&[], &["MENTOR", "mentor", "JUNIOR"]))
            .await;

        assert_pick_from_list(result);
    }

    #[tokio::test]
    async fn test_empty_search_returns_nothing_without_lookup() {
        let repo = MockUserProfileRepository::new();

        let result = service(repo)
            .selection_for_searching(ProfileSearchRequest::default())
            .await;

        assert!(assert_ok!(result).is_empty());
    }

    #[tokio::test]
    async fn test_search_passes_every_role_to_the_store() {
        let mut repo = MockUserProfileRepository::new();
        repo.expect_find_by_user_role_in()
            .with(eq(vec![UserRole::Mentor, UserRole::Tester]))
            .times(1)
            .returning(|_| Ok(vec![]));

        let result = service(repo)
            .selection_for_searching(search(&[], &["MENTOR", "TESTER"]))
            .await;

        assert_ok!(result);
    }

    #[tokio::test]
    async fn test_repeated_search_returns_identical_results() {
        let profile = mentor_with_java();

        let mut repo = MockUserProfileRepository::new();
        repo.expect_find_by_technology_names_in()
            .times(2)
            .returning(move |_| Ok(vec![profile.clone()]));

        let service = service(repo);
        let first = service
            .selection_for_searching(search(&["Java"], &[]))
            .await;
        let second = service
            .selection_for_searching(search(&["Java"], &[]))
            .await;

        assert_eq!(assert_ok!(first), assert_ok!(second));
    }

    #[tokio::test]
    async fn test_search_propagates_store_failures() {
        let mut repo = MockUserProfileRepository::new();
        repo.expect_find_by_user_role_in()
            .returning(|_| Err(AppError::internal("connection reset")));

        let result = service(repo)
            .selection_for_searching(search(&[], &["MENTOR"]))
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    // =========================================================================
    // Profile management
    // =========================================================================

    #[tokio::test]
    async fn test_create_profile_collapses_duplicate_technologies() {
        let user_id = Uuid::new_v4();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(|id| Ok(Some(test_user(id))));

        let mut profiles = MockUserProfileRepository::new();
        profiles.expect_find_by_user_id().returning(|_| Ok(None));
        profiles
            .expect_create()
            .withf(|p| p.technology_names() == vec!["Java", "Rust"])
            .times(1)
            .returning(Ok);

        let result = service_with_users(profiles, users)
            .create_profile(
                user_id,
                "MENTOR".to_string(),
                vec!["Java".to_string(), "Rust".to_string(), "Java".to_string()],
            )
            .await;

        let profile = assert_ok!(result);
        assert_eq!(profile.user_id, user_id);
        assert_eq!(profile.user_role, UserRole::Mentor);
    }

    #[tokio::test]
    async fn test_create_profile_rejects_unknown_role_first() {
        let result = service(MockUserProfileRepository::new())
            .create_profile(Uuid::new_v4(), "GURU".to_string(), vec![])
            .await;

        let err = assert_err!(result);
        assert_eq!(err.to_string(), "Pick value from List");
    }

    #[tokio::test]
    async fn test_create_profile_for_missing_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let result = service_with_users(MockUserProfileRepository::new(), users)
            .create_profile(Uuid::new_v4(), "JUNIOR".to_string(), vec![])
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_profile_twice_conflicts() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_user(id))));

        let mut profiles = MockUserProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .returning(|_| Ok(Some(mentor_with_java())));

        let result = service_with_users(profiles, users)
            .create_profile(Uuid::new_v4(), "JUNIOR".to_string(), vec![])
            .await;

        let err = assert_err!(result);
        assert_eq!(err.to_string(), "Profile already exists");
    }

    #[tokio::test]
    async fn test_change_role_to_same_role_skips_update() {
        let mut profiles = MockUserProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .returning(|_| Ok(Some(mentor_with_java())));

        let result = service(profiles)
            .change_role(Uuid::new_v4(), "MENTOR".to_string())
            .await;

        assert_eq!(assert_ok!(result).user_role, UserRole::Mentor);
    }

    #[tokio::test]
    async fn test_change_role_updates_store() {
        let profile = mentor_with_java();
        let profile_id = profile.id;

        let mut profiles = MockUserProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .returning(move |_| Ok(Some(profile.clone())));
        profiles
            .expect_update_role()
            .with(eq(profile_id), eq(UserRole::Tester))
            .times(1)
            .returning(|_, role| {
                let mut updated = mentor_with_java();
                updated.user_role = role;
                Ok(updated)
            });

        let result = service(profiles)
            .change_role(Uuid::new_v4(), "TESTER".to_string())
            .await;

        assert_eq!(assert_ok!(result).user_role, UserRole::Tester);
    }

    #[tokio::test]
    async fn test_add_existing_technology_is_a_no_op() {
        let mut profiles = MockUserProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .returning(|_| Ok(Some(mentor_with_java())));

        let result = service(profiles)
            .add_technology(Uuid::new_v4(), "Java".to_string())
            .await;

        assert_eq!(assert_ok!(result).technology_names(), vec!["Java"]);
    }

    #[tokio::test]
    async fn test_remove_unattached_technology_is_not_found() {
        let mut profiles = MockUserProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .returning(|_| Ok(Some(mentor_with_java())));

        let result = service(profiles)
            .remove_technology(Uuid::new_v4(), "Cobol".to_string())
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_profile_without_profile_is_not_found() {
        let mut profiles = MockUserProfileRepository::new();
        profiles.expect_find_by_user_id().returning(|_| Ok(None));

        let result = service(profiles).get_profile(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
