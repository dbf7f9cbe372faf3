//! Profile store tests against an in-memory SQLite database.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use common::{AppError, DatabaseConfig};
use domain::{NewUser, UpdateUser, UserProfile, UserRole, UserTechnology};
use user_service_lib::infra::Database;
use user_service_lib::repository::entities::user;
use user_service_lib::repository::{
    UserProfileRepository, UserProfileStore, UserRepository, UserStore,
};

struct Fixture {
    db: DatabaseConnection,
    users: UserStore,
    profiles: UserProfileStore,
}

async fn setup() -> Fixture {
    let db = Database::connect(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database");

    Fixture {
        db: db.get_connection(),
        users: UserStore::new(db.get_connection()),
        profiles: UserProfileStore::new(db.get_connection()),
    }
}

fn registration(email: &str) -> NewUser {
    NewUser {
        name: "Test".to_string(),
        age: 18,
        email: email.to_string(),
        password: Some("Test%123".to_string()),
        ..Default::default()
    }
}

impl Fixture {
    async fn profile(&self, email: &str, role: UserRole, technologies: &[&str]) -> UserProfile {
        let user = self
            .users
            .create(registration(email))
            .await
            .expect("create user");

        let mut profile = UserProfile::new(user.id, role);
        for name in technologies {
            profile.add_technology(UserTechnology::new(*name));
        }

        self.profiles.create(profile).await.expect("create profile")
    }
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn ids(profiles: &[UserProfile]) -> Vec<Uuid> {
    profiles.iter().map(|p| p.id).collect()
}

#[tokio::test]
async fn test_technology_search_matches_any_name_once() {
    let fx = setup().await;
    let polyglot = fx
        .profile("a@test.com", UserRole::Mentor, &["Java", "Rust"])
        .await;
    let _other = fx.profile("b@test.com", UserRole::Junior, &["Go"]).await;

    let found = fx
        .profiles
        .find_by_technology_names_in(names(&["Java", "Rust"]))
        .await
        .unwrap();

    assert_eq!(ids(&found), vec![polyglot.id]);
    assert_eq!(found[0].technology_names(), vec!["Java", "Rust"]);
}

#[tokio::test]
async fn test_technology_search_returns_full_technology_list() {
    let fx = setup().await;
    fx.profile("a@test.com", UserRole::Mentor, &["Java", "Spring", "Docker"])
        .await;

    let found = fx
        .profiles
        .find_by_technology_names_in(names(&["Spring"]))
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].technology_names(), vec!["Docker", "Java", "Spring"]);
}

#[tokio::test]
async fn test_role_search_matches_any_role() {
    let fx = setup().await;
    let mentor = fx.profile("a@test.com", UserRole::Mentor, &["Java"]).await;
    let tester = fx.profile("b@test.com", UserRole::Tester, &[]).await;
    fx.profile("c@test.com", UserRole::Junior, &["Java"]).await;

    let found = fx
        .profiles
        .find_by_user_role_in(vec![UserRole::Mentor, UserRole::Tester])
        .await
        .unwrap();

    let mut expected = vec![mentor.id, tester.id];
    expected.sort();
    assert_eq!(ids(&found), expected);
}

#[tokio::test]
async fn test_combined_search_requires_both_criteria() {
    let fx = setup().await;
    let java_mentor = fx.profile("a@test.com", UserRole::Mentor, &["Java"]).await;
    fx.profile("b@test.com", UserRole::Junior, &["Java"]).await;
    fx.profile("c@test.com", UserRole::Mentor, &["Python"]).await;

    let found = fx
        .profiles
        .find_by_technology_names_in_and_user_role_in(names(&["Java"]), vec![UserRole::Mentor])
        .await
        .unwrap();

    assert_eq!(ids(&found), vec![java_mentor.id]);

    let none = fx
        .profiles
        .find_by_technology_names_in_and_user_role_in(names(&["Java"]), vec![UserRole::Tester])
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_search_skips_users_hidden_from_search() {
    let fx = setup().await;
    let visible = fx.profile("a@test.com", UserRole::Mentor, &["Java"]).await;
    let hidden = fx.profile("b@test.com", UserRole::Mentor, &["Java"]).await;

    fx.users
        .update(
            hidden.user_id,
            UpdateUser {
                hidden_from_search: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let by_role = fx
        .profiles
        .find_by_user_role_in(vec![UserRole::Mentor])
        .await
        .unwrap();
    let by_technology = fx
        .profiles
        .find_by_technology_names_in(names(&["Java"]))
        .await
        .unwrap();

    assert_eq!(ids(&by_role), vec![visible.id]);
    assert_eq!(ids(&by_technology), vec![visible.id]);

    // Hidden profiles stay reachable directly
    let direct = fx.profiles.find_by_user_id(hidden.user_id).await.unwrap();
    assert_eq!(direct.map(|p| p.id), Some(hidden.id));
}

#[tokio::test]
async fn test_technology_names_are_case_sensitive() {
    let fx = setup().await;
    fx.profile("a@test.com", UserRole::Mentor, &["Java"]).await;

    let found = fx
        .profiles
        .find_by_technology_names_in(names(&["java"]))
        .await
        .unwrap();

    assert!(found.is_empty());
}

#[tokio::test]
async fn test_add_and_remove_technology() {
    let fx = setup().await;
    let profile = fx.profile("a@test.com", UserRole::Junior, &["Java"]).await;

    let updated = fx
        .profiles
        .add_technology(profile.id, "Rust".to_string())
        .await
        .unwrap();
    assert_eq!(updated.technology_names(), vec!["Java", "Rust"]);

    // Attaching twice keeps a single row
    let again = fx
        .profiles
        .add_technology(profile.id, "Rust".to_string())
        .await
        .unwrap();
    assert_eq!(again.technology_names(), vec!["Java", "Rust"]);

    let removed = fx
        .profiles
        .remove_technology(profile.id, "Java".to_string())
        .await
        .unwrap();
    assert_eq!(removed.technology_names(), vec!["Rust"]);

    let missing = fx
        .profiles
        .remove_technology(profile.id, "Java".to_string())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_update_role_is_visible_to_search() {
    let fx = setup().await;
    let profile = fx.profile("a@test.com", UserRole::Junior, &[]).await;

    let updated = fx
        .profiles
        .update_role(profile.id, UserRole::UxDesigner)
        .await
        .unwrap();
    assert_eq!(updated.user_role, UserRole::UxDesigner);

    let found = fx
        .profiles
        .find_by_user_role_in(vec![UserRole::UxDesigner])
        .await
        .unwrap();
    assert_eq!(ids(&found), vec![profile.id]);
}

#[tokio::test]
async fn test_user_store_assigns_sequential_public_ids() {
    let fx = setup().await;
    let first = fx.profile("a@test.com", UserRole::Junior, &[]).await;
    let second = fx.profile("b@test.com", UserRole::Junior, &[]).await;

    let first = fx.users.find_by_id(first.user_id).await.unwrap().unwrap();
    let second = fx.users.find_by_id(second.user_id).await.unwrap().unwrap();

    assert_eq!(first.public_id, 1);
    assert_eq!(second.public_id, 2);

    let listed = fx.users.list().await.unwrap();
    assert_eq!(
        listed.iter().map(|u| u.public_id).collect::<Vec<_>>(),
        vec![1, 2]
    );
}

#[tokio::test]
async fn test_duplicate_email_write_is_a_conflict() {
    let fx = setup().await;
    fx.users.create(registration("a@test.com")).await.unwrap();

    let err = fx
        .users
        .create(registration("a@test.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.status().as_u16(), 409);
}

#[tokio::test]
async fn test_taken_public_id_write_is_a_conflict() {
    let fx = setup().await;
    fx.users.create(registration("a@test.com")).await.unwrap();

    let mut second = registration("b@test.com");
    second.public_id = Some(1);
    let result = fx.users.create(second).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_second_profile_write_is_a_conflict() {
    let fx = setup().await;
    let existing = fx.profile("a@test.com", UserRole::Mentor, &["Java"]).await;

    let result = fx
        .profiles
        .create(UserProfile::new(existing.user_id, UserRole::Junior))
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Profile already exists");
}

#[tokio::test]
async fn test_duplicate_technology_rows_roll_back_the_profile() {
    let fx = setup().await;
    let user = fx.users.create(registration("a@test.com")).await.unwrap();

    let mut profile = UserProfile::new(user.id, UserRole::Mentor);
    profile.technologies.push(UserTechnology::new("Java"));
    profile.technologies.push(UserTechnology::new("Java"));

    let result = fx.profiles.create(profile).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(fx.profiles.find_by_user_id(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_attach_of_same_technology_keeps_one_row() {
    let fx = setup().await;
    let profile = fx.profile("a@test.com", UserRole::Junior, &[]).await;

    let (first, second) = tokio::join!(
        fx.profiles.add_technology(profile.id, "Rust".to_string()),
        fx.profiles.add_technology(profile.id, "Rust".to_string()),
    );

    assert!(first.is_ok());
    assert!(second.is_ok());

    let stored = fx.profiles.find_by_user_id(profile.user_id).await.unwrap();
    assert_eq!(stored.unwrap().technology_names(), vec!["Rust"]);
}

#[tokio::test]
async fn test_unknown_stored_provider_is_an_internal_error() {
    let fx = setup().await;
    let id = Uuid::new_v4();

    user::ActiveModel {
        id: Set(id),
        public_id: Set(1),
        name: Set("Test".to_string()),
        age: Set(18),
        email: Set("a@test.com".to_string()),
        image_url: Set(None),
        email_verified: Set(false),
        password: Set(None),
        hidden_from_search: Set(false),
        provider: Set("twitter".to_string()),
        provider_id: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
    }
    .insert(&fx.db)
    .await
    .unwrap();

    let result = fx.users.find_by_id(id).await;

    assert!(matches!(result, Err(AppError::Internal(_))));
}
