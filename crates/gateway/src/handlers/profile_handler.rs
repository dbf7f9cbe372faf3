//! Profile handlers: profile management and profile search.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{ProfileSearchRequest, UserProfile};

use crate::extractors::{JsonBody, ValidatedJson};
use crate::state::AppState;

/// Profile creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProfileRequest {
    /// One of MENTOR, JUNIOR, PROJECT_MANAGER, TESTER, UX_DESIGNER
    #[schema(example = "MENTOR")]
    pub user_role: String,
    #[serde(default)]
    #[validate(custom(function = "validate_technology_names"))]
    #[schema(example = json!(["Java", "Spring"]))]
    pub technologies: Vec<String>,
}

/// Role change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangeRoleRequest {
    #[schema(example = "TESTER")]
    pub user_role: String,
}

/// Technology attach request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TechnologyRequest {
    #[validate(length(min = 1, max = 64, message = "Technology name must be 1-64 characters"))]
    #[schema(example = "Rust")]
    pub technology_name: String,
}

fn validate_technology_names(names: &[String]) -> Result<(), validator::ValidationError> {
    if names.iter().any(|name| name.is_empty() || name.len() > 64) {
        let mut error = validator::ValidationError::new("technology_name");
        error.message = Some("Technology name must be 1-64 characters".into());
        return Err(error);
    }
    Ok(())
}

/// Routes nested under `/users/:id/profile`
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).post(create_profile))
        .route("/role", put(change_role))
        .route("/technologies", post(add_technology))
        .route("/technologies/:name", delete(remove_technology))
}

/// Routes under `/profiles`
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/search", post(search_profiles))
}

/// Search profiles by technologies and/or roles
///
/// Both lists empty selects nothing. Both non-empty requires a profile to
/// match a technology AND a role.
#[utoipa::path(
    post,
    path = "/api/v1/profiles/search",
    tag = "Profiles",
    request_body = ProfileSearchRequest,
    responses(
        (status = 200, description = "Matching profiles", body = Vec<UserProfile>),
        (status = 400, description = "Unknown role name (\"Pick value from List\")")
    )
)]
pub async fn search_profiles(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ProfileSearchRequest>,
) -> AppResult<Json<Vec<UserProfile>>> {
    let profiles = state.profiles.selection_for_searching(request).await?;
    Ok(Json(profiles))
}

/// Get a user's profile
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/profile",
    tag = "Profiles",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 404, description = "User has no profile")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(state.profiles.get_profile(user_id).await?))
}

/// Create a user's profile
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/profile",
    tag = "Profiles",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = UserProfile),
        (status = 400, description = "Unknown role or invalid technology"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User already has a profile")
    )
)]
pub async fn create_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateProfileRequest>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    let profile = state
        .profiles
        .create_profile(user_id, payload.user_role, payload.technologies)
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Change a profile's role
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/profile/role",
    tag = "Profiles",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = ChangeRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = UserProfile),
        (status = 400, description = "Unknown role"),
        (status = 404, description = "User has no profile")
    )
)]
pub async fn change_role(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ChangeRoleRequest>,
) -> AppResult<Json<UserProfile>> {
    let profile = state
        .profiles
        .change_role(user_id, payload.user_role)
        .await?;
    Ok(Json(profile))
}

/// Attach a technology to a profile
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/profile/technologies",
    tag = "Profiles",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = TechnologyRequest,
    responses(
        (status = 200, description = "Technology attached", body = UserProfile),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User has no profile")
    )
)]
pub async fn add_technology(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<TechnologyRequest>,
) -> AppResult<Json<UserProfile>> {
    let profile = state
        .profiles
        .add_technology(user_id, payload.technology_name)
        .await?;
    Ok(Json(profile))
}

/// Detach a technology from a profile
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/profile/technologies/{name}",
    tag = "Profiles",
    params(
        ("id" = Uuid, Path, description = "User ID"),
        ("name" = String, Path, description = "Technology name")
    ),
    responses(
        (status = 200, description = "Technology detached", body = UserProfile),
        (status = 404, description = "No profile or technology not attached")
    )
)]
pub async fn remove_technology(
    State(state): State<AppState>,
    Path((user_id, name)): Path<(Uuid, String)>,
) -> AppResult<Json<UserProfile>> {
    let profile = state.profiles.remove_technology(user_id, name).await?;
    Ok(Json(profile))
}
