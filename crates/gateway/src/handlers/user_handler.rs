//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{AuthProvider, NewUser, UpdateUser, UserResponse};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// User registration request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserRequest {
    /// Explicit public identifier; assigned automatically when omitted
    #[validate(range(min = 1, message = "Public ID must be positive"))]
    #[schema(example = 1)]
    pub public_id: Option<i64>,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Test")]
    pub name: String,
    #[validate(range(min = 13, max = 120, message = "Age is out of range"))]
    #[schema(example = 18)]
    pub age: i32,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "test@test.com")]
    pub email: String,
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
    #[serde(default)]
    pub hidden_from_search: bool,
    pub password: Option<String>,
    /// Sign-in provider: local, google, github or facebook
    #[schema(example = "local")]
    pub provider: Option<String>,
    pub provider_id: Option<String>,
}

impl TryFrom<RegisterUserRequest> for NewUser {
    type Error = AppError;

    fn try_from(req: RegisterUserRequest) -> Result<Self, Self::Error> {
        let provider = match req.provider.as_deref() {
            Some(name) => AuthProvider::parse(name)?,
            None => AuthProvider::default(),
        };

        Ok(Self {
            public_id: req.public_id,
            name: req.name,
            age: req.age,
            hidden_from_search: req.hidden_from_search,
            email: req.email,
            image_url: req.image_url,
            email_verified: false,
            password: req.password,
            provider,
            provider_id: req.provider_id,
        })
    }
}

/// User update request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    #[validate(range(min = 13, max = 120, message = "Age is out of range"))]
    pub age: Option<i32>,
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
    /// Exclude the user's profile from search results
    pub hidden_from_search: Option<bool>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            image_url: req.image_url,
            hidden_from_search: req.hidden_from_search,
        }
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(register_user))
        .route("/:id", get(get_user).put(update_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation error or unknown provider"),
        (status = 409, description = "Email or public ID already taken")
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.users.register_user(NewUser::try_from(payload)?).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.users.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update user details
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state.users.update_user(id, payload.into()).await?;
    Ok(Json(UserResponse::from(user)))
}
