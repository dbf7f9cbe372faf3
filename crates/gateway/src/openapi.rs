//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::health_handler::{HealthResponse, ServiceHealth, ServiceStatus};
use crate::handlers::profile_handler::{ChangeRoleRequest, CreateProfileRequest, TechnologyRequest};
use crate::handlers::user_handler::{RegisterUserRequest, UpdateUserRequest};
use domain::{ProfileSearchRequest, UserProfile, UserResponse, UserRole, UserTechnology};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::register_user,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::profile_handler::get_profile,
        crate::handlers::profile_handler::create_profile,
        crate::handlers::profile_handler::change_role,
        crate::handlers::profile_handler::add_technology,
        crate::handlers::profile_handler::remove_technology,
        crate::handlers::profile_handler::search_profiles,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceStatus,
            ServiceHealth,
            RegisterUserRequest,
            UpdateUserRequest,
            UserResponse,
            CreateProfileRequest,
            ChangeRoleRequest,
            TechnologyRequest,
            ProfileSearchRequest,
            UserProfile,
            UserRole,
            UserTechnology,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Users", description = "User registration and management"),
        (name = "Profiles", description = "Professional profiles and profile search"),
    )
)]
pub struct ApiDoc;
