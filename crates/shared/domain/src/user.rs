//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{PROVIDER_FACEBOOK, PROVIDER_GITHUB, PROVIDER_GOOGLE, PROVIDER_LOCAL};
use crate::error::{DomainError, DomainResult};

/// Where a user's credentials come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[default]
    Local,
    Google,
    Github,
    Facebook,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => PROVIDER_LOCAL,
            AuthProvider::Google => PROVIDER_GOOGLE,
            AuthProvider::Github => PROVIDER_GITHUB,
            AuthProvider::Facebook => PROVIDER_FACEBOOK,
        }
    }

    /// Parse a provider name; matching is exact and lower-case.
    pub fn parse(name: &str) -> DomainResult<Self> {
        match name {
            PROVIDER_LOCAL => Ok(AuthProvider::Local),
            PROVIDER_GOOGLE => Ok(AuthProvider::Google),
            PROVIDER_GITHUB => Ok(AuthProvider::Github),
            PROVIDER_FACEBOOK => Ok(AuthProvider::Facebook),
            _ => Err(DomainError::unknown("provider", name)),
        }
    }
}

impl std::str::FromStr for AuthProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuthProvider::parse(s)
    }
}

impl std::fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Public, human-facing identifier
    pub public_id: i64,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub image_url: Option<String>,
    pub email_verified: bool,
    /// Opaque credential issued by the identity layer
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub hidden_from_search: bool,
    pub provider: AuthProvider,
    pub provider_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Materialize a new user from registration data
    pub fn new(id: Uuid, public_id: i64, data: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id,
            public_id,
            name: data.name,
            age: data.age,
            email: data.email,
            image_url: data.image_url,
            email_verified: data.email_verified,
            password: data.password,
            hidden_from_search: data.hidden_from_search,
            provider: data.provider,
            provider_id: data.provider_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if user may appear in profile search results
    pub fn is_searchable(&self) -> bool {
        !self.hidden_from_search
    }

    /// Apply a partial update
    pub fn apply(&mut self, changes: UpdateUser) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(age) = changes.age {
            self.age = age;
        }
        if let Some(image_url) = changes.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(hidden) = changes.hidden_from_search {
            self.hidden_from_search = hidden;
        }
        self.updated_at = Utc::now();
    }
}

/// Registration data for a new user.
///
/// `public_id` is optional; the store assigns the next free value when absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewUser {
    pub public_id: Option<i64>,
    pub name: String,
    pub age: i32,
    pub hidden_from_search: bool,
    pub email: String,
    pub image_url: Option<String>,
    pub email_verified: bool,
    pub password: Option<String>,
    pub provider: AuthProvider,
    pub provider_id: Option<String>,
}

/// User update data transfer object
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub image_url: Option<String>,
    pub hidden_from_search: Option<bool>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.image_url.is_none()
            && self.hidden_from_search.is_none()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// Public identifier
    pub public_id: i64,
    /// Display name
    pub name: String,
    pub age: i32,
    /// Email address
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub email_verified: bool,
    pub hidden_from_search: bool,
    pub provider: AuthProvider,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            public_id: user.public_id,
            name: user.name,
            age: user.age,
            email: user.email,
            image_url: user.image_url,
            email_verified: user.email_verified,
            hidden_from_search: user.hidden_from_search,
            provider: user.provider,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse::from(user.clone())
    }
}
