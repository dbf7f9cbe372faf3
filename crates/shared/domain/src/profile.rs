//! Professional profile types and the closed role vocabulary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    INVALID_ROLE_MESSAGE, ROLE_JUNIOR, ROLE_MENTOR, ROLE_PROJECT_MANAGER, ROLE_TESTER,
    ROLE_UX_DESIGNER,
};
use crate::error::{DomainError, DomainResult};

/// Professional role a profile is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Mentor,
    Junior,
    ProjectManager,
    Tester,
    UxDesigner,
}

impl UserRole {
    /// Every role, in declaration order
    pub const ALL: [UserRole; 5] = [
        UserRole::Mentor,
        UserRole::Junior,
        UserRole::ProjectManager,
        UserRole::Tester,
        UserRole::UxDesigner,
    ];

    /// Parse a role name.
    ///
    /// Matching is exact and case-sensitive: `"MENTOR"` parses, `"mentor"` does not.
    pub fn parse(name: &str) -> DomainResult<Self> {
        match name {
            ROLE_MENTOR => Ok(UserRole::Mentor),
            ROLE_JUNIOR => Ok(UserRole::Junior),
            ROLE_PROJECT_MANAGER => Ok(UserRole::ProjectManager),
            ROLE_TESTER => Ok(UserRole::Tester),
            ROLE_UX_DESIGNER => Ok(UserRole::UxDesigner),
            _ => Err(DomainError::validation(INVALID_ROLE_MESSAGE)),
        }
    }

    /// Parse every name, failing on the first one outside the vocabulary
    pub fn parse_all<I, S>(names: I) -> DomainResult<Vec<Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| Self::parse(name.as_ref()))
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Mentor => ROLE_MENTOR,
            UserRole::Junior => ROLE_JUNIOR,
            UserRole::ProjectManager => ROLE_PROJECT_MANAGER,
            UserRole::Tester => ROLE_TESTER,
            UserRole::UxDesigner => ROLE_UX_DESIGNER,
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::parse(s)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A technology label attached to a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserTechnology {
    pub id: Uuid,
    pub technology_name: String,
}

impl UserTechnology {
    pub fn new(technology_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            technology_name: technology_name.into(),
        }
    }
}

/// Professional profile, one per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_role: UserRole,
    pub technologies: Vec<UserTechnology>,
}

impl UserProfile {
    /// Create an empty profile for a user
    pub fn new(user_id: Uuid, user_role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            user_role,
            technologies: Vec::new(),
        }
    }

    pub fn has_technology(&self, name: &str) -> bool {
        self.technologies.iter().any(|t| t.technology_name == name)
    }

    /// Attach a technology; returns false if it was already attached
    pub fn add_technology(&mut self, technology: UserTechnology) -> bool {
        if self.has_technology(&technology.technology_name) {
            return false;
        }
        self.technologies.push(technology);
        true
    }

    /// Detach a technology by name, returning it if it was attached
    pub fn remove_technology(&mut self, name: &str) -> Option<UserTechnology> {
        let index = self
            .technologies
            .iter()
            .position(|t| t.technology_name == name)?;
        Some(self.technologies.remove(index))
    }

    pub fn technology_names(&self) -> Vec<&str> {
        self.technologies
            .iter()
            .map(|t| t.technology_name.as_str())
            .collect()
    }
}

/// Search filters over profiles.
///
/// Role names stay raw strings here; they are validated against the
/// vocabulary by the search service before any lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProfileSearchRequest {
    /// Technology names; a profile matches if it has any of them
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Role names; a profile matches if its role is any of them
    #[serde(default)]
    pub roles: Vec<String>,
}

impl ProfileSearchRequest {
    pub fn new(technologies: Vec<String>, roles: Vec<String>) -> Self {
        Self {
            technologies,
            roles,
        }
    }
}
