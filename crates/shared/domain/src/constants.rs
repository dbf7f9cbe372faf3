//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Profile Roles
// =============================================================================

pub const ROLE_MENTOR: &str = "MENTOR";
pub const ROLE_JUNIOR: &str = "JUNIOR";
pub const ROLE_PROJECT_MANAGER: &str = "PROJECT_MANAGER";
pub const ROLE_TESTER: &str = "TESTER";
pub const ROLE_UX_DESIGNER: &str = "UX_DESIGNER";

/// Message returned when a client sends a role outside the vocabulary
pub const INVALID_ROLE_MESSAGE: &str = "Pick value from List";

// =============================================================================
// Auth Providers
// =============================================================================

pub const PROVIDER_LOCAL: &str = "local";
pub const PROVIDER_GOOGLE: &str = "google";
pub const PROVIDER_GITHUB: &str = "github";
pub const PROVIDER_FACEBOOK: &str = "facebook";

