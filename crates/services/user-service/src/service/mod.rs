//! Service layer - application use cases.

mod container;
mod user_profile_service;
mod user_service;

pub use container::Services;
pub use user_profile_service::{UserProfileManager, UserProfileService};
pub use user_service::{UserManager, UserService};
