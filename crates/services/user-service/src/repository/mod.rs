//! Repository layer for data access.

pub mod entities;
mod user_profile_repository;
mod user_repository;

pub use user_profile_repository::{UserProfileRepository, UserProfileStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use user_profile_repository::MockUserProfileRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
