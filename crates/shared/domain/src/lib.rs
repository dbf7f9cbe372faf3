//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Users, their professional profiles and the closed role vocabulary live here.

pub mod constants;
pub mod error;
pub mod profile;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use profile::{ProfileSearchRequest, UserProfile, UserRole, UserTechnology};
pub use user::{AuthProvider, NewUser, UpdateUser, User, UserResponse};
