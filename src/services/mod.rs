//! Business logic services layer

pub mod auth_service;
pub mod media_service;

pub use auth_service::AuthService;
pub use media_service::MediaService;
