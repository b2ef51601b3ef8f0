//! Authentication and authorization module

pub mod cookie;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::{extract_token, require_admin, SESSION_COOKIE};
pub use password::PasswordHasher;
