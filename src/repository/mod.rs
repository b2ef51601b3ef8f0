//! Database repository layer

pub mod admin_repo;
pub mod blog_repo;
pub mod dashboard_repo;
pub mod page_content_repo;
pub mod service_repo;
pub mod setting_repo;

pub use admin_repo::*;
pub use blog_repo::*;
pub use dashboard_repo::*;
pub use page_content_repo::*;
pub use service_repo::*;
pub use setting_repo::*;
