pub mod auth;
pub mod config;
pub mod error;
pub mod module;
pub mod types;

pub use auth::{AllowAll, AuthContext, DenyAll, SessionAuthenticator, SessionUser};
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use module::Module;
pub use types::{ListParams, ListResult, new_id, now_rfc3339};
