//! Auth module — accounts, password hashing, and cookie sessions.
//!
//! # Resources
//!
//! - **User** — account row: unique lowercased username, argon2id
//!   password hash, display name
//! - **Session** — in-memory entry: opaque cookie token → user snapshot
//!
//! # Usage
//!
//! ```ignore
//! use auth::{AuthModule, service::AuthConfig};
//!
//! let module = AuthModule::new(sql, AuthConfig::default())?;
//! let router = module.routes();
//! let authn = module.authenticator(); // guard for protected routers
//! ```

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use notehub_core::{Module, SessionAuthenticator};

use crate::service::{AuthConfig, AuthService};

/// Auth module implementing the Module trait.
///
/// Holds the AuthService and provides the public account routes. The
/// same service doubles as the session authenticator consumed by every
/// protected router.
pub struct AuthModule {
    service: Arc<AuthService>,
}

impl AuthModule {
    /// Create a new AuthModule.
    pub fn new(
        sql: Arc<dyn notehub_sql::SQLStore>,
        config: AuthConfig,
    ) -> Result<Self, notehub_core::ServiceError> {
        let service = AuthService::new(sql, config)
            .map_err(notehub_core::ServiceError::from)?;
        Ok(Self { service })
    }

    /// Get a reference to the underlying AuthService.
    pub fn service(&self) -> &Arc<AuthService> {
        &self.service
    }

    /// The session authenticator handed to protected routers.
    pub fn authenticator(&self) -> Arc<dyn SessionAuthenticator> {
        self.service.clone()
    }
}

impl Module for AuthModule {
    fn name(&self) -> &str {
        "auth"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
