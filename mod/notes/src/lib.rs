//! Notes module — note catalog, file uploads, and reviews.
//!
//! # Resources
//!
//! - **Note** — catalog entry for one uploaded file (title, subject,
//!   branch, stored filename, blob key, uploader id)
//! - **Review** — rating + comment on a note, stamped with the
//!   reviewer's id and display-name snapshot
//!
//! Every route in this module reads or writes user- or note-scoped
//! data, so the whole router is built behind the session guard: the
//! authenticator is a constructor parameter, not an opt-in call inside
//! handlers. A route added here later is gated automatically.

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use notehub_core::{Module, SessionAuthenticator};

use crate::service::NotesService;

/// Notes module implementing the Module trait.
pub struct NotesModule {
    service: Arc<NotesService>,
    authn: Arc<dyn SessionAuthenticator>,
}

impl NotesModule {
    /// Create a new NotesModule. `authn` gates every route.
    pub fn new(
        sql: Arc<dyn notehub_sql::SQLStore>,
        blob: Arc<dyn notehub_blob::BlobStore>,
        authn: Arc<dyn SessionAuthenticator>,
    ) -> Result<Self, notehub_core::ServiceError> {
        let service = NotesService::new(sql, blob)
            .map_err(notehub_core::ServiceError::from)?;
        Ok(Self { service, authn })
    }

    /// Get a reference to the underlying NotesService.
    pub fn service(&self) -> &Arc<NotesService> {
        &self.service
    }
}

impl Module for NotesModule {
    fn name(&self) -> &str {
        "notes"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone(), self.authn.clone())
    }
}
