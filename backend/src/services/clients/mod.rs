//! # Client Service Module
//!
//! HTTP endpoints for subscriber records, mounted under `/api/clients`.
//! Create and update are `multipart/form-data` because the forms carry an
//! optional ID card photo next to the text fields.
//!
//! ## Sub-modules:
//! - `list`: clients with their packages, plus the package catalog for the picker.
//! - `create`, `update`, `delete`: form submissions answered with a redirect back.
//! - `multipart`: reads the client form and the optional photo from the request body.

mod create;
mod delete;
mod list;
pub(crate) mod multipart;
mod update;

use actix_web::web::{delete, get, patch, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/clients";

pub(crate) const PAGE_PATH: &str = "/clients";

/// Configures and returns the Actix `Scope` for all client routes.
///
/// Update accepts `POST` as well as `PUT`/`PATCH`, since browsers submit
/// multipart forms with `POST` only.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", patch().to(update::process))
        .route("/{id}", post().to(update::process))
        .route("/{id}", delete().to(delete::process))
}
