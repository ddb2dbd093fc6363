//! # Package Service Module
//!
//! HTTP endpoints for the package catalog, mounted under `/api/packages`.
//!
//! ## Sub-modules:
//! - `list`: the catalog with live client counts.
//! - `create`: adds a package from the create form.
//! - `update`: edits name, price and speed of an existing package.
//! - `delete`: removes a package, refused while clients still use it.

mod create;
mod delete;
mod list;
mod update;

use actix_web::web::{delete, get, patch, post, put, scope};
use actix_web::Scope;

/// The base path for all package API endpoints.
const API_PATH: &str = "/api/packages";

/// Front-end page that mutations fall back to when the request has no `Referer`.
pub(crate) const PAGE_PATH: &str = "/packages";

/// Configures and returns the Actix `Scope` for all package routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**: `list::process`, the `PackagesPage` JSON payload.
/// *   **`POST /`**: `create::process`, urlencoded `name`, `price`, `speed`.
/// *   **`PUT|PATCH /{id}`**: `update::process`, same fields as create.
/// *   **`DELETE /{id}`**: `delete::process`.
///
/// Every mutation answers with a redirect back and a flash message.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", patch().to(update::process))
        .route("/{id}", delete().to(delete::process))
}
