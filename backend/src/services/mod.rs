pub mod clients;
pub mod flash;
pub mod packages;


use actix_files::Files;
use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;
use actix_web::web;
use std::path::PathBuf;

/// Mount point of the uploaded files.
pub const STORAGE_PATH: &str = "/storage";

/// Name of the multipart file part carrying the ID card photo.
pub(crate) const PHOTO_FIELD: &str = "id_card_photo";

/// Registers the package and client API scopes together with their extractor limits.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().limit(64 * 1024))
        .service(packages::configure_routes())
        .service(clients::configure_routes());
}

/// Serves the storage root read-only under [`STORAGE_PATH`]. Responses carry
/// `X-Content-Type-Options: nosniff` so browsers keep to the declared type.
pub fn storage_files(root: PathBuf) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope(STORAGE_PATH)
                .wrap(DefaultHeaders::new().add((header::X_CONTENT_TYPE_OPTIONS, "nosniff")))
                .service(Files::new("", root)),
        );
    }
}
