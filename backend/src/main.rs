mod config;
mod error;
mod services;
mod state;
mod storage;
mod store;
mod validation;

use crate::config::Config;
use crate::state::AppState;
use crate::storage::{LocalStorage, ID_CARD_NAMESPACE};
use crate::store::SqliteStore;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use clap::Parser;
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::info;
use mime_guess::from_path;
use std::io;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serves the embedded admin UI. Unknown paths get `index.html` so the
/// front end can route `/packages` and `/clients` itself.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::parse();
    let url = config.url();

    let store = SqliteStore::open(&config.database).map_err(io::Error::other)?;
    info!("Using database {}", config.database.display());
    if config.seed {
        crate::store::seed::seed_demo_data(&store).map_err(io::Error::other)?;
    }

    let storage = LocalStorage::new(&config.storage_dir, ID_CARD_NAMESPACE);
    storage.ensure_dirs().map_err(io::Error::other)?;
    let storage_root = storage.root().to_path_buf();

    if config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    let state = web::Data::new(AppState::new(store, storage, config.max_photo_bytes));

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(services::configure)
            .configure(services::storage_files(storage_root.clone()))
            .default_service(web::route().to(serve_embedded))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
