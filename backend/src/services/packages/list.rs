use crate::services::flash;
use crate::state::AppState;
use crate::store::PackageStore;
use actix_web::{web, HttpRequest, HttpResponse};
use common::pages::PackagesPage;

pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    let store = state.store.clone();
    let packages = web::block(move || store.list_packages()).await??;
    let flash = flash::take(&req);
    Ok(flash::page_response(flash.is_some()).json(PackagesPage { packages, flash }))
}
