use crate::services::flash;
use crate::state::AppState;
use crate::store::{ClientStore, PackageStore};
use actix_web::{web, HttpRequest, HttpResponse};
use common::pages::ClientsPage;

pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    let store = state.store.clone();
    let (clients, packages) = web::block(move || -> crate::error::Result<_> {
        Ok((store.list_clients()?, store.all_packages()?))
    })
    .await??;
    let flash = flash::take(&req);
    Ok(flash::page_response(flash.is_some()).json(ClientsPage {
        clients,
        packages,
        flash,
    }))
}
