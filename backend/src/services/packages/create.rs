use crate::services::flash;
use crate::services::packages::PAGE_PATH;
use crate::state::AppState;
use crate::store::PackageStore;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::PackageForm;

pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<PackageForm>,
) -> actix_web::Result<HttpResponse> {
    let store = state.store.clone();
    let form = form.into_inner();
    let outcome = web::block(move || store.create_package(&form)).await?;
    flash::redirect_back(
        &req,
        PAGE_PATH,
        outcome.map(|package| format!("Package '{}' created.", package.name)),
    )
}
