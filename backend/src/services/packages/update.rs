use crate::services::flash;
use crate::services::packages::PAGE_PATH;
use crate::state::AppState;
use crate::store::PackageStore;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::PackageForm;

pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    form: web::Form<PackageForm>,
) -> actix_web::Result<HttpResponse> {
    let store = state.store.clone();
    let id = id.into_inner();
    let form = form.into_inner();
    let outcome = web::block(move || store.update_package(id, &form)).await?;
    flash::redirect_back(
        &req,
        PAGE_PATH,
        outcome.map(|package| format!("Package '{}' updated.", package.name)),
    )
}
