use crate::services::flash;
use crate::services::packages::PAGE_PATH;
use crate::state::AppState;
use crate::store::PackageStore;
use actix_web::{web, HttpRequest, HttpResponse};

/// `DELETE /api/packages/{id}`. A package still linked to clients is kept and
/// the refusal, with the number of blocking clients, comes back as a flash error.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> actix_web::Result<HttpResponse> {
    let store = state.store.clone();
    let id = id.into_inner();
    let outcome = web::block(move || store.delete_package(id)).await?;
    flash::redirect_back(
        &req,
        PAGE_PATH,
        outcome.map(|()| "Package deleted.".to_string()),
    )
}
