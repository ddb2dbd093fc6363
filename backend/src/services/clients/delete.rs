use crate::services::clients::PAGE_PATH;
use crate::services::flash;
use crate::state::AppState;
use crate::store::ClientStore;
use actix_web::{web, HttpRequest, HttpResponse};

pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> actix_web::Result<HttpResponse> {
    let store = state.store.clone();
    let id = id.into_inner();
    let outcome = web::block(move || store.delete_client(id)).await?;
    flash::redirect_back(&req, PAGE_PATH, outcome.map(|()| "Client deleted.".to_string()))
}
