use crate::services::clients::multipart::read_submission;
use crate::services::clients::PAGE_PATH;
use crate::services::flash;
use crate::state::AppState;
use crate::store::ClientStore;
use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};

/// Without a new photo in the submission the stored photo path is left as is.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: Multipart,
) -> actix_web::Result<HttpResponse> {
    let id = id.into_inner();
    let submission = read_submission(payload, state.max_photo_bytes).await?;
    if !submission.errors.is_empty() {
        return flash::redirect_back(&req, PAGE_PATH, Err(submission.errors.into()));
    }
    let state = state.into_inner();
    let outcome = web::block(move || {
        state.store.update_client(
            id,
            &submission.form,
            submission.photo.as_ref(),
            state.storage.as_ref(),
        )
    })
    .await?;
    flash::redirect_back(
        &req,
        PAGE_PATH,
        outcome.map(|client| format!("Client '{}' updated.", client.name)),
    )
}
