use crate::services::PHOTO_FIELD;
use crate::storage::Upload;
use crate::validation::ValidationErrors;
use actix_multipart::{Field, Multipart};
use common::requests::ClientForm;
use futures_util::StreamExt;

/// Upper bound for a single text part. Every text field is capped far below this.
pub const TEXT_PART_LIMIT: usize = 4 * 1024;

/// A client form as submitted: text fields plus the photo, if one was chosen.
///
/// `errors` collects problems found while reading the body (oversized parts,
/// text that is not UTF-8). When it is non-empty the submission is rejected
/// before it reaches the store.
#[derive(Debug, Default)]
pub struct ClientSubmission {
    pub form: ClientForm,
    pub photo: Option<Upload>,
    pub errors: ValidationErrors,
}

/// Streams one part into memory, keeping at most `limit` bytes. The rest of an
/// oversized part is drained and dropped so the following parts stay readable.
/// Returns `None` when the part exceeded the limit.
async fn read_capped(field: &mut Field, limit: usize) -> actix_web::Result<Option<Vec<u8>>> {
    let mut bytes = Vec::new();
    let mut overflow = false;
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if overflow {
            continue;
        }
        if bytes.len() + chunk.len() > limit {
            overflow = true;
            bytes = Vec::new();
        } else {
            bytes.extend_from_slice(&chunk);
        }
    }
    Ok((!overflow).then_some(bytes))
}

fn text(errors: &mut ValidationErrors, field: &str, bytes: Option<Vec<u8>>) -> Option<String> {
    let attribute = field.replace('_', " ");
    match bytes.map(String::from_utf8) {
        Some(Ok(value)) => Some(value),
        Some(Err(_)) => {
            errors.add(field, format!("The {} field must be valid UTF-8 text.", attribute));
            None
        }
        None => {
            errors.add(field, format!("The {} field is too large.", attribute));
            None
        }
    }
}

/// Drains the multipart body. Text parts are capped at [`TEXT_PART_LIMIT`] and
/// the photo at `photo_limit` bytes. Unknown parts are drained and discarded; an
/// empty file part (file input left blank) counts as no photo.
pub async fn read_submission(
    mut payload: Multipart,
    photo_limit: usize,
) -> actix_web::Result<ClientSubmission> {
    let mut submission = ClientSubmission::default();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let (name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().map(|n| n.to_string()),
                cd.get_filename().map(|f| f.to_string()),
            ),
            None => (None, None),
        };

        let errors = &mut submission.errors;
        match name.as_deref() {
            Some(PHOTO_FIELD) => match read_capped(&mut field, photo_limit).await? {
                Some(bytes) => {
                    let upload = Upload {
                        filename: filename.unwrap_or_default(),
                        bytes,
                    };
                    if !upload.is_empty() {
                        submission.photo = Some(upload);
                    }
                }
                None => errors.add(
                    PHOTO_FIELD,
                    format!(
                        "The id card photo field must not be greater than {} kilobytes.",
                        photo_limit / 1024
                    ),
                ),
            },
            Some(key @ ("name" | "address" | "whatsapp_number" | "package_id")) => {
                let value = text(errors, key, read_capped(&mut field, TEXT_PART_LIMIT).await?);
                let slot = match key {
                    "name" => &mut submission.form.name,
                    "address" => &mut submission.form.address,
                    "whatsapp_number" => &mut submission.form.whatsapp_number,
                    _ => &mut submission.form.package_id,
                };
                *slot = value;
            }
            _ => {
                read_capped(&mut field, 0).await?;
            }
        }
    }

    Ok(submission)
}
