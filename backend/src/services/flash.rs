//! Redirect-back responses and the one-shot flash cookie.
//!
//! Form submissions never receive a structured error body. Every mutating
//! handler answers `303 See Other` pointing at the page the form came from and
//! leaves a [`Flash`] in the `isp_flash` cookie. The next listing request embeds
//! that flash in its page payload and expires the cookie.

use crate::error::AppError;
use crate::services::PHOTO_FIELD;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use common::model::flash::Flash;

pub const FLASH_COOKIE: &str = "isp_flash";

fn encode(flash: &Flash) -> Result<String, serde_json::Error> {
    Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(flash)?))
}

fn decode(value: &str) -> Option<Flash> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Reads the flash left by the previous submission, if any.
pub fn take(req: &HttpRequest) -> Option<Flash> {
    req.cookie(FLASH_COOKIE).and_then(|cookie| decode(cookie.value()))
}

/// Starts a `200 OK` response that also expires the flash cookie when one was read.
pub fn page_response(consumed: bool) -> HttpResponseBuilder {
    let mut builder = HttpResponse::Ok();
    if consumed {
        let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
        cookie.make_removal();
        builder.cookie(cookie);
    }
    builder
}

fn back_location(req: &HttpRequest, fallback: &str) -> String {
    req.headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn redirect(req: &HttpRequest, fallback: &str, flash: Flash) -> HttpResponse {
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, back_location(req, fallback)));
    match encode(&flash) {
        Ok(value) => {
            builder.cookie(
                Cookie::build(FLASH_COOKIE, value)
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .finish(),
            );
        }
        Err(e) => log::error!("Dropping flash message: {}", e),
    }
    builder.finish()
}

/// Turns the outcome of a mutation into a redirect back to the submitting page.
///
/// Success carries its message as a success flash. Validation, conflict and
/// storage failures become flash errors. Anything else (not found, database
/// failures) is returned as an error response.
pub fn redirect_back(
    req: &HttpRequest,
    fallback: &str,
    outcome: Result<String, AppError>,
) -> actix_web::Result<HttpResponse> {
    let flash = match outcome {
        Ok(message) => Flash::success(message),
        Err(AppError::Validation(errors)) => Flash::with_errors(errors.into_fields()),
        Err(AppError::Conflict { count, message }) => {
            log::debug!("Reporting conflict with {} blocking record(s)", count);
            Flash::error(message)
        }
        Err(AppError::Storage(e)) => {
            log::error!("Upload failed: {}", e);
            let message = "The ID card photo could not be stored. Please try again.";
            let mut flash = Flash::error(message);
            flash
                .errors
                .insert(PHOTO_FIELD.to_string(), vec![message.to_string()]);
            flash
        }
        Err(other) => return Err(other.into()),
    };
    Ok(redirect(req, fallback, flash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrors;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    fn location(resp: &HttpResponse) -> &str {
        resp.headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    fn flash_of(resp: &HttpResponse) -> Flash {
        let cookie = resp
            .cookies()
            .find(|c| c.name() == FLASH_COOKIE)
            .expect("flash cookie");
        decode(cookie.value()).unwrap()
    }

    #[test]
    fn flash_survives_the_cookie_encoding() {
        let mut flash = Flash::error("Package cannot be deleted; 1 client(s), \"quoted\"");
        flash
            .errors
            .insert("name".to_string(), vec!["The name field is required.".to_string()]);
        let value = encode(&flash).unwrap();
        assert!(value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(decode(&value), Some(flash));
    }

    #[test]
    fn garbage_cookie_is_ignored() {
        assert_eq!(decode("not base64 !"), None);
        assert_eq!(decode(&URL_SAFE_NO_PAD.encode(b"{oops")), None);
    }

    #[test]
    fn redirects_to_referer_when_present() {
        let req = TestRequest::default()
            .insert_header((header::REFERER, "/packages?page=2"))
            .to_http_request();
        let resp = redirect_back(&req, "/packages", Ok("Saved.".to_string())).unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/packages?page=2");
        assert_eq!(flash_of(&resp), Flash::success("Saved."));
    }

    #[test]
    fn redirects_to_fallback_without_referer() {
        let req = TestRequest::default().to_http_request();
        let mut errors = ValidationErrors::new();
        errors.add("name", "The name field is required.");
        let resp = redirect_back(&req, "/clients", Err(AppError::Validation(errors))).unwrap();
        assert_eq!(location(&resp), "/clients");
        assert_eq!(
            flash_of(&resp).errors["name"],
            vec!["The name field is required.".to_string()]
        );
    }

    #[test]
    fn conflict_becomes_a_flash_error() {
        let req = TestRequest::default().to_http_request();
        let resp = redirect_back(&req, "/packages", Err(AppError::package_in_use(3))).unwrap();
        let flash = flash_of(&resp);
        assert!(flash.error.unwrap().contains("3 client(s)"));
    }

    #[test]
    fn not_found_is_not_flashed() {
        let req = TestRequest::default().to_http_request();
        let err = redirect_back(
            &req,
            "/packages",
            Err(AppError::NotFound {
                entity: "package",
                id: 1,
            }),
        )
        .unwrap_err();
        assert_eq!(err.as_response_error().status_code(), StatusCode::NOT_FOUND);
    }
}
