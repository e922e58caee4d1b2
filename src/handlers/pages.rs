use actix_files::NamedFile;
use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse};

use super::redirect;
use crate::auth;

pub async fn login(req: HttpRequest) -> actix_web::Result<HttpResponse> {
    Ok(NamedFile::open("public/login.html")?.into_response(&req))
}

/// The notepad page itself is gated; browsers without a session are bounced
/// back to the login page instead of getting a bare 401.
pub async fn notepad(req: HttpRequest, session: Session) -> actix_web::Result<HttpResponse> {
    if auth::require_session(&session).is_err() {
        return Ok(redirect("/login"));
    }
    Ok(NamedFile::open("public/index.html")?.into_response(&req))
}
