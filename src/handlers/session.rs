use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde_json::json;

use super::redirect;
use crate::{auth, errors::ServerError, models::user::Credentials, store::users::UserStore};

pub async fn login(
    input: web::Form<Credentials>,
    session: Session,
    users: web::Data<UserStore>,
) -> Result<HttpResponse, ServerError> {
    users.authenticate(&input.username, &input.password)?;
    auth::start_session(&session, &input.username)?;
    Ok(redirect("/notepad"))
}

pub async fn register(
    input: web::Form<Credentials>,
    session: Session,
    users: web::Data<UserStore>,
) -> Result<HttpResponse, ServerError> {
    users.register(&input.username, &input.password)?;
    auth::start_session(&session, &input.username)?;
    Ok(redirect("/notepad"))
}

pub async fn logout(session: Session) -> HttpResponse {
    auth::destroy_session(&session);
    redirect("/login")
}

pub async fn current_user(session: Session) -> Result<HttpResponse, ServerError> {
    let username = auth::require_session(&session)?;
    Ok(HttpResponse::Ok().json(json!({ "username": username })))
}
