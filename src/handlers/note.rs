use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    auth,
    errors::ServerError,
    models::note::{IncomingNote, RenameNote},
    store::notes::NoteStore,
};

pub async fn list(
    session: Session,
    notes: web::Data<NoteStore>,
) -> Result<HttpResponse, ServerError> {
    let owner = auth::require_session(&session)?;
    Ok(HttpResponse::Ok().json(notes.list_by_owner(&owner)))
}

pub async fn new(
    input: web::Json<IncomingNote>,
    session: Session,
    notes: web::Data<NoteStore>,
) -> Result<HttpResponse, ServerError> {
    let owner = auth::require_session(&session)?;
    let input = input.into_inner();
    let id = notes.create(&owner, input.title, input.content)?;
    Ok(HttpResponse::Ok().json(json!({ "id": id })))
}

pub async fn update(
    note_id: web::Path<String>,
    input: web::Json<IncomingNote>,
    session: Session,
    notes: web::Data<NoteStore>,
) -> Result<HttpResponse, ServerError> {
    let owner = auth::require_session(&session)?;
    let input = input.into_inner();
    notes.update(&owner, &note_id, input.title, input.content)?;
    Ok(HttpResponse::Ok().finish())
}

pub async fn rename(
    input: web::Json<RenameNote>,
    session: Session,
    notes: web::Data<NoteStore>,
) -> Result<HttpResponse, ServerError> {
    let owner = auth::require_session(&session)?;
    let input = input.into_inner();
    notes.rename(&owner, &input.id, input.title)?;
    Ok(HttpResponse::Ok().finish())
}

pub async fn del(
    note_id: web::Path<String>,
    session: Session,
    notes: web::Data<NoteStore>,
) -> Result<HttpResponse, ServerError> {
    let owner = auth::require_session(&session)?;
    notes.delete(&owner, &note_id)?;
    Ok(HttpResponse::Ok().finish())
}
