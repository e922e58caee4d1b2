use actix_web::HttpResponse;
use derive_more::Display;

#[derive(Debug, Display)]
pub enum ServerError {
    #[display(fmt = "user already exists")]
    DuplicateUser,
    #[display(fmt = "invalid credentials")]
    InvalidCredentials,
    #[display(fmt = "no active session")]
    Unauthenticated,
    NotFound(String),
    ArgonError,
    StorageError,
    SessionError,
}

impl From<std::io::Error> for ServerError {
    fn from(_: std::io::Error) -> ServerError {
        ServerError::StorageError
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(_: serde_json::Error) -> ServerError {
        ServerError::StorageError
    }
}

impl From<argon2::password_hash::Error> for ServerError {
    fn from(_: argon2::password_hash::Error) -> ServerError {
        ServerError::ArgonError
    }
}

impl From<actix_session::SessionInsertError> for ServerError {
    fn from(_: actix_session::SessionInsertError) -> ServerError {
        ServerError::SessionError
    }
}

// A session value that cannot be read back counts as no session.
impl From<actix_session::SessionGetError> for ServerError {
    fn from(_: actix_session::SessionGetError) -> ServerError {
        ServerError::Unauthenticated
    }
}

impl actix_web::error::ResponseError for ServerError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServerError::DuplicateUser => HttpResponse::BadRequest().body("User already exists"),
            ServerError::InvalidCredentials => {
                HttpResponse::Unauthorized().body("Invalid credentials")
            }
            ServerError::Unauthenticated => HttpResponse::Unauthorized().finish(),
            ServerError::NotFound(id) => HttpResponse::NotFound()
                .body(format!("Note with the id of: '{}' was not found", id)),
            ServerError::ArgonError => {
                HttpResponse::InternalServerError().body("Library Error: Argon2 Error")
            }
            ServerError::StorageError => {
                HttpResponse::InternalServerError().body("Server Error: Record Store Error.")
            }
            ServerError::SessionError => {
                HttpResponse::InternalServerError().body("Server Error: Session Error.")
            }
        }
    }
}
