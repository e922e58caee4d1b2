//! Session gate. Handlers resolve the cookie session to a username through
//! [`require_session`] and pass that value to the stores as the ownership key;
//! client-supplied owner values are never trusted.

use actix_session::Session;

use crate::errors::ServerError;

const SESSION_USER_KEY: &str = "username";

pub fn require_session(session: &Session) -> Result<String, ServerError> {
    match session.get::<String>(SESSION_USER_KEY)? {
        Some(username) => Ok(username),
        None => Err(ServerError::Unauthenticated),
    }
}

pub fn start_session(session: &Session, username: &str) -> Result<(), ServerError> {
    session.renew();
    session.insert(SESSION_USER_KEY, username)?;
    Ok(())
}

pub fn destroy_session(session: &Session) {
    session.purge();
}
