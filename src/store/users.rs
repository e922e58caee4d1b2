use std::path::PathBuf;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_derive::Deserialize;
use serde_json::json;

use crate::errors::ServerError;
use crate::models::user::User;

#[derive(Deserialize)]
struct UsersFile {
    users: Vec<User>,
}

/// Credential store over `users.json`. Records are only ever appended; there
/// is no account update or deletion.
pub struct UserStore {
    path: Option<PathBuf>,
    users: RwLock<Vec<User>>,
}

impl UserStore {
    pub fn open(path: PathBuf) -> Result<UserStore, ServerError> {
        let users = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<UsersFile>(&raw)?.users,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(UserStore {
            path: Some(path),
            users: RwLock::new(users),
        })
    }

    /// Memory-only store, used by tests.
    pub fn in_memory() -> UserStore {
        UserStore {
            path: None,
            users: RwLock::new(Vec::new()),
        }
    }

    pub fn register(&self, username: &str, password: &str) -> Result<(), ServerError> {
        let mut users = self.write();
        if users.iter().any(|u| u.username == username) {
            return Err(ServerError::DuplicateUser);
        }

        users.push(User::new(username, password)?);
        self.persist(&users)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), ServerError> {
        let users = self.read();
        match users.iter().find(|u| u.username == username) {
            Some(user) if user.verify_password(password) => Ok(()),
            _ => Err(ServerError::InvalidCredentials),
        }
    }

    fn persist(&self, users: &[User]) -> Result<(), ServerError> {
        if let Some(path) = &self.path {
            let file = std::fs::File::create(path)?;
            serde_json::to_writer_pretty(file, &json!({ "users": users }))?;
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<User>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<User>> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }
}
