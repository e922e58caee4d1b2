use std::path::PathBuf;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use nanoid::nanoid;
use serde_derive::Deserialize;
use serde_json::json;

use crate::errors::ServerError;
use crate::models::note::Note;

#[derive(Deserialize)]
struct NotesFile {
    notes: Vec<Note>,
}

/// Note store over `notes.json`. Every lookup filters by BOTH id and owner so
/// one user can never reach another user's note, even by enumerating ids.
pub struct NoteStore {
    path: Option<PathBuf>,
    notes: RwLock<Vec<Note>>,
}

impl NoteStore {
    pub fn open(path: PathBuf) -> Result<NoteStore, ServerError> {
        let notes = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<NotesFile>(&raw)?.notes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(NoteStore {
            path: Some(path),
            notes: RwLock::new(notes),
        })
    }

    /// Memory-only store, used by tests.
    pub fn in_memory() -> NoteStore {
        NoteStore {
            path: None,
            notes: RwLock::new(Vec::new()),
        }
    }

    pub fn list_by_owner(&self, owner: &str) -> Vec<Note> {
        self.read()
            .iter()
            .filter(|n| n.owner == owner)
            .cloned()
            .collect()
    }

    pub fn create(&self, owner: &str, title: String, content: String) -> Result<String, ServerError> {
        let mut notes = self.write();

        let mut id = nanoid!();
        while notes.iter().any(|n| n.id == id) {
            id = nanoid!();
        }

        notes.push(Note {
            id: id.clone(),
            owner: owner.to_owned(),
            title,
            content,
        });
        self.persist(&notes)?;

        Ok(id)
    }

    pub fn update(
        &self,
        owner: &str,
        id: &str,
        title: String,
        content: String,
    ) -> Result<(), ServerError> {
        let mut notes = self.write();
        match notes.iter_mut().find(|n| n.id == id && n.owner == owner) {
            Some(note) => {
                note.title = title;
                note.content = content;
            }
            None => return Err(ServerError::NotFound(id.to_owned())),
        }
        self.persist(&notes)
    }

    pub fn rename(&self, owner: &str, id: &str, title: String) -> Result<(), ServerError> {
        let mut notes = self.write();
        match notes.iter_mut().find(|n| n.id == id && n.owner == owner) {
            Some(note) => note.title = title,
            None => return Err(ServerError::NotFound(id.to_owned())),
        }
        self.persist(&notes)
    }

    /// Deleting an id that does not exist, or that belongs to someone else, is
    /// an idempotent success.
    pub fn delete(&self, owner: &str, id: &str) -> Result<(), ServerError> {
        let mut notes = self.write();
        let before = notes.len();
        notes.retain(|n| !(n.id == id && n.owner == owner));

        if notes.len() == before {
            return Ok(());
        }
        self.persist(&notes)
    }

    fn persist(&self, notes: &[Note]) -> Result<(), ServerError> {
        if let Some(path) = &self.path {
            let file = std::fs::File::create(path)?;
            serde_json::to_writer_pretty(file, &json!({ "notes": notes }))?;
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Note>> {
        self.notes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Note>> {
        self.notes.write().unwrap_or_else(PoisonError::into_inner)
    }
}
