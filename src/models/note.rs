use serde::{Deserialize, Serialize};

/// A stored note. `id` and `owner` are assigned at creation and never change;
/// only `title` and `content` are mutable.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Note {
    pub id: String,
    pub owner: String,
    pub title: String,
    pub content: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct IncomingNote {
    pub title: String,
    pub content: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RenameNote {
    pub id: String,
    pub title: String,
}
