//! Record stores. The user and note collections are file-backed: loaded fully
//! into memory at startup, whole file rewritten on every mutation. Concurrent
//! writers to the same record are last-write-wins; known limitation at this
//! scale. Sessions live in process memory only.

pub mod notes;
pub mod sessions;
pub mod users;
