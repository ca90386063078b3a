//! Resources needed to manage folders
//!
//! Folders are listed, moved, renamed and trashed like files, through the [`file`](crate::file)
//! module. Only their creation has a dedicated endpoint.

pub mod create;
