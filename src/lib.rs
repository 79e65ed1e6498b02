//! Flatstore: filesystem-backed entity store.
//!
//! Persists small, uniquely identified domain records (canned layouts,
//! server configurations) as individual flat files in a directory, one
//! record per file, distinguished by a per-kind file extension. Identifiers
//! live in file content, not in file names, so every lookup is a sequential
//! scan-and-parse over the directory.

pub mod cancel;
pub mod config;
pub mod error;
pub mod fs;
pub mod layout;
pub mod logging;
pub mod server;
pub mod store;
