//! Store contracts
//!
//! Defines the record contract shared by all file-backed entity kinds and
//! the canonical operations a store exposes over them. The generic
//! directory engine lives in [`dir`].

pub mod dir;

use crate::cancel::CancelToken;
use crate::error::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;

pub use dir::DirStore;

/// A persisted domain record: one file, one record.
///
/// Identity is the value of [`Record::id`], compared for exact equality.
/// The identifier type is kind-defined and not unified across kinds
/// (layouts use strings, servers use integers).
pub trait Record: Serialize + DeserializeOwned {
    type Id: PartialEq + Clone + Display;

    /// Component name used in structured log entries.
    const KIND: &'static str;

    /// File extension reserved by this kind, with the leading dot.
    const EXT: &'static str;

    fn id(&self) -> Self::Id;

    /// Human-readable name used to build the file name at write time.
    fn file_stem(&self) -> &str;
}

/// The canonical operations over one entity kind.
///
/// Implementations re-read the directory on every call; nothing is cached
/// between operations. Which operations a backend actually offers varies
/// by kind; unsupported ones fail with [`StoreError::Unsupported`].
pub trait EntityStore<R: Record> {
    /// Every record that loads cleanly, in directory-listing order.
    fn all(&self, cancel: &CancelToken) -> Result<Vec<R>, StoreError>;

    /// The record whose content identifier equals `id`.
    fn get(&self, id: &R::Id, cancel: &CancelToken) -> Result<R, StoreError>;

    /// Create a new record. File-backed kinds are provisioned externally,
    /// so this fails with [`StoreError::Unsupported`] on the stores here.
    fn add(&self, record: &R, cancel: &CancelToken) -> Result<R, StoreError>;

    /// Replace the stored record matching `record.id()`.
    fn update(&self, record: &R, cancel: &CancelToken) -> Result<(), StoreError>;

    /// Remove the stored record matching `record.id()`.
    fn delete(&self, record: &R, cancel: &CancelToken) -> Result<(), StoreError>;
}

/// Identifier-generator collaborator for kinds whose creation path is
/// supported. The file-backed kinds in this crate never create records,
/// so no store here consults one; database-backed backends do.
pub trait IdSource: Send + Sync {
    fn next(&self) -> Result<String, StoreError>;
}
