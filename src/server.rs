//! Server configuration records.
//!
//! Server (agent/processing-node) configurations are JSON files with the
//! `.kap` extension. Unlike layouts they are mutable in place: the store
//! supports update and delete, but creation still happens by external
//! provisioning.

use crate::cancel::CancelToken;
use crate::error::StoreError;
use crate::fs::{DirFs, OsFs};
use crate::store::{DirStore, EntityStore, Record};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Extension convention for server configuration files.
pub const SERVER_EXT: &str = ".kap";

/// Connection details for one server/agent.
///
/// Only `id` is required on disk; everything else defaults so minimal
/// pre-seeded files parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: i64,
    #[serde(default, rename = "srcID")]
    pub src_id: i64,
    /// Display name; doubles as the file stem at write time.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub organization: String,
    #[serde(default, rename = "insecureSkipVerify")]
    pub insecure_skip_verify: bool,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub server_type: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Record for Server {
    type Id = i64;
    const KIND: &'static str = "servers";
    const EXT: &'static str = SERVER_EXT;

    fn id(&self) -> i64 {
        self.id
    }

    fn file_stem(&self) -> &str {
        &self.name
    }
}

/// Server configuration store over a directory of `.kap` files.
pub struct ServerStore<F: DirFs = OsFs> {
    inner: DirStore<Server, F>,
}

impl ServerStore<OsFs> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: DirStore::new(dir),
        }
    }
}

impl<F: DirFs> ServerStore<F> {
    pub fn with_fs(dir: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            inner: DirStore::with_fs(dir, fs),
        }
    }
}

impl<F: DirFs> EntityStore<Server> for ServerStore<F> {
    fn all(&self, cancel: &CancelToken) -> Result<Vec<Server>, StoreError> {
        self.inner.all(cancel)
    }

    fn get(&self, id: &i64, cancel: &CancelToken) -> Result<Server, StoreError> {
        self.inner.get(id, cancel)
    }

    fn add(&self, _server: &Server, _cancel: &CancelToken) -> Result<Server, StoreError> {
        Err(StoreError::Unsupported {
            kind: Server::KIND,
            op: "add",
        })
    }

    fn update(&self, server: &Server, cancel: &CancelToken) -> Result<(), StoreError> {
        self.inner.update(server, cancel)
    }

    fn delete(&self, server: &Server, cancel: &CancelToken) -> Result<(), StoreError> {
        self.inner.delete(server, cancel)
    }
}
