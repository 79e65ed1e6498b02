//! Canned layout records.
//!
//! Layouts are pre-canned JSON definitions seeded into a directory by
//! external provisioning. The file-backed layout store is read-only:
//! mutation goes through a different backend.

use crate::cancel::CancelToken;
use crate::error::StoreError;
use crate::fs::{DirFs, OsFs};
use crate::store::{DirStore, EntityStore, Record};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Extension convention for layout files within a shared directory.
pub const LAYOUT_EXT: &str = ".json";

/// One query contributing to a layout cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutQuery {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub wheres: Vec<String>,
    #[serde(default, rename = "groupbys")]
    pub group_bys: Vec<String>,
}

/// One visualization cell within a layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    /// Cell identifier, unique within the layout.
    pub i: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub queries: Vec<LayoutQuery>,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub graph_type: String,
}

/// A canned visualization layout for one application's measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub id: String,
    /// Application name; doubles as the file stem at write time.
    #[serde(rename = "app")]
    pub application: String,
    pub measurement: String,
    #[serde(default)]
    pub autoflow: bool,
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Record for Layout {
    type Id = String;
    const KIND: &'static str = "layouts";
    const EXT: &'static str = LAYOUT_EXT;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn file_stem(&self) -> &str {
        &self.application
    }
}

/// Read-only layout store over a directory of `.json` files.
pub struct LayoutStore<F: DirFs = OsFs> {
    inner: DirStore<Layout, F>,
}

impl LayoutStore<OsFs> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: DirStore::new(dir),
        }
    }
}

impl<F: DirFs> LayoutStore<F> {
    pub fn with_fs(dir: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            inner: DirStore::with_fs(dir, fs),
        }
    }
}

impl<F: DirFs> EntityStore<Layout> for LayoutStore<F> {
    fn all(&self, cancel: &CancelToken) -> Result<Vec<Layout>, StoreError> {
        self.inner.all(cancel)
    }

    fn get(&self, id: &String, cancel: &CancelToken) -> Result<Layout, StoreError> {
        self.inner.get(id, cancel)
    }

    fn add(&self, _layout: &Layout, _cancel: &CancelToken) -> Result<Layout, StoreError> {
        Err(StoreError::Unsupported {
            kind: Layout::KIND,
            op: "add",
        })
    }

    fn update(&self, _layout: &Layout, _cancel: &CancelToken) -> Result<(), StoreError> {
        Err(StoreError::Unsupported {
            kind: Layout::KIND,
            op: "update",
        })
    }

    fn delete(&self, _layout: &Layout, _cancel: &CancelToken) -> Result<(), StoreError> {
        Err(StoreError::Unsupported {
            kind: Layout::KIND,
            op: "delete",
        })
    }
}
