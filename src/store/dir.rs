//! Generic directory store engine.
//!
//! One [`DirStore`] owns one directory and one entity kind. Records are
//! flat files carrying their identifier in content, so resolution is a
//! sequential scan: list the directory, parse extension-matching files in
//! listing order, stop at the first identifier match.

use crate::cancel::CancelToken;
use crate::error::StoreError;
use crate::fs::{DirFs, OsFs};
use crate::store::Record;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Deterministic path for a new or replacement record file.
pub fn record_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    dir.join(format!("{stem}{ext}"))
}

/// Directory-backed store for one record kind.
///
/// Holds no state between calls: every operation re-reads the directory
/// fresh. Scans are strictly sequential; first-match resolution and the
/// strict failure rule below depend on ordered evaluation.
pub struct DirStore<R: Record, F: DirFs = OsFs> {
    dir: PathBuf,
    fs: F,
    _kind: PhantomData<fn() -> R>,
}

impl<R: Record> DirStore<R, OsFs> {
    /// Store over `dir` using the real filesystem.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_fs(dir, OsFs::new())
    }
}

impl<R: Record, F: DirFs> DirStore<R, F> {
    /// Store over `dir` with an injected filesystem collaborator.
    pub fn with_fs(dir: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            dir: dir.into(),
            fs,
            _kind: PhantomData,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read and deserialize one candidate file.
    ///
    /// An unreadable file classifies as NotFound (the record may have been
    /// removed between listing and reading); a readable file that does not
    /// deserialize classifies as Invalid.
    fn load(&self, path: &Path) -> Result<R, StoreError> {
        let bytes = self
            .fs
            .read(path)
            .map_err(|_| StoreError::unreadable(R::KIND, path.to_path_buf()))?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Invalid {
            kind: R::KIND,
            path: path.to_path_buf(),
            source,
        })
    }

    /// Every record that loads cleanly, in directory-listing order.
    ///
    /// A file that fails to load is skipped so one corrupt file never
    /// blocks visibility of the others. Only a failure to list the
    /// directory itself is an error.
    pub fn all(&self, cancel: &CancelToken) -> Result<Vec<R>, StoreError> {
        let entries = self.fs.read_dir(&self.dir)?;

        let mut records = Vec::new();
        for entry in entries {
            if cancel.is_cancelled() {
                return Err(StoreError::Cancelled);
            }
            if !entry.name.ends_with(R::EXT) {
                continue;
            }
            let path = self.dir.join(&entry.name);
            match self.load(&path) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!(
                        component = R::KIND,
                        path = %path.display(),
                        error = %err,
                        "skipping record file that failed to load"
                    );
                    continue;
                }
            }
        }
        Ok(records)
    }

    /// Locate the file whose content identifier equals `id`.
    ///
    /// The identifier is embedded in file content, not in the file name,
    /// so candidates are parsed one at a time in listing order. Unlike
    /// [`DirStore::all`], a candidate that fails to load aborts the whole
    /// resolution with that file's classified error: the malformed file
    /// might be the very record being sought, and skipping it would turn
    /// a real record into a false NotFound.
    pub fn resolve(
        &self,
        id: &R::Id,
        cancel: &CancelToken,
    ) -> Result<(R, PathBuf), StoreError> {
        let entries = self.fs.read_dir(&self.dir)?;

        for entry in entries {
            if cancel.is_cancelled() {
                return Err(StoreError::Cancelled);
            }
            if !entry.name.ends_with(R::EXT) {
                continue;
            }
            let path = self.dir.join(&entry.name);
            let record = match self.load(&path) {
                Ok(record) => record,
                Err(err) => {
                    log_candidate_failure::<R>(&err);
                    return Err(err);
                }
            };
            if record.id() == *id {
                return Ok((record, path));
            }
        }

        tracing::error!(
            component = R::KIND,
            id = %id,
            "no record file matches identifier"
        );
        Err(StoreError::not_found(R::KIND))
    }

    /// The record whose content identifier equals `id`.
    pub fn get(&self, id: &R::Id, cancel: &CancelToken) -> Result<R, StoreError> {
        let (record, _) = self.resolve(id, cancel)?;
        Ok(record)
    }

    /// Replace the stored record matching `record.id()`.
    ///
    /// Delete-then-recreate: the existing file is resolved by the old
    /// record's identifier and removed, then the replacement is written
    /// under a name built from the record's current `file_stem`. Not
    /// atomic; if the write fails after the delete the record is gone,
    /// and no rollback is attempted.
    pub fn update(&self, record: &R, cancel: &CancelToken) -> Result<(), StoreError> {
        let (current, _) = self.resolve(&record.id(), cancel)?;

        self.delete(&current, cancel)?;

        let path = record_path(&self.dir, record.file_stem(), R::EXT);
        let bytes =
            serde_json::to_vec_pretty(record).map_err(|e| StoreError::Io(e.into()))?;
        self.fs.write(&path, &bytes)?;
        Ok(())
    }

    /// Remove the stored record matching `record.id()`.
    pub fn delete(&self, record: &R, cancel: &CancelToken) -> Result<(), StoreError> {
        let (_, path) = self.resolve(&record.id(), cancel)?;

        if let Err(err) = self.fs.remove(&path) {
            tracing::error!(
                component = R::KIND,
                path = %path.display(),
                error = %err,
                "unable to remove record file"
            );
            return Err(StoreError::Io(err));
        }
        Ok(())
    }
}

fn log_candidate_failure<R: Record>(err: &StoreError) {
    match err {
        StoreError::NotFound {
            path: Some(path), ..
        } => {
            tracing::error!(
                component = R::KIND,
                path = %path.display(),
                "unable to read record file"
            );
        }
        StoreError::Invalid { path, .. } => {
            tracing::error!(
                component = R::KIND,
                path = %path.display(),
                "file does not deserialize as this record kind"
            );
        }
        _ => {}
    }
}
