//! Storage capability for the vault engine.
//!
//! Business logic never touches the filesystem directly; it goes through
//! [`VaultStore`], injected at engine construction. [`FsStore`] is the
//! production implementation, [`MemoryStore`] backs tests and embedding
//! hosts without a filesystem.

use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url::Url;
use walkdir::WalkDir;

use crate::errors::{VaultError, VaultResult};
use crate::models::VaultLocation;

/// Minimal storage capability the engine depends on.
///
/// `list_files` is the one operation beyond plain read/write plumbing: the
/// recursive note lookup and the vault-wide task scan need file
/// enumeration, which the host editor normally provides.
#[async_trait]
pub trait VaultStore: Send + Sync {
    /// Read a file. Fails with `NotFound` when absent.
    async fn read(&self, location: &VaultLocation) -> VaultResult<String>;

    /// Create or overwrite a file.
    async fn write(&self, location: &VaultLocation, content: &str) -> VaultResult<()>;

    async fn exists(&self, location: &VaultLocation) -> VaultResult<bool>;

    /// Create a directory and its ancestors. Idempotent.
    async fn create_dir(&self, location: &VaultLocation) -> VaultResult<()>;

    /// All files under a root, recursively, in lexicographic full-path
    /// order. Missing roots yield an empty listing.
    async fn list_files(&self, root: &VaultLocation) -> VaultResult<Vec<VaultLocation>>;
}

/// Local filesystem store backed by `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct FsStore;

impl FsStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VaultStore for FsStore {
    async fn read(&self, location: &VaultLocation) -> VaultResult<String> {
        let path = location.to_file_path()?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(VaultError::NotFound(location.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, location: &VaultLocation, content: &str) -> VaultResult<()> {
        let path = location.to_file_path()?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|source| VaultError::WriteFailure {
                location: location.to_string(),
                source,
            })
    }

    async fn exists(&self, location: &VaultLocation) -> VaultResult<bool> {
        let path = location.to_file_path()?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    async fn create_dir(&self, location: &VaultLocation) -> VaultResult<()> {
        let path = location.to_file_path()?;
        tokio::fs::create_dir_all(&path).await?;
        Ok(())
    }

    async fn list_files(&self, root: &VaultLocation) -> VaultResult<Vec<VaultLocation>> {
        let root_path = root.to_file_path()?;
        if !root_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&root_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            paths.push(entry.path().to_path_buf());
        }
        paths.sort();

        let mut locations = Vec::with_capacity(paths.len());
        for path in paths {
            let url = Url::from_file_path(&path).map_err(|_| {
                VaultError::PathResolution(format!("unrepresentable path: {}", path.display()))
            })?;
            locations.push(VaultLocation::from_url(url));
        }
        Ok(locations)
    }
}

/// In-memory store keyed by location string.
///
/// The backing `BTreeMap` gives `list_files` its lexicographic order for
/// free. Every write is also appended to a log so tests can assert
/// exactly-once-per-file write behavior.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: Arc<Mutex<BTreeMap<String, String>>>,
    dirs: Arc<Mutex<BTreeSet<String>>>,
    write_log: Arc<Mutex<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file without recording a write.
    pub fn seed(&self, location: &VaultLocation, content: &str) {
        self.files
            .lock()
            .expect("memory store lock")
            .insert(location.to_string(), content.to_string());
    }

    /// Current content of a file, if present.
    pub fn content(&self, location: &VaultLocation) -> Option<String> {
        self.files
            .lock()
            .expect("memory store lock")
            .get(location.as_str())
            .cloned()
    }

    /// Locations written so far, in write order.
    pub fn writes(&self) -> Vec<String> {
        self.write_log.lock().expect("memory store lock").clone()
    }
}

#[async_trait]
impl VaultStore for MemoryStore {
    async fn read(&self, location: &VaultLocation) -> VaultResult<String> {
        self.files
            .lock()
            .expect("memory store lock")
            .get(location.as_str())
            .cloned()
            .ok_or_else(|| VaultError::NotFound(location.to_string()))
    }

    async fn write(&self, location: &VaultLocation, content: &str) -> VaultResult<()> {
        self.files
            .lock()
            .expect("memory store lock")
            .insert(location.to_string(), content.to_string());
        self.write_log
            .lock()
            .expect("memory store lock")
            .push(location.to_string());
        Ok(())
    }

    async fn exists(&self, location: &VaultLocation) -> VaultResult<bool> {
        let files = self.files.lock().expect("memory store lock");
        if files.contains_key(location.as_str()) {
            return Ok(true);
        }
        drop(files);
        Ok(self
            .dirs
            .lock()
            .expect("memory store lock")
            .contains(location.as_str()))
    }

    async fn create_dir(&self, location: &VaultLocation) -> VaultResult<()> {
        self.dirs
            .lock()
            .expect("memory store lock")
            .insert(location.to_string());
        Ok(())
    }

    async fn list_files(&self, root: &VaultLocation) -> VaultResult<Vec<VaultLocation>> {
        let prefix = format!("{}/", root.as_str().trim_end_matches('/'));
        let files = self.files.lock().expect("memory store lock");
        files
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .map(|key| VaultLocation::parse(key))
            .collect()
    }
}
