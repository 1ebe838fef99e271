use std::sync::Arc;

use url::Url;
use vellum_core::config::VaultSettings;

use crate::complete::{self, CompletionBatch};
use crate::errors::VaultResult;
use crate::links::LinkReference;
use crate::models::{NoteHandle, VaultLocation};
use crate::storage::VaultStore;
use crate::tasks::TaskGroup;

pub(crate) mod capture;
pub(crate) mod notes;
pub(crate) mod tasks;

pub use capture::CaptureResult;

/// Composition root over settings, a workspace root, and an injected
/// storage capability. Constructed explicitly by the host; no lazy
/// singletons.
#[derive(Clone)]
pub struct VaultEngine {
    settings: VaultSettings,
    workspace_root: Url,
    store: Arc<dyn VaultStore>,
}

impl VaultEngine {
    pub fn new(settings: VaultSettings, workspace_root: Url, store: Arc<dyn VaultStore>) -> Self {
        Self {
            settings,
            workspace_root,
            store,
        }
    }

    pub fn settings(&self) -> &VaultSettings {
        &self.settings
    }

    pub fn workspace_root(&self) -> &Url {
        &self.workspace_root
    }

    pub(crate) fn store(&self) -> &dyn VaultStore {
        self.store.as_ref()
    }

    /// Resolve a bracketed link to a note handle, searching subdirectories
    /// when configured.
    pub async fn resolve_note(
        &self,
        link_text: &str,
        relative_path: &str,
    ) -> VaultResult<NoteHandle> {
        notes::resolve_note(self, link_text, relative_path).await
    }

    /// Read a note template, treating a missing file as empty content.
    pub async fn load_template(&self, location: &VaultLocation) -> VaultResult<String> {
        notes::load_template(self, location).await
    }

    /// All bracketed links in a note, in order of appearance.
    pub async fn note_links(&self, location: &VaultLocation) -> VaultResult<Vec<LinkReference>> {
        notes::note_links(self, location).await
    }

    /// Insert a captured line into the configured section of a note,
    /// creating the note from the configured template when missing.
    pub async fn capture(
        &self,
        relative_path: &str,
        file_name: &str,
        line_text: &str,
    ) -> VaultResult<CaptureResult> {
        capture::capture(self, relative_path, file_name, line_text).await
    }

    /// Scan the whole vault for open checklist items, grouped by literal
    /// text.
    pub async fn open_tasks(&self) -> VaultResult<Vec<TaskGroup>> {
        tasks::open_tasks(self).await
    }

    /// Apply completion markers to a batch of checklist lines, one write
    /// per touched file.
    pub async fn complete_tasks(
        &self,
        batch: &CompletionBatch,
        completion_date: &str,
    ) -> VaultResult<String> {
        complete::complete_tasks(self.store(), batch, completion_date).await
    }
}
