//! Locating existing notes by title.

use tracing::debug;
use url::Url;
use vellum_core::config::VaultSettings;

use crate::errors::VaultResult;
use crate::models::NoteHandle;
use crate::paths::{resolve, sanitize_file_name};
use crate::storage::VaultStore;

/// Find an existing note whose base name is `title + extension`.
///
/// With `search_subdirectories` off this is a single existence check at the
/// flat resolved location; on, the vault root is walked and the first match
/// in lexicographic path order wins. Read-only; never creates files.
pub async fn find_by_title(
    store: &dyn VaultStore,
    settings: &VaultSettings,
    workspace_root: &Url,
    title: &str,
) -> VaultResult<Option<NoteHandle>> {
    let target = format!(
        "{}{}",
        sanitize_file_name(title),
        settings.note_extension
    );

    if !settings.search_subdirectories {
        let location = resolve(workspace_root, &settings.vault_root, "", Some(&target))?;
        if store.exists(&location).await? {
            return Ok(Some(NoteHandle {
                location,
                exists: true,
            }));
        }
        return Ok(None);
    }

    let root = resolve(workspace_root, &settings.vault_root, "", None)?;
    let files = store.list_files(&root).await?;
    debug!(root = %root, candidates = files.len(), target = %target, "note lookup walk");

    for location in files {
        if location.file_name().as_deref() == Some(target.as_str()) {
            return Ok(Some(NoteHandle {
                location,
                exists: true,
            }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VaultLocation;
    use crate::storage::MemoryStore;

    fn workspace() -> Url {
        Url::parse("file:///ws").expect("workspace url")
    }

    fn loc(s: &str) -> VaultLocation {
        VaultLocation::parse(s).expect("location")
    }

    #[tokio::test]
    async fn flat_lookup_checks_only_the_resolved_location() {
        let store = MemoryStore::new();
        store.seed(&loc("file:///ws/notes/sub/deep.md"), "");
        store.seed(&loc("file:///ws/notes/flat.md"), "");

        let settings = VaultSettings {
            vault_root: "notes".to_string(),
            ..Default::default()
        };

        let found = find_by_title(&store, &settings, &workspace(), "flat")
            .await
            .expect("lookup");
        assert_eq!(
            found.expect("handle").location,
            loc("file:///ws/notes/flat.md")
        );

        // Nested note is invisible without recursive search.
        let missed = find_by_title(&store, &settings, &workspace(), "deep")
            .await
            .expect("lookup");
        assert!(missed.is_none());
    }

    #[tokio::test]
    async fn recursive_lookup_returns_first_match_in_path_order() {
        let store = MemoryStore::new();
        store.seed(&loc("file:///ws/notes/b/target.md"), "");
        store.seed(&loc("file:///ws/notes/a/target.md"), "");
        store.seed(&loc("file:///ws/notes/other.md"), "");

        let settings = VaultSettings {
            vault_root: "notes".to_string(),
            search_subdirectories: true,
            ..Default::default()
        };

        let found = find_by_title(&store, &settings, &workspace(), "target")
            .await
            .expect("lookup")
            .expect("handle");
        assert_eq!(found.location, loc("file:///ws/notes/a/target.md"));
        assert!(found.exists);
    }

    #[tokio::test]
    async fn missing_note_yields_none() {
        let store = MemoryStore::new();
        let settings = VaultSettings {
            search_subdirectories: true,
            ..Default::default()
        };
        let found = find_by_title(&store, &settings, &workspace(), "ghost")
            .await
            .expect("lookup");
        assert!(found.is_none());
    }
}
