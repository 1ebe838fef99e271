use tracing::warn;

use crate::errors::VaultResult;
use crate::paths::resolve;
use crate::tasks::{TaskFile, TaskGroup, collect_open_tasks};

use super::VaultEngine;

/// Fresh full scan of the vault for open checklist items. Unreadable files
/// are skipped, not fatal.
pub(crate) async fn open_tasks(engine: &VaultEngine) -> VaultResult<Vec<TaskGroup>> {
    let settings = engine.settings();
    let root = resolve(engine.workspace_root(), &settings.vault_root, "", None)?;
    let locations = engine.store().list_files(&root).await?;

    let mut files = Vec::new();
    for location in locations {
        if !location.as_str().ends_with(&settings.note_extension) {
            continue;
        }
        match engine.store().read(&location).await {
            Ok(content) => files.push(TaskFile {
                id: location.to_string(),
                location,
                content,
            }),
            Err(e) => {
                warn!(location = %location, error = %e, "skipping unreadable note");
            }
        }
    }

    Ok(collect_open_tasks(&files))
}
