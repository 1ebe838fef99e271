use crate::errors::{VaultError, VaultResult};
use crate::links::{self, LinkReference};
use crate::locate;
use crate::models::{NoteHandle, VaultLocation};
use crate::paths::{resolve, sanitize_file_name};

use super::VaultEngine;

pub(crate) async fn resolve_note(
    engine: &VaultEngine,
    link_text: &str,
    relative_path: &str,
) -> VaultResult<NoteHandle> {
    let link = links::parse_link(link_text)?;
    let settings = engine.settings();
    let base_name = sanitize_file_name(&links::transform_file_name(
        &link.page_name,
        settings.slug_strategy,
    ));

    if settings.search_subdirectories {
        if let Some(handle) =
            locate::find_by_title(engine.store(), settings, engine.workspace_root(), &base_name)
                .await?
        {
            return Ok(handle);
        }
    }

    let file_name = format!("{base_name}{}", settings.note_extension);
    let location = resolve(
        engine.workspace_root(),
        &settings.vault_root,
        relative_path,
        Some(&file_name),
    )?;
    let exists = engine.store().exists(&location).await?;
    Ok(NoteHandle { location, exists })
}

/// Missing templates read as empty content; other failures propagate.
pub(crate) async fn load_template(
    engine: &VaultEngine,
    location: &VaultLocation,
) -> VaultResult<String> {
    match engine.store().read(location).await {
        Ok(content) => Ok(content),
        Err(VaultError::NotFound(_)) => Ok(String::new()),
        Err(e) => Err(e),
    }
}

pub(crate) async fn note_links(
    engine: &VaultEngine,
    location: &VaultLocation,
) -> VaultResult<Vec<LinkReference>> {
    let content = engine.store().read(location).await?;
    Ok(links::extract_links(&content))
}
