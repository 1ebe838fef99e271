use tracing::debug;

use crate::errors::{VaultError, VaultResult};
use crate::models::VaultLocation;
use crate::paths::{resolve, sanitize_file_name};
use crate::section::insert_into_section;

use super::VaultEngine;

/// Outcome of a capture: the note written and where the line landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    pub location: VaultLocation,
    pub inserted_line_index: usize,
    /// Whether the note was created by this capture.
    pub created: bool,
}

/// Insert a line into the configured capture section of a note, creating
/// the note (directory included) from the configured template when it does
/// not exist yet. One read and one write.
pub(crate) async fn capture(
    engine: &VaultEngine,
    relative_path: &str,
    file_name: &str,
    line_text: &str,
) -> VaultResult<CaptureResult> {
    let settings = engine.settings();
    let file_name = format!(
        "{}{}",
        sanitize_file_name(file_name),
        settings.note_extension
    );
    let location = resolve(
        engine.workspace_root(),
        &settings.vault_root,
        relative_path,
        Some(&file_name),
    )?;

    let (content, created) = match engine.store().read(&location).await {
        Ok(content) => (content, false),
        Err(VaultError::NotFound(_)) => {
            let parent = resolve(
                engine.workspace_root(),
                &settings.vault_root,
                relative_path,
                None,
            )?;
            engine.store().create_dir(&parent).await?;
            debug!(location = %location, "creating note from template");
            (settings.note_template.clone(), true)
        }
        Err(e) => return Err(e),
    };

    let inserted = insert_into_section(&content, &settings.capture_section, line_text);
    engine.store().write(&location, &inserted.new_content).await?;

    Ok(CaptureResult {
        location,
        inserted_line_index: inserted.inserted_line_index,
        created,
    })
}
