//! Applying completion markers to checklist lines.
//!
//! Single-line rewrites keep every other line byte-identical and never
//! change the file's line count, so per-file batches are order-independent
//! for correctness; lines are still applied in ascending order for
//! determinism.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{VaultError, VaultResult};
use crate::models::VaultLocation;
use crate::storage::VaultStore;

/// One (file, line) reference in a completion batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionItem {
    pub location: VaultLocation,
    pub line: usize,
}

/// A batch of checklist lines sharing one literal text, to be completed
/// across any number of files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionBatch {
    pub text: String,
    pub items: Vec<CompletionItem>,
}

impl CompletionBatch {
    /// A batch with missing text or zero items is invalid.
    pub fn validate(&self) -> VaultResult<()> {
        if self.text.trim().is_empty() {
            return Err(VaultError::InvalidPayload("missing task text".to_string()));
        }
        if self.items.is_empty() {
            return Err(VaultError::InvalidPayload(
                "completion batch has no items".to_string(),
            ));
        }
        Ok(())
    }
}

/// Rewrite exactly one line: the first `[ ]` becomes `[x]` and
/// ` [completion: {date}]` is appended. All other lines are returned
/// byte-identical, trailing `\r` included.
pub fn mark_task_completed(
    content: &str,
    line_index: usize,
    completion_date: &str,
) -> VaultResult<String> {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    if line_index >= lines.len() {
        return Err(VaultError::LineOutOfRange {
            line: line_index,
            line_count: lines.len(),
        });
    }

    let target = &lines[line_index];
    let (body, had_cr) = match target.strip_suffix('\r') {
        Some(body) => (body, true),
        None => (target.as_str(), false),
    };
    let mut updated = body.replacen("[ ]", "[x]", 1);
    updated.push_str(&format!(" [completion: {completion_date}]"));
    if had_cr {
        updated.push('\r');
    }
    lines[line_index] = updated;

    Ok(lines.join("\n"))
}

/// Complete a batch of checklist lines, writing each touched file exactly
/// once.
///
/// Items are grouped by location in insertion order of first-seen
/// locations; within a group line indices are sorted ascending before the
/// completions apply sequentially. Returns the content written to the last
/// file group, "last" meaning the group whose location the batch
/// introduced last.
pub async fn complete_tasks(
    store: &dyn VaultStore,
    batch: &CompletionBatch,
    completion_date: &str,
) -> VaultResult<String> {
    batch.validate()?;

    let mut order: Vec<VaultLocation> = Vec::new();
    let mut lines_by_file: HashMap<String, Vec<usize>> = HashMap::new();
    for item in &batch.items {
        let key = item.location.as_str().to_string();
        if !lines_by_file.contains_key(&key) {
            order.push(item.location.clone());
        }
        lines_by_file.entry(key).or_default().push(item.line);
    }

    let mut last_content = String::new();
    for location in &order {
        let mut targets = lines_by_file
            .remove(location.as_str())
            .unwrap_or_default();
        targets.sort_unstable();

        let mut content = store.read(location).await?;
        for line in targets {
            content = mark_task_completed(&content, line, completion_date)?;
        }
        store.write(location, &content).await?;
        last_content = content;
    }

    Ok(last_content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn loc(s: &str) -> VaultLocation {
        VaultLocation::parse(s).expect("location")
    }

    #[test]
    fn marks_single_line() {
        let updated = mark_task_completed("x\n- [ ] do this\ny", 1, "2025-10-30").expect("mark");
        assert_eq!(updated, "x\n- [x] do this [completion: 2025-10-30]\ny");
    }

    #[test]
    fn preserves_crlf_on_other_lines() {
        let updated =
            mark_task_completed("a\r\n- [ ] task\r\nb", 1, "2025-10-30").expect("mark");
        assert_eq!(updated, "a\r\n- [x] task [completion: 2025-10-30]\r\nb");
    }

    #[test]
    fn out_of_range_line_is_an_error() {
        let err = mark_task_completed("only\nlines", 2, "2025-10-30").unwrap_err();
        assert!(matches!(
            err,
            VaultError::LineOutOfRange { line: 2, line_count: 2 }
        ));
    }

    #[test]
    fn empty_batches_are_rejected() {
        let batch = CompletionBatch {
            text: "task".to_string(),
            items: Vec::new(),
        };
        assert!(matches!(
            batch.validate(),
            Err(VaultError::InvalidPayload(_))
        ));

        let batch = CompletionBatch {
            text: "  ".to_string(),
            items: vec![CompletionItem {
                location: loc("file:///vault/a.md"),
                line: 0,
            }],
        };
        assert!(matches!(
            batch.validate(),
            Err(VaultError::InvalidPayload(_))
        ));
    }

    #[tokio::test]
    async fn one_write_per_file_and_all_lines_transformed() {
        let store = MemoryStore::new();
        let a = loc("file:///vault/a.md");
        let b = loc("file:///vault/b.md");
        store.seed(&a, "- [ ] t\nkeep\n- [ ] t\n- [ ] t");
        store.seed(&b, "- [ ] t");

        let batch = CompletionBatch {
            text: "t".to_string(),
            items: vec![
                CompletionItem { location: a.clone(), line: 3 },
                CompletionItem { location: b.clone(), line: 0 },
                CompletionItem { location: a.clone(), line: 0 },
                CompletionItem { location: a.clone(), line: 2 },
            ],
        };

        let last = complete_tasks(&store, &batch, "2025-10-30")
            .await
            .expect("complete");

        assert_eq!(store.writes(), vec![a.to_string(), b.to_string()]);
        assert_eq!(
            store.content(&a).expect("a"),
            "- [x] t [completion: 2025-10-30]\nkeep\n- [x] t [completion: 2025-10-30]\n- [x] t [completion: 2025-10-30]"
        );
        // Last group is the last-introduced location: b.
        assert_eq!(last, "- [x] t [completion: 2025-10-30]");
        assert_eq!(store.content(&b).expect("b"), last);
    }
}
