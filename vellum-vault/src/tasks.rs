//! Open checklist extraction and cross-file aggregation.
//!
//! Extraction never fails: malformed or non-matching lines are simply not
//! collected. Every scan is a fresh full recomputation; nothing here is
//! persisted between scans.

use std::collections::HashMap;

use crate::models::VaultLocation;

/// Marker opening an unchecked checklist line, leading whitespace aside.
const OPEN_TASK_MARKER: &str = "- [ ] ";

/// One open checklist line within a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTask {
    /// 0-based position in the `\n`-split line array.
    pub line: usize,
    /// Checklist remainder after the marker, trimmed.
    pub text: String,
}

/// One checklist line instance in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOccurrence {
    pub text: String,
    pub file_id: String,
    pub location: VaultLocation,
    pub line: usize,
}

/// A file handed to the aggregator.
#[derive(Debug, Clone)]
pub struct TaskFile {
    pub id: String,
    pub location: VaultLocation,
    pub content: String,
}

/// Occurrences sharing identical literal text across files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGroup {
    pub text: String,
    /// Total occurrences; always equals `items.len()`.
    pub count: usize,
    /// Distinct file identifiers in insertion order, no duplicates.
    pub files: Vec<String>,
    /// Every occurrence, file order then line order.
    pub items: Vec<TaskOccurrence>,
}

/// Scan content for open checklist lines.
///
/// A line matches when, after stripping a trailing `\r` and leading
/// whitespace, it starts with `- [ ] `. Checked lines (`- [x]`) are
/// ignored. Line indices count `\n` splits, so a stripped `\r` never
/// shifts them.
pub fn extract_open_tasks(content: &str) -> Vec<OpenTask> {
    content
        .split('\n')
        .enumerate()
        .filter_map(|(line, raw)| {
            let stripped = raw.strip_suffix('\r').unwrap_or(raw).trim_start();
            stripped.strip_prefix(OPEN_TASK_MARKER).map(|rest| OpenTask {
                line,
                text: rest.trim().to_string(),
            })
        })
        .collect()
}

/// Group open tasks across files by exact literal text.
///
/// Group order is the first-seen order of distinct texts. Within a group,
/// `files` deduplicates by file identifier while `items` keeps every
/// occurrence in file-then-line order.
pub fn collect_open_tasks(files: &[TaskFile]) -> Vec<TaskGroup> {
    let mut groups: Vec<TaskGroup> = Vec::new();
    let mut index_by_text: HashMap<String, usize> = HashMap::new();

    for file in files {
        for task in extract_open_tasks(&file.content) {
            let occurrence = TaskOccurrence {
                text: task.text.clone(),
                file_id: file.id.clone(),
                location: file.location.clone(),
                line: task.line,
            };

            let index = match index_by_text.get(&task.text) {
                Some(&index) => index,
                None => {
                    index_by_text.insert(task.text.clone(), groups.len());
                    groups.push(TaskGroup {
                        text: task.text.clone(),
                        count: 0,
                        files: Vec::new(),
                        items: Vec::new(),
                    });
                    groups.len() - 1
                }
            };

            let group = &mut groups[index];
            group.count += 1;
            if !group.files.contains(&file.id) {
                group.files.push(file.id.clone());
            }
            group.items.push(occurrence);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &str) -> VaultLocation {
        VaultLocation::parse(s).expect("location")
    }

    fn file(id: &str, content: &str) -> TaskFile {
        TaskFile {
            id: id.to_string(),
            location: loc(&format!("file:///vault/{id}")),
            content: content.to_string(),
        }
    }

    #[test]
    fn extracts_open_tasks_and_skips_checked() {
        let tasks = extract_open_tasks("- [ ] task1\n- [x] done");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "task1");
        assert_eq!(tasks[0].line, 0);
    }

    #[test]
    fn allows_leading_whitespace_and_crlf() {
        let tasks = extract_open_tasks("header\r\n  - [ ] indented \r\nplain");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].line, 1);
        assert_eq!(tasks[0].text, "indented");
    }

    #[test]
    fn non_task_lines_are_not_collected() {
        let tasks = extract_open_tasks("-[ ] no space\n- [] malformed\n- [ ]no gap\ntext");
        assert!(tasks.is_empty());
    }

    #[test]
    fn groups_across_files_with_deduplicated_file_list() {
        let files = vec![
            file("a.md", "- [ ] duplicate\nnoise\n- [ ] duplicate"),
            file("b.md", "- [ ] duplicate\n- [ ] other"),
        ];

        let groups = collect_open_tasks(&files);
        assert_eq!(groups.len(), 2);

        let dup = &groups[0];
        assert_eq!(dup.text, "duplicate");
        assert_eq!(dup.count, 3);
        assert_eq!(dup.items.len(), dup.count);
        assert_eq!(dup.files, vec!["a.md".to_string(), "b.md".to_string()]);
        assert_eq!(
            dup.items.iter().map(|o| o.line).collect::<Vec<_>>(),
            vec![0, 2, 0]
        );

        assert_eq!(groups[1].text, "other");
        assert_eq!(groups[1].count, 1);
    }

    #[test]
    fn group_order_follows_first_seen_text() {
        let files = vec![file("a.md", "- [ ] beta\n- [ ] alpha\n- [ ] beta")];
        let groups = collect_open_tasks(&files);
        let texts: Vec<&str> = groups.iter().map(|g| g.text.as_str()).collect();
        assert_eq!(texts, vec!["beta", "alpha"]);
    }
}
