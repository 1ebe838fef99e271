//! Section insertion: append a line under a named level-2 heading, creating
//! the heading when absent, preserving the file's line-ending style.

/// Result of a section insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInsertion {
    pub new_content: String,
    /// 0-based line index of the inserted line in the resulting content.
    pub inserted_line_index: usize,
}

/// Insert `line_text` as the last line of the `section_heading` section's
/// body, creating the section at end-of-file when it does not exist.
///
/// The line-ending style is detected from the input (CRLF when any `\r\n`
/// is present, LF otherwise) and used for the rebuilt output. Never fails;
/// empty content produces a fresh section.
pub fn insert_into_section(
    content: &str,
    section_heading: &str,
    line_text: &str,
) -> SectionInsertion {
    let eol = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let normalized = content.replace("\r\n", "\n");
    let mut lines: Vec<String> = normalized.split('\n').map(str::to_string).collect();

    let heading_line = format!("## {section_heading}");
    let heading_index = lines.iter().position(|line| line.trim() == heading_line);

    let inserted_line_index = match heading_index {
        Some(index) => {
            let insert_at = lines
                .iter()
                .enumerate()
                .skip(index + 1)
                .find(|(_, line)| is_section_boundary(line))
                .map(|(i, _)| i)
                .unwrap_or_else(|| end_of_file_index(&lines));
            lines.insert(insert_at, line_text.to_string());
            insert_at
        }
        None => {
            // New section at end-of-file: blank separator, heading, line.
            if !lines.last().is_some_and(|line| line.is_empty()) {
                lines.push(String::new());
            }
            lines.push(heading_line);
            lines.push(line_text.to_string());
            lines.len() - 1
        }
    };

    SectionInsertion {
        new_content: lines.join(eol),
        inserted_line_index,
    }
}

/// A heading of level <= 2 ends the current section body.
fn is_section_boundary(line: &str) -> bool {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 2 {
        return false;
    }
    let rest = &trimmed[hashes..];
    rest.is_empty() || rest.starts_with(' ')
}

/// Insertion point when no heading follows: before the single trailing
/// empty segment of a newline-terminated file, else after the last line.
fn end_of_file_index(lines: &[String]) -> usize {
    if lines.last().is_some_and(|line| line.is_empty()) && lines.len() > 1 {
        lines.len() - 1
    } else {
        lines.len()
    }
}
