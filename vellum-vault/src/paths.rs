//! Vault-relative path resolution.
//!
//! A configured vault root comes in three shapes: empty (the workspace
//! itself is the vault), relative (nested under the workspace), or absolute
//! (local path or a path grafted onto a remote workspace scheme). All three
//! resolve through [`resolve`].

use std::path::Path;

use url::Url;

use crate::errors::{VaultError, VaultResult};
use crate::models::VaultLocation;

/// Characters rejected by at least one common filesystem.
const ILLEGAL_FILE_NAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Resolve a workspace root, vault root, relative sub-path, and optional
/// file name into one concrete location.
///
/// Rules, in order:
/// 1. empty `vault_root` — everything nests under the workspace root;
/// 2. relative `vault_root` (no leading slash, no drive letter) — nests
///    under the workspace root;
/// 3. absolute `vault_root` — on a local workspace the vault path replaces
///    the workspace path entirely; on a remote scheme the normalized vault
///    path is grafted onto the workspace scheme/authority.
pub fn resolve(
    workspace_root: &Url,
    vault_root: &str,
    relative_path: &str,
    file_name: Option<&str>,
) -> VaultResult<VaultLocation> {
    let vault_root = vault_root.trim();
    let tail = [relative_path, file_name.unwrap_or("")];

    let path = if vault_root.is_empty() {
        join_segments(workspace_root.path(), &tail)
    } else if is_absolute(vault_root) {
        let normalized = normalize_absolute(vault_root);
        if normalized == "/" {
            return Err(VaultError::PathResolution(format!(
                "vault root '{vault_root}' collapses to the filesystem root"
            )));
        }
        join_segments(&normalized, &tail)
    } else {
        join_segments(workspace_root.path(), &[vault_root, relative_path, file_name.unwrap_or("")])
    };

    let mut location = workspace_root.clone();
    location.set_path(&path);
    Ok(VaultLocation::from_url(location))
}

/// Whether a configured vault root is absolute: leading slash or backslash,
/// or a Windows drive letter.
pub fn is_absolute(vault_root: &str) -> bool {
    if vault_root.starts_with('/') || vault_root.starts_with('\\') {
        return true;
    }
    let bytes = vault_root.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Normalize an absolute vault root: backslashes become forward slashes,
/// repeated slashes collapse, and exactly one leading slash remains.
fn normalize_absolute(vault_root: &str) -> String {
    let mut out = String::with_capacity(vault_root.len() + 1);
    out.push('/');
    let mut prev_slash = true;
    for c in vault_root.chars() {
        let c = if c == '\\' { '/' } else { c };
        if c == '/' {
            if !prev_slash {
                out.push('/');
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    while out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// Join path segments onto a base path, skipping empty parts and collapsing
/// separator runs. Segments may themselves contain separators.
fn join_segments(base: &str, parts: &[&str]) -> String {
    let mut out = base.trim_end_matches('/').to_string();
    for part in parts {
        for segment in part.split(['/', '\\']) {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            out.push('/');
            out.push_str(segment);
        }
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Strip characters illegal across common filesystems, collapse whitespace
/// runs to single spaces, and trim. Applied to every generated file name
/// before resolution.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_space = false;
    for c in name.chars() {
        if ILLEGAL_FILE_NAME_CHARS.contains(&c) {
            continue;
        }
        if c.is_whitespace() {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Build a `file://` workspace root from a local directory path.
pub fn workspace_root_from_path(path: &Path) -> VaultResult<Url> {
    Url::from_directory_path(path).map_err(|_| {
        VaultError::PathResolution(format!(
            "not an absolute directory path: {}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> Url {
        Url::parse("file:///workspace").expect("workspace url")
    }

    #[test]
    fn empty_vault_root_nests_under_workspace() {
        let loc = resolve(&workspace(), "", "dailynotes", Some("2025-01-01.md")).expect("resolve");
        assert_eq!(loc.as_str(), "file:///workspace/dailynotes/2025-01-01.md");
    }

    #[test]
    fn relative_vault_root_nests_under_workspace() {
        let loc = resolve(&workspace(), "notes", "dailynotes", Some("2025-01-01.md"))
            .expect("resolve");
        assert_eq!(
            loc.as_str(),
            "file:///workspace/notes/dailynotes/2025-01-01.md"
        );
    }

    #[test]
    fn absolute_local_vault_root_ignores_workspace_path() {
        let loc = resolve(&workspace(), "/abs/vault", "dailynotes", Some("2025-01-01.md"))
            .expect("resolve");
        assert_eq!(loc.as_str(), "file:///abs/vault/dailynotes/2025-01-01.md");

        let other = Url::parse("file:///somewhere/else").expect("url");
        let loc2 =
            resolve(&other, "/abs/vault", "dailynotes", Some("2025-01-01.md")).expect("resolve");
        assert_eq!(loc2.as_str(), loc.as_str());
    }

    #[test]
    fn drive_letter_roots_are_absolute() {
        assert!(is_absolute("C:\\vault"));
        assert!(is_absolute("c:/vault"));
        assert!(!is_absolute("notes/sub"));

        let loc = resolve(&workspace(), "C:\\vault\\notes", "", Some("a.md")).expect("resolve");
        assert_eq!(loc.as_str(), "file:///C:/vault/notes/a.md");
    }

    #[test]
    fn remote_scheme_grafts_normalized_path() {
        let remote = Url::parse("vscode-remote://wsl%2Bubuntu/home/user/ws").expect("url");
        let loc = resolve(&remote, "\\\\vault//sub\\", "daily", Some("a.md")).expect("resolve");
        assert_eq!(
            loc.as_str(),
            "vscode-remote://wsl%2Bubuntu/vault/sub/daily/a.md"
        );
    }

    #[test]
    fn bare_root_vault_is_rejected() {
        let err = resolve(&workspace(), "///", "daily", Some("a.md")).unwrap_err();
        assert!(matches!(err, VaultError::PathResolution(_)));
    }

    #[test]
    fn missing_file_name_resolves_to_directory_path() {
        let loc = resolve(&workspace(), "notes", "", None).expect("resolve");
        assert_eq!(loc.as_str(), "file:///workspace/notes");
    }

    #[test]
    fn sanitize_strips_illegal_and_collapses_whitespace() {
        assert_eq!(sanitize_file_name("a/b\\c:d*e?f\"g<h>i|j"), "abcdefghij");
        assert_eq!(sanitize_file_name("  my   note \t name  "), "my note name");
        assert_eq!(sanitize_file_name("plain.md"), "plain.md");
    }
}
