use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use url::Url;

use crate::errors::{VaultError, VaultResult};

/// A resolved note location.
///
/// Wraps a URI so local `file://` vaults and remote virtual schemes share
/// one representation. The path component always uses forward slashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VaultLocation {
    url: Url,
}

impl VaultLocation {
    pub fn from_url(url: Url) -> Self {
        Self { url }
    }

    pub fn parse(input: &str) -> VaultResult<Self> {
        let url = Url::parse(input)
            .map_err(|e| VaultError::PathResolution(format!("invalid location '{input}': {e}")))?;
        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Whether this location lives on the local filesystem.
    pub fn is_local(&self) -> bool {
        self.url.scheme() == "file"
    }

    /// Last path segment, percent-decoded, if any.
    pub fn file_name(&self) -> Option<String> {
        self.url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                percent_encoding::percent_decode_str(segment)
                    .decode_utf8_lossy()
                    .into_owned()
            })
    }

    /// Convert to a filesystem path. Fails for non-local schemes.
    pub fn to_file_path(&self) -> VaultResult<PathBuf> {
        self.url.to_file_path().map_err(|_| {
            VaultError::PathResolution(format!("not a local filesystem location: {}", self.url))
        })
    }
}

impl fmt::Display for VaultLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl From<Url> for VaultLocation {
    fn from(url: Url) -> Self {
        Self { url }
    }
}

// Locations cross the host boundary as plain URI strings.
impl Serialize for VaultLocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.url.as_str())
    }
}

impl<'de> Deserialize<'de> for VaultLocation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Url::parse(&raw).map(Self::from_url).map_err(de::Error::custom)
    }
}

/// A resolved note location plus whether the note already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteHandle {
    pub location: VaultLocation,
    pub exists: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_returns_last_segment() {
        let loc = VaultLocation::parse("file:///vault/dailynotes/2025-01-01.md").expect("parse");
        assert_eq!(loc.file_name().as_deref(), Some("2025-01-01.md"));
        assert!(loc.is_local());
    }

    #[test]
    fn file_name_is_percent_decoded() {
        let loc = VaultLocation::parse("file:///vault/My%20Note.md").expect("parse");
        assert_eq!(loc.file_name().as_deref(), Some("My Note.md"));
    }

    #[test]
    fn remote_scheme_is_not_local() {
        let loc = VaultLocation::parse("vscode-remote://wsl%2Bubuntu/vault/note.md").expect("parse");
        assert!(!loc.is_local());
        assert!(loc.to_file_path().is_err());
    }
}
