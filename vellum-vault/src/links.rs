//! Bracketed link syntax: `pageName[#heading][|alias]`.

use regex::Regex;
use vellum_core::config::SlugStrategy;

use crate::errors::{VaultError, VaultResult};

/// A parsed link reference. Ephemeral, created per parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    /// Inner link text as written, brackets excluded.
    pub raw: String,
    pub page_name: String,
    /// Heading fragment after `#`, parsed but not used in file resolution.
    pub heading: Option<String>,
    pub alias: Option<String>,
}

impl LinkReference {
    /// Display label for the link.
    ///
    /// With a `|`: the trimmed text after the first `|`, falling back to the
    /// trimmed text before it when that is empty. Without: the whole
    /// trimmed raw text.
    pub fn display_label(&self) -> &str {
        match self.raw.split_once('|') {
            Some((before, after)) => {
                let alias = after.trim();
                if alias.is_empty() { before.trim() } else { alias }
            }
            None => self.raw.trim(),
        }
    }
}

/// Parse the inner text of a `[[...]]` link.
///
/// An empty page name after trimming is an invalid reference.
pub fn parse_link(raw: &str) -> VaultResult<LinkReference> {
    let trimmed = raw.trim();
    let (target, alias) = match trimmed.split_once('|') {
        Some((target, alias)) => (target, Some(alias)),
        None => (trimmed, None),
    };
    let (page, heading) = match target.split_once('#') {
        Some((page, heading)) => (page, Some(heading)),
        None => (target, None),
    };

    let page_name = page.trim();
    if page_name.is_empty() {
        return Err(VaultError::InvalidLinkSyntax(raw.to_string()));
    }

    Ok(LinkReference {
        raw: raw.to_string(),
        page_name: page_name.to_string(),
        heading: heading
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string),
        alias: alias
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string),
    })
}

/// Scan a note body for `[[...]]` occurrences. References with an empty
/// page name are skipped.
pub fn extract_links(body: &str) -> Vec<LinkReference> {
    let pattern = Regex::new(r"\[\[([^\]]+)\]\]").expect("regex");
    pattern
        .captures_iter(body)
        .filter_map(|cap| cap.get(1).and_then(|m| parse_link(m.as_str()).ok()))
        .collect()
}

/// Apply the configured slug strategy to a parsed page name. Pure string
/// transform with no I/O.
pub fn transform_file_name(name: &str, strategy: SlugStrategy) -> String {
    match strategy {
        SlugStrategy::Passthrough => name.to_string(),
        SlugStrategy::KebabCase => slug_with(name, '-'),
        SlugStrategy::SnakeCase => slug_with(name, '_'),
    }
}

/// Lowercase, collapse non-alphanumeric runs to a single separator, trim
/// separator edges.
fn slug_with(name: &str, separator: char) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut prev_sep = true; // suppress a leading separator
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            prev_sep = false;
        } else if !prev_sep {
            slug.push(separator);
            prev_sep = true;
        }
    }
    while slug.ends_with(separator) {
        slug.pop();
    }
    slug
}
