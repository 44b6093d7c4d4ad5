//! Rendering of extraction results.
//!
//! Output is rendered fully in memory so that nothing is written when a later
//! step fails.

use anyhow::Result;

use crate::extract::{CatalogBuild, ExtractedPhrase, build_catalog};

/// Placeholder replaced by each phrase in a text template.
pub const STRING_PLACEHOLDER: &str = "{string}";

/// Translate `\n`, `\t` and `\\` escape sequences typed on a command line.
/// Other backslashes are kept as-is.
pub fn unescape(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Render every string through `template`, concatenated.
pub fn render_template(template: &str, strings: &[String]) -> String {
    let template = unescape(template);
    strings
        .iter()
        .map(|s| template.replace(STRING_PLACEHOLDER, s))
        .collect()
}

/// Render extracted phrases as a JSON catalog.
///
/// Returns the rendered text together with the build, whose collisions the
/// caller reports.
pub fn render_json(
    phrases: &[ExtractedPhrase],
    native_name: Option<&str>,
) -> Result<(String, CatalogBuild)> {
    let build = build_catalog(phrases, native_name);
    let json = build.catalog.to_json_string()?;
    Ok((json, build))
}
