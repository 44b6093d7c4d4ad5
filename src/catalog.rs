//! Locale catalogs: flat JSON maps from identifier name to phrase.
//!
//! A catalog is what the extractor writes and what the translation runtime
//! reads. Every catalog loaded at runtime must declare its own language name
//! under [`NATIVE_NAME_KEY`]:
//!
//! ```json
//! {
//!   "AA_NativeLangName": "English",
//!   "HelloWorld": "Hello, world!"
//! }
//! ```

use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};

/// Identifier holding the catalog's self-declared language name.
pub const NATIVE_NAME_KEY: &str = "AA_NativeLangName";

/// File extension of catalog assets.
pub const CATALOG_EXTENSION: &str = "json";

/// Mapping from identifier name to phrase for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from raw JSON bytes.
    ///
    /// The payload must be a flat object whose values are all strings; nested
    /// objects, arrays and numbers are rejected.
    pub fn from_slice(data: &[u8]) -> serde_json::Result<Self> {
        let entries: BTreeMap<String, String> = serde_json::from_slice(data)?;
        Ok(Self { entries })
    }

    /// Read and parse a catalog file.
    pub fn read(path: &Path) -> Result<Self> {
        let data =
            fs::read(path).with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        Self::from_slice(&data)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))
    }

    /// The declared native language name, if present and non-empty.
    pub fn native_name(&self) -> Option<&str> {
        self.entries
            .get(NATIVE_NAME_KEY)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert an entry, returning the phrase previously stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, phrase: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), phrase.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, phrase)| (key.as_str(), phrase.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as pretty-printed JSON followed by a newline.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, &self.entries)?;
        writeln!(writer)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)
            .context("Failed to serialize catalog")?;
        String::from_utf8(buf).context("Catalog is not valid UTF-8")
    }
}

impl FromIterator<(String, String)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Extracts the locale tag from a catalog file or asset name.
///
/// Examples:
/// - "en-us.json" -> Some("en-us")
/// - "/path/to/data/de.json" -> Some("de")
/// - "README.md" -> None
pub fn locale_from_name(name: &str) -> Option<&str> {
    let file_name = Path::new(name).file_name()?.to_str()?;
    file_name
        .strip_suffix(CATALOG_EXTENSION)
        .and_then(|stem| stem.strip_suffix('.'))
        .filter(|stem| !stem.is_empty())
}
