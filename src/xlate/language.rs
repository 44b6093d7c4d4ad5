//! Language names and locale tags.

use std::fmt;

/// Native name of a language, as declared by its catalog (`"Deutsch"`).
/// Unique across loaded catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lingua(String);

/// Short tag naming a catalog asset (`"de"`, `"en-us"`).
///
/// Tags are kept as registered; comparisons go through
/// [`Locale::eq_ignore_case`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(String);

impl Lingua {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the first `-` (`"en"` for `"en-GB"`).
    pub fn prefix(&self) -> &str {
        self.0.split_once('-').map_or(self.0.as_str(), |(prefix, _)| prefix)
    }

    pub fn eq_ignore_case(&self, other: &Locale) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Find an available locale close to this one.
    ///
    /// In order, first match wins:
    /// 1. an available tag equal to this one, ignoring case;
    /// 2. an available tag equal to this tag's prefix (`en-gb` -> `en`);
    /// 3. an available tag sharing this tag's prefix (`en-gb` -> `en-us`).
    ///
    /// Returns the available tag as registered.
    pub fn fuzzy_match(&self, available: &[Locale]) -> Option<Locale> {
        if let Some(exact) = available.iter().find(|loc| self.eq_ignore_case(loc)) {
            return Some(exact.clone());
        }

        let requested = self.prefix();
        let inexact = available
            .iter()
            .find(|loc| self.0.contains('-') && loc.0.eq_ignore_ascii_case(requested))
            .or_else(|| {
                available
                    .iter()
                    .find(|loc| loc.prefix().eq_ignore_ascii_case(requested))
            });

        match inexact {
            Some(found) => {
                tracing::warn!("using inexact locale {} when {} was requested", found, self);
                Some(found.clone())
            }
            None => {
                tracing::warn!("no match, exact or approximate, found for locale {}", self);
                None
            }
        }
    }
}

impl fmt::Display for Lingua {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Lingua {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Lingua {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&Lingua> for Lingua {
    fn from(name: &Lingua) -> Self {
        name.clone()
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}
