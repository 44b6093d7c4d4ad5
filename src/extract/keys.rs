//! Catalog key derivation.
//!
//! A phrase referenced through exactly one identifier is keyed by that
//! identifier. Anonymous or ambiguous phrases are keyed by a sanitized form of
//! their own text, shortened with a digest suffix when too long.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};

use crate::catalog::{Catalog, NATIVE_NAME_KEY};

use super::ExtractedPhrase;

/// Maximum length of a key derived from phrase text.
pub const MAX_KEY_LEN: usize = 40;

/// Maximum length of the digest suffix of a shortened key.
const MAX_SUFFIX_LEN: usize = 10;

/// Compute the catalog key of a phrase.
pub fn derive_key(phrase: &ExtractedPhrase) -> String {
    if phrase.names.len() == 1
        && let Some(name) = phrase.names.first()
    {
        return name.clone();
    }
    sanitized_key(&phrase.value)
}

/// Key derived from phrase text alone.
///
/// Every character outside `A-Z`/`a-z` becomes `_`. Results longer than
/// [`MAX_KEY_LEN`] keep their head and end in a URL-safe base64 digest of the
/// original text, for a total of exactly [`MAX_KEY_LEN`] characters.
pub fn sanitized_key(value: &str) -> String {
    let sanitized: String = value
        .chars()
        .map(|c| if c.is_ascii_alphabetic() { c } else { '_' })
        .collect();
    if sanitized.len() <= MAX_KEY_LEN {
        return sanitized;
    }

    let digest = URL_SAFE_NO_PAD.encode(Sha256::digest(value.as_bytes()));
    let suffix = &digest[..digest.len().min(MAX_SUFFIX_LEN)];
    // `sanitized` is pure ASCII, so byte slicing is safe.
    format!("{}{}", &sanitized[..MAX_KEY_LEN - suffix.len()], suffix)
}

/// Two distinct phrases that derived the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub key: String,
    /// The phrase written to the catalog.
    pub kept: String,
    /// The phrase it replaced.
    pub dropped: String,
}

/// Result of [`build_catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuild {
    pub catalog: Catalog,
    pub collisions: Vec<KeyCollision>,
}

/// Key every phrase and assemble an output catalog.
///
/// Phrases are processed in value order; on a key collision the later value
/// wins and the collision is reported. A `native_name` is stored under
/// [`NATIVE_NAME_KEY`], which is then reserved: a phrase deriving that key is
/// left out and reported as a collision.
pub fn build_catalog(phrases: &[ExtractedPhrase], native_name: Option<&str>) -> CatalogBuild {
    let mut ordered: Vec<&ExtractedPhrase> = phrases.iter().collect();
    ordered.sort_by(|a, b| a.value.cmp(&b.value));

    let mut build = CatalogBuild::default();
    if let Some(name) = native_name {
        build.catalog.insert(NATIVE_NAME_KEY, name);
    }

    for phrase in ordered {
        let key = derive_key(phrase);
        if let Some(name) = native_name
            && key == NATIVE_NAME_KEY
        {
            tracing::debug!(phrase = %phrase.value, "phrase derives the reserved native name key");
            build.collisions.push(KeyCollision {
                key,
                kept: name.to_string(),
                dropped: phrase.value.clone(),
            });
            continue;
        }
        if let Some(previous) = build.catalog.insert(key.clone(), phrase.value.clone())
            && previous != phrase.value
        {
            tracing::debug!(
                key = %key,
                kept = %phrase.value,
                dropped = %previous,
                "catalog key collision"
            );
            build.collisions.push(KeyCollision {
                key,
                kept: phrase.value.clone(),
                dropped: previous,
            });
        }
    }
    build
}
