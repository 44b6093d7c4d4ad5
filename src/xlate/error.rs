use thiserror::Error;

use crate::catalog::NATIVE_NAME_KEY;

use super::{Lingua, assets::LoadError};

/// Errors raised by the translation runtime.
#[derive(Debug, Error)]
pub enum XlateError {
    #[error("setup called multiple times")]
    AlreadySetUp,

    #[error("translator used before setup")]
    NotSetUp,

    #[error("default language {0} not loaded")]
    DefaultLanguageAbsent(Lingua),

    #[error("{asset}: missing key {}", NATIVE_NAME_KEY)]
    NativeNameAbsent { asset: String },

    #[error("{asset}: language {lingua} is already declared by {existing}")]
    DuplicateLanguage {
        asset: String,
        lingua: Lingua,
        existing: String,
    },

    #[error("lang asset not found: {asset}")]
    AssetNotFound { asset: String },

    #[error("failed to load lang asset {asset}")]
    AssetLoad {
        asset: String,
        #[source]
        source: LoadError,
    },

    #[error("malformed catalog {asset}")]
    MalformedCatalog {
        asset: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown language {0}")]
    UnknownLanguage(Lingua),

    #[error("T({phrase:?}) called before set_language, translation impossible")]
    NoTranslationTable { phrase: String },

    #[error("T({phrase:?}): missing translation to {language}")]
    MissingTranslation { phrase: String, language: Lingua },

    #[error("T({phrase:?}): empty translation in {language}")]
    EmptyTranslation { phrase: String, language: Lingua },
}

impl XlateError {
    /// Whether this is a lookup miss rather than a setup or usage problem.
    pub fn is_miss(&self) -> bool {
        matches!(
            self,
            XlateError::MissingTranslation { .. } | XlateError::EmptyTranslation { .. }
        )
    }
}
