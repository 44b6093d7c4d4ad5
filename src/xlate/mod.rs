//! Translation runtime.
//!
//! A [`Translator`] is set up once from a set of catalog [`Assets`], one per
//! language, each declaring its native name. Phrases are written in the
//! default language and translated by matching identifier keys between the
//! default catalog and the catalog of the current language.
//!
//! Lookups never fail hard: [`Translator::t`] returns the input phrase
//! whenever no translation exists, and [`Translator::t_err`] says why.

mod assets;
mod error;
mod language;
mod translator;

pub use assets::{Assets, LoadError};
pub use error::XlateError;
pub use language::{Lingua, Locale};
pub use translator::Translator;
