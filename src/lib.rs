//! xtract - string extraction and runtime translation for JS/TS projects
//!
//! xtract finds every string passed to one translation function in a
//! JavaScript/TypeScript codebase and writes them out as a locale catalog. The
//! same catalogs are then used at runtime to translate phrases from the
//! default language into the selected one.
//!
//! ## Module Structure
//!
//! - `catalog`: Locale catalog format (flat identifier -> phrase JSON)
//! - `cli`: Command-line interface layer (`extract`, `compare`, `init`)
//! - `compare`: Key coverage check between sibling catalogs
//! - `config`: Configuration file loading and parsing
//! - `extract`: Call-site extraction and catalog key derivation
//! - `files`: File glob resolution
//! - `output`: Rendering of extraction results
//! - `xlate`: Translation runtime

pub mod catalog;
pub mod cli;
pub mod compare;
pub mod config;
pub mod extract;
pub mod files;
pub mod output;
pub mod xlate;
