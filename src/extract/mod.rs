//! Static extraction of translatable strings.
//!
//! Extraction runs in three steps over a batch of files:
//!
//! 1. **Parse**: every file is read and parsed, one at a time. The first
//!    unreadable or unparsable file aborts the batch before anything is
//!    recorded.
//! 2. **Collect**: top-level declarations, exports and imports of every module
//!    are gathered (`declarations`).
//! 3. **Extract**: each module is walked for calls of the target function
//!    (`visitor`); arguments are resolved to literals and merged into
//!    [`ExtractedPhrase`]s keyed by value.
//!
//! ```ignore
//! let mut extractor = Extractor::new("xlate", "T");
//! extractor.process_files(&files)?;
//! for phrase in extractor.vars() {
//!     println!("{} <- {:?}", phrase.value, phrase.names);
//! }
//! ```

mod declarations;
pub mod keys;
mod parser;
mod target;
mod visitor;


use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fs,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use swc_common::SourceMap;

pub use keys::{CatalogBuild, KeyCollision, build_catalog, derive_key};
pub use parser::SOURCE_EXTENSIONS;
pub use target::TargetFunction;

use declarations::ModuleBindings;
use parser::{ParsedSource, parse_source};
use visitor::{CallSiteVisitor, ImportedLiterals};

/// A position in a scanned source file (1-based line and column).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Resolution of one call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentBinding {
    /// The argument is a literal: `T("Hello")`.
    Literal(String),
    /// The argument names a binding declared with a literal: `T(HelloWorld)`.
    Constant { name: String, value: String },
}

impl ArgumentBinding {
    pub fn value(&self) -> &str {
        match self {
            ArgumentBinding::Literal(value) | ArgumentBinding::Constant { value, .. } => value,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ArgumentBinding::Literal(_) => None,
            ArgumentBinding::Constant { name, .. } => Some(name),
        }
    }
}

/// A located call of the target function.
#[derive(Debug, Clone)]
pub struct CallSite {
    pub location: SourceLocation,
    /// One entry per argument, in order; `None` when the argument does not
    /// resolve to a literal.
    pub arguments: Vec<Option<ArgumentBinding>>,
}

/// A distinct literal value and every identifier seen referring to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPhrase {
    pub value: String,
    pub names: BTreeSet<String>,
}

/// Scans source files for calls of one target function.
#[derive(Debug)]
pub struct Extractor {
    target: TargetFunction,
    /// Value -> identifier names.
    phrases: BTreeMap<String, BTreeSet<String>>,
    files_scanned: usize,
    call_sites: usize,
}

impl Extractor {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_target(TargetFunction::new(package, name))
    }

    pub fn with_target(target: TargetFunction) -> Self {
        Self {
            target,
            phrases: BTreeMap::new(),
            files_scanned: 0,
            call_sites: 0,
        }
    }

    pub fn target(&self) -> &TargetFunction {
        &self.target
    }

    /// Scan files from disk.
    ///
    /// All-or-nothing: if any file cannot be read or parsed, an error is
    /// returned and no phrase from this batch is recorded.
    pub fn process_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let code = fs::read_to_string(path)
                .with_context(|| format!("Failed to read source file: {}", path.display()))?;
            sources.push((path.to_path_buf(), code));
        }
        self.process_sources(sources)
    }

    /// Scan in-memory sources. Paths are used for locations and for resolving
    /// relative imports between the given sources.
    pub fn process_sources(&mut self, sources: Vec<(PathBuf, String)>) -> Result<()> {
        let source_map = Arc::new(SourceMap::default());

        let mut parsed = Vec::with_capacity(sources.len());
        for (path, code) in sources {
            tracing::debug!(file = %path.display(), "parsing");
            parsed.push(parse_source(code, &path, &source_map)?);
        }

        let modules: HashMap<PathBuf, ModuleBindings> = parsed
            .iter()
            .map(|source| {
                (
                    normalize_path(&source.path),
                    ModuleBindings::collect(&source.module),
                )
            })
            .collect();

        for source in &parsed {
            let call_sites = self.extract_module(source, &modules, &source_map);
            self.files_scanned += 1;
            for call in &call_sites {
                self.record(call);
            }
        }
        Ok(())
    }

    fn extract_module(
        &self,
        source: &ParsedSource,
        modules: &HashMap<PathBuf, ModuleBindings>,
        source_map: &SourceMap,
    ) -> Vec<CallSite> {
        let key = normalize_path(&source.path);
        let Some(bindings) = modules.get(&key) else {
            return Vec::new();
        };
        let imported = imported_literals(&key, bindings, modules);
        let file_path = source.path.to_string_lossy();

        let call_sites =
            CallSiteVisitor::new(&file_path, source_map, &self.target, bindings, &imported)
                .collect(&source.module);
        tracing::debug!(
            file = %file_path,
            calls = call_sites.len(),
            "collected call sites of {}",
            self.target
        );
        call_sites
    }

    fn record(&mut self, call: &CallSite) {
        self.call_sites += 1;
        for argument in call.arguments.iter().flatten() {
            let names = self.phrases.entry(argument.value().to_string()).or_default();
            if let Some(name) = argument.name() {
                names.insert(name.to_string());
            }
        }
    }

    /// All distinct literal values observed.
    pub fn strings(&self) -> Vec<String> {
        self.phrases.keys().cloned().collect()
    }

    /// Every value with its merged set of identifier names.
    pub fn vars(&self) -> Vec<ExtractedPhrase> {
        self.phrases
            .iter()
            .map(|(value, names)| ExtractedPhrase {
                value: value.clone(),
                names: names.clone(),
            })
            .collect()
    }

    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    pub fn call_site_count(&self) -> usize {
        self.call_sites
    }
}

/// Resolve named imports of `module_key` against literals exported by other
/// scanned modules. Only relative specifiers are followed.
fn imported_literals(
    module_key: &Path,
    bindings: &ModuleBindings,
    modules: &HashMap<PathBuf, ModuleBindings>,
) -> ImportedLiterals {
    let mut imported = ImportedLiterals::new();
    for import in &bindings.imports {
        if import.is_namespace() || import.imported_name == "default" {
            continue;
        }
        let Some(exporting) = resolve_import_path(module_key, &import.module_path, modules)
            .and_then(|path| modules.get(&path))
        else {
            continue;
        };
        if let Some((declared, value)) = exporting.exported_literal(&import.imported_name) {
            imported.insert(
                import.local_name.clone(),
                (declared.to_string(), value.to_string()),
            );
        }
    }
    imported
}

/// Resolve a relative import specifier to the key of a scanned module.
///
/// Resolution is lexical: the specifier is tried as written, with each source
/// extension substituted or appended, and as a directory with an `index` file.
/// Only modules of the current batch can match.
fn resolve_import_path(
    current_file: &Path,
    import_path: &str,
    modules: &HashMap<PathBuf, ModuleBindings>,
) -> Option<PathBuf> {
    if !import_path.starts_with('.') {
        return None;
    }
    let base = normalize_path(&current_file.parent()?.join(import_path));

    let mut candidates = vec![base.clone()];
    for ext in SOURCE_EXTENSIONS {
        candidates.push(base.with_extension(ext));
        candidates.push(PathBuf::from(format!("{}.{}", base.display(), ext)));
    }
    for ext in SOURCE_EXTENSIONS {
        candidates.push(base.join(format!("index.{}", ext)));
    }
    candidates
        .into_iter()
        .find(|candidate| modules.contains_key(candidate))
}

/// Lexically normalize a path: make it absolute and drop `.`/`..` components.
fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
