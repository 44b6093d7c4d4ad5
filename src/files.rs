//! Resolution of file glob patterns into the list of files to scan.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::{Pattern, glob};

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Make a pattern absolute by prefixing the (escaped) base directory.
fn absolute_pattern(pattern: &str, base_dir: &Path) -> String {
    if Path::new(pattern).is_absolute() {
        return pattern.to_string();
    }
    let base = Pattern::escape(&base_dir.to_string_lossy());
    tracing::debug!(pattern, base = %base, "resolving relative pattern");
    format!("{}/{}", base.trim_end_matches('/'), pattern)
}

/// Files excluded from a scan.
struct Ignores {
    literal_paths: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl Ignores {
    fn new(ignores: &[String], base_dir: &Path) -> Result<Self> {
        let mut literal_paths = Vec::new();
        let mut patterns = Vec::new();
        for ignore in ignores {
            if is_glob_pattern(ignore) {
                patterns.push(
                    Pattern::new(ignore)
                        .with_context(|| format!("Invalid ignore pattern: \"{}\"", ignore))?,
                );
            } else {
                literal_paths.push(base_dir.join(ignore));
            }
        }
        Ok(Self {
            literal_paths,
            patterns,
        })
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.literal_paths.iter().any(|ignore| path.starts_with(ignore))
            || self.patterns.iter().any(|p| p.matches(&path_str))
    }
}

/// Expand `patterns` into a sorted, de-duplicated list of files.
///
/// Relative patterns resolve against `base_dir`. Directories matched by a
/// pattern are skipped; files matched by any of `ignores` are dropped. An
/// invalid pattern is an error.
pub fn files_from_patterns(
    patterns: &[String],
    base_dir: &Path,
    ignores: &[String],
) -> Result<Vec<PathBuf>> {
    let ignores = Ignores::new(ignores, base_dir)?;
    let mut files = BTreeSet::new();

    for pattern in patterns {
        let full_pattern = absolute_pattern(pattern, base_dir);
        let entries =
            glob(&full_pattern).with_context(|| format!("Invalid file pattern: \"{}\"", pattern))?;
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("Cannot access path: {}", e);
                    continue;
                }
            };
            if path.is_file() && !ignores.is_ignored(&path) {
                files.insert(path);
            }
        }
    }

    Ok(files.into_iter().collect())
}
