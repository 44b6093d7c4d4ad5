use std::fmt;

use anyhow::{Result, bail};

/// The single qualified function whose call-site arguments are extracted.
///
/// Written as `<module specifier>.<exported name>`, for example `xlate.T` or
/// `@app/i18n/xlate.T`. The specifier is split on its last `.`, so module
/// specifiers may themselves contain dots (`./xlate.js.T`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFunction {
    /// Module specifier as written in `import ... from "<package>"`.
    pub package: String,
    /// Exported function name.
    pub name: String,
}

impl TargetFunction {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Parse a `pkg.Func` or `path.to/some/pkg.Func` specifier.
    pub fn parse(specifier: &str) -> Result<Self> {
        let Some(dot) = specifier.rfind('.') else {
            bail!(
                "'{}' is not a qualified function name (expected 'pkg.Func' or 'path.to/some/pkg.Func')",
                specifier
            );
        };
        if specifier.rfind('/').is_some_and(|slash| slash > dot) {
            bail!(
                "'{}' is not a qualified function name: the function part contains '/'",
                specifier
            );
        }

        let (package, name) = (&specifier[..dot], &specifier[dot + 1..]);
        if package.is_empty() || name.is_empty() {
            bail!(
                "'{}' is not a qualified function name: empty package or function",
                specifier
            );
        }

        Ok(Self::new(package, name))
    }
}

impl fmt::Display for TargetFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}
