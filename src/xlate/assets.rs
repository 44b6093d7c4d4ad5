//! Named, lazily loaded catalog assets.

use std::{collections::HashMap, fmt, fs, io, path::Path, sync::Arc};

use crate::catalog::CATALOG_EXTENSION;

use super::XlateError;

/// Error produced by an asset loader.
pub type LoadError = Box<dyn std::error::Error + Send + Sync>;

type Loader = Box<dyn Fn() -> Result<Vec<u8>, LoadError> + Send + Sync>;

/// Catalog assets by name (`"de.json"`), each with a loader that is only
/// invoked when the asset is needed.
///
/// Iteration order over assets is unspecified.
#[derive(Default)]
pub struct Assets {
    loaders: HashMap<String, Loader>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loader under `name`, replacing any previous one.
    pub fn insert<F>(&mut self, name: impl Into<String>, loader: F)
    where
        F: Fn() -> Result<Vec<u8>, LoadError> + Send + Sync + 'static,
    {
        self.loaders.insert(name.into(), Box::new(loader));
    }

    /// Register an in-memory asset.
    pub fn insert_bytes(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        let data: Vec<u8> = data.into();
        self.insert(name, move || Ok(data.clone()));
    }

    /// Lazy loaders over the `*.json` files of a directory, named by file
    /// name. Files are read on demand; the directory listing is read now.
    pub fn from_dir(dir: impl AsRef<Path>) -> io::Result<Self> {
        let mut assets = Self::new();
        for entry in fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(CATALOG_EXTENSION)
            {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                continue;
            };
            tracing::debug!(asset = %name, path = %path.display(), "registering asset");
            assets.insert(name, move || fs::read(&path).map_err(LoadError::from));
        }
        Ok(assets)
    }

    /// Adapt assets from another embedding mechanism.
    ///
    /// `convert` turns one native asset into catalog bytes; it runs each time
    /// the asset is loaded.
    ///
    /// ```ignore
    /// let assets = Assets::adopt(
    ///     embedded::FILES.iter().map(|f| (f.name.to_string(), f)),
    ///     |f| Ok(f.contents.to_vec()),
    /// );
    /// ```
    pub fn adopt<T, I, F>(items: I, convert: F) -> Self
    where
        I: IntoIterator<Item = (String, T)>,
        T: Send + Sync + 'static,
        F: Fn(&T) -> Result<Vec<u8>, LoadError> + Send + Sync + 'static,
    {
        let convert = Arc::new(convert);
        let mut assets = Self::new();
        for (name, item) in items {
            let convert = Arc::clone(&convert);
            assets.insert(name, move || (*convert)(&item));
        }
        assets
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loaders.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Invoke the loader registered under `name`.
    pub fn load(&self, name: &str) -> Result<Vec<u8>, XlateError> {
        let loader = self
            .loaders
            .get(name)
            .ok_or_else(|| XlateError::AssetNotFound {
                asset: name.to_string(),
            })?;
        loader().map_err(|source| XlateError::AssetLoad {
            asset: name.to_string(),
            source,
        })
    }
}

impl fmt::Debug for Assets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("Assets").field("names", &names).finish()
    }
}
