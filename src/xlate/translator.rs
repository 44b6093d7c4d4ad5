//! The language registry and phrase lookup.

use std::collections::HashMap;

use crate::catalog::{Catalog, locale_from_name};

use super::{Assets, Lingua, Locale, XlateError};

/// A loaded language: where its catalog lives and which tag it goes by.
#[derive(Debug)]
struct Language {
    locale: Locale,
    asset: String,
}

/// Registry state, present once [`Translator::setup`] succeeded.
#[derive(Debug)]
struct Registry {
    default_language: Lingua,
    /// Default first, the rest in asset discovery order.
    available: Vec<Lingua>,
    languages: HashMap<Lingua, Language>,
    assets: Assets,
    current: Lingua,
    /// Default-language phrase -> current-language phrase.
    table: Option<HashMap<String, String>>,
}

impl Registry {
    fn load_catalog(&self, lingua: &Lingua) -> Result<Catalog, XlateError> {
        let language = self
            .languages
            .get(lingua)
            .ok_or_else(|| XlateError::UnknownLanguage(lingua.clone()))?;
        parse_catalog(&language.asset, &self.assets.load(&language.asset)?)
    }
}

fn parse_catalog(asset: &str, data: &[u8]) -> Result<Catalog, XlateError> {
    Catalog::from_slice(data).map_err(|source| XlateError::MalformedCatalog {
        asset: asset.to_string(),
        source,
    })
}

/// Translates phrases from a default language into a selected one.
///
/// Phrases passed to [`Translator::t`] are written in the default language.
/// Catalogs of every language share identifier keys, which is how a default
/// phrase finds its translation:
///
/// ```ignore
/// let mut translator = Translator::new();
/// translator.setup("English", Assets::from_dir("lang")?)?;
/// translator.set_language("Deutsch")?;
/// assert_eq!(translator.t("Hello"), "Hallo");
/// ```
///
/// Mutation takes `&mut self`; share a translator across threads behind a
/// lock.
#[derive(Debug, Default)]
pub struct Translator {
    registry: Option<Registry>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover the languages in `assets` and register them.
    ///
    /// Every asset named `*.json` is loaded and must declare its native name.
    /// One of them must be `default_language`. Fails if called again after
    /// succeeding once; a failed call leaves the translator untouched.
    pub fn setup(
        &mut self,
        default_language: impl Into<Lingua>,
        assets: Assets,
    ) -> Result<(), XlateError> {
        if self.registry.is_some() {
            return Err(XlateError::AlreadySetUp);
        }
        let default_language = default_language.into();

        let mut available = vec![default_language.clone()];
        let mut languages: HashMap<Lingua, Language> = HashMap::new();
        for asset in assets.names() {
            let Some(locale) = locale_from_name(asset) else {
                continue;
            };
            let catalog = parse_catalog(asset, &assets.load(asset)?)?;
            let lingua = Lingua::new(catalog.native_name().ok_or_else(|| {
                XlateError::NativeNameAbsent {
                    asset: asset.to_string(),
                }
            })?);

            if let Some(existing) = languages.get(&lingua) {
                return Err(XlateError::DuplicateLanguage {
                    asset: asset.to_string(),
                    lingua,
                    existing: existing.asset.clone(),
                });
            }
            tracing::debug!(asset, language = %lingua, locale, "discovered language");

            if lingua != default_language {
                available.push(lingua.clone());
            }
            languages.insert(
                lingua,
                Language {
                    locale: Locale::new(locale),
                    asset: asset.to_string(),
                },
            );
        }

        if !languages.contains_key(&default_language) {
            return Err(XlateError::DefaultLanguageAbsent(default_language));
        }

        self.registry = Some(Registry {
            current: default_language.clone(),
            default_language,
            available,
            languages,
            assets,
            table: None,
        });
        Ok(())
    }

    /// Switch the current language and rebuild the translation table.
    ///
    /// On failure the previous language and table stay in effect.
    pub fn set_language(&mut self, lang: impl Into<Lingua>) -> Result<(), XlateError> {
        let registry = self.registry.as_mut().ok_or(XlateError::NotSetUp)?;
        let lang = lang.into();
        tracing::info!(language = %lang, "setting language");

        if !registry.languages.contains_key(&lang) {
            return Err(XlateError::UnknownLanguage(lang));
        }
        let source = registry.load_catalog(&registry.default_language)?;
        let target = registry.load_catalog(&lang)?;

        let table: HashMap<String, String> = source
            .iter()
            .map(|(key, phrase)| {
                let translated = target.get(key).unwrap_or_default();
                (phrase.to_string(), translated.to_string())
            })
            .collect();

        registry.table = Some(table);
        registry.current = lang;
        Ok(())
    }

    /// Translate `phrase` from the default language into the current one.
    ///
    /// On `Err` the translation is `phrase` itself: every error, `NotSetUp`
    /// included, means "use the input unchanged". [`Translator::translate`]
    /// returns both halves. An empty translation is reported as a miss.
    pub fn t_err<'a>(&'a self, phrase: &'a str) -> Result<&'a str, XlateError> {
        let registry = self.registry.as_ref().ok_or(XlateError::NotSetUp)?;
        if registry.current == registry.default_language {
            return Ok(phrase);
        }
        let table = registry
            .table
            .as_ref()
            .ok_or_else(|| XlateError::NoTranslationTable {
                phrase: phrase.to_string(),
            })?;

        match table.get(phrase) {
            Some(translated) if !translated.is_empty() => Ok(translated),
            Some(_) => Err(XlateError::EmptyTranslation {
                phrase: phrase.to_string(),
                language: registry.current.clone(),
            }),
            None => Err(XlateError::MissingTranslation {
                phrase: phrase.to_string(),
                language: registry.current.clone(),
            }),
        }
    }

    /// Best-effort translation of `phrase` together with the reason it fell
    /// back, if it did. The returned text is never blank unless `phrase` is.
    pub fn translate<'a>(&'a self, phrase: &'a str) -> (&'a str, Option<XlateError>) {
        match self.t_err(phrase) {
            Ok(translated) => (translated, None),
            Err(err) => (phrase, Some(err)),
        }
    }

    /// Translate `phrase`, passing it through unchanged (with a warning) when
    /// no translation is available.
    pub fn t<'a>(&'a self, phrase: &'a str) -> &'a str {
        let (text, err) = self.translate(phrase);
        if let Some(err) = err {
            tracing::warn!("{err}");
        }
        text
    }

    pub fn is_set_up(&self) -> bool {
        self.registry.is_some()
    }

    /// The current language.
    pub fn language(&self) -> Option<&Lingua> {
        self.registry.as_ref().map(|r| &r.current)
    }

    /// Locale tag of the current language.
    pub fn locale(&self) -> Option<&Locale> {
        self.language().and_then(|lingua| self.locale_of(lingua))
    }

    /// The language phrases passed to `t` are written in.
    pub fn default_language(&self) -> Option<&Lingua> {
        self.registry.as_ref().map(|r| &r.default_language)
    }

    /// All languages, default first. The order of the others is unspecified.
    pub fn available_languages(&self) -> &[Lingua] {
        self.registry
            .as_ref()
            .map(|r| r.available.as_slice())
            .unwrap_or_default()
    }

    /// All languages, default first, the rest sorted by name.
    pub fn sorted_languages(&self) -> Vec<Lingua> {
        let mut languages = self.available_languages().to_vec();
        if languages.len() > 1 {
            languages[1..].sort();
        }
        languages
    }

    /// Locale tags of all languages, in unspecified order.
    pub fn locales(&self) -> Vec<Locale> {
        self.registry
            .as_ref()
            .map(|r| r.languages.values().map(|l| l.locale.clone()).collect())
            .unwrap_or_default()
    }

    pub fn locale_of(&self, lingua: &Lingua) -> Option<&Locale> {
        self.registry
            .as_ref()?
            .languages
            .get(lingua)
            .map(|language| &language.locale)
    }

    /// The language whose locale best matches `locale` (see
    /// [`Locale::fuzzy_match`]).
    pub fn lingua_for(&self, locale: &Locale) -> Option<&Lingua> {
        let registry = self.registry.as_ref()?;
        let matched = locale.fuzzy_match(&self.locales())?;
        registry
            .languages
            .iter()
            .find(|(_, language)| language.locale == matched)
            .map(|(lingua, _)| lingua)
    }
}
