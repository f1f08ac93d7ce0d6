//! Language-prefixed URL paths.
//!
//! Pages of the default language live directly under the base prefix
//! (`/architect-docs/roadmap/`); other languages add their segment after it
//! (`/architect-docs/en/roadmap/`).

use std::borrow::Cow;

use crate::config::SiteSettings;
use crate::lang::Lang;

/// Path segments spelled differently per language, stored as `(es, en)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugMap {
    pairs: Vec<(String, String)>,
}

impl SlugMap {
    #[must_use]
    pub const fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Counterpart of `segment` in `target`, if the segment is a known slug of the other language.
    #[must_use]
    pub fn translate(&self, segment: &str, target: Lang) -> Option<&str> {
        self.pairs.iter().find_map(|(es, en)| match target {
            Lang::En if es == segment => Some(en.as_str()),
            Lang::Es if en == segment => Some(es.as_str()),
            _ => None,
        })
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(es, en)| (es.as_str(), en.as_str()))
    }
}

impl Default for SlugMap {
    fn default() -> Self {
        Self::new(vec![("casos-de-uso".to_string(), "use-cases".to_string())])
    }
}

/// Computes localized paths under a fixed base prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLocalizer {
    base: String,
    slug_map: SlugMap,
}

impl Default for PathLocalizer {
    fn default() -> Self {
        Self::new("/architect-docs/", SlugMap::default())
    }
}

impl PathLocalizer {
    /// `base` is expected to start and end with `/`.
    #[must_use]
    pub fn new(base: impl Into<String>, slug_map: SlugMap) -> Self {
        Self { base: base.into(), slug_map }
    }

    #[must_use]
    pub fn from_settings(settings: &SiteSettings) -> Self {
        Self::new(settings.base.clone(), SlugMap::new(settings.slug_map.clone()))
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub const fn slug_map(&self) -> &SlugMap {
        &self.slug_map
    }

    /// Language of a URL or pathname. Only an exact `en` segment right after the
    /// base selects English; `/architect-docs/engage/` is Spanish.
    #[must_use]
    pub fn detect_language(&self, url: &str) -> Lang {
        split_language(self.strip_base(pathname(url))).0
    }

    /// Path of `path` in `lang`, always under the base prefix.
    ///
    /// An existing language segment is replaced, so applying this to an
    /// already-localized path never yields two segments.
    #[must_use]
    pub fn localize(&self, path: &str, lang: Lang) -> String {
        let (_, neutral) = split_language(self.strip_base(path));
        self.join(lang, neutral)
    }

    /// Path of the page at `url` in `target`, for the language toggle.
    ///
    /// Known translated slugs are swapped; any other path is kept as is.
    /// A slug already spelled in `target` is left unchanged.
    #[must_use]
    pub fn alternate(&self, url: &str, target: Lang) -> String {
        let (_, neutral) = split_language(self.strip_base(pathname(url)));
        let translated = self.translate_slug(neutral, target);
        self.join(target, &translated)
    }

    /// Base-relative form of `path`. The base without its trailing `/` is the site root.
    fn strip_base<'p>(&self, path: &'p str) -> &'p str {
        if path == self.base.trim_end_matches('/') {
            return "";
        }
        let rest = path.strip_prefix(self.base.as_str()).unwrap_or(path);
        rest.strip_prefix('/').unwrap_or(rest)
    }

    fn translate_slug<'p>(&self, neutral: &'p str, target: Lang) -> Cow<'p, str> {
        let (first, rest) = neutral.find('/').map_or((neutral, ""), |i| neutral.split_at(i));
        match self.slug_map.translate(first, target) {
            Some(slug) => {
                tracing::trace!(from = first, to = slug, %target, "Translated slug");
                Cow::Owned(format!("{slug}{rest}"))
            }
            None => Cow::Borrowed(neutral),
        }
    }

    fn join(&self, lang: Lang, neutral: &str) -> String {
        match lang.path_segment() {
            Some(segment) => format!("{}{segment}/{neutral}", self.base),
            None => format!("{}{neutral}", self.base),
        }
    }
}

/// Splits a leading language segment off a base-relative path.
fn split_language(path: &str) -> (Lang, &str) {
    for lang in Lang::ALL {
        let Some(segment) = lang.path_segment() else {
            continue;
        };
        if path == segment {
            return (lang, "");
        }
        if let Some(rest) = path.strip_prefix(segment).and_then(|r| r.strip_prefix('/')) {
            return (lang, rest);
        }
    }
    (Lang::DEFAULT, path)
}

/// Pathname of a full URL (`https://host/a/?q#f` -> `/a/`), or of a bare path.
fn pathname(url: &str) -> &str {
    let path = url.split_once("://").map_or(url, |(_, after_scheme)| {
        after_scheme.find('/').map_or("/", |i| after_scheme.get(i..).unwrap_or("/"))
    });
    path.split(['?', '#']).next().unwrap_or(path)
}
