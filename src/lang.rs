//! Supported site languages.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LangError {
    #[error("Unsupported language '{0}'. Supported languages: es, en")]
    Unsupported(String),
}

/// A language the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// Spanish. Served without a path segment and used as the fallback tree.
    Es,
    /// English. Served under the `en/` segment.
    En,
}

impl Lang {
    /// Language served without a language segment.
    pub const DEFAULT: Self = Self::Es;

    /// Language whose translation tree is treated as complete.
    pub const FALLBACK: Self = Self::Es;

    /// All languages in priority order.
    pub const ALL: [Self; 2] = [Self::Es, Self::En];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }

    /// The other language of the pair, used by the language toggle.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Es => Self::En,
            Self::En => Self::Es,
        }
    }

    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Es)
    }

    /// Path segment marking this language in URLs, `None` for the default language.
    #[must_use]
    pub const fn path_segment(self) -> Option<&'static str> {
        if self.is_default() { None } else { Some(self.code()) }
    }
}

impl Default for Lang {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = LangError;

    /// Accepts bare codes and region-qualified tags (`en-US`, `es_ES`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s.trim().split(['-', '_']).next().unwrap_or_default().to_lowercase();
        match primary.as_str() {
            "es" => Ok(Self::Es),
            "en" => Ok(Self::En),
            _ => Err(LangError::Unsupported(s.to_string())),
        }
    }
}
