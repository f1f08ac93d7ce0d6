//! Frontmatter schemas of the six content collections.

use std::fmt;

use serde::de::{
    Error as _,
    Unexpected,
};
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
};
use serde_yaml::Value;

use crate::lang::Lang;

/// Shape of the entries in a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Docs,
    Pages,
    Architectures,
}

/// A content collection: a kind published in one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Collection {
    pub kind: CollectionKind,
    pub lang: Lang,
}

impl Collection {
    pub const ALL: [Self; 6] = [
        Self::new(CollectionKind::Docs, Lang::Es),
        Self::new(CollectionKind::Pages, Lang::Es),
        Self::new(CollectionKind::Architectures, Lang::Es),
        Self::new(CollectionKind::Docs, Lang::En),
        Self::new(CollectionKind::Pages, Lang::En),
        Self::new(CollectionKind::Architectures, Lang::En),
    ];

    #[must_use]
    pub const fn new(kind: CollectionKind, lang: Lang) -> Self {
        Self { kind, lang }
    }

    /// Directory name: `docs` for Spanish, `docs-en` for English.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match (self.kind, self.lang) {
            (CollectionKind::Docs, Lang::Es) => "docs",
            (CollectionKind::Pages, Lang::Es) => "pages",
            (CollectionKind::Architectures, Lang::Es) => "architectures",
            (CollectionKind::Docs, Lang::En) => "docs-en",
            (CollectionKind::Pages, Lang::En) => "pages-en",
            (CollectionKind::Architectures, Lang::En) => "architectures-en",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `docs` / `docs-en` entry. Every field may be omitted but not set to null.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DocEntry {
    #[serde(default, deserialize_with = "optional_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub description: Option<String>,
    pub order: Option<f64>,
    #[serde(default, deserialize_with = "optional_string")]
    pub icon: Option<String>,
}

/// `pages` / `pages-en` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageEntry {
    #[serde(default, deserialize_with = "optional_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Basic, Self::Intermediate, Self::Advanced];

    /// Spelling used by collections of `lang`.
    #[must_use]
    pub const fn label(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Self::Basic, Lang::Es) => "Básico",
            (Self::Intermediate, Lang::Es) => "Intermedio",
            (Self::Advanced, Lang::Es) => "Avanzado",
            (Self::Basic, Lang::En) => "Basic",
            (Self::Intermediate, Lang::En) => "Intermediate",
            (Self::Advanced, Lang::En) => "Advanced",
        }
    }

    /// Parses the spelling of `lang` only; `Basic` is rejected in a Spanish collection.
    #[must_use]
    pub fn parse(value: &str, lang: Lang) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label(lang) == value)
    }

    /// Accepted spellings for `lang`, for error messages.
    #[must_use]
    pub fn expected(lang: Lang) -> String {
        Self::ALL.map(|d| format!("\"{}\"", d.label(lang))).join(" | ")
    }
}

/// Raw `architectures` frontmatter before the difficulty is checked against the collection language.
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ArchitectureFrontmatter {
    #[serde(deserialize_with = "string")]
    pub(super) title: String,
    #[serde(deserialize_with = "string")]
    pub(super) description: String,
    #[serde(deserialize_with = "string")]
    pub(super) domain: String,
    #[serde(deserialize_with = "string")]
    pub(super) difficulty: String,
    #[serde(deserialize_with = "string")]
    pub(super) icon: String,
    pub(super) order: f64,
    #[serde(deserialize_with = "string_list")]
    pub(super) features: Vec<String>,
}

// YAML turns `title: 2024` into a string when asked for one. These accept
// only scalars written as strings, quoted or not.

fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    expect_string(Value::deserialize(deserializer)?)
}

/// Absent is `None`; an explicit null is an error.
fn optional_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    string(deserializer).map(Some)
}

fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Sequence(items) => items.into_iter().map(expect_string).collect(),
        other => Err(D::Error::invalid_type(unexpected(&other), &"a list of strings")),
    }
}

fn expect_string<E: serde::de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(E::invalid_type(unexpected(&other), &"a string")),
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(n) => n
            .as_u64()
            .map(Unexpected::Unsigned)
            .or_else(|| n.as_i64().map(Unexpected::Signed))
            .or_else(|| n.as_f64().map(Unexpected::Float))
            .unwrap_or(Unexpected::Other("number")),
        Value::String(text) => Unexpected::Str(text),
        Value::Sequence(_) => Unexpected::Seq,
        Value::Mapping(_) => Unexpected::Map,
        Value::Tagged(_) => Unexpected::Other("tagged value"),
    }
}

/// `architectures` / `architectures-en` entry. Every field is required.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchitectureEntry {
    pub title: String,
    pub description: String,
    pub domain: String,
    pub difficulty: Difficulty,
    pub icon: String,
    pub order: f64,
    pub features: Vec<String>,
}

/// Validated frontmatter of any collection.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryData {
    Doc(DocEntry),
    Page(PageEntry),
    Architecture(ArchitectureEntry),
}

impl EntryData {
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Doc(doc) => doc.title.as_deref(),
            Self::Page(page) => page.title.as_deref(),
            Self::Architecture(arch) => Some(&arch.title),
        }
    }

    #[must_use]
    pub const fn order(&self) -> Option<f64> {
        match self {
            Self::Doc(doc) => doc.order,
            Self::Page(_) => None,
            Self::Architecture(arch) => Some(arch.order),
        }
    }
}
