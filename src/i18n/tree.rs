//! Translation table: per-language trees of text, lists and nested maps.

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::sync::LazyLock;

use serde_json::Value;

use crate::lang::Lang;

/// Embedded Spanish table.
const BUILTIN_ES: &str = include_str!("../../locales/es.json");
/// Embedded English table.
const BUILTIN_EN: &str = include_str!("../../locales/en.json");

/// Table embedded into the binary, parsed on first access.
static BUILTIN: LazyLock<TranslationTree> = LazyLock::new(|| {
    match TranslationTree::from_json_sources(&[(Lang::Es, BUILTIN_ES), (Lang::En, BUILTIN_EN)]) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::error!("Failed to parse embedded translation table: {e}");
            TranslationTree::default()
        }
    }
});

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("Unsupported {kind} value at '{path}': only strings, arrays and objects are allowed")]
    UnsupportedValue { path: String, kind: &'static str },

    #[error("Translation root for '{lang}' must be an object")]
    RootNotObject { lang: Lang },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A value in a translation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    Text(String),
    /// Ordered values: plain strings (badges) or records (feature cards).
    List(Vec<TranslationNode>),
    Map(BTreeMap<String, TranslationNode>),
}

impl TranslationNode {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Converts a JSON value, reporting the dot-path of the first unsupported value.
    fn from_value(value: Value, path: &str) -> Result<Self, TreeError> {
        match value {
            Value::String(s) => Ok(Self::Text(s)),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| Self::from_value(item, &format!("{path}[{index}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            Value::Object(map) => map
                .into_iter()
                .map(|(key, item)| {
                    let child = if path.is_empty() { key.clone() } else { format!("{path}.{key}") };
                    Self::from_value(item, &child).map(|node| (key, node))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Self::Map),
            Value::Number(_) => Err(unsupported(path, "number")),
            Value::Bool(_) => Err(unsupported(path, "boolean")),
            Value::Null => Err(unsupported(path, "null")),
        }
    }
}

fn unsupported(path: &str, kind: &'static str) -> TreeError {
    TreeError::UnsupportedValue { path: path.to_string(), kind }
}

impl TryFrom<Value> for TranslationNode {
    type Error = TreeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value, "")
    }
}

/// Per-language translation roots.
///
/// Built once and never mutated afterwards; the fallback language's root is
/// treated as complete and the others may be partial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTree {
    roots: BTreeMap<Lang, BTreeMap<String, TranslationNode>>,
}

impl TranslationTree {
    /// The process-wide table compiled into the crate.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Adds or merges a language root. Top-level keys of `root` override existing ones.
    #[must_use]
    pub fn with_root(mut self, lang: Lang, root: BTreeMap<String, TranslationNode>) -> Self {
        self.roots.entry(lang).or_default().extend(root);
        self
    }

    /// Adds a language root from a JSON object value.
    pub fn with_value(self, lang: Lang, value: Value) -> Result<Self, TreeError> {
        match TranslationNode::try_from(value)? {
            TranslationNode::Map(root) => Ok(self.with_root(lang, root)),
            _ => Err(TreeError::RootNotObject { lang }),
        }
    }

    /// Parses strict JSON sources, one per language.
    pub fn from_json_sources(sources: &[(Lang, &str)]) -> Result<Self, TreeError> {
        sources.iter().try_fold(Self::default(), |tree, (lang, text)| {
            let value: Value = serde_json::from_str(text)?;
            tree.with_value(*lang, value)
        })
    }

    #[must_use]
    pub fn root(&self, lang: Lang) -> Option<&BTreeMap<String, TranslationNode>> {
        self.roots.get(&lang)
    }

    #[must_use]
    pub fn has_lang(&self, lang: Lang) -> bool {
        self.roots.contains_key(&lang)
    }

    /// Languages that have a root, in priority order.
    pub fn languages(&self) -> impl Iterator<Item = Lang> + '_ {
        self.roots.keys().copied()
    }

    /// Sorted dot-paths of every text or list terminal in `lang`.
    #[must_use]
    pub fn keys(&self, lang: Lang) -> Vec<String> {
        self.terminals(lang).into_keys().collect()
    }

    /// Terminal keys of the fallback language that `lang` does not define.
    #[must_use]
    pub fn missing_keys(&self, lang: Lang) -> Vec<String> {
        let present: BTreeSet<String> = self.terminals(lang).into_keys().collect();
        self.terminals(Lang::FALLBACK)
            .into_keys()
            .filter(|key| !present.contains(key))
            .collect()
    }

    /// Keys defined in both `lang` and the fallback language with different node kinds.
    #[must_use]
    pub fn mismatched_keys(&self, lang: Lang) -> Vec<String> {
        let fallback = self.terminals(Lang::FALLBACK);
        let own = self.terminals(lang);
        let mut keys: BTreeSet<String> = own
            .iter()
            .filter(|(key, kind)| fallback.get(*key).is_some_and(|k| k != *kind))
            .map(|(key, _)| key.clone())
            .collect();
        // A terminal on one side shadowing a map on the other also counts.
        keys.extend(own.keys().filter(|key| has_descendant(&fallback, key)).cloned());
        keys.extend(fallback.keys().filter(|key| has_descendant(&own, key)).cloned());
        keys.into_iter().collect()
    }

    /// Dot-path to node kind for every non-map node of `lang`.
    fn terminals(&self, lang: Lang) -> BTreeMap<String, &'static str> {
        let mut result = BTreeMap::new();
        if let Some(root) = self.roots.get(&lang) {
            collect_terminals(root, None, &mut result);
        }
        result
    }
}

fn has_descendant(terminals: &BTreeMap<String, &'static str>, key: &str) -> bool {
    let prefix = format!("{key}.");
    terminals.range(prefix.clone()..).next().is_some_and(|(k, _)| k.starts_with(&prefix))
}

fn collect_terminals(
    map: &BTreeMap<String, TranslationNode>,
    prefix: Option<&str>,
    result: &mut BTreeMap<String, &'static str>,
) {
    for (key, node) in map {
        let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
        match node {
            TranslationNode::Map(children) => collect_terminals(children, Some(&full_key), result),
            other => {
                result.insert(full_key, other.kind());
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn tree(es: Value, en: Value) -> TranslationTree {
        TranslationTree::default().with_value(Lang::Es, es).unwrap().with_value(Lang::En, en).unwrap()
    }

    #[googletest::test]
    fn converts_nested_values() {
        let node = TranslationNode::try_from(json!({
            "nav": { "docs": "Docs" },
            "badges": ["a", "b"],
            "items": [{ "title": "T" }]
        }))
        .unwrap();

        let map = node.as_map().unwrap();
        expect_that!(map["nav"].as_map().unwrap()["docs"].as_text(), some(eq("Docs")));
        expect_that!(map["badges"].kind(), eq("list"));
        expect_that!(map["items"].kind(), eq("list"));
    }

    #[rstest]
    #[case(json!({ "count": 3 }), "count", "number")]
    #[case(json!({ "a": { "flag": true } }), "a.flag", "boolean")]
    #[case(json!({ "list": ["x", null] }), "list[1]", "null")]
    fn rejects_unsupported_values(
        #[case] value: Value,
        #[case] expected_path: &str,
        #[case] expected_kind: &str,
    ) {
        let result = TranslationNode::try_from(value);

        let Err(TreeError::UnsupportedValue { path, kind }) = &result else {
            panic!("expected UnsupportedValue, got {result:?}");
        };
        assert_eq!(path, expected_path);
        assert_eq!(*kind, expected_kind);
    }

    #[rstest]
    fn rejects_non_object_root() {
        let result = TranslationTree::default().with_value(Lang::En, json!(["a"]));

        assert!(matches!(result, Err(TreeError::RootNotObject { lang: Lang::En })));
    }

    #[rstest]
    fn with_root_merges_top_level_keys() {
        let first = TranslationTree::default()
            .with_value(Lang::Es, json!({ "a": "1", "b": "2" }))
            .unwrap()
            .with_value(Lang::Es, json!({ "b": "3" }))
            .unwrap();

        assert_that!(first.keys(Lang::Es), elements_are![eq("a"), eq("b")]);
        let root = first.root(Lang::Es).unwrap();
        assert_that!(root["b"].as_text(), some(eq("3")));
    }

    #[rstest]
    fn keys_are_sorted_terminal_paths() {
        let tree = tree(json!({ "nav": { "why": "x", "docs": "y" }, "badges": ["a"] }), json!({}));

        assert_that!(tree.keys(Lang::Es), elements_are![eq("badges"), eq("nav.docs"), eq("nav.why")]);
        assert_that!(tree.keys(Lang::En), is_empty());
    }

    #[rstest]
    fn missing_keys_against_fallback() {
        let tree = tree(
            json!({ "nav": { "why": "Por qué", "docs": "Docs" }, "footer": { "tagline": "x" } }),
            json!({ "nav": { "why": "Why" } }),
        );

        assert_that!(tree.missing_keys(Lang::En), elements_are![eq("footer.tagline"), eq("nav.docs")]);
        assert_that!(tree.missing_keys(Lang::Es), is_empty());
    }

    #[rstest]
    fn mismatched_keys_report_kind_differences() {
        let tree = tree(
            json!({ "a": "text", "b": ["x"], "c": { "d": "y" }, "e": "same" }),
            json!({ "a": ["text"], "b": ["y"], "c": "flat", "e": "igual" }),
        );

        assert_that!(tree.mismatched_keys(Lang::En), elements_are![eq("a"), eq("c")]);
    }

    #[rstest]
    fn builtin_table_parses_both_languages() {
        let tree = TranslationTree::builtin();

        assert_that!(tree.has_lang(Lang::Es), eq(true));
        assert_that!(tree.has_lang(Lang::En), eq(true));
        assert_that!(tree.missing_keys(Lang::En), is_empty());
        assert_that!(tree.mismatched_keys(Lang::En), is_empty());
    }
}
