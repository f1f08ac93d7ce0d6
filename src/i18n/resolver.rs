//! Dot-path key resolution with fallback to the authoritative language.

use std::collections::BTreeMap;

use super::tree::{
    TranslationNode,
    TranslationTree,
};
use crate::lang::Lang;

/// Outcome of walking a dot-path, after the fallback policy has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Text(&'a str),
    List(&'a [TranslationNode]),
    Map(&'a BTreeMap<String, TranslationNode>),
    Missing,
}

/// Read-only accessor over a [`TranslationTree`].
///
/// Every call re-walks the tree; nothing is cached.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    tree: &'a TranslationTree,
}

impl Default for Translator<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> Translator<'a> {
    #[must_use]
    pub const fn new(tree: &'a TranslationTree) -> Self {
        Self { tree }
    }

    /// Translator over the table embedded into the crate.
    #[must_use]
    pub fn builtin() -> Translator<'static> {
        Translator::new(TranslationTree::builtin())
    }

    /// Resolves `key` in `lang`, retrying the whole path in the fallback language
    /// when any segment is missing.
    ///
    /// A walk that completes in `lang` is final even when the terminal has the
    /// wrong type for the caller.
    #[must_use]
    pub fn lookup(&self, key: &str, lang: Lang) -> Lookup<'a> {
        if let Some(node) = self.walk(key, lang) {
            return Lookup::from(node);
        }
        if lang == Lang::FALLBACK {
            tracing::trace!(key, %lang, "Translation key not found");
            return Lookup::Missing;
        }
        tracing::trace!(key, %lang, fallback = %Lang::FALLBACK, "Falling back");
        self.walk(key, Lang::FALLBACK).map_or_else(
            || {
                tracing::trace!(key, %lang, "Translation key not found in fallback");
                Lookup::Missing
            },
            Lookup::from,
        )
    }

    /// Returns the translated string, or `key` itself when it is missing or not a string.
    #[must_use]
    pub fn t<'k>(&self, key: &'k str, lang: Lang) -> &'k str
    where
        'a: 'k,
    {
        match self.lookup(key, lang) {
            Lookup::Text(text) => text,
            _ => key,
        }
    }

    /// Returns a list of strings, or an empty list when it is missing, not a list,
    /// or holds anything other than strings.
    #[must_use]
    pub fn t_array(&self, key: &str, lang: Lang) -> Vec<&'a str> {
        let Lookup::List(items) = self.lookup(key, lang) else {
            return Vec::new();
        };
        items.iter().map(TranslationNode::as_text).collect::<Option<Vec<_>>>().unwrap_or_default()
    }

    /// Returns a list verbatim (including lists of records), or an empty slice.
    #[must_use]
    pub fn t_list(&self, key: &str, lang: Lang) -> &'a [TranslationNode] {
        match self.lookup(key, lang) {
            Lookup::List(items) => items,
            _ => &[],
        }
    }

    /// Walks one language tree. `None` as soon as a segment cannot be followed.
    fn walk(&self, key: &str, lang: Lang) -> Option<&'a TranslationNode> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut node = self.tree.root(lang)?.get(first)?;
        for segment in segments {
            node = node.as_map()?.get(segment)?;
        }
        Some(node)
    }
}

impl<'a> From<&'a TranslationNode> for Lookup<'a> {
    fn from(node: &'a TranslationNode) -> Self {
        match node {
            TranslationNode::Text(text) => Self::Text(text),
            TranslationNode::List(items) => Self::List(items),
            TranslationNode::Map(map) => Self::Map(map),
        }
    }
}

/// Resolves `key` against the embedded table. See [`Translator::t`].
#[must_use]
pub fn t(key: &str, lang: Lang) -> &str {
    Translator::builtin().t(key, lang)
}

/// Resolves a string list against the embedded table. See [`Translator::t_array`].
#[must_use]
pub fn t_array(key: &str, lang: Lang) -> Vec<&'static str> {
    Translator::builtin().t_array(key, lang)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;

    #[fixture]
    fn tree() -> TranslationTree {
        TranslationTree::default()
            .with_value(
                Lang::Es,
                json!({
                    "nav": { "docs": "Documentación", "useCases": "Casos de Uso" },
                    "footer": { "tagline": "Hecho con precisión." },
                    "elevator": { "badges": ["Multi-modelo", "Hooks"] },
                    "features": { "items": [{ "title": "Uno" }] },
                    "mixed": ["texto", { "title": "x" }],
                    "onlyEs": "Solo español"
                }),
            )
            .unwrap()
            .with_value(
                Lang::En,
                json!({
                    "nav": { "docs": "Docs", "useCases": ["wrong", "type"] },
                    "elevator": { "badges": ["Multi-model"] }
                }),
            )
            .unwrap()
    }

    #[rstest]
    #[case("nav.docs", Lang::Es, "Documentación")]
    #[case("nav.docs", Lang::En, "Docs")]
    #[case("footer.tagline", Lang::En, "Hecho con precisión.")]
    #[case("onlyEs", Lang::En, "Solo español")]
    fn t_resolves_with_fallback(
        tree: TranslationTree,
        #[case] key: &str,
        #[case] lang: Lang,
        #[case] expected: &str,
    ) {
        assert_that!(Translator::new(&tree).t(key, lang), eq(expected));
    }

    #[rstest]
    #[case::missing_everywhere("nav.unknown", Lang::En)]
    #[case::missing_in_fallback("does.not.exist", Lang::Es)]
    #[case::map_terminal("nav", Lang::Es)]
    #[case::list_terminal("elevator.badges", Lang::Es)]
    #[case::descend_into_text("nav.docs.extra", Lang::Es)]
    #[case::descend_into_list("elevator.badges.0", Lang::Es)]
    #[case::empty_key("", Lang::En)]
    #[case::trailing_dot("nav.", Lang::Es)]
    fn t_returns_key_as_sentinel(tree: TranslationTree, #[case] key: &str, #[case] lang: Lang) {
        assert_that!(Translator::new(&tree).t(key, lang), eq(key));
    }

    #[rstest]
    fn t_does_not_fall_back_on_type_mismatch(tree: TranslationTree) {
        // The English walk completes on a list, so the Spanish string is not used.
        assert_that!(Translator::new(&tree).t("nav.useCases", Lang::En), eq("nav.useCases"));
    }

    #[rstest]
    fn t_array_returns_list_verbatim(tree: TranslationTree) {
        let translator = Translator::new(&tree);

        assert_that!(
            translator.t_array("elevator.badges", Lang::Es),
            elements_are![eq(&"Multi-modelo"), eq(&"Hooks")]
        );
        assert_that!(translator.t_array("elevator.badges", Lang::En), elements_are![eq(&"Multi-model")]);
    }

    #[rstest]
    #[case::missing("elevator.missing", Lang::En)]
    #[case::text_terminal("nav.docs", Lang::Es)]
    #[case::map_terminal("nav", Lang::En)]
    #[case::records("features.items", Lang::Es)]
    #[case::mixed_elements("mixed", Lang::Es)]
    fn t_array_returns_empty_on_failure(
        tree: TranslationTree,
        #[case] key: &str,
        #[case] lang: Lang,
    ) {
        assert_that!(Translator::new(&tree).t_array(key, lang), is_empty());
    }

    #[rstest]
    fn t_list_returns_records(tree: TranslationTree) {
        let items = Translator::new(&tree).t_list("features.items", Lang::En);

        assert_that!(items.len(), eq(1));
        let title = items.first().and_then(TranslationNode::as_map).and_then(|m| m.get("title"));
        assert_that!(title.and_then(TranslationNode::as_text), some(eq("Uno")));
    }

    #[rstest]
    fn lookup_distinguishes_kinds(tree: TranslationTree) {
        let translator = Translator::new(&tree);

        assert_that!(translator.lookup("nav.docs", Lang::Es), eq(Lookup::Text("Documentación")));
        assert!(matches!(translator.lookup("nav", Lang::Es), Lookup::Map(_)));
        assert!(matches!(translator.lookup("elevator.badges", Lang::En), Lookup::List(_)));
        assert_that!(translator.lookup("nope", Lang::En), eq(Lookup::Missing));
    }

    #[rstest]
    fn lookup_with_language_missing_from_tree() {
        let tree = TranslationTree::default()
            .with_value(Lang::Es, json!({ "a": "b" }))
            .unwrap();

        assert_that!(Translator::new(&tree).t("a", Lang::En), eq("b"));
    }

    #[rstest]
    fn empty_tree_degrades_to_sentinels() {
        let tree = TranslationTree::default();
        let translator = Translator::new(&tree);

        assert_that!(translator.t("nav.docs", Lang::Es), eq("nav.docs"));
        assert_that!(translator.t_array("elevator.badges", Lang::En), is_empty());
    }

    #[rstest]
    fn builtin_free_functions() {
        assert_that!(t("nav.useCases", Lang::Es), eq("Casos de Uso"));
        assert_that!(t("nav.useCases", Lang::En), eq("Use Cases"));
        assert_that!(t_array("elevator.badges", Lang::En), contains(eq(&"Guardrails")));
    }
}
