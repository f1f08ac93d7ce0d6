//! Consistency checks across translations, content and settings.

use std::fmt;

use crate::config::SiteSettings;
use crate::content::ContentSet;
use crate::i18n::{
    Lookup,
    TranslationTree,
    Translator,
};
use crate::lang::Lang;
use crate::path::PathLocalizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A single finding of [`check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn warning(message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, message: message.into() }
    }

    fn error(message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, message: message.into() }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub findings: Vec<Finding>,
}

impl CheckReport {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Warning)
    }
}

/// Runs every check.
///
/// Keys missing from a non-fallback language are warnings since lookups fall
/// back. Kind mismatches, invalid content and unconfigured versions are errors.
#[must_use]
pub fn check(tree: &TranslationTree, content: &ContentSet, settings: &SiteSettings) -> CheckReport {
    let mut report = CheckReport::default();

    for lang in Lang::ALL.into_iter().filter(|lang| *lang != Lang::FALLBACK) {
        if !tree.has_lang(lang) {
            report.findings.push(Finding::warning(format!("No translations for '{lang}'")));
            continue;
        }
        for key in tree.missing_keys(lang) {
            report
                .findings
                .push(Finding::warning(format!("'{key}' is missing in '{lang}' and falls back")));
        }
        for key in tree.mismatched_keys(lang) {
            report.findings.push(Finding::error(format!(
                "'{key}' has a different shape in '{lang}' and '{}'",
                Lang::FALLBACK
            )));
        }
    }

    for error in &content.errors {
        report.findings.push(Finding::error(error.to_string()));
    }

    let versions = settings.versions();
    for entry in &content.entries {
        let Some(version) = entry.version.as_deref() else {
            continue;
        };
        if versions.get(version).is_none() {
            report.findings.push(Finding::error(format!(
                "{}/{}: version '{version}' is not configured",
                entry.collection, entry.id
            )));
        }
    }

    let localizer = PathLocalizer::from_settings(settings);
    report.findings.extend(unmapped_href_slugs(tree, &localizer));

    tracing::debug!(findings = report.findings.len(), "Check finished");
    report
}

/// `*Href` keys whose first path segment differs between languages while the
/// slug map does not know the pair, so the language toggle would keep the
/// wrong slug.
fn unmapped_href_slugs(tree: &TranslationTree, localizer: &PathLocalizer) -> Vec<Finding> {
    let translator = Translator::new(tree);
    let target = Lang::FALLBACK.other();

    tree.keys(Lang::FALLBACK)
        .into_iter()
        .filter(|key| key.rsplit('.').next().is_some_and(|last| last.ends_with("Href")))
        .filter_map(|key| {
            let (Lookup::Text(source), Lookup::Text(translated)) =
                (translator.lookup(&key, Lang::FALLBACK), translator.lookup(&key, target))
            else {
                return None;
            };
            let from = first_segment(source);
            let to = first_segment(translated);
            let mapped = localizer.slug_map().translate(from, target) == Some(to);
            (from != to && !mapped).then(|| {
                Finding::warning(format!(
                    "'{key}': slug '{from}' ({}) and '{to}' ({target}) are not in the slug map",
                    Lang::FALLBACK
                ))
            })
        })
        .collect()
}

fn first_segment(href: &str) -> &str {
    let href = href.trim_start_matches('/');
    href.split('/').next().unwrap_or(href)
}
