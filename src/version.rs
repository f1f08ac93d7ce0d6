//! Documentation versions and version-prefixed slugs.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{
    Deserialize,
    Serialize,
};

/// Leading `v<digits-and-dashes>/` segment of a versioned doc slug.
static VERSION_PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^(v[0-9-]+)/").ok());

/// A published documentation version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionConfig {
    /// Slug form, e.g. `v0-16-1`.
    pub id: String,
    /// Display form, e.g. `v0.16.1`.
    pub label: String,
    pub is_latest: bool,
}

impl VersionConfig {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, is_latest: bool) -> Self {
        Self { id: id.into(), label: label.into(), is_latest }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("No version is marked as latest")]
    NoLatest,

    #[error("Multiple versions are marked as latest: {}", .0.join(", "))]
    MultipleLatest(Vec<String>),

    #[error("Duplicate version id '{0}'")]
    DuplicateId(String),

    #[error("Invalid version id '{0}': expected 'v' followed by digits and dashes (e.g. v0-16-1)")]
    InvalidId(String),
}

/// Versions published on the site, newest first.
pub static VERSIONS: LazyLock<Versions> = LazyLock::new(|| {
    Versions::new(vec![
        VersionConfig::new("v0-16-1", "v0.16.1", true),
        VersionConfig::new("v0-15-3", "v0.15.3", false),
    ])
});

/// An ordered list of versions of which exactly one should be the latest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Versions {
    entries: Vec<VersionConfig>,
}

impl Versions {
    #[must_use]
    pub const fn new(entries: Vec<VersionConfig>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[VersionConfig] {
        &self.entries
    }

    /// First version flagged as latest.
    #[must_use]
    pub fn latest(&self) -> Option<&VersionConfig> {
        self.entries.iter().find(|v| v.is_latest)
    }

    /// Id used when a page does not name a version.
    #[must_use]
    pub fn default_version_id(&self) -> Option<&str> {
        self.latest().map(|v| v.id.as_str())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&VersionConfig> {
        self.entries.iter().find(|v| v.id == id)
    }

    /// Checks that exactly one version is latest and that ids are unique and well formed.
    pub fn validate(&self) -> Result<(), VersionError> {
        let mut seen = HashSet::new();
        for version in &self.entries {
            if !is_version_id(&version.id) {
                return Err(VersionError::InvalidId(version.id.clone()));
            }
            if !seen.insert(version.id.as_str()) {
                return Err(VersionError::DuplicateId(version.id.clone()));
            }
        }

        let latest: Vec<String> =
            self.entries.iter().filter(|v| v.is_latest).map(|v| v.id.clone()).collect();
        match latest.len() {
            0 => Err(VersionError::NoLatest),
            1 => Ok(()),
            _ => Err(VersionError::MultipleLatest(latest)),
        }
    }
}

/// True when `id` has the `v<digits-and-dashes>` shape.
fn is_version_id(id: &str) -> bool {
    id.strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit() || c == '-'))
}

/// Returns the version id a slug starts with, e.g. `v0-16-1` for `v0-16-1/intro`.
#[must_use]
pub fn get_version_from_slug(slug: &str) -> Option<&str> {
    let re = VERSION_PREFIX.as_ref()?;
    re.captures(slug).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// Returns the slug without its version prefix; unchanged when there is none.
#[must_use]
pub fn get_doc_slug(slug: &str) -> &str {
    VERSION_PREFIX
        .as_ref()
        .and_then(|re| re.find(slug))
        .map_or(slug, |m| slug.get(m.end()..).unwrap_or_default())
}
