use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::version::{
    VERSIONS,
    VersionConfig,
    Versions,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "slugMap[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Site-wide settings read from `.architect-docs.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    /// Public origin of the site.
    pub site: String,

    /// Path prefix the whole site is served under. Must start and end with `/`.
    pub base: String,

    pub translations: TranslationFilesConfig,
    pub content: ContentConfig,

    /// Path segments whose spelling differs per language, as `[es, en]` pairs.
    pub slug_map: Vec<(String, String)>,

    pub versions: Vec<VersionConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    /// Relative to the workspace root.
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentConfig {
    /// Directory holding one subdirectory per collection, relative to the workspace root.
    pub dir: String,

    /// Entry files, relative to a collection directory.
    pub include_patterns: Vec<String>,
}

impl SiteSettings {
    #[must_use]
    pub fn versions(&self) -> Versions {
        Versions::new(self.versions.clone())
    }

    /// # Errors
    /// - Base prefix not delimited by `/`
    /// - Invalid glob pattern
    /// - Empty or nested slug in the slug map
    /// - Version list without exactly one latest entry
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !self.base.starts_with('/') || !self.base.ends_with('/') {
            errors.push(ValidationError::new(
                "base",
                format!("The base path must start and end with '/'. Example: \"/architect-docs/\", got \"{}\"", self.base),
            ));
        }

        if self.translations.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "translations.includePatterns",
                "At least one pattern is required. Example: [\"locales/*.json\"]",
            ));
        }

        validate_globs(&mut errors, "translations.includePatterns", &self.translations.include_patterns);
        validate_globs(&mut errors, "translations.excludePatterns", &self.translations.exclude_patterns);

        if self.content.dir.is_empty() {
            errors.push(ValidationError::new(
                "content.dir",
                "The directory cannot be empty. Example: \"src/content\"",
            ));
        }

        validate_globs(&mut errors, "content.includePatterns", &self.content.include_patterns);

        for (index, (es, en)) in self.slug_map.iter().enumerate() {
            for slug in [es, en] {
                if slug.is_empty() || slug.contains('/') {
                    errors.push(ValidationError::new(
                        format!("slugMap[{index}]"),
                        format!("Slugs must be a single non-empty path segment, got \"{slug}\""),
                    ));
                }
            }
        }

        if let Err(e) = self.versions().validate() {
            errors.push(ValidationError::new("versions", e.to_string()));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn validate_globs(errors: &mut Vec<ValidationError>, field: &str, patterns: &[String]) {
    for (index, pattern) in patterns.iter().enumerate() {
        if let Err(e) = globset::Glob::new(pattern) {
            errors.push(ValidationError::new(
                format!("{field}[{index}]"),
                format!("Invalid glob pattern '{pattern}': {e}"),
            ));
        }
    }
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self {
            include_patterns: vec!["locales/*.{json,jsonc}".to_string()],
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: "src/content".to_string(),
            include_patterns: vec!["**/*.{md,mdx}".to_string()],
        }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site: "https://Diego303.github.io".to_string(),
            base: "/architect-docs/".to_string(),
            translations: TranslationFilesConfig::default(),
            content: ContentConfig::default(),
            slug_map: vec![("casos-de-uso".to_string(), "use-cases".to_string())],
            versions: VERSIONS.entries().to_vec(),
        }
    }
}
