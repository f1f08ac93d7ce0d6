//! File pattern matcher for translation and content files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    GlobBuilder,
    GlobSet,
    GlobSetBuilder,
};

use super::SiteSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid translation file pattern '{pattern}': {source}")]
    InvalidTranslationPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid content pattern '{pattern}': {source}")]
    InvalidContentPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches workspace files against configured glob patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    workspace_root: PathBuf,
    content_dir: PathBuf,
    translation_set: GlobSet,
    translation_exclude_set: GlobSet,
    content_set: GlobSet,
}

impl FileMatcher {
    /// Creates a new matcher from settings.
    pub fn new(workspace_root: PathBuf, settings: &SiteSettings) -> Result<Self, MatcherError> {
        let translation_set =
            Self::build_glob_set(&settings.translations.include_patterns, |pattern, source| {
                MatcherError::InvalidTranslationPattern { pattern, source }
            })?;

        let translation_exclude_set =
            Self::build_glob_set(&settings.translations.exclude_patterns, |pattern, source| {
                MatcherError::InvalidExcludePattern { pattern, source }
            })?;

        let content_set =
            Self::build_glob_set(&settings.content.include_patterns, |pattern, source| {
                MatcherError::InvalidContentPattern { pattern, source }
            })?;

        Ok(Self {
            content_dir: workspace_root.join(&settings.content.dir),
            workspace_root,
            translation_set,
            translation_exclude_set,
            content_set,
        })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            // Literal separators keep `locales/*.json` from matching nested directories.
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Absolute directory holding the content collections.
    #[must_use]
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Returns true if the path matches `translations.includePatterns`
    /// but not `translations.excludePatterns`.
    ///
    /// The path must be absolute and under the workspace root.
    #[must_use]
    pub fn is_translation_file(&self, absolute_path: &Path) -> bool {
        let Ok(relative_path) = absolute_path.strip_prefix(&self.workspace_root) else {
            return false;
        };

        self.is_translation_file_relative(relative_path)
    }

    /// The path must be relative to the workspace root.
    #[must_use]
    pub fn is_translation_file_relative(&self, relative_path: &Path) -> bool {
        self.translation_set.is_match(relative_path)
            && !self.translation_exclude_set.is_match(relative_path)
    }

    /// Returns true if the path matches `content.includePatterns`.
    ///
    /// The path must be relative to its collection directory.
    #[must_use]
    pub fn is_content_file_relative(&self, relative_path: &Path) -> bool {
        self.content_set.is_match(relative_path)
    }
}
