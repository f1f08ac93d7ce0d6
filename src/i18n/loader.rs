//! Loading translation tables from `locales/*.json(c)` files in a workspace.

use std::path::{
    Path,
    PathBuf,
};

use jsonc_parser::ParseOptions;

use super::tree::{
    TranslationTree,
    TreeError,
};
use crate::config::{
    FileMatcher,
    MatcherError,
};
use crate::lang::Lang;
use crate::workspace::find_files;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read translation file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse translation file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid translation file {path:?}: {source}")]
    Tree {
        path: PathBuf,
        #[source]
        source: TreeError,
    },

    #[error(transparent)]
    Pattern(#[from] MatcherError),

    #[error("No translation file found for the fallback language '{}'", Lang::FALLBACK)]
    MissingFallback,
}

/// Detects the language of a translation file from its stem (`es.json`, `en-US.jsonc`).
fn detect_language_from_path(file_path: &Path) -> Option<Lang> {
    file_path.file_stem()?.to_str()?.parse().ok()
}

/// Parses a single JSON or JSONC file into `tree` under `lang`.
fn load_file(tree: TranslationTree, file_path: &Path, lang: Lang) -> Result<TranslationTree, LoadError> {
    let content = std::fs::read_to_string(file_path)
        .map_err(|source| LoadError::Io { path: file_path.to_path_buf(), source })?;

    let value = jsonc_parser::parse_to_serde_value(&content, &ParseOptions::default())
        .map_err(|e| LoadError::Parse { path: file_path.to_path_buf(), message: e.to_string() })?
        .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

    tree.with_value(lang, value)
        .map_err(|source| LoadError::Tree { path: file_path.to_path_buf(), source })
}

/// Loads every translation file the matcher accepts.
///
/// Files whose name is not a supported language are skipped. Files for the
/// same language are merged in path order.
///
/// # Errors
/// - Invalid patterns
/// - Unreadable or malformed translation file
/// - No file for the fallback language
pub fn load_translations(matcher: &FileMatcher) -> Result<TranslationTree, LoadError> {
    let workspace_root = matcher.workspace_root();
    let files = find_files(workspace_root, |relative| matcher.is_translation_file_relative(relative));
    tracing::debug!(count = files.len(), "Found translation files");

    let mut tree = TranslationTree::default();
    for file_path in files {
        let Some(lang) = detect_language_from_path(&file_path) else {
            tracing::warn!("Skipping translation file with unsupported language: {:?}", file_path);
            continue;
        };
        tracing::debug!(%lang, "Loading translation file {:?}", file_path);
        tree = load_file(tree, &file_path, lang)?;
    }

    if !tree.has_lang(Lang::FALLBACK) {
        return Err(LoadError::MissingFallback);
    }
    Ok(tree)
}
