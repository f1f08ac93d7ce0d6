//! Loading and validating collection entries from the content directory.

use std::cmp::Ordering;
use std::path::{
    Path,
    PathBuf,
};

use super::frontmatter;
use super::schema::{
    ArchitectureEntry,
    ArchitectureFrontmatter,
    Collection,
    CollectionKind,
    Difficulty,
    DocEntry,
    EntryData,
    PageEntry,
};
use crate::config::FileMatcher;
use crate::version::get_version_from_slug;
use crate::workspace::find_files;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unterminated frontmatter in {path:?}: missing closing '---'")]
    UnterminatedFrontmatter { path: PathBuf },

    #[error("Invalid frontmatter in {path:?} ({collection}): {source}")]
    Schema {
        path: PathBuf,
        collection: Collection,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid difficulty '{value}' in {path:?} ({collection}): expected {}", Difficulty::expected(.collection.lang))]
    Difficulty { path: PathBuf, collection: Collection, value: String },
}

impl ContentError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::UnterminatedFrontmatter { path }
            | Self::Schema { path, .. }
            | Self::Difficulty { path, .. } => path,
        }
    }
}

/// A validated entry of a content collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntry {
    pub collection: Collection,
    /// Path relative to the collection directory, with `/` separators.
    pub id: String,
    /// `id` without its extension, e.g. `v0-16-1/intro`.
    pub slug: String,
    /// Version prefix of the slug, if any.
    pub version: Option<String>,
    pub data: EntryData,
    pub body: String,
}

impl ContentEntry {
    /// Parses and validates a Markdown document of `collection`.
    ///
    /// `path` is only used for error messages.
    ///
    /// # Errors
    /// Unterminated frontmatter, frontmatter not matching the collection schema,
    /// or a difficulty spelled for the other language.
    pub fn parse(
        collection: Collection,
        id: &str,
        path: &Path,
        text: &str,
    ) -> Result<Self, ContentError> {
        let (yaml, body) = frontmatter::split(text)
            .ok_or_else(|| ContentError::UnterminatedFrontmatter { path: path.to_path_buf() })?;
        let yaml = if yaml.trim().is_empty() { "{}" } else { yaml };

        let schema_error =
            |source: serde_yaml::Error| ContentError::Schema { path: path.to_path_buf(), collection, source };

        let data = match collection.kind {
            CollectionKind::Docs => {
                EntryData::Doc(serde_yaml::from_str::<DocEntry>(yaml).map_err(schema_error)?)
            }
            CollectionKind::Pages => {
                EntryData::Page(serde_yaml::from_str::<PageEntry>(yaml).map_err(schema_error)?)
            }
            CollectionKind::Architectures => {
                let raw: ArchitectureFrontmatter =
                    serde_yaml::from_str(yaml).map_err(schema_error)?;
                let Some(difficulty) = Difficulty::parse(&raw.difficulty, collection.lang) else {
                    return Err(ContentError::Difficulty {
                        path: path.to_path_buf(),
                        collection,
                        value: raw.difficulty,
                    });
                };
                EntryData::Architecture(ArchitectureEntry {
                    title: raw.title,
                    description: raw.description,
                    domain: raw.domain,
                    difficulty,
                    icon: raw.icon,
                    order: raw.order,
                    features: raw.features,
                })
            }
        };

        let slug = strip_extension(id).to_string();
        let version = get_version_from_slug(&slug).map(str::to_string);

        Ok(Self { collection, id: id.to_string(), slug, version, data, body: body.to_string() })
    }

    #[must_use]
    pub const fn order(&self) -> Option<f64> {
        self.data.order()
    }
}

/// `guides/hooks.mdx` -> `guides/hooks`. Dots in directory names are kept.
fn strip_extension(id: &str) -> &str {
    match (id.rfind('.'), id.rfind('/')) {
        (Some(dot), Some(slash)) if dot < slash => id,
        (Some(dot), _) if dot > 0 => id.get(..dot).unwrap_or(id),
        _ => id,
    }
}

/// Result of loading every collection: valid entries plus one error per invalid file.
#[derive(Debug, Default)]
pub struct ContentSet {
    pub entries: Vec<ContentEntry>,
    pub errors: Vec<ContentError>,
}

impl ContentSet {
    pub fn in_collection(&self, collection: Collection) -> impl Iterator<Item = &ContentEntry> {
        self.entries.iter().filter(move |e| e.collection == collection)
    }
}

/// Loads all six collections under the matcher's content directory.
///
/// Missing collection directories are skipped. Invalid files are reported in
/// [`ContentSet::errors`] and never abort the load.
#[must_use]
pub fn load_collections(matcher: &FileMatcher) -> ContentSet {
    let mut set = ContentSet::default();

    for collection in Collection::ALL {
        let dir = matcher.content_dir().join(collection.name());
        if !dir.is_dir() {
            tracing::debug!("Collection directory not found: {:?}", dir);
            continue;
        }

        for path in find_files(&dir, |relative| matcher.is_content_file_relative(relative)) {
            match load_entry(collection, &dir, &path) {
                Ok(entry) => set.entries.push(entry),
                Err(e) => {
                    tracing::warn!("{e}");
                    set.errors.push(e);
                }
            }
        }
        tracing::debug!(
            %collection,
            count = set.in_collection(collection).count(),
            "Loaded collection"
        );
    }

    set
}

fn load_entry(collection: Collection, dir: &Path, path: &Path) -> Result<ContentEntry, ContentError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| ContentError::Io { path: path.to_path_buf(), source })?;
    let id = path
        .strip_prefix(dir)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    ContentEntry::parse(collection, &id, path, &text)
}

/// Stable sort by `order`; entries without one go last.
pub fn sort_by_order(entries: &mut [ContentEntry]) {
    entries.sort_by(|a, b| match (a.order(), b.order()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::SiteSettings;
    use crate::lang::Lang;

    const ARCHITECTURE: &str = "---
title: Pipeline CI/CD
description: Revisión automática en cada PR
domain: CI/CD
difficulty: Intermedio
icon: git-branch
order: 1
features:
  - Guardrails
  - Reports
---
Contenido
";

    fn parse(collection: &str, id: &str, text: &str) -> Result<ContentEntry, ContentError> {
        let collection = Collection::from_name(collection).unwrap();
        ContentEntry::parse(collection, id, Path::new(id), text)
    }

    #[rstest]
    fn parses_architecture_entry() {
        let entry = parse("architectures", "ci-cd.md", ARCHITECTURE).unwrap();

        let EntryData::Architecture(arch) = &entry.data else {
            panic!("expected architecture, got {:?}", entry.data);
        };
        assert_that!(arch.difficulty, eq(Difficulty::Intermediate));
        assert_that!(arch.features, elements_are![eq("Guardrails"), eq("Reports")]);
        assert_that!(entry.slug, eq("ci-cd"));
        assert_that!(entry.body, eq("Contenido\n"));
        assert_that!(entry.order(), some(eq(1.0)));
    }

    #[rstest]
    fn english_collection_rejects_spanish_difficulty() {
        let result = parse("architectures-en", "ci-cd.md", ARCHITECTURE);

        let Err(ContentError::Difficulty { value, .. }) = &result else {
            panic!("expected difficulty error, got {result:?}");
        };
        assert_that!(value, eq("Intermedio"));
        assert_that!(
            result.unwrap_err().to_string(),
            contains_substring("\"Basic\" | \"Intermediate\" | \"Advanced\"")
        );
    }

    #[rstest]
    fn architecture_requires_all_fields() {
        let result = parse("architectures", "a.md", "---\ntitle: Solo título\n---\n");

        assert!(matches!(result, Err(ContentError::Schema { .. })));
    }

    #[rstest]
    #[case("docs", "---\ntitle: Intro\n---\nHola")]
    #[case("docs-en", "No frontmatter at all")]
    #[case("pages", "---\n---\n")]
    #[case("pages-en", "---\ntitle: Why\nlayout: custom\n---\n")]
    fn optional_schemas_accept_partial_frontmatter(#[case] collection: &str, #[case] text: &str) {
        assert_that!(parse(collection, "x.md", text), ok(anything()));
    }

    #[rstest]
    fn architecture_tolerates_extra_keys() {
        let text = ARCHITECTURE.replacen("---\n", "---\ndraft: true\n", 1);

        assert_that!(parse("architectures", "ci-cd.md", &text), ok(anything()));
    }

    #[rstest]
    #[case("docs", "---\ntitle: 2024\n---\n")]
    #[case("docs-en", "---\ndescription: true\n---\n")]
    #[case("pages", "---\ntitle: ~\n---\n")]
    #[case("architectures", &ARCHITECTURE.replace("domain: CI/CD", "domain: 3"))]
    #[case("architectures", &ARCHITECTURE.replace("  - Reports", "  - 2"))]
    fn non_string_values_are_schema_errors(#[case] collection: &str, #[case] text: &str) {
        let result = parse(collection, "x.md", text);

        assert!(matches!(result, Err(ContentError::Schema { .. })), "got {result:?}");
    }

    #[rstest]
    fn doc_order_must_be_a_number() {
        let result = parse("docs", "x.md", "---\norder: first\n---\n");

        assert!(matches!(result, Err(ContentError::Schema { .. })));
    }

    #[rstest]
    fn unterminated_frontmatter_is_reported() {
        let result = parse("docs", "x.md", "---\ntitle: x\n");

        assert!(matches!(result, Err(ContentError::UnterminatedFrontmatter { .. })));
    }

    #[rstest]
    #[case("v0-16-1/intro.md", "v0-16-1/intro", Some("v0-16-1"))]
    #[case("guides/hooks.mdx", "guides/hooks", None)]
    #[case("README", "README", None)]
    #[case("v0.16/intro", "v0.16/intro", None)]
    fn slug_and_version_from_id(
        #[case] id: &str,
        #[case] slug: &str,
        #[case] version: Option<&str>,
    ) {
        let entry = parse("docs", id, "").unwrap();

        assert_that!(entry.slug, eq(slug));
        assert_that!(entry.version.as_deref(), eq(version));
    }

    #[rstest]
    fn sort_by_order_puts_missing_last() {
        let mut entries: Vec<ContentEntry> = [("c.md", None), ("b.md", Some(2)), ("a.md", Some(1))]
            .into_iter()
            .map(|(id, order)| {
                let text = order.map_or_else(String::new, |o| format!("---\norder: {o}\n---\n"));
                parse("docs", id, &text).unwrap()
            })
            .collect();

        sort_by_order(&mut entries);

        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_that!(ids, elements_are![eq(&"a.md"), eq(&"b.md"), eq(&"c.md")]);
    }

    #[rstest]
    fn load_collections_reports_errors_without_aborting() {
        let temp_dir = TempDir::new().unwrap();
        let content = temp_dir.path().join("src/content");
        fs::create_dir_all(content.join("docs/v0-16-1")).unwrap();
        fs::create_dir_all(content.join("architectures-en")).unwrap();
        fs::write(content.join("docs/v0-16-1/intro.md"), "---\ntitle: Intro\norder: 1\n---\n").unwrap();
        fs::write(content.join("docs/diagram.svg"), "<svg/>").unwrap();
        fs::write(content.join("architectures-en/ci.md"), ARCHITECTURE).unwrap();

        let matcher = FileMatcher::new(temp_dir.path().to_path_buf(), &SiteSettings::default()).unwrap();
        let set = load_collections(&matcher);

        assert_that!(set.entries.len(), eq(1));
        let docs: Vec<_> = set.in_collection(Collection::new(CollectionKind::Docs, Lang::Es)).collect();
        assert_that!(docs.len(), eq(1));
        assert_that!(docs.first().map(|e| e.id.as_str()), some(eq("v0-16-1/intro.md")));
        assert_that!(docs.first().and_then(|e| e.version.as_deref()), some(eq("v0-16-1")));

        assert_that!(set.errors.len(), eq(1));
        assert!(set.errors.first().unwrap().path().ends_with("architectures-en/ci.md"));
    }

    #[rstest]
    fn load_collections_without_content_dir() {
        let temp_dir = TempDir::new().unwrap();
        let matcher = FileMatcher::new(temp_dir.path().to_path_buf(), &SiteSettings::default()).unwrap();

        let set = load_collections(&matcher);

        assert_that!(set.entries, is_empty());
        assert_that!(set.errors, is_empty());
    }
}
