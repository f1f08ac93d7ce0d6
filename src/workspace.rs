//! Directory traversal shared by the translation and content loaders.
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

/// Collects files under `root` whose path relative to `root` satisfies `accept`.
///
/// Honors `.gitignore`; hidden files are included. Results are sorted so that
/// loading order does not depend on the file system.
pub fn find_files<F>(root: &Path, accept: F) -> Vec<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .require_git(false)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(root) else {
            continue;
        };
        if accept(relative_path) {
            found_files.push(path.to_path_buf());
        }
    }

    found_files.sort();
    found_files
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn finds_matching_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("b/two.md"), "").unwrap();
        fs::write(root.join("one.md"), "").unwrap();
        fs::write(root.join("skip.txt"), "").unwrap();

        let files = find_files(root, |p| p.extension().is_some_and(|e| e == "md"));

        assert_that!(files, elements_are![eq(&root.join("b/two.md")), eq(&root.join("one.md"))]);
    }

    #[rstest]
    fn honors_gitignore() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "drafts/\n").unwrap();
        fs::create_dir_all(root.join("drafts")).unwrap();
        fs::write(root.join("drafts/wip.md"), "").unwrap();
        fs::write(root.join("done.md"), "").unwrap();

        let files = find_files(root, |p| p.extension().is_some_and(|e| e == "md"));

        assert_that!(files, elements_are![eq(&root.join("done.md"))]);
    }

    #[rstest]
    fn missing_root_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();

        let files = find_files(&temp_dir.path().join("absent"), |_| true);

        assert_that!(files, is_empty());
    }
}
