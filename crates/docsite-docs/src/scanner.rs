//! Document discovery by filesystem walking.
//!
//! The scanner only finds candidate files. Reading front matter and
//! resolving ids happens afterwards in [`crate::scan_documents`].

use std::fs;
use std::path::{Path, PathBuf};

/// Markdown file extensions treated as documents.
const DOC_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Reference to a document source file. No content is read at this stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocumentRef {
    /// Path relative to the docs directory (e.g., "api/core.md").
    pub rel_path: PathBuf,
    /// Absolute (or caller-relative) path to the file.
    pub path: PathBuf,
}

/// Discovers document files below a docs directory.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Walk the docs directory and return document references.
    ///
    /// Entries are visited in name order so results are deterministic.
    /// Hidden entries and entries starting with `_` are skipped.
    pub fn scan(&self) -> std::io::Result<Vec<DocumentRef>> {
        let mut refs = Vec::new();
        self.scan_directory(&self.source_dir, Path::new(""), &mut refs)?;
        Ok(refs)
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        rel_prefix: &Path,
        refs: &mut Vec<DocumentRef>,
    ) -> std::io::Result<()> {
        let mut entries: Vec<_> = fs::read_dir(dir_path)?
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                (e, is_dir)
            })
            .collect();
        entries.sort_by_key(|(e, _)| e.file_name());

        for (entry, is_dir) in entries {
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if name_str.starts_with('.') || name_str.starts_with('_') {
                continue;
            }

            let path = entry.path();
            let rel_path = rel_prefix.join(&name);

            if is_dir {
                if let Err(e) = self.scan_directory(&path, &rel_path, refs) {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable directory");
                }
            } else if is_document(&path) {
                refs.push(DocumentRef { rel_path, path });
            }
        }

        Ok(())
    }
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DOC_EXTENSIONS.contains(&e))
}

/// Convert a relative document path to its default id.
///
/// - `overview.md` -> `overview`
/// - `api/core.mdx` -> `api/core`
/// - `guides/index.md` -> `guides/index`
pub(crate) fn file_path_to_id(rel_path: &Path) -> String {
    let without_ext = rel_path.with_extension("");
    without_ext
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Replace the last segment of `default_id` with a front-matter id.
///
/// - (`overview`, `intro`) -> `intro`
/// - (`api/core`, `core-abstractions`) -> `api/core-abstractions`
pub(crate) fn with_custom_id(default_id: &str, custom: &str) -> String {
    match default_id.rsplit_once('/') {
        Some((dir, _)) => format!("{dir}/{custom}"),
        None => custom.to_owned(),
    }
}
