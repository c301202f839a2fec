//! Document catalog for docsite.
//!
//! Walks a docs directory and collects the documents the static-site renderer
//! will know about, keyed by document id. The resulting [`DocumentSet`]
//! implements [`DocumentIndex`] so sidebar and navbar references in a
//! [`docsite_config::SiteConfig`] can be checked before a build.
//!
//! # Document ids
//!
//! - `overview.md` -> `overview`
//! - `api/core.mdx` -> `api/core`
//! - `api/core.md` with front matter `id: core-abstractions` -> `api/core-abstractions`
//!
//! Hidden entries and entries starting with `_` are ignored.

mod front_matter;
mod scanner;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use docsite_config::DocumentIndex;

use front_matter::{extract_h1, parse_front_matter, split_front_matter};
use scanner::{Scanner, file_path_to_id, with_custom_id};

/// Error scanning a docs directory.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Docs directory does not exist.
    #[error("Docs directory not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error scanning {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A discovered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Document id referenced from sidebars and routes.
    pub id: String,
    /// Source file path.
    pub path: PathBuf,
    /// Title from front matter, else the first H1.
    pub title: Option<String>,
}

/// Documents found in a docs directory, ordered by id.
#[derive(Debug, Default)]
pub struct DocumentSet {
    documents: BTreeMap<String, Document>,
}

impl DocumentSet {
    /// Look up a document by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterate documents in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    /// Add a document. The first document registered under an id wins.
    ///
    /// Returns `false` if the id was already taken.
    pub fn insert(&mut self, document: Document) -> bool {
        if let Some(existing) = self.documents.get(&document.id) {
            tracing::warn!(
                id = %document.id,
                kept = %existing.path.display(),
                ignored = %document.path.display(),
                "Duplicate document id"
            );
            return false;
        }
        self.documents.insert(document.id.clone(), document);
        true
    }
}

impl DocumentIndex for DocumentSet {
    fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }
}

impl FromIterator<Document> for DocumentSet {
    fn from_iter<T: IntoIterator<Item = Document>>(iter: T) -> Self {
        let mut set = Self::default();
        for document in iter {
            set.insert(document);
        }
        set
    }
}

/// Scan `docs_dir` and build the document catalog.
///
/// Files that cannot be read are logged and still registered under their
/// path-derived id.
///
/// # Errors
///
/// Returns `ScanError::NotFound` if the directory does not exist, or
/// `ScanError::Io` if it cannot be listed.
pub fn scan_documents(docs_dir: &Path) -> Result<DocumentSet, ScanError> {
    if !docs_dir.is_dir() {
        return Err(ScanError::NotFound(docs_dir.to_path_buf()));
    }

    let refs = Scanner::new(docs_dir.to_path_buf())
        .scan()
        .map_err(|source| ScanError::Io {
            path: docs_dir.to_path_buf(),
            source,
        })?;

    let documents: DocumentSet = refs
        .into_iter()
        .map(|doc_ref| build_document(&doc_ref.rel_path, doc_ref.path))
        .collect();

    tracing::debug!(
        dir = %docs_dir.display(),
        count = documents.len(),
        "Scanned documents"
    );

    Ok(documents)
}

/// Read a document file and resolve its id and title.
fn build_document(rel_path: &Path, path: PathBuf) -> Document {
    let default_id = file_path_to_id(rel_path);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read document");
            return Document {
                id: default_id,
                path,
                title: None,
            };
        }
    };

    let (yaml, body) = split_front_matter(&content);
    let front_matter = yaml.and_then(parse_front_matter).unwrap_or_default();

    let id = match front_matter.id.as_deref().map(str::trim) {
        Some(custom) if !custom.is_empty() => with_custom_id(&default_id, custom),
        _ => default_id,
    };
    let title = front_matter.title.or_else(|| extract_h1(body));

    Document { id, path, title }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_documents_ids_and_titles() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "overview.md", "---\ntitle: NBomber Overview\n---\n# Ignored\n");
        write(root, "docker-setup.md", "# Docker setup\n\nRun it.");
        write(root, "api/core.md", "---\nid: core-abstractions\n---\n# Core abstractions\n");
        write(root, "plugins/http.mdx", "no heading");

        let docs = scan_documents(root).unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();

        assert_eq!(
            ids,
            vec!["api/core-abstractions", "docker-setup", "overview", "plugins/http"]
        );
        assert_eq!(
            docs.get("overview").unwrap().title.as_deref(),
            Some("NBomber Overview")
        );
        assert_eq!(
            docs.get("docker-setup").unwrap().title.as_deref(),
            Some("Docker setup")
        );
        assert!(docs.get("plugins/http").unwrap().title.is_none());
        assert!(docs.contains("api/core-abstractions"));
        assert!(!docs.contains("api/core"));
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "a.md", "---\nid: logging\n---\n");
        write(root, "logging.md", "# Logging\n");

        let docs = scan_documents(root).unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs.get("logging").unwrap().path, root.join("a.md"));
    }

    #[test]
    fn test_blank_front_matter_id_uses_path() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "guides/setup.md", "---\nid: \"  \"\n---\n");

        let docs = scan_documents(dir.path()).unwrap();
        assert!(docs.contains("guides/setup"));
    }

    #[test]
    fn test_missing_dir() {
        let err = scan_documents(Path::new("/nonexistent/docs")).unwrap_err();
        assert!(matches!(err, ScanError::NotFound(_)));
    }

    #[test]
    fn test_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let docs = scan_documents(dir.path()).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_checks_site_config_references() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "overview.md", "# Overview");
        write(dir.path(), "core.md", "# Core");

        let config = docsite_config::load_config(
            r#"
title = "NBomber"
base_url = "/"

[sidebar]
"Getting Started" = ["overview"]
"API" = ["core", "missing"]
"#,
            docsite_config::Format::Toml,
        )
        .unwrap();
        let docs = scan_documents(dir.path()).unwrap();

        let err = config.check_documents(&docs).unwrap_err();
        let violations = err.violations().unwrap();
        assert_eq!(violations.len(), 1);
        assert!(violations.at("sidebar[1].items[1]").is_some());
    }
}
