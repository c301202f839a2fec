//! `docsite check` command implementation.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Args;
use docsite_config::{CliSettings, ConfigError, SiteConfig};
use docsite_docs::{Document, DocumentSet, scan_documents};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover docsite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Docs directory to resolve document ids against (default: from the docs preset).
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,

    /// Site URL (overrides config).
    #[arg(long, env = "DOCSITE_URL")]
    url: Option<String>,

    /// Base URL (overrides config).
    #[arg(long, env = "DOCSITE_BASE_URL")]
    base_url: Option<String>,

    /// Only validate the configuration, do not look for documents.
    #[arg(long, conflicts_with = "docs_dir")]
    skip_documents: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded, is invalid,
    /// or references documents that do not exist.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            url: self.url,
            base_url: self.base_url,
        };
        let config = match SiteConfig::load(self.config.as_deref(), Some(&cli_settings)) {
            Err(ConfigError::Invalid(violations)) => {
                output.violations("Invalid configuration", &violations);
                return Err(CliError::Validation(violations.len()));
            }
            result => result?,
        };

        if let Some(path) = config.config_path() {
            output.highlight(&format!("Checked {}", path.display()));
        }
        output.info(&summary(&config));

        if self.skip_documents {
            output.success("Configuration is valid");
            return Ok(());
        }

        let Some(docs_dir) = self.docs_dir.or_else(|| config.docs_dir()) else {
            output.success("Configuration is valid");
            return Ok(());
        };

        tracing::info!(dir = %docs_dir.display(), "Scanning documents");
        let documents = scan_documents(&docs_dir)?;
        output.info(&format!(
            "Found {} documents in {}",
            documents.len(),
            docs_dir.display()
        ));

        match config.check_documents(&documents) {
            Ok(()) => {}
            Err(ConfigError::Invalid(violations)) => {
                output.violations("Unresolved documents", &violations);
                return Err(CliError::Validation(violations.len()));
            }
            Err(e) => return Err(e.into()),
        }

        for document in orphan_documents(&config, &documents) {
            output.warning(&format!(
                "Document `{}` ({}) is not in the sidebar",
                document.id,
                document.path.display()
            ));
        }

        output.success("Configuration is valid and all documents resolve");
        Ok(())
    }
}

/// One-line overview of a loaded configuration.
fn summary(config: &SiteConfig) -> String {
    let sidebar = config.sidebar();
    format!(
        "{}: {} navbar entries, {} sidebar categories, {} sidebar documents",
        config.title(),
        config.navbar().items.len(),
        sidebar.len(),
        sidebar.document_ids().count()
    )
}

/// Documents referenced neither by the sidebar nor as the docs home page.
fn orphan_documents<'a>(config: &SiteConfig, documents: &'a DocumentSet) -> Vec<&'a Document> {
    let mut referenced: HashSet<&str> = config.sidebar().document_ids().collect();
    if let Some(home) = config
        .docs_options()
        .and_then(|docs| docs.home_page_id.as_deref())
    {
        referenced.insert(home);
    }

    documents
        .iter()
        .filter(|doc| !referenced.contains(doc.id.as_str()))
        .collect()
}
