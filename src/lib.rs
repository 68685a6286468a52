//! Portfolio library - data loading, page rendering, and citation updates.
//!
//! This module provides public access to all the application's modules
//! for the two binaries and for tests.

use std::path::PathBuf;

pub mod citations;
pub mod config;
pub mod datafile;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod sources;
pub mod templates;
pub mod url_validator;

use config::Config;
use datafile::{read_data_file, DataError};
use models::Portfolio;
use templates::PageOptions;

// ============================================================================
// Application State
// ============================================================================

/// Shared by all request handlers. The data file is re-read per request so
/// updater runs show up without a restart.
#[derive(Debug, Clone)]
pub struct AppState {
    pub data_file: PathBuf,
    pub shell_path: Option<PathBuf>,
    pub page: PageOptions,
}

impl AppState {
    pub fn new(data_file: PathBuf) -> Self {
        Self {
            data_file,
            shell_path: None,
            page: PageOptions::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            data_file: config.data_file.clone(),
            shell_path: config.server.shell.clone(),
            page: PageOptions {
                title: config.server.title.clone(),
                inline_style: config.server.inline_style,
                ..Default::default()
            },
        }
    }

    pub fn load_portfolio(&self) -> Result<Portfolio, DataError> {
        let text = read_data_file(&self.data_file)?;
        Portfolio::from_data_module(&text)
    }

    /// Custom shell contents, or `None` for the built-in shell.
    pub fn load_shell(&self) -> std::io::Result<Option<String>> {
        self.shell_path
            .as_ref()
            .map(std::fs::read_to_string)
            .transpose()
    }
}

// Re-export commonly used types
pub use citations::{
    apply_patches, parse_publications, CitationPatch, CitationUpdater, Outcome,
    PublicationOutcome, PublicationRecord, UpdateError, UpdateReport, UpdaterSettings,
};

pub use extract::extract_citation_count;

pub use fetch::{fetch_with_retry, BackoffKind, FetchError, FetchResponse, Fetcher, HttpFetcher, RetryPolicy};

pub use models::{
    BlogEntry, CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry,
    PublicationEntry, SkillCatalog, SkillCategory, SkillGroup,
};

pub use sources::SourceMap;

pub use templates::{html_escape, render_page};

pub use url_validator::{validate_source_url, UrlValidationError};
