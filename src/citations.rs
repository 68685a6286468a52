//! Citation updater: fetch each publication's citation page, extract the
//! count, and patch changed counts into the data file.
//!
//! The data file doubles as hand-edited source, so it is never re-serialized.
//! Each publication record is located with the data module scanner and only
//! the digits of its `citations` value are replaced. The file is written at
//! most once, after every publication has been processed.

use crate::config::Config;
use crate::datafile::{array_objects, decode_js_string, field, find_export, object_fields};
use crate::extract::extract_citation_count;
use crate::fetch::{fetch_with_retry, FetchError, Fetcher, HttpFetcher, RetryPolicy};
use crate::models::PUBLICATIONS_EXPORT;
use crate::sources::SourceMap;

use chrono::{DateTime, Utc};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info, warn};

#[cfg(test)]
#[path = "citations_test.rs"]
mod citations_test;

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("could not find publicationsData in data file")]
    BlockNotFound,
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

// ============================================================================
// Publication Records
// ============================================================================

/// One publication as found in the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationRecord {
    pub title: String,
    pub citations: u32,
    /// Byte range of the citation digits in the data file text.
    pub digits: Range<usize>,
}

/// Scan the `publicationsData` block for titles and citation counts, in file
/// order. Records without a string title or an integer count are skipped.
pub fn parse_publications(text: &str) -> Result<Vec<PublicationRecord>, UpdateError> {
    let span = find_export(text, PUBLICATIONS_EXPORT).ok_or(UpdateError::BlockNotFound)?;
    let mut records = Vec::new();

    for object in array_objects(text, &span.literal) {
        let fields = object_fields(text, &object);

        let title = field(&fields, "title").and_then(|f| decode_js_string(&text[f.value.clone()]));
        let count = field(&fields, "citations").and_then(|f| {
            let raw = &text[f.value.clone()];
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            raw.parse::<u32>().ok().map(|n| (n, f.value.clone()))
        });

        match (title, count) {
            (Some(title), Some((citations, digits))) => records.push(PublicationRecord {
                title,
                citations,
                digits,
            }),
            (title, _) => warn!(
                "Skipping publication record at byte {} without title or citation count: {}",
                object.start,
                title.as_deref().unwrap_or("<untitled>")
            ),
        }
    }

    Ok(records)
}

/// A pending replacement of one record's citation digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationPatch {
    pub digits: Range<usize>,
    pub value: u32,
}

/// Apply patches to `text`; everything outside the patched ranges is kept
/// byte for byte.
pub fn apply_patches(text: &str, patches: &[CitationPatch]) -> String {
    let mut ordered: Vec<&CitationPatch> = patches.iter().collect();
    ordered.sort_by_key(|p| std::cmp::Reverse(p.digits.start));

    let mut out = text.to_string();
    for patch in ordered {
        out.replace_range(patch.digits.clone(), &patch.value.to_string());
    }
    out
}

// ============================================================================
// Outcomes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated { from: u32, to: u32 },
    Unchanged(u32),
    /// No source URL registered for the title.
    Skipped,
    /// Fetch or extraction failed; the stored value is kept.
    Unknown { kept: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationOutcome {
    pub title: String,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub outcomes: Vec<PublicationOutcome>,
    /// Data file text with all changes applied.
    pub text: String,
    /// Whether the data file was rewritten.
    pub written: bool,
    pub finished_at: DateTime<Utc>,
}

impl UpdateReport {
    pub fn updated_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Updated { .. }))
            .count()
    }

    pub fn has_changes(&self) -> bool {
        self.updated_count() > 0
    }

    pub fn outcome_for(&self, title: &str) -> Option<Outcome> {
        self.outcomes
            .iter()
            .find(|o| o.title == title)
            .map(|o| o.outcome)
    }
}

// ============================================================================
// Updater
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct UpdaterSettings {
    /// Wait between consecutive requests to the citation source.
    pub rate_limit_delay: Duration,
    pub retry: RetryPolicy,
    pub max_plausible_citations: u32,
}

impl Default for UpdaterSettings {
    fn default() -> Self {
        Self {
            rate_limit_delay: Duration::from_secs(5),
            retry: RetryPolicy::default(),
            max_plausible_citations: 10_000,
        }
    }
}

pub struct CitationUpdater<F> {
    fetcher: F,
    sources: SourceMap,
    settings: UpdaterSettings,
}

impl CitationUpdater<HttpFetcher> {
    pub fn from_config(config: &Config) -> Result<Self, UpdateError> {
        let updater = &config.updater;
        let fetcher = HttpFetcher::new(updater.request_timeout(), &updater.user_agent)?;
        let sources = SourceMap::with_defaults(&config.publication_urls, &updater.allowed_hosts);
        let settings = UpdaterSettings {
            rate_limit_delay: updater.rate_limit_delay(),
            retry: updater.retry_policy(),
            max_plausible_citations: updater.max_plausible_citations,
        };
        Ok(Self::new(fetcher, sources, settings))
    }
}

impl<F: Fetcher> CitationUpdater<F> {
    pub fn new(fetcher: F, sources: SourceMap, settings: UpdaterSettings) -> Self {
        Self {
            fetcher,
            sources,
            settings,
        }
    }

    pub fn settings(&self) -> &UpdaterSettings {
        &self.settings
    }

    /// Process every publication in `text` and return the patched text.
    /// Requests are strictly sequential with the rate limit delay between
    /// each pair of fetches.
    pub async fn run(&self, text: &str) -> Result<UpdateReport, UpdateError> {
        let records = parse_publications(text)?;
        let total = records.len();
        info!("Found {} publications", total);
        info!(
            "Rate limiting: {}ms delay between requests",
            self.settings.rate_limit_delay.as_millis()
        );

        let mut patches = Vec::new();
        let mut outcomes = Vec::with_capacity(total);
        let mut fetched_any = false;

        for (i, record) in records.iter().enumerate() {
            let position = format!("[{}/{}]", i + 1, total);

            let Some(url) = self.sources.get(&record.title) else {
                info!("{} No URL found for: {}", position, short_title(&record.title, 60));
                outcomes.push(PublicationOutcome {
                    title: record.title.clone(),
                    outcome: Outcome::Skipped,
                });
                continue;
            };

            if fetched_any {
                debug!(
                    "Waiting {}ms before next request",
                    self.settings.rate_limit_delay.as_millis()
                );
                sleep(self.settings.rate_limit_delay).await;
            }
            fetched_any = true;

            info!("{} Fetching citations for: {}", position, short_title(&record.title, 60));
            let count = match fetch_with_retry(&self.fetcher, url.as_str(), &self.settings.retry).await {
                Some(html) => {
                    let count = extract_citation_count(&html, self.settings.max_plausible_citations);
                    if count.is_none() {
                        warn!("Could not extract citation count from HTML");
                    }
                    count
                }
                None => {
                    warn!("Could not fetch HTML for {}", short_title(&record.title, 40));
                    None
                }
            };

            let outcome = match count {
                Some(new) if new != record.citations => {
                    info!("  Updating: {} -> {}", record.citations, new);
                    patches.push(CitationPatch {
                        digits: record.digits.clone(),
                        value: new,
                    });
                    Outcome::Updated {
                        from: record.citations,
                        to: new,
                    }
                }
                Some(same) => {
                    info!("  No change: {}", same);
                    Outcome::Unchanged(same)
                }
                None => {
                    info!(
                        "  Could not fetch citations (keeping existing: {})",
                        record.citations
                    );
                    Outcome::Unknown {
                        kept: record.citations,
                    }
                }
            };
            outcomes.push(PublicationOutcome {
                title: record.title.clone(),
                outcome,
            });
        }

        Ok(UpdateReport {
            outcomes,
            text: apply_patches(text, &patches),
            written: false,
            finished_at: Utc::now(),
        })
    }

    /// Run against the data file at `path` and rewrite it once if anything
    /// changed. With `dry_run` the file is never touched.
    pub async fn update_file(&self, path: &Path, dry_run: bool) -> Result<UpdateReport, UpdateError> {
        let text = std::fs::read_to_string(path).map_err(|source| UpdateError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut report = self.run(&text).await?;

        if report.has_changes() && !dry_run {
            write_atomically(path, &report.text)?;
            report.written = true;
            info!("Successfully updated {} citation(s)!", report.updated_count());
        } else if report.has_changes() {
            info!(
                "Dry run: {} citation(s) would change, data file left untouched",
                report.updated_count()
            );
        } else {
            info!("No citation updates needed. All citations are up to date.");
        }

        Ok(report)
    }
}

/// Write through a sibling temp file and rename, so a failed write never
/// leaves a truncated data file.
fn write_atomically(path: &Path, contents: &str) -> Result<(), UpdateError> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let to_err = |source| UpdateError::Write {
        path: path.to_path_buf(),
        source,
    };
    std::fs::write(&tmp, contents).map_err(to_err)?;
    std::fs::rename(&tmp, path).map_err(to_err)
}

/// First `max` characters of a title, with an ellipsis when cut.
pub fn short_title(title: &str, max: usize) -> String {
    match title.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &title[..idx]),
        None => title.to_string(),
    }
}
