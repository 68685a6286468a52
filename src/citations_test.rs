//! Tests for the citation updater.
//!
//! Most tests drive the updater with a scripted source under tokio's paused
//! clock, so backoff and rate limit waits complete instantly while their
//! durations stay observable. One test goes through `HttpFetcher` against a
//! local mock server.

use super::*;
use crate::fetch::{FetchError, FetchResponse};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::time::Instant;

// ============================================================================
// Helpers
// ============================================================================

#[derive(Clone)]
enum Reply {
    Page(String),
    Status(u16),
    Fail,
}

struct Call {
    url: String,
    start: Instant,
    end: Instant,
}

/// Citation source keyed by URL. The last queued reply for a URL repeats.
struct MockSource {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<Call>>,
    in_flight: AtomicUsize,
    latency: Duration,
}

impl MockSource {
    fn new() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            latency: Duration::ZERO,
        }
    }

    fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn reply(self, url: &str, replies: Vec<Reply>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), replies.into());
        self
    }

    fn next_reply(&self, url: &str) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or(Reply::Fail),
            None => Reply::Status(404),
        }
    }

    fn calls_to(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.url == url).count()
    }

    fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Fetcher for MockSource {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let overlapping = self.in_flight.fetch_add(1, Ordering::SeqCst);
        assert_eq!(overlapping, 0, "two fetches overlapped");
        let start = Instant::now();

        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        let reply = self.next_reply(url);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(Call {
            url: url.to_string(),
            start,
            end: Instant::now(),
        });

        match reply {
            Reply::Page(body) => Ok(FetchResponse { status: 200, body }),
            Reply::Status(status) => Ok(FetchResponse {
                status,
                body: String::new(),
            }),
            Reply::Fail => Err(FetchError::Other("connection reset".into())),
        }
    }
}

fn cited_by(n: u32) -> Reply {
    Reply::Page(format!(
        "<html><body><div id=\"gsc_oci_table\"><a href=\"#\">Cited by {}</a></div></body></html>",
        n
    ))
}

fn structural(n: u32) -> Reply {
    Reply::Page(format!(
        "<html><body><table><tr><td class=\"gsc_rsb_std\">{}</td></tr></table></body></html>",
        n
    ))
}

fn url_for(key: &str) -> String {
    format!("https://scholar.google.com/citations?citation_for_view={}", key)
}

fn sources(entries: &[(&str, &str)]) -> SourceMap {
    SourceMap::build(
        entries
            .iter()
            .map(|(title, key)| (title.to_string(), url_for(key))),
        &["scholar.google.com"],
    )
}

fn updater(source: MockSource, map: SourceMap) -> CitationUpdater<MockSource> {
    CitationUpdater::new(source, map, UpdaterSettings::default())
}

fn load_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Cannot load fixture {}: {}", path.display(), e))
}

const TWO_PUBLICATIONS: &str = r#"// Portfolio data
export const projectsData = [
  { id: 1, title: "Paper A", citations: 999 }
];

export const publicationsData = [
  {
    title: "Paper A",
    authors: "M Ravichandran, KEK Vimal",
    venue: "Operations Management Research 15 (1), 440-460",
    year: "2022",
    url: "https://link.springer.com/article/10.1007/a",
    citations: 10
  },
  {
    title: "Paper A: Extended",
    authors: "M Ravichandran",
    venue: "Procedia CIRP 98, 476-481",
    year: "2021",
    url: "https://link.springer.com/article/10.1007/b",
    citations: 10
  }
];
"#;

fn record_text<'a>(text: &'a str, title: &str) -> &'a str {
    let records = parse_publications(text).unwrap();
    let span = find_export(text, PUBLICATIONS_EXPORT).unwrap();
    let objects = array_objects(text, &span.literal);
    let idx = records.iter().position(|r| r.title == title).unwrap();
    &text[objects[idx].clone()]
}

// ============================================================================
// Parsing and Patching
// ============================================================================

#[test]
fn test_parse_fixture_publications() {
    let text = load_fixture("data.js");
    let records = parse_publications(&text).unwrap();
    let counts: Vec<u32> = records.iter().map(|r| r.citations).collect();
    assert_eq!(counts, vec![38, 16, 14, 13, 8, 3]);
    assert_eq!(
        records[5].title,
        "A QFD Approach for Selection of Design for Logistics Strategies"
    );
    for record in &records {
        assert_eq!(&text[record.digits.clone()], record.citations.to_string());
    }
}

#[test]
fn test_fixture_titles_are_registered() {
    let text = load_fixture("data.js");
    let map = SourceMap::with_defaults(&Default::default(), &["scholar.google.com"]);
    for record in parse_publications(&text).unwrap() {
        assert!(map.get(&record.title).is_some(), "unregistered: {}", record.title);
    }
}

#[test]
fn test_missing_block_is_fatal() {
    let result = parse_publications("export const projectsData = [];\n");
    assert!(matches!(result, Err(UpdateError::BlockNotFound)));
}

#[test]
fn test_record_without_count_is_skipped() {
    let text = r#"export const publicationsData = [
  { title: "No count", citations: "many" },
  { title: "Counted", citations: 4 }
];"#;
    let records = parse_publications(text).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Counted");
}

#[test]
fn test_count_followed_by_comment() {
    let text = r#"export const publicationsData = [
  {
    title: "Commented",
    citations: 10 // from scholar
  },
  {
    title: "Block", citations: 5 /* checked */
  }
];"#;
    let records = parse_publications(text).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].citations, 10);
    assert_eq!(&text[records[0].digits.clone()], "10");
    assert_eq!(records[1].citations, 5);

    let patched = apply_patches(
        text,
        &[CitationPatch {
            digits: records[0].digits.clone(),
            value: 12,
        }],
    );
    assert!(patched.contains("citations: 12 // from scholar"));
}

#[test]
fn test_commented_out_block_is_ignored() {
    let text = "// export const publicationsData = [];\n\
export const publicationsData = [\n  { title: \"Paper A\", citations: 3 }\n];\n";
    let records = parse_publications(text).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Paper A");
}

#[test]
fn test_patch_is_scoped_to_one_record() {
    let records = parse_publications(TWO_PUBLICATIONS).unwrap();
    let patched = apply_patches(
        TWO_PUBLICATIONS,
        &[CitationPatch {
            digits: records[1].digits.clone(),
            value: 1234,
        }],
    );

    assert_eq!(
        record_text(&patched, "Paper A"),
        record_text(TWO_PUBLICATIONS, "Paper A")
    );
    assert!(record_text(&patched, "Paper A: Extended").contains("citations: 1234"));
    // the unrelated export that also mentions citations is untouched
    assert!(patched.contains("{ id: 1, title: \"Paper A\", citations: 999 }"));
    assert_eq!(patched.len(), TWO_PUBLICATIONS.len() + 2);
}

#[test]
fn test_short_title() {
    assert_eq!(short_title("abc", 5), "abc");
    assert_eq!(short_title("abcdef", 3), "abc...");
    assert_eq!(short_title("ééé", 2), "éé...");
}

// ============================================================================
// Update Runs
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_unregistered_publication_is_skipped() {
    let source = MockSource::new();
    let updater = updater(source, sources(&[]));

    let report = updater.run(TWO_PUBLICATIONS).await.unwrap();

    assert_eq!(report.outcome_for("Paper A"), Some(Outcome::Skipped));
    assert_eq!(report.outcome_for("Paper A: Extended"), Some(Outcome::Skipped));
    assert_eq!(report.text, TWO_PUBLICATIONS);
    assert!(!report.has_changes());
    assert_eq!(updater.fetcher.total_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_retries_keep_value() {
    let source = MockSource::new()
        .reply(&url_for("a"), vec![Reply::Fail])
        .reply(&url_for("b"), vec![Reply::Status(429)]);
    let updater = updater(source, sources(&[("Paper A", "a"), ("Paper A: Extended", "b")]));

    let report = updater.run(TWO_PUBLICATIONS).await.unwrap();

    assert_eq!(report.outcome_for("Paper A"), Some(Outcome::Unknown { kept: 10 }));
    assert_eq!(
        report.outcome_for("Paper A: Extended"),
        Some(Outcome::Unknown { kept: 10 })
    );
    assert_eq!(report.text, TWO_PUBLICATIONS);
    assert_eq!(updater.fetcher.calls_to(&url_for("a")), 3);
    assert_eq!(updater.fetcher.calls_to(&url_for("b")), 3);
}

#[tokio::test(start_paused = true)]
async fn test_unextractable_page_keeps_value() {
    let source = MockSource::new().reply(
        &url_for("a"),
        vec![Reply::Page("<html><p>Please show you're not a robot</p></html>".into())],
    );
    let updater = updater(source, sources(&[("Paper A", "a")]));

    let report = updater.run(TWO_PUBLICATIONS).await.unwrap();
    assert_eq!(report.outcome_for("Paper A"), Some(Outcome::Unknown { kept: 10 }));
    // a page that loaded is not retried
    assert_eq!(updater.fetcher.calls_to(&url_for("a")), 1);
}

#[tokio::test(start_paused = true)]
async fn test_recovers_after_rate_limit() {
    let source = MockSource::new().reply(&url_for("a"), vec![Reply::Status(429), structural(11)]);
    let updater = updater(source, sources(&[("Paper A", "a")]));

    let report = updater.run(TWO_PUBLICATIONS).await.unwrap();
    assert_eq!(
        report.outcome_for("Paper A"),
        Some(Outcome::Updated { from: 10, to: 11 })
    );
}

#[tokio::test(start_paused = true)]
async fn test_recovers_after_forbidden() {
    let source = MockSource::new().reply(&url_for("a"), vec![Reply::Status(403), cited_by(14)]);
    let updater = updater(source, sources(&[("Paper A", "a")]));

    let report = updater.run(TWO_PUBLICATIONS).await.unwrap();
    assert_eq!(
        report.outcome_for("Paper A"),
        Some(Outcome::Updated { from: 10, to: 14 })
    );
    assert_eq!(updater.fetcher.calls_to(&url_for("a")), 2);
}

#[tokio::test(start_paused = true)]
async fn test_commented_count_is_updated() {
    let text = r#"export const publicationsData = [
  {
    title: "Paper A",
    citations: 10 // from scholar
  }
];"#;
    let source = MockSource::new().reply(&url_for("a"), vec![structural(11)]);
    let updater = updater(source, sources(&[("Paper A", "a")]));

    let report = updater.run(text).await.unwrap();
    assert_eq!(
        report.outcome_for("Paper A"),
        Some(Outcome::Updated { from: 10, to: 11 })
    );
    assert!(report.text.contains("citations: 11 // from scholar"));
}

#[tokio::test(start_paused = true)]
async fn test_unchanged_count() {
    let source = MockSource::new().reply(&url_for("a"), vec![cited_by(10)]);
    let updater = updater(source, sources(&[("Paper A", "a")]));

    let report = updater.run(TWO_PUBLICATIONS).await.unwrap();
    assert_eq!(report.outcome_for("Paper A"), Some(Outcome::Unchanged(10)));
    assert!(!report.has_changes());
}

#[tokio::test(start_paused = true)]
async fn test_every_outcome_is_reported() {
    let text = load_fixture("data.js");
    let records = parse_publications(&text).unwrap();
    let source = MockSource::new()
        .reply(&url_for("0"), vec![cited_by(40)])
        .reply(&url_for("1"), vec![cited_by(16)])
        .reply(&url_for("2"), vec![Reply::Fail]);
    let map = sources(&[
        (records[0].title.as_str(), "0"),
        (records[1].title.as_str(), "1"),
        (records[2].title.as_str(), "2"),
    ]);
    let updater = updater(source, map);

    let report = updater.run(&text).await.unwrap();

    assert_eq!(report.outcomes.len(), records.len());
    assert_eq!(report.outcomes[0].outcome, Outcome::Updated { from: 38, to: 40 });
    assert_eq!(report.outcomes[1].outcome, Outcome::Unchanged(16));
    assert_eq!(report.outcomes[2].outcome, Outcome::Unknown { kept: 14 });
    assert!(report.outcomes[3..]
        .iter()
        .all(|o| o.outcome == Outcome::Skipped));
    assert_eq!(report.updated_count(), 1);
}

// ============================================================================
// Rate Limiting
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_requests_are_sequential_and_spaced() {
    let text = load_fixture("data.js");
    let records = parse_publications(&text).unwrap();

    // every publication but the third is registered
    let keys: Vec<String> = (0..records.len()).map(|i| i.to_string()).collect();
    let entries: Vec<(&str, &str)> = records
        .iter()
        .zip(keys.iter())
        .enumerate()
        .filter(|(i, _)| *i != 2)
        .map(|(_, (r, k))| (r.title.as_str(), k.as_str()))
        .collect();
    let registered = entries.len();

    let mut source = MockSource::new().with_latency(Duration::from_millis(250));
    for (_, key) in &entries {
        source = source.reply(&url_for(key), vec![cited_by(1)]);
    }
    let updater = updater(source, sources(&entries));
    let delay = updater.settings().rate_limit_delay;

    let start = Instant::now();
    updater.run(&text).await.unwrap();
    let elapsed = Instant::now() - start;

    let calls = updater.fetcher.calls.lock().unwrap();
    assert_eq!(calls.len(), registered);
    for pair in calls.windows(2) {
        assert!(pair[1].start >= pair[0].end, "fetches overlapped");
        assert_eq!(pair[1].start - pair[0].end, delay);
    }
    let busy = Duration::from_millis(250) * registered as u32;
    assert_eq!(elapsed, busy + delay * (registered as u32 - 1));
}

#[tokio::test(start_paused = true)]
async fn test_single_fetch_has_no_delay() {
    let source = MockSource::new().reply(&url_for("a"), vec![cited_by(12)]);
    let updater = updater(source, sources(&[("Paper A", "a")]));

    let start = Instant::now();
    updater.run(TWO_PUBLICATIONS).await.unwrap();
    assert_eq!(Instant::now() - start, Duration::ZERO);
}

// ============================================================================
// Data File Runs
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_end_to_end_single_write_and_idempotence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.js");
    std::fs::write(&path, TWO_PUBLICATIONS).unwrap();

    let source = MockSource::new().reply(&url_for("a"), vec![cited_by(42)]);
    let updater = updater(source, sources(&[("Paper A", "a")]));

    let first = updater.update_file(&path, false).await.unwrap();
    assert!(first.written);
    assert_eq!(first.updated_count(), 1);

    let after_first = std::fs::read_to_string(&path).unwrap();
    assert!(record_text(&after_first, "Paper A").contains("citations: 42"));
    assert_eq!(
        record_text(&after_first, "Paper A: Extended"),
        record_text(TWO_PUBLICATIONS, "Paper A: Extended")
    );
    assert_eq!(after_first, first.text);
    assert!(!dir.path().join("data.js.tmp").exists());

    let second = updater.update_file(&path, false).await.unwrap();
    assert!(!second.written);
    assert_eq!(second.outcome_for("Paper A"), Some(Outcome::Unchanged(42)));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), after_first);
}

#[tokio::test(start_paused = true)]
async fn test_dry_run_leaves_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.js");
    std::fs::write(&path, TWO_PUBLICATIONS).unwrap();

    let source = MockSource::new().reply(&url_for("a"), vec![cited_by(42)]);
    let updater = updater(source, sources(&[("Paper A", "a")]));

    let report = updater.update_file(&path, true).await.unwrap();
    assert!(report.has_changes());
    assert!(!report.written);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), TWO_PUBLICATIONS);
}

#[tokio::test]
async fn test_missing_block_aborts_without_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.js");
    let original = "export const projectsData = [];\n";
    std::fs::write(&path, original).unwrap();

    let updater = updater(MockSource::new(), sources(&[]));
    let result = updater.update_file(&path, false).await;

    assert!(matches!(result, Err(UpdateError::BlockNotFound)));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
}

#[tokio::test]
async fn test_missing_file_is_read_error() {
    let updater = updater(MockSource::new(), sources(&[]));
    let result = updater
        .update_file(Path::new("/nonexistent/data.js"), false)
        .await;
    assert!(matches!(result, Err(UpdateError::Read { .. })));
}

#[tokio::test]
async fn test_http_source_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let _page = server
        .mock("GET", "/citations")
        .with_status(200)
        .with_body("<html><body><a>Cited by 21</a></body></html>")
        .create_async()
        .await;

    let map = SourceMap::build(
        vec![("Paper A".to_string(), format!("{}/citations", server.url()))],
        &["127.0.0.1", "localhost"],
    );
    let fetcher = HttpFetcher::new(Duration::from_secs(5), "test-agent").unwrap();
    let settings = UpdaterSettings {
        rate_limit_delay: Duration::from_millis(1),
        retry: RetryPolicy {
            max_attempts: 1,
            rate_limited_backoff: Duration::from_millis(1),
            network_backoff: Duration::from_millis(1),
        },
        max_plausible_citations: 10_000,
    };
    let updater = CitationUpdater::new(fetcher, map, settings);

    let report = updater.run(TWO_PUBLICATIONS).await.unwrap();
    assert_eq!(
        report.outcome_for("Paper A"),
        Some(Outcome::Updated { from: 10, to: 21 })
    );
    assert_eq!(report.outcome_for("Paper A: Extended"), Some(Outcome::Skipped));
}
