//! # Wikipedia Resolver
//!
//! Resolves a free-text search term against Wikipedia by fetching the search
//! page and classifying the outcome from its raw HTML.
//!
//! The page is never materialized: the body is consumed as a lazy stream of
//! lines and scanning stops at the first decisive marker. A search that hits
//! an article redirects to it, so the page carries a `link rel="canonical"`
//! line with the article URL; a search that misses lands on a results page
//! whose fifth line contains "Search results". Both markers are structural
//! offsets into Wikipedia's current template and are brittle against template
//! changes, which is why every anomaly maps to `FetchError` instead of a
//! guess.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use regex::Regex;
use std::fmt::Display;
use std::sync::OnceLock;
use std::time::Duration;

use crate::domain::types::SearchOutcome;

/// Number of structural preamble lines before the results-page marker.
const RESULTS_MARKER_LINE: usize = 5;
const RESULTS_MARKER: &str = "Search results";
const CANONICAL_MARKER: &str = "link rel=\"canonical\"";

fn href_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"href="([^"]+)""#).expect("invalid href pattern"))
}

/// Lines of a response body, delivered one at a time.
#[async_trait]
pub(crate) trait LineSource: Send {
    /// Next line without its terminator, or `None` at end of stream.
    async fn next_line(&mut self) -> Result<Option<String>, String>;
}

pub struct WikiClient {
    http: reqwest::Client,
    search_url: String,
}

impl WikiClient {
    pub fn new(search_url: String, timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");
        Self { http, search_url }
    }

    /// Resolve `term` to a canonical article link, a not-found signal, or a
    /// fetch error. One request, no retries; a timeout surfaces as
    /// `FetchError` like any other transport failure.
    pub async fn resolve(&self, term: &str) -> SearchOutcome {
        let url = build_search_url(&self.search_url, term);
        tracing::debug!("Fetching {}", url);

        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) => return SearchOutcome::FetchError(e.to_string()),
        };
        if response.status() != reqwest::StatusCode::OK {
            return SearchOutcome::FetchError(format!("unexpected status {}", response.status()));
        }

        // scan_lines takes the body by value, so the connection is released
        // when it returns, whichever branch it takes.
        scan_lines(term, BodyLines::new(Box::pin(response.bytes_stream()))).await
    }
}

/// Append the term to the search endpoint, `+`-encoding spaces.
fn build_search_url(search_url: &str, term: &str) -> String {
    format!("{}{}", search_url, term.replace(' ', "+"))
}

/// Classify a streamed page body. Reads the minimum number of lines needed:
/// nothing past line 5 for a results page, nothing past the canonical marker
/// for an article page.
async fn scan_lines<L: LineSource>(term: &str, mut lines: L) -> SearchOutcome {
    for _ in 0..RESULTS_MARKER_LINE - 1 {
        match lines.next_line().await {
            Ok(Some(_)) => {}
            Ok(None) => return SearchOutcome::FetchError("page shorter than expected".to_string()),
            Err(e) => return SearchOutcome::FetchError(e),
        }
    }

    let marker_line = match lines.next_line().await {
        Ok(Some(line)) => line,
        Ok(None) => return SearchOutcome::FetchError("page shorter than expected".to_string()),
        Err(e) => return SearchOutcome::FetchError(e),
    };
    if marker_line.contains(RESULTS_MARKER) {
        return SearchOutcome::NotFound(term.to_string());
    }

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.contains(CANONICAL_MARKER) {
                    return extract_link(&line);
                }
            }
            Ok(None) => {
                return SearchOutcome::FetchError("canonical link marker not found".to_string());
            }
            Err(e) => return SearchOutcome::FetchError(e),
        }
    }
}

/// Pull the href value out of the canonical marker line and check it is a
/// plausible absolute URL. An implausible value means the page template
/// changed under us; that is reported, not guessed around.
fn extract_link(line: &str) -> SearchOutcome {
    let Some(caps) = href_pattern().captures(line) else {
        return SearchOutcome::FetchError("canonical line carried no href".to_string());
    };
    let link = caps[1].to_string();
    if link.starts_with("https://") || link.starts_with("http://") {
        SearchOutcome::Found(link)
    } else {
        SearchOutcome::FetchError(format!("implausible canonical link: {link}"))
    }
}

/// Incremental line splitter over a chunked byte stream. Buffers only until
/// the next newline, so scanning stays bounded even on a large page.
struct BodyLines<S> {
    stream: S,
    buf: BytesMut,
    done: bool,
}

impl<S> BodyLines<S> {
    fn new(stream: S) -> Self {
        Self {
            stream,
            buf: BytesMut::new(),
            done: false,
        }
    }

    fn take_line(&mut self, len: usize, skip: usize) -> String {
        let line = self.buf.split_to(len + skip);
        let mut line = &line[..len];
        if line.last() == Some(&b'\r') {
            line = &line[..line.len() - 1];
        }
        String::from_utf8_lossy(line).into_owned()
    }
}

#[async_trait]
impl<S, E> LineSource for BodyLines<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin + Send,
    E: Display + Send,
{
    async fn next_line(&mut self) -> Result<Option<String>, String> {
        loop {
            if let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
                return Ok(Some(self.take_line(pos, 1)));
            }
            if self.done {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                let len = self.buf.len();
                return Ok(Some(self.take_line(len, 0)));
            }
            match self.stream.next().await {
                Some(Ok(chunk)) => self.buf.extend_from_slice(&chunk),
                Some(Err(e)) => return Err(e.to_string()),
                None => self.done = true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted line source. Panics when read past `max_reads` and counts
    /// drops, so tests can assert both bounded scanning and single release.
    struct ScriptedLines {
        lines: Vec<String>,
        served: usize,
        max_reads: Option<usize>,
        drops: Arc<AtomicUsize>,
    }

    impl ScriptedLines {
        fn new(lines: &[&str]) -> (Self, Arc<AtomicUsize>) {
            let drops = Arc::new(AtomicUsize::new(0));
            let source = Self {
                lines: lines.iter().map(|l| l.to_string()).collect(),
                served: 0,
                max_reads: None,
                drops: drops.clone(),
            };
            (source, drops)
        }

        fn with_read_limit(mut self, limit: usize) -> Self {
            self.max_reads = Some(limit);
            self
        }
    }

    #[async_trait]
    impl LineSource for ScriptedLines {
        async fn next_line(&mut self) -> Result<Option<String>, String> {
            if let Some(limit) = self.max_reads {
                assert!(
                    self.served < limit,
                    "scanner read past line {limit}, expected it to stop"
                );
            }
            let line = self.lines.get(self.served).cloned();
            self.served += 1;
            Ok(line)
        }
    }

    impl Drop for ScriptedLines {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn preamble() -> Vec<&'static str> {
        vec!["<!DOCTYPE html>", "<html>", "<head>", "<meta charset=\"UTF-8\"/>"]
    }

    #[tokio::test]
    async fn test_results_page_classified_not_found() {
        let mut lines = preamble();
        lines.push("<title>Search results - Wikipedia</title>");
        lines.push("should never be read");
        let (source, _) = ScriptedLines::new(&lines);
        // The read limit proves no line past line 5 is consumed.
        let outcome = scan_lines("Qwertyuiop", source.with_read_limit(5)).await;
        assert_eq!(outcome, SearchOutcome::NotFound("Qwertyuiop".to_string()));
    }

    #[tokio::test]
    async fn test_canonical_link_extracted() {
        let mut lines = preamble();
        lines.push("<title>Albert Einstein - Wikipedia</title>");
        lines.push("<meta name=\"generator\" content=\"MediaWiki\"/>");
        lines.push(
            "<link rel=\"canonical\" href=\"https://en.wikipedia.org/wiki/Albert_Einstein\"/>",
        );
        let (source, _) = ScriptedLines::new(&lines);
        let outcome = scan_lines("Albert Einstein", source).await;
        assert_eq!(
            outcome,
            SearchOutcome::Found("https://en.wikipedia.org/wiki/Albert_Einstein".to_string())
        );
    }

    #[tokio::test]
    async fn test_scan_stops_at_first_canonical_line() {
        let mut lines = preamble();
        lines.push("<title>Albert Einstein - Wikipedia</title>");
        lines.push("<link rel=\"canonical\" href=\"https://en.wikipedia.org/wiki/A\"/>");
        lines.push("<link rel=\"canonical\" href=\"https://en.wikipedia.org/wiki/B\"/>");
        let (source, _) = ScriptedLines::new(&lines);
        let outcome = scan_lines("A", source.with_read_limit(6)).await;
        assert_eq!(
            outcome,
            SearchOutcome::Found("https://en.wikipedia.org/wiki/A".to_string())
        );
    }

    #[tokio::test]
    async fn test_stream_end_without_marker_is_fetch_error() {
        let mut lines = preamble();
        lines.push("<title>Oddly shaped page</title>");
        lines.push("<body></body>");
        let (source, _) = ScriptedLines::new(&lines);
        let outcome = scan_lines("anything", source).await;
        assert!(matches!(outcome, SearchOutcome::FetchError(_)));
    }

    #[tokio::test]
    async fn test_short_page_is_fetch_error() {
        let (source, _) = ScriptedLines::new(&["<!DOCTYPE html>", "<html>"]);
        let outcome = scan_lines("anything", source).await;
        assert!(matches!(outcome, SearchOutcome::FetchError(_)));
    }

    #[tokio::test]
    async fn test_implausible_href_is_fetch_error() {
        let mut lines = preamble();
        lines.push("<title>Page</title>");
        lines.push("<link rel=\"canonical\" href=\"not a url\"/>");
        let (source, _) = ScriptedLines::new(&lines);
        let outcome = scan_lines("anything", source).await;
        assert!(matches!(outcome, SearchOutcome::FetchError(_)));
    }

    #[tokio::test]
    async fn test_source_released_once_per_branch() {
        // Found branch
        let mut found = preamble();
        found.push("<title>Page</title>");
        found.push("<link rel=\"canonical\" href=\"https://en.wikipedia.org/wiki/Page\"/>");
        // NotFound branch
        let mut missing = preamble();
        missing.push("<title>Search results - Wikipedia</title>");
        // Error branch
        let err = vec!["<!DOCTYPE html>"];

        for lines in [found, missing, err] {
            let (source, drops) = ScriptedLines::new(&lines);
            let _ = scan_lines("term", source).await;
            assert_eq!(drops.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_body_lines_across_chunk_boundaries() {
        let chunks: Vec<Result<Bytes, Infallible>> = vec![
            Ok(Bytes::from_static(b"first li")),
            Ok(Bytes::from_static(b"ne\r\nsecond line\nthird")),
            Ok(Bytes::from_static(b" line")),
        ];
        let mut lines = BodyLines::new(futures::stream::iter(chunks));
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("first line"));
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("second line"));
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("third line"));
        assert_eq!(lines.next_line().await.unwrap(), None);
    }

    #[test]
    fn test_search_url_replaces_spaces() {
        let url = build_search_url(
            "https://en.wikipedia.org/wiki/Special:Search?search=",
            "Albert Einstein",
        );
        assert_eq!(
            url,
            "https://en.wikipedia.org/wiki/Special:Search?search=Albert+Einstein"
        );
    }
}
