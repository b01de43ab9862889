//! Core data model for search hits, extracted content, and summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single search hit returned by a source, pre-deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The headline or page title of the hit.
    pub title: String,
    /// The URL of the hit. Dedup identity is the normalised form.
    pub url: String,
    /// Publication timestamp, when the source reports one.
    pub published_at: Option<DateTime<Utc>>,
    /// Which source produced this hit.
    pub source: String,
}

/// Readable text extracted from a rendered page.
///
/// Transient — produced per enrichment unit and never cached.
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// The URL that was rendered.
    pub url: String,
    /// Page title from the rendered DOM.
    pub title: String,
    /// Cleaned main text with boilerplate stripped.
    pub text: String,
    /// Character count of `text`.
    pub length: usize,
}

/// Outcome of one summarization attempt for one hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// The generated summary. Empty when the attempt failed.
    pub text: String,
    /// Character count of the extracted content the summary was built from.
    pub content_length: usize,
    /// Whether the extract→summarize unit completed.
    pub succeeded: bool,
    /// Failure reason when `succeeded` is false.
    pub error_reason: Option<String>,
}

impl Summary {
    /// A completed summary over `content_length` characters of input.
    pub fn ok(text: String, content_length: usize) -> Self {
        Self {
            text,
            content_length,
            succeeded: true,
            error_reason: None,
        }
    }

    /// A failed attempt, carrying the reason instead of text.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            content_length: 0,
            succeeded: false,
            error_reason: Some(reason.into()),
        }
    }
}

/// A search hit plus the optional outcome of its enrichment.
///
/// `summary` is `None` when summarization was never requested for this
/// hit; a requested-but-failed attempt carries `Some` with
/// `succeeded = false`.
#[derive(Debug, Clone)]
pub struct EnrichedResult {
    pub hit: SearchHit,
    pub summary: Option<Summary>,
}

impl EnrichedResult {
    /// Wrap a hit that was not selected for summarization.
    pub fn bare(hit: SearchHit) -> Self {
        Self { hit, summary: None }
    }
}

/// The terminal response object for one query.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub query: String,
    pub summaries_generated: bool,
    pub results: Vec<EnrichedResult>,
}

impl SearchReport {
    /// Shape the report into its wire form.
    ///
    /// Hits without a successful summary omit the `summary` and
    /// `content_length` fields entirely; `published_date` is RFC 3339 or
    /// null.
    pub fn to_json(&self) -> serde_json::Value {
        let results: Vec<serde_json::Value> = self
            .results
            .iter()
            .map(|r| {
                let mut entry = serde_json::json!({
                    "title": r.hit.title,
                    "url": r.hit.url,
                    "published_date": r.hit.published_at.map(|dt| dt.to_rfc3339()),
                });
                if let Some(summary) = r.summary.as_ref().filter(|s| s.succeeded) {
                    entry["summary"] = serde_json::Value::String(summary.text.clone());
                    entry["content_length"] = serde_json::json!(summary.content_length);
                }
                entry
            })
            .collect();

        serde_json::json!({
            "query": self.query,
            "summaries_generated": self.summaries_generated,
            "results": results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_hit(url: &str, published_at: Option<DateTime<Utc>>) -> SearchHit {
        SearchHit {
            title: "A headline".into(),
            url: url.into(),
            published_at,
            source: "Google News".into(),
        }
    }

    #[test]
    fn search_hit_serde_round_trip() {
        let hit = make_hit(
            "https://example.com/story",
            Some(Utc.with_ymd_and_hms(2024, 10, 28, 12, 0, 0).unwrap()),
        );
        let json = serde_json::to_string(&hit).expect("serialize");
        let decoded: SearchHit = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded.url, "https://example.com/story");
        assert_eq!(decoded.published_at, hit.published_at);
        assert_eq!(decoded.source, "Google News");
    }

    #[test]
    fn summary_ok_has_no_reason() {
        let s = Summary::ok("Two paragraphs.".into(), 4200);
        assert!(s.succeeded);
        assert_eq!(s.content_length, 4200);
        assert!(s.error_reason.is_none());
    }

    #[test]
    fn summary_failed_carries_reason_not_text() {
        let s = Summary::failed("render timed out: example.com after 30s");
        assert!(!s.succeeded);
        assert!(s.text.is_empty());
        assert_eq!(
            s.error_reason.as_deref(),
            Some("render timed out: example.com after 30s")
        );
    }

    #[test]
    fn report_json_includes_summary_fields_on_success() {
        let hit = make_hit(
            "https://example.com/a",
            Some(Utc.with_ymd_and_hms(2024, 10, 28, 9, 30, 0).unwrap()),
        );
        let report = SearchReport {
            query: "AAPL earnings".into(),
            summaries_generated: true,
            results: vec![EnrichedResult {
                hit,
                summary: Some(Summary::ok("Key points.".into(), 812)),
            }],
        };

        let json = report.to_json();
        assert_eq!(json["query"], "AAPL earnings");
        assert_eq!(json["summaries_generated"], true);
        let entry = &json["results"][0];
        assert_eq!(entry["summary"], "Key points.");
        assert_eq!(entry["content_length"], 812);
        assert_eq!(entry["published_date"], "2024-10-28T09:30:00+00:00");
    }

    #[test]
    fn report_json_omits_summary_fields_when_absent_or_failed() {
        let report = SearchReport {
            query: "quiet query".into(),
            summaries_generated: true,
            results: vec![
                EnrichedResult::bare(make_hit("https://a.com", None)),
                EnrichedResult {
                    hit: make_hit("https://b.com", None),
                    summary: Some(Summary::failed("fetch failed: 404")),
                },
            ],
        };

        let json = report.to_json();
        for entry in json["results"].as_array().expect("results array") {
            assert!(entry.get("summary").is_none());
            assert!(entry.get("content_length").is_none());
            assert!(entry["published_date"].is_null());
        }
    }

    #[test]
    fn report_json_null_published_date() {
        let report = SearchReport {
            query: "q".into(),
            summaries_generated: false,
            results: vec![EnrichedResult::bare(make_hit("https://a.com", None))],
        };
        assert!(report.to_json()["results"][0]["published_date"].is_null());
    }
}
