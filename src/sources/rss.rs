//! Shared RSS parsing for feed-backed sources.
//!
//! News search feeds return RSS 2.0 payloads whose `<item>` entries carry
//! `<title>`, `<link>`, and `<pubDate>` children. Items are extracted
//! with regexes rather than a full XML parser — the feeds are flat and
//! the tolerant path also survives the malformed escaping some feeds
//! emit. Items missing a usable link are dropped; unparseable dates
//! degrade to `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

/// One raw feed entry before source attribution.
#[derive(Debug, Clone)]
pub(crate) struct RssItem {
    pub title: String,
    pub url: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// Extract up to `max_items` entries from an RSS payload.
pub(crate) fn parse_rss_items(xml: &str, max_items: usize) -> Vec<RssItem> {
    let item_re = Regex::new(r"(?is)<item\b[^>]*>(.*?)</item>").expect("static regex compiles");
    let title_re = Regex::new(r"(?is)<title\b[^>]*>(.*?)</title>").expect("static regex compiles");
    let link_re = Regex::new(r"(?is)<link\b[^>]*>(.*?)</link>").expect("static regex compiles");
    let date_re =
        Regex::new(r"(?is)<pubDate\b[^>]*>(.*?)</pubDate>").expect("static regex compiles");

    let mut items = Vec::new();
    for cap in item_re.captures_iter(xml) {
        if items.len() >= max_items {
            break;
        }
        let Some(body) = cap.get(1) else {
            continue;
        };
        let body = body.as_str();

        let url = link_re
            .captures(body)
            .and_then(|c| c.get(1))
            .map(|m| decode_rss_text(m.as_str()))
            .unwrap_or_default();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            tracing::warn!("dropping RSS item without a usable link");
            continue;
        }

        let title = title_re
            .captures(body)
            .and_then(|c| c.get(1))
            .map(|m| clean_text(&decode_rss_text(m.as_str())))
            .unwrap_or_default();
        if title.is_empty() {
            tracing::warn!(url = %url, "dropping RSS item without a title");
            continue;
        }

        let published_at = date_re
            .captures(body)
            .and_then(|c| c.get(1))
            .and_then(|m| parse_rss_date(decode_rss_text(m.as_str()).trim()));

        items.push(RssItem {
            title,
            url,
            published_at,
        });
    }
    items
}

/// Strip CDATA wrappers and decode the handful of entities feeds use.
pub(crate) fn decode_rss_text(raw: &str) -> String {
    let trimmed = raw
        .trim()
        .trim_start_matches("<![CDATA[")
        .trim_end_matches("]]>")
        .trim();
    trimmed
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

/// Clean a feed title: drop embedded markup, normalise typographic
/// punctuation, collapse whitespace.
pub(crate) fn clean_text(text: &str) -> String {
    let tag_re = Regex::new(r"<[^>]+>").expect("static regex compiles");
    let stripped = tag_re.replace_all(text, "");

    let replaced: String = stripped
        .chars()
        .map(|ch| match ch {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{00a0}' => ' ',
            other => other,
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse the date formats news feeds emit.
///
/// RFC 2822 first (`Wed, 02 Oct 2024 14:30:00 GMT`), then the same shape
/// without a zone designator, then bare date patterns seen in the wild.
pub(crate) fn parse_rss_date(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let stripped = raw.replace(" GMT", "").replace(" +0000", "");
    if let Ok(ndt) = NaiveDateTime::parse_from_str(&stripped, "%a, %d %b %Y %H:%M:%S") {
        return Some(DateTime::from_naive_utc_and_offset(ndt, Utc));
    }

    parse_loose_date(raw)
}

/// Best-effort extraction of a bare date embedded in arbitrary text.
fn parse_loose_date(raw: &str) -> Option<DateTime<Utc>> {
    let patterns: &[(&str, &str)] = &[
        (r"\d{4}-\d{2}-\d{2}", "%Y-%m-%d"),
        (r"\d{1,2}/\d{1,2}/\d{4}", "%m/%d/%Y"),
        (r"[A-Za-z]+ \d{1,2}, \d{4}", "%B %d, %Y"),
    ];

    for (pattern, format) in patterns {
        let re = Regex::new(pattern).expect("static regex compiles");
        if let Some(m) = re.find(raw) {
            if let Ok(date) = NaiveDate::parse_from_str(m.as_str(), format) {
                let ndt = date.and_hms_opt(0, 0, 0)?;
                return Some(DateTime::from_naive_utc_and_offset(ndt, Utc));
            }
        }
    }
    None
}
