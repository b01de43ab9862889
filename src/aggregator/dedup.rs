//! Hit deduplication by normalised URL.
//!
//! Sources regularly report the same article; identity is the normalised
//! URL. Output preserves arrival order of the kept entries — the caller
//! sorts by recency afterwards, and arrival order is the stable
//! tie-break.

use std::collections::HashMap;

use crate::config::DedupPolicy;
use crate::types::SearchHit;

/// Deduplicate hits by normalised URL under the given policy.
///
/// `KeepFirst` keeps the first-seen entry for each URL. `KeepNewest`
/// replaces an entry in place when a later duplicate carries a more
/// recent timestamp; an undated duplicate never displaces a dated entry.
/// Either way a kept entry occupies its first-seen position.
pub fn deduplicate(hits: Vec<SearchHit>, policy: DedupPolicy) -> Vec<SearchHit> {
    let mut kept: Vec<SearchHit> = Vec::with_capacity(hits.len());
    let mut index_by_url: HashMap<String, usize> = HashMap::new();

    for hit in hits {
        let key = super::url_normalize::normalize_url(&hit.url);
        match index_by_url.get(&key) {
            None => {
                index_by_url.insert(key, kept.len());
                kept.push(hit);
            }
            Some(&at) => {
                if policy == DedupPolicy::KeepNewest && hit.published_at > kept[at].published_at {
                    kept[at] = hit;
                }
            }
        }
    }

    kept
}
