//! Result ordering.

use crate::search::types::{SearchHit, SortDirection};
use crate::text::fold_key;
use std::cmp::Reverse;

/// How a result list is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMode {
    /// Keep input order (blank query, no explicit direction).
    Preserve,
    /// Best match first.
    Relevance,
    /// Alphabetical by name, case- and accent-insensitive.
    Name(SortDirection),
}

/// Order `hits` in place. Every mode is stable: equal elements keep their
/// relative input order.
pub fn rank(hits: &mut [SearchHit<'_>], mode: RankMode) {
    match mode {
        RankMode::Preserve => {}
        RankMode::Relevance => {
            hits.sort_by(|a, b| {
                let a = a.score.unwrap_or(0.0);
                let b = b.score.unwrap_or(0.0);
                b.total_cmp(&a)
            });
        }
        RankMode::Name(SortDirection::Asc) => {
            hits.sort_by_cached_key(|h| fold_key(&h.record.name));
        }
        RankMode::Name(SortDirection::Desc) => {
            hits.sort_by_cached_key(|h| Reverse(fold_key(&h.record.name)));
        }
    }
}
