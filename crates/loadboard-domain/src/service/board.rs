//! Board view helpers: quick filter and summary figures

use serde::Serialize;

use crate::model::PostingRecord;
use crate::service::search_filter::{contains_folded, fold_case};

/// Quick filter used by the board's search box.
///
/// Matches `query` case-insensitively against origin, destination, or broker.
/// The query is used as given, without trimming. An empty query keeps
/// everything. Input order is preserved.
pub fn filter_postings(postings: &[PostingRecord], query: &str) -> Vec<PostingRecord> {
    let query = fold_case(query);
    if query.is_empty() {
        return postings.to_vec();
    }

    postings
        .iter()
        .filter(|p| {
            contains_folded(&p.origin, &query)
                || contains_folded(&p.destination, &query)
                || contains_folded(&p.broker, &query)
        })
        .cloned()
        .collect()
}

/// Summary figures shown above the board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSummary {
    pub total_loads: usize,
    /// Rounded to cents, 0.00 for an empty board
    pub avg_rate_per_mile: f64,
    pub total_value: f64,
    pub total_miles: i64,
}

impl BoardSummary {
    pub fn from_postings(postings: &[PostingRecord]) -> Self {
        let total_loads = postings.len();
        let avg_rate_per_mile = if total_loads == 0 {
            0.0
        } else {
            let sum: f64 = postings.iter().map(|p| p.effective_rate_per_mile()).sum();
            (sum / total_loads as f64 * 100.0).round() / 100.0
        };

        Self {
            total_loads,
            avg_rate_per_mile,
            total_value: postings.iter().map(|p| p.rate).sum(),
            total_miles: postings
                .iter()
                .fold(0_i64, |acc, p| acc.saturating_add(p.distance)),
        }
    }
}
