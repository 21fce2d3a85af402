//! Board Service - the load board view
//!
//! The board lists available postings, narrowed by the quick filter, while the
//! summary figures always describe every posting that was fetched.

use loadboard_domain::model::PostingRecord;
use loadboard_domain::repository::PostingRepository;
use loadboard_domain::service::{filter_postings, BoardSummary, SearchFilter};
use loadboard_types::Result;
use serde::Serialize;

use super::search_postings;

#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub postings: Vec<PostingRecord>,
    pub summary: BoardSummary,
}

pub fn load_board<R: PostingRepository>(repo: &R, query: &str, limit: u32) -> Result<BoardView> {
    let fetched = search_postings(repo, &SearchFilter::default().with_limit(limit))?;

    Ok(BoardView {
        postings: filter_postings(&fetched, query),
        summary: BoardSummary::from_postings(&fetched),
    })
}
