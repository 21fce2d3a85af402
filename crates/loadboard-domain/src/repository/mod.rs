//! Repository trait definitions for data persistence

use crate::model::{NewPosting, PostingRecord};
use crate::service::SearchFilter;
use loadboard_types::Error;

/// Repository for load postings
pub trait PostingRepository {
    /// Insert one posting in a single atomic statement and return the stored row
    fn insert(&self, posting: &NewPosting) -> Result<PostingRecord, Error>;

    /// Postings matching every filter, newest first, truncated to the filter limit
    fn search(&self, filter: &SearchFilter) -> Result<Vec<PostingRecord>, Error>;

    /// Total number of stored postings
    fn count(&self) -> Result<usize, Error>;
}
