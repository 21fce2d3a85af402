//! Search Service - filtered reads against the load table

use loadboard_domain::model::PostingRecord;
use loadboard_domain::repository::PostingRepository;
use loadboard_domain::service::SearchFilter;
use loadboard_types::Result;
use tracing::{error, info};

/// Postings matching every filter in `filter`, newest first.
///
/// All-or-nothing: a store failure yields an error and no rows.
pub fn search_postings<R: PostingRepository>(
    repo: &R,
    filter: &SearchFilter,
) -> Result<Vec<PostingRecord>> {
    info!(
        origin = filter.origin.as_deref().unwrap_or(""),
        destination = filter.destination.as_deref().unwrap_or(""),
        equipment = filter.equipment.as_deref().unwrap_or(""),
        status = %filter.status,
        limit = filter.limit,
        "Load search"
    );

    match repo.search(filter) {
        Ok(postings) => {
            info!("Found {} loads", postings.len());
            Ok(postings)
        }
        Err(e) => {
            error!("Load search failed: {}", e);
            Err(e)
        }
    }
}
