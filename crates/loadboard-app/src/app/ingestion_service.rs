//! Ingestion Service - validate and insert a new posting

use loadboard_domain::model::{IngestRequest, PostingRecord};
use loadboard_domain::repository::PostingRepository;
use loadboard_domain::service::validate_ingest;
use loadboard_types::Result;
use tracing::{error, info, warn};

/// Validate `req`, apply defaults, and insert exactly one posting.
///
/// Validation failures never touch the store.
pub fn ingest_posting<R: PostingRepository>(repo: &R, req: &IngestRequest) -> Result<PostingRecord> {
    let posting = validate_ingest(req).map_err(|e| {
        warn!("Rejected load: {}", e);
        e
    })?;

    match repo.insert(&posting) {
        Ok(record) => {
            info!("Load created: {}", record.id);
            Ok(record)
        }
        Err(e) => {
            error!("Error creating load: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadboard_domain::model::NumericField;
    use loadboard_store::SqlitePostingStore;
    use loadboard_types::{Error, ValidationError};
    use tempfile::{tempdir, TempDir};

    fn open_temp() -> (TempDir, SqlitePostingStore) {
        let dir = tempdir().unwrap();
        let store = SqlitePostingStore::open(dir.path().join("loads.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_returns_stored_record_with_defaults() {
        let (_dir, store) = open_temp();
        let req = IngestRequest::new("Chicago, IL", "Dallas, TX", 967_i64, 1800_i64);

        let record = ingest_posting(&store, &req).unwrap();
        assert!(!record.id.is_empty());
        assert_eq!(record.equipment, "Van");
        assert_eq!(record.broker, "Unknown");
        assert_eq!(record.status, "available");
        assert!((record.rate_per_mile.unwrap() - 1.86).abs() < 1e-9);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_missing_required_field_leaves_store_untouched() {
        let (_dir, store) = open_temp();
        let complete = IngestRequest::new("Chicago, IL", "Dallas, TX", 967_i64, 1800_i64);

        let cases = [
            IngestRequest { origin: None, ..complete.clone() },
            IngestRequest { destination: Some(String::new()), ..complete.clone() },
            IngestRequest { distance: None, ..complete.clone() },
            IngestRequest { rate: Some(NumericField::Text(String::new())), ..complete.clone() },
        ];

        for req in &cases {
            let err = ingest_posting(&store, req).unwrap_err();
            assert!(matches!(
                err,
                Error::Validation(ValidationError::MissingFields(_))
            ));
        }
        assert_eq!(store.count().unwrap(), 0);
    }
}
