//! Domain model types

pub mod ingest;
pub mod posting;

pub use ingest::{IngestRequest, NumericField};
pub use posting::{NewPosting, PostingRecord, DEFAULT_BROKER, DEFAULT_EQUIPMENT, DEFAULT_STATUS};
