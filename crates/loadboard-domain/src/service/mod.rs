//! Domain services

pub mod board;
pub mod ingest_validation;
pub mod search_filter;

pub use board::{filter_postings, BoardSummary};
pub use ingest_validation::validate_ingest;
pub use search_filter::{contains_folded, fold_case, parse_limit, SearchFilter, DEFAULT_SEARCH_LIMIT};
