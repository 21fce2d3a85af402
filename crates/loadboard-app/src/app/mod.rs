//! Application Layer
//!
//! Orchestrates between the surfaces (HTTP, CLI) and the domain/store layers.
//!
//! - `search_service`: filtered reads against the load table
//! - `ingestion_service`: validated single-row inserts
//! - `board_service`: the board view (quick filter plus summary)

pub mod board_service;
pub mod ingestion_service;
pub mod search_service;

pub use board_service::{load_board, BoardView};
pub use ingestion_service::ingest_posting;
pub use search_service::search_postings;
