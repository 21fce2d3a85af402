//! Application service layer - search, ingestion, board, config, import

pub mod app;
pub mod config;
pub mod envelope;
pub mod import;
pub mod repository;
