//! Load board domain: postings, search filters, and the repository seam

pub mod model;
pub mod repository;
pub mod service;
