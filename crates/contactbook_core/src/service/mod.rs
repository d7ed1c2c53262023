//! Core use-case services.
//!
//! # Responsibility
//! - Wire repositories into one explicitly passed composition root.
//! - Provide deterministic demo data for empty stores.

pub mod contact_book;
pub mod sample_data;
