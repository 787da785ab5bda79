//! Indexed lookups over the persons table.
//!
//! # Responsibility
//! - Filter records by full-name prefix and gender.
//! - Administer the secondary indexes that accelerate those filters.
//!
//! # Invariants
//! - Index state never changes query result sets, only their cost.

pub mod engine;
pub mod indexes;
