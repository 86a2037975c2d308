//! Filtering of co-indexed sequence records
//!
//! Filters decide per position of a driver sequence whether the observation
//! survives, and then remove the same positions from every sibling sequence
//! so the equal-length invariant of [`ParallelRecord`](crate::models::ParallelRecord)
//! holds before and after.

pub mod core;
pub mod predicate;

pub use self::core::{filter_parallel, filter_row, keep_earliest};
pub use self::predicate::{ContainsAnyCode, KeepPredicate, StartsWithAnyPrefix};
