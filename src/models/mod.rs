//! Domain models for diagnosis extraction
//!
//! Records produced by the parser, the episodes they consolidate into, the
//! co-indexed sequence record the filters work on, and the tabular rows the
//! loading layer supplies.

pub mod episode;
pub mod parallel;
pub mod record;
pub mod table;

pub use episode::{Episode, EpisodeClassification};
pub use parallel::ParallelRecord;
pub use record::{ExtractedFields, StructuredRecord};
pub use table::{Cell, Row, Table};
