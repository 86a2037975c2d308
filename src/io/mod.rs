//! Parquet input and output
//!
//! The reader turns a pathology extract into one [`Row`](crate::models::Row)
//! per patient; the writer persists classified episodes.

pub mod reader;
pub mod writer;

pub use reader::{read_cohort, record_batch_to_rows};
pub use writer::{episode_schema, episodes_to_record_batch, write_episodes};
