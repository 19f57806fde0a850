//! Pipeline orchestration

pub mod batch;
pub mod outcome;
pub mod stats_pipeline;

pub use batch::{discover_pairs, BatchReport, BatchRunner, BatchSummary, PairReport};
pub use outcome::{Outcome, SkipReason, UpsertFailure};
pub use stats_pipeline::StatsPipeline;
