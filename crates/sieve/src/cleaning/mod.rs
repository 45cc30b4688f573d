//! Dataset cleaning: stage transforms, their configuration, and the pipeline.

mod config;
mod pipeline;
mod stages;

pub use config::{CleaningConfig, CleaningOptions};
pub use pipeline::{clean, CleaningPipeline, CleaningReport, CleaningResult, StageReport};
pub use stages::{
    remove_duplicates, remove_empty_columns, remove_empty_rows, trim_whitespace, Stage,
};
