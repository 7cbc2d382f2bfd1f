//! Pipeline orchestration and logging for the rowgate command-line tool.

pub mod error;
pub mod logging;
pub mod pipeline;
