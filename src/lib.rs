//! Point-in-time repository health reports.
//!
//! The library fetches issues, pull requests, commit activity, and CI builds
//! for a repository, validates the raw listings at the boundary, and folds
//! them into a single JSON-serializable report model for a chosen date
//! window. The binary in `main.rs` is a thin driver over [`report::generate`].

pub mod cli;
pub mod config;
pub mod error;
pub mod ext;
pub mod model;
pub mod output;
pub mod report;
pub mod snapshot;
pub mod sources;
pub mod stats;
pub mod summaries;
pub mod util;
pub mod window;

pub use error::{Error, Result};
pub use model::{BuildSummary, Record, RecordPointer, RecordState, RepoId, ReportModel};
pub use report::{generate, ReportRequest};
pub use snapshot::ValidatedSnapshot;
pub use window::{compute_window, DateWindow, WindowSpec};
