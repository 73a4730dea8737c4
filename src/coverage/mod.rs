//! SimpleCov result set loading and line-coverage aggregation.
//!
//! # Module Structure
//!
//! - [`types`] - Core data structures (pure data)
//! - [`resultset`] - Report parsing and run selection (I/O boundary in `load_resultset`)
//! - [`aggregate`] - Per-file and total line counts (pure functions)
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::Path;
//! use covgate::coverage::{aggregate, load_resultset};
//!
//! let report = load_resultset(Path::new("coverage/.resultset.json"))?;
//! let totals = aggregate(report.selected_run());
//! println!("{} of {} lines covered", totals.total_covered, totals.total_executable);
//! ```

pub mod aggregate;
pub mod resultset;
pub mod types;

pub use aggregate::{aggregate, Aggregate, FileTotals};
pub use resultset::{load_resultset, parse_resultset, select_run_id};
pub use types::{CoverageReport, FileCoverage, RunResult};
