//! Report generation module.
//!
//! A [`DashboardReport`] is the non-interactive form of the dashboard: all
//! five sections computed with one set of controls, suitable for:
//! - human-readable output to stdout (`--report`)
//! - JSON output to stdout (`--json`)
//! - programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use commerce_dashboard::reporting::ReportGenerator;
//!
//! let report = ReportGenerator::build(&dataset, &controls, "Data");
//! println!("{}", ReportGenerator::to_json(&report)?);
//! ```

mod generator;

pub use generator::{DashboardReport, JoinSummary, ReportGenerator};
