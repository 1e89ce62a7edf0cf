//! E-commerce Analysis Dashboard Library
//!
//! Loads six CSV tables of a marketplace's public order data, joins them into
//! enriched line items and answers five fixed business questions.
//!
//! # Overview
//!
//! - **Loading**: CSV tables read with Polars into typed records, memoized per process
//! - **Joining**: left joins that add English category names to products and line items
//! - **Queries**: top customer cities, top seller cities, hourly transactions,
//!   most purchased products and best selling categories
//! - **Presentation**: chart descriptions, insight text, a text report and an
//!   interactive terminal dashboard
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use commerce_dashboard::{DashboardConfig, Controls, ReportGenerator, shared_dataset};
//!
//! let config = DashboardConfig::builder()
//!     .data_dir("Data")
//!     .top_cities(15)
//!     .hours(vec![8, 9, 12])
//!     .build()?;
//!
//! let data = shared_dataset(&config.dataset_paths())?;
//! let controls = Controls::from_config(&config)?;
//!
//! let report = ReportGenerator::build(&data, &controls, "Data");
//! println!("{}", ReportGenerator::to_text(&report)?);
//! ```
//!
//! # Single queries
//!
//! ```rust,ignore
//! use commerce_dashboard::queries::{HourSelection, TopN, hourly_transactions, top_categories};
//!
//! let categories = top_categories(&data, TopN::new(5)?);
//! let morning = hourly_transactions(&data, &HourSelection::new(6..12)?);
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod join;
pub mod loader;
pub mod presentation;
pub mod queries;
pub mod reporting;
pub mod tui;
pub mod types;

// Re-exports for convenient access
pub use config::{ConfigValidationError, DashboardConfig, DashboardConfigBuilder, DatasetFiles};
pub use dashboard::{ControlValue, Controls, SectionData, SectionView, compute_all, compute_section};
pub use error::{DashboardError, Result as DashboardResult, ResultExt};
pub use join::JoinReport;
pub use loader::{Dataset, DatasetCache, DatasetPaths, DatasetSummary, Tables, shared_dataset};
pub use presentation::{ChartKind, ChartPoint, ChartModel};
pub use queries::{HourSelection, TopN};
pub use reporting::{DashboardReport, ReportGenerator};
pub use types::{
    CategoryCount, CityCount, EnrichedLineItem, EnrichedProduct, HourlyCount, ProductCount,
    Question,
};
