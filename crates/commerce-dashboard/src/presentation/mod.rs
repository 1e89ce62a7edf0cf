//! Presentation layer.
//!
//! Query results are first turned into a renderer-independent [`ChartModel`]
//! and paired with a static insight paragraph. The terminal UI
//! ([`crate::tui`]) and the text report ([`text`]) both render from that
//! description.

mod chart;
mod insights;
pub mod text;

pub use chart::{ChartKind, ChartPoint, ChartModel};
pub use insights::insight;
pub use text::{render_chart, render_section, section_frame};
