//! Seniority vs. salary scatterplot, rendered from an employee table to SVG.
//!
//! Pipeline:
//! ```text
//!  data::loader ──await──▶ state::ChartState ──▶ chart::init_graph
//!                                                   │
//!                       scales ◀────────────────────┤
//!                                                   ▼
//!                 render::{axis, plot, labels, legend} ──▶ scene::SvgDocument
//! ```

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod render;
pub mod scale;
pub mod scene;
pub mod state;
