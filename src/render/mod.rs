//! Renderers. Each one reads only the shared layout and scales and returns
//! its nodes; [`crate::chart::init_graph`] decides where they go.

pub mod axis;
pub mod labels;
pub mod legend;
pub mod plot;
