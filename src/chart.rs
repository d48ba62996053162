use std::path::Path;

use crate::color::OrdinalScale;
use crate::config::{ChartConfig, Margins, Size};
use crate::data::loader::load_dataset;
use crate::data::model::EmployeeDataset;
use crate::render::{axis, labels, legend, plot};
use crate::scale::{LinearScale, LogScale};
use crate::scene::{Group, Node, SvgDocument};
use crate::state::ChartState;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Screen size, margins and the graph area left between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub screen: Size,
    pub margins: Margins,
    pub graph: Size,
}

impl Layout {
    pub fn new(screen: Size, margins: Margins) -> Self {
        let graph = Size {
            width: screen.width - margins.left - margins.right,
            height: screen.height - margins.top - margins.bottom,
        };
        Self {
            screen,
            margins,
            graph,
        }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.screen, config.margins)
    }

    /// Centre of the graph area in screen coordinates.
    pub fn graph_center(&self) -> (f64, f64) {
        (
            self.graph.width / 2.0 + self.margins.left,
            self.graph.height / 2.0 + self.margins.top,
        )
    }
}

// ---------------------------------------------------------------------------
// Scales
// ---------------------------------------------------------------------------

/// The three scales shared read-only by every renderer.
#[derive(Debug, Clone)]
pub struct ScaleSet {
    pub seniority: LinearScale,
    pub salary: LogScale,
    pub area: OrdinalScale,
}

impl ScaleSet {
    /// Seniority is linear from zero, salary is logarithmic from the
    /// configured floor, and departments take palette colours in the order
    /// the data uses them, followed by legend-only departments.
    pub fn build(dataset: &EmployeeDataset, layout: &Layout, config: &ChartConfig) -> Self {
        let max_seniority = dataset.max_seniority();
        let max_salary = dataset.max_salary();
        log::debug!("maxSeniority {max_seniority}, maxSalary {max_salary}");

        let seniority = LinearScale::new((0.0, max_seniority), (0.0, layout.graph.width));
        let salary = LogScale::new((config.salary_floor, max_salary), (layout.graph.height, 0.0));
        let area = OrdinalScale::new(
            dataset.areas.iter().chain(config.legend_areas.iter()),
            config.palette.colors(),
        );
        log::debug!("area colours {area}");

        Self {
            seniority,
            salary,
            area,
        }
    }
}

// ---------------------------------------------------------------------------
// Graph initialisation
// ---------------------------------------------------------------------------

/// Lay out the chart and run the renderers in order: axes, plot, labels,
/// legend. The plot group is created first so it sits underneath the axes.
pub fn init_graph(dataset: &EmployeeDataset, config: &ChartConfig) -> SvgDocument {
    let layout = Layout::from_config(config);

    let mut target = Group {
        id: Some("plot".to_string()),
        ..Group::default()
    }
    .translated(layout.margins.left, layout.margins.top);

    let scales = ScaleSet::build(dataset, &layout, config);

    let axes = axis::draw_axes(&layout, &scales, config.tick_count);
    target.children = plot::draw_plot(&dataset.employees, &scales, config.mark_radius);
    let labels = labels::draw_labels(&layout, config);
    let legend = legend::draw_legend(&layout, config, &scales.area);

    let mut children = Vec::with_capacity(7);
    children.push(Node::Group(target));
    children.extend(axes);
    children.extend(labels);
    children.push(legend);

    SvgDocument {
        width: Some(layout.screen.width),
        height: Some(layout.screen.height),
        children,
    }
}

/// Await the dataset, then render it. A failed load leaves the document
/// blank and records a single error diagnostic.
pub async fn run(path: &Path, config: ChartConfig) -> ChartState {
    let result = load_dataset(path).await;
    let mut state = ChartState::new(config);
    state.apply(result);
    state
}
