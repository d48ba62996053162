use crate::chart::Layout;
use crate::color::{to_hex, OrdinalScale};
use crate::config::ChartConfig;
use crate::scene::{Group, Node, Rect, Text};

/// Gap between the swatch's left edge and its label.
const LABEL_X: f64 = 15.0;

/// A `legend` group anchored at the top-right of the graph area with one
/// `entry` per configured department, in list order. Departments seen in the
/// data but missing from the list get no entry.
pub fn draw_legend(layout: &Layout, config: &ChartConfig, areas: &OrdinalScale) -> Node {
    let mut legend = Group::with_class("legend").translated(layout.graph.width, layout.margins.top);

    for (index, area) in config.legend_areas.iter().enumerate() {
        let mut entry = Group {
            fill: Some(to_hex(areas.color_for(area))),
            ..Group::with_class("entry").translated(0.0, index as f64 * config.legend_spacing)
        };
        entry.children.push(Node::Rect(Rect {
            width: config.legend_swatch,
            height: config.legend_swatch,
            fill: None,
        }));
        entry.children.push(Node::Text(Text {
            x: Some(LABEL_X),
            y: Some(config.legend_swatch),
            ..Text::new(area.as_str())
        }));
        legend.children.push(Node::Group(entry));
    }

    Node::Group(legend)
}
