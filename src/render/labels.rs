use crate::chart::Layout;
use crate::config::ChartConfig;
use crate::scene::{Group, Node, Text, Transform};

/// Distance of the x title's baseline above the bottom edge of the screen.
const X_TITLE_INSET: f64 = 5.0;
/// Left edge offset of the rotated y title.
const Y_TITLE_X: f64 = 5.0;
/// Baseline of the chart title from the top of the screen.
const TITLE_Y: f64 = 25.0;

/// The x-axis title, the rotated y-axis title and the chart title, each in
/// its own `label` group and centred on the graph area.
pub fn draw_labels(layout: &Layout, config: &ChartConfig) -> Vec<Node> {
    let (center_x, center_y) = layout.graph_center();
    let m = layout.margins;

    let mut x_label = Group::with_class("label").translated(
        center_x,
        layout.graph.height + m.top + m.bottom - X_TITLE_INSET,
    );
    x_label.children.push(middle(&config.x_title, Vec::new()));

    let mut y_label = Group::with_class("label").translated(Y_TITLE_X, center_y);
    y_label.transform.push(Transform::Rotate(90.0));
    y_label.children.push(middle(&config.y_title, Vec::new()));

    // The title positions its text rather than its group.
    let mut title = Group::with_class("label");
    title.children.push(middle(
        &config.title,
        vec![Transform::Translate(center_x, TITLE_Y)],
    ));

    vec![
        Node::Group(x_label),
        Node::Group(y_label),
        Node::Group(title),
    ]
}

fn middle(content: &str, transform: Vec<Transform>) -> Node {
    Node::Text(Text {
        anchor: Some("middle"),
        transform,
        ..Text::new(content)
    })
}
