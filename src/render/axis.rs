use crate::chart::{Layout, ScaleSet};
use crate::scale::Scale;
use crate::scene::{Group, Line, Node, Path, Text};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
/// Half-pixel shift that keeps 1px strokes crisp.
const OFFSET: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

/// Bottom (seniority) and left (salary) axes, each translated into place.
pub fn draw_axes(layout: &Layout, scales: &ScaleSet, tick_count: usize) -> Vec<Node> {
    let m = layout.margins;

    let x_axis = Group {
        class: Some("axis".to_string()),
        ..axis(Orient::Bottom, &scales.seniority, tick_count)
    }
    .translated(m.left, layout.graph.height + m.top);

    let y_axis = Group {
        class: Some("axis".to_string()),
        ..axis(Orient::Left, &scales.salary, tick_count)
    }
    .translated(m.left, m.top);

    vec![Node::Group(x_axis), Node::Group(y_axis)]
}

/// One axis group: the shared text style, a domain line, then one tick
/// group per generated tick.
pub fn axis(orient: Orient, scale: &dyn Scale, tick_count: usize) -> Group {
    let (r0, r1) = scale.range();
    let (r0, r1) = (r0 + OFFSET, r1 + OFFSET);
    let spacing = TICK_SIZE + TICK_PADDING;

    let anchor = match orient {
        Orient::Bottom => "middle",
        Orient::Left => "end",
    };
    let mut axis = Group {
        attrs: vec![
            ("fill", "none".to_string()),
            ("font-size", "10".to_string()),
            ("font-family", "sans-serif".to_string()),
            ("text-anchor", anchor.to_string()),
        ],
        ..Group::default()
    };

    let d = match orient {
        Orient::Bottom => format!("M{r0},{TICK_SIZE}V{OFFSET}H{r1}V{TICK_SIZE}"),
        Orient::Left => format!("M-{TICK_SIZE},{r0}H{OFFSET}V{r1}H-{TICK_SIZE}"),
    };
    axis.children.push(Node::Path(Path {
        class: Some("domain".to_string()),
        d,
        stroke: "currentColor".to_string(),
    }));

    for tick in scale.ticks(tick_count) {
        let pos = scale.apply(tick.value) + OFFSET;
        let (translate, line, text) = match orient {
            Orient::Bottom => (
                (pos, 0.0),
                Line {
                    x2: 0.0,
                    y2: TICK_SIZE,
                    stroke: "currentColor".to_string(),
                },
                Text {
                    y: Some(spacing),
                    dy: Some("0.71em".to_string()),
                    ..Text::new(tick.label)
                },
            ),
            Orient::Left => (
                (0.0, pos),
                Line {
                    x2: -TICK_SIZE,
                    y2: 0.0,
                    stroke: "currentColor".to_string(),
                },
                Text {
                    x: Some(-spacing),
                    dy: Some("0.32em".to_string()),
                    ..Text::new(tick.label)
                },
            ),
        };

        let mut group = Group {
            attrs: vec![("opacity", "1".to_string())],
            ..Group::with_class("tick").translated(translate.0, translate.1)
        };
        group.children.push(Node::Line(line));
        group.children.push(Node::Text(Text {
            fill: Some("currentColor".to_string()),
            ..text
        }));
        axis.children.push(Node::Group(group));
    }

    axis
}
