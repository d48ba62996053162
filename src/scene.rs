//! A small typed scene graph that serializes to SVG.
//!
//! Renderers return `Vec<Node>`; only [`SvgDocument`] knows how to write
//! markup.

use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Translate(f64, f64),
    Rotate(f64),
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Translate(x, y) => write!(f, "translate({x},{y})"),
            Transform::Rotate(deg) => write!(f, "rotate({deg})"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub id: Option<String>,
    pub class: Option<String>,
    pub transform: Vec<Transform>,
    pub fill: Option<String>,
    /// Presentation attributes inherited by the children (font, anchor, ...).
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Group {
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::default()
        }
    }

    pub fn translated(mut self, x: f64, y: f64) -> Self {
        self.transform.push(Transform::Translate(x, y));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub class: Option<String>,
    pub fill: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rect {
    pub width: f64,
    pub height: f64,
    pub fill: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x2: f64,
    pub y2: f64,
    pub stroke: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub class: Option<String>,
    pub d: String,
    pub stroke: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub content: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub dy: Option<String>,
    pub anchor: Option<&'static str>,
    pub fill: Option<String>,
    pub transform: Vec<Transform>,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Circle(Circle),
    Rect(Rect),
    Line(Line),
    Path(Path),
    Text(Text),
}

impl Node {
    /// Depth-first pre-order visit of this node and everything below it.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        if let Node::Group(g) = self {
            for child in &g.children {
                child.walk(visit);
            }
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn class(&self) -> Option<&str> {
        match self {
            Node::Group(g) => g.class.as_deref(),
            Node::Circle(c) => c.class.as_deref(),
            Node::Path(p) => p.class.as_deref(),
            _ => None,
        }
    }

    fn write_svg(&self, out: &mut String, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Node::Group(g) => {
                write!(out, "{indent}<g")?;
                write_opt(out, "id", g.id.as_deref())?;
                write_opt(out, "class", g.class.as_deref())?;
                write_transform(out, &g.transform)?;
                write_opt(out, "fill", g.fill.as_deref())?;
                for (name, value) in &g.attrs {
                    write!(out, " {name}=\"{}\"", escape_xml(value))?;
                }
                if g.children.is_empty() {
                    return writeln!(out, "/>");
                }
                writeln!(out, ">")?;
                for child in &g.children {
                    child.write_svg(out, depth + 1)?;
                }
                writeln!(out, "{indent}</g>")
            }
            Node::Circle(c) => {
                write!(
                    out,
                    "{indent}<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
                    Coord(c.cx),
                    Coord(c.cy),
                    Coord(c.r)
                )?;
                write_opt(out, "class", c.class.as_deref())?;
                if let Some(fill) = &c.fill {
                    write!(out, " style=\"fill: {}\"", escape_xml(fill))?;
                }
                writeln!(out, "/>")
            }
            Node::Rect(r) => {
                write!(out, "{indent}<rect width=\"{}\" height=\"{}\"", r.width, r.height)?;
                write_opt(out, "fill", r.fill.as_deref())?;
                writeln!(out, "/>")
            }
            Node::Line(l) => writeln!(
                out,
                "{indent}<line stroke=\"{}\" x2=\"{}\" y2=\"{}\"/>",
                escape_xml(&l.stroke),
                l.x2,
                l.y2
            ),
            Node::Path(p) => {
                write!(out, "{indent}<path")?;
                write_opt(out, "class", p.class.as_deref())?;
                writeln!(
                    out,
                    " stroke=\"{}\" d=\"{}\"/>",
                    escape_xml(&p.stroke),
                    escape_xml(&p.d)
                )
            }
            Node::Text(t) => {
                write!(out, "{indent}<text")?;
                write_opt(out, "fill", t.fill.as_deref())?;
                write_opt(out, "text-anchor", t.anchor)?;
                if let Some(x) = t.x {
                    write!(out, " x=\"{x}\"")?;
                }
                if let Some(y) = t.y {
                    write!(out, " y=\"{y}\"")?;
                }
                write_opt(out, "dy", t.dy.as_deref())?;
                write_transform(out, &t.transform)?;
                writeln!(out, ">{}</text>", escape_xml(&t.content))
            }
        }
    }
}

/// Root of a rendered chart. A document with no size and no children is
/// what a failed render leaves behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgDocument {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub children: Vec<Node>,
}

impl SvgDocument {
    pub fn is_blank(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.children.is_empty()
    }

    /// All nodes in document order.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        for child in &self.children {
            child.walk(&mut |n| out.push(n));
        }
        out
    }

    pub fn count(&self, pred: impl Fn(&Node) -> bool) -> usize {
        self.nodes().into_iter().filter(|n| pred(*n)).count()
    }

    /// Top-level group with the given class, in document order.
    pub fn groups_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Group> + 'a {
        self.children
            .iter()
            .filter_map(Node::as_group)
            .filter(move |g| g.class.as_deref() == Some(class))
    }

    pub fn group_by_id(&self, id: &str) -> Option<&Group> {
        self.children
            .iter()
            .filter_map(Node::as_group)
            .find(|g| g.id.as_deref() == Some(id))
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_svg(&mut out);
        out
    }

    fn write_svg(&self, out: &mut String) -> fmt::Result {
        write!(out, "<svg xmlns=\"http://www.w3.org/2000/svg\"")?;
        if let Some(w) = self.width {
            write!(out, " width=\"{w}\"")?;
        }
        if let Some(h) = self.height {
            write!(out, " height=\"{h}\"")?;
        }
        writeln!(out, ">")?;
        for child in &self.children {
            child.write_svg(out, 1)?;
        }
        writeln!(out, "</svg>")
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_svg())
    }
}

/// A coordinate as written into an attribute. Non-finite values print as
/// `NaN`, never `inf`.
struct Coord(f64);

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("NaN")
        }
    }
}

fn write_opt(out: &mut String, name: &str, value: Option<&str>) -> fmt::Result {
    match value {
        Some(v) => write!(out, " {name}=\"{}\"", escape_xml(v)),
        None => Ok(()),
    }
}

fn write_transform(out: &mut String, transform: &[Transform]) -> fmt::Result {
    if transform.is_empty() {
        return Ok(());
    }
    let parts: Vec<String> = transform.iter().map(Transform::to_string).collect();
    write!(out, " transform=\"{}\"", parts.join(" "))
}

pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
