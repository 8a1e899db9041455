//! Display list → standalone SVG document.

use crate::scene::{DisplayList, DrawItem, LABEL_PADDING, NodeBox, TOGGLE_HIT_WIDTH};
use crate::theme::Theme;
use mm_core::{Rect, ViewTransform, Viewport};
use std::fmt::Write;

/// Size used when there is nothing to frame.
const EMPTY_FRAME: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

/// What part of the layout plane the document shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SvgFrame {
    /// Exactly what the canvas shows: the viewport size with the view transform applied.
    Viewport {
        transform: ViewTransform,
        viewport: Viewport,
    },
    /// All content at scale 1, with a margin on every side.
    Content { padding: f32 },
}

impl SvgFrame {
    /// Document size in CSS pixels.
    pub fn size(&self, list: &DisplayList) -> (f32, f32) {
        match self {
            SvgFrame::Viewport { viewport, .. } => (viewport.width, viewport.height),
            SvgFrame::Content { padding } => {
                let r = content_frame(list, *padding);
                (r.width, r.height)
            }
        }
    }

    fn group_transform(&self, list: &DisplayList) -> String {
        match self {
            SvgFrame::Viewport { transform, .. } => format!(
                "translate({}, {}) scale({})",
                transform.x, transform.y, transform.scale
            ),
            SvgFrame::Content { padding } => {
                let r = content_frame(list, *padding);
                format!("translate({}, {})", -r.x, -r.y)
            }
        }
    }
}

fn content_frame(list: &DisplayList, padding: f32) -> Rect {
    list.bounds.map_or(EMPTY_FRAME, |b| b.inflate(padding))
}

pub fn render_svg(list: &DisplayList, frame: SvgFrame, theme: &Theme) -> String {
    let (width, height) = frame.size(list);
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    svg.push_str("<style>\n");
    let _ = writeln!(svg, "  text {{ font-family: {}; }}", theme.font_family);
    svg.push_str("</style>\n");
    let _ = writeln!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\" />",
        theme.background.css()
    );
    let _ = writeln!(svg, "<g transform=\"{}\">", frame.group_transform(list));

    for item in &list.items {
        match item {
            DrawItem::Edge { curve, highlighted } => {
                let (color, width) = if *highlighted {
                    (theme.edge_highlight, theme.highlight_width)
                } else {
                    (theme.edge, theme.edge_width)
                };
                let _ = writeln!(
                    svg,
                    "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" />",
                    curve.svg_path(),
                    color.css(),
                    width
                );
            }
            DrawItem::Node(node) => render_node(&mut svg, node, theme),
        }
    }

    svg.push_str("</g>\n</svg>");
    svg
}

fn render_node(out: &mut String, node: &NodeBox, theme: &Theme) {
    let r = node.rect;
    let fill = if node.is_root {
        theme.root_fill
    } else if node.hovered {
        theme.hovered_fill
    } else {
        theme.node_fill
    };
    let (stroke, stroke_width) = if node.selected {
        (theme.selected_border, theme.highlight_width)
    } else {
        (theme.node_border, theme.border_width)
    };
    let _ = writeln!(
        out,
        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{radius}\" ry=\"{radius}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" />",
        r.x,
        r.y,
        r.width,
        r.height,
        fill.css(),
        stroke.css(),
        stroke_width,
        radius = theme.corner_radius,
    );

    let _ = writeln!(
        out,
        "  <text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\" dominant-baseline=\"central\">{}</text>",
        r.x + LABEL_PADDING,
        r.y + r.height / 2.0,
        theme.font_size,
        theme.label.css(),
        escape(&node.label)
    );

    if let Some(toggle) = &node.toggle {
        let t = toggle.rect;
        let _ = writeln!(
            out,
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"4\" ry=\"4\" fill=\"{}\" />",
            t.x,
            t.y,
            t.width,
            t.height,
            theme.toggle_fill.css()
        );
        let _ = writeln!(
            out,
            "  <text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\">{}</text>",
            r.right() - TOGGLE_HIT_WIDTH / 2.0,
            t.y + t.height / 2.0,
            theme.font_size,
            theme.label.css(),
            toggle.glyph()
        );
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
