//! Canvas2D renderer for the browser canvas.
//!
//! Draws a `DisplayList` in layout space under the view transform, then the
//! tooltip in screen space on top.

use mm_core::{EdgeCurve, ViewTransform, Viewport};
use mm_editor::Tooltip;
use mm_render::scene::{DisplayList, DrawItem, LABEL_PADDING, NodeBox, TOGGLE_HIT_WIDTH};
use mm_render::theme::Theme;
use web_sys::CanvasRenderingContext2d;

/// Render one frame.
pub fn render_scene(
    ctx: &CanvasRenderingContext2d,
    list: &DisplayList,
    view: &ViewTransform,
    viewport: Viewport,
    theme: &Theme,
    tooltip: Option<&Tooltip>,
) {
    // Clear canvas
    ctx.save();
    let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    ctx.set_fill_style_str(&theme.background.css());
    ctx.fill_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);

    let s = view.scale as f64;
    let _ = ctx.set_transform(s, 0.0, 0.0, s, view.x as f64, view.y as f64);

    for item in &list.items {
        match item {
            DrawItem::Edge { curve, highlighted } => draw_edge(ctx, curve, *highlighted, theme),
            DrawItem::Node(node) => draw_node(ctx, node, theme),
        }
    }

    let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    if let Some(tip) = tooltip {
        draw_tooltip(ctx, tip, theme);
    }
    ctx.restore();
}

// ─── Drawing primitives ─────────────────────────────────────────────────

fn draw_edge(ctx: &CanvasRenderingContext2d, curve: &EdgeCurve, highlighted: bool, theme: &Theme) {
    let (color, width) = if highlighted {
        (theme.edge_highlight, theme.highlight_width)
    } else {
        (theme.edge, theme.edge_width)
    };
    ctx.begin_path();
    ctx.move_to(curve.start.x as f64, curve.start.y as f64);
    ctx.bezier_curve_to(
        curve.c1.x as f64,
        curve.c1.y as f64,
        curve.c2.x as f64,
        curve.c2.y as f64,
        curve.end.x as f64,
        curve.end.y as f64,
    );
    ctx.set_stroke_style_str(&color.css());
    ctx.set_line_width(width as f64);
    ctx.stroke();
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &NodeBox, theme: &Theme) {
    let r = node.rect;
    let (x, y, w, h) = (r.x as f64, r.y as f64, r.width as f64, r.height as f64);
    let radius = theme.corner_radius as f64;

    let fill = if node.is_root {
        theme.root_fill
    } else if node.hovered {
        theme.hovered_fill
    } else {
        theme.node_fill
    };
    rounded_rect_path(ctx, x, y, w, h, radius);
    ctx.set_fill_style_str(&fill.css());
    ctx.fill();

    let (border, width) = if node.selected {
        (theme.selected_border, theme.highlight_width)
    } else {
        (theme.node_border, theme.border_width)
    };
    ctx.set_stroke_style_str(&border.css());
    ctx.set_line_width(width as f64);
    ctx.stroke();

    // Label, truncated to the space left of the toggle strip
    let reserved = if node.toggle.is_some() { TOGGLE_HIT_WIDTH } else { 0.0 };
    let max_width = (r.width - 2.0 * LABEL_PADDING - reserved) as f64;
    ctx.set_font(&format!("500 {}px {}", theme.font_size, theme.font_family));
    ctx.set_fill_style_str(&theme.label.css());
    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");
    let label = fit_label(ctx, &node.label, max_width);
    let _ = ctx.fill_text(&label, x + LABEL_PADDING as f64, y + h / 2.0);

    if let Some(toggle) = &node.toggle {
        let t = toggle.rect;
        rounded_rect_path(ctx, t.x as f64, t.y as f64, t.width as f64, t.height as f64, 4.0);
        ctx.set_fill_style_str(&theme.toggle_fill.css());
        ctx.fill();
        ctx.set_fill_style_str(&theme.label.css());
        ctx.set_text_align("center");
        let _ = ctx.fill_text(
            toggle.glyph(),
            (t.x + t.width / 2.0) as f64,
            (t.y + t.height / 2.0) as f64,
        );
    }
}

fn draw_tooltip(ctx: &CanvasRenderingContext2d, tip: &Tooltip, theme: &Theme) {
    const PAD: f64 = 8.0;
    ctx.set_font(&format!("12px {}", theme.font_family));
    let text_width = ctx.measure_text(&tip.content).map(|m| m.width()).unwrap_or(0.0);
    let (x, y) = (tip.x as f64, tip.y as f64);
    rounded_rect_path(ctx, x, y, text_width + 2.0 * PAD, 12.0 + 2.0 * PAD, 6.0);
    ctx.set_fill_style_str(&theme.node_fill.css());
    ctx.fill();
    ctx.set_stroke_style_str(&theme.node_border.css());
    ctx.set_line_width(1.0);
    ctx.stroke();
    ctx.set_fill_style_str(&theme.label.css());
    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(&tip.content, x + PAD, y + PAD + 6.0);
}

/// Shorten `label` with an ellipsis until it fits `max_width`.
fn fit_label(ctx: &CanvasRenderingContext2d, label: &str, max_width: f64) -> String {
    let width = |s: &str| ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0);
    if width(label) <= max_width {
        return label.to_string();
    }
    let mut chars: Vec<char> = label.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "…";
        if width(&candidate) <= max_width {
            return candidate;
        }
    }
    "…".to_string()
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    ctx.arc_to(x + w, y, x + w, y + r, r).unwrap_or(());
    ctx.line_to(x + w, y + h - r);
    ctx.arc_to(x + w, y + h, x + w - r, y + h, r).unwrap_or(());
    ctx.line_to(x + r, y + h);
    ctx.arc_to(x, y + h, x, y + h - r, r).unwrap_or(());
    ctx.line_to(x, y + r);
    ctx.arc_to(x, y, x + r, y, r).unwrap_or(());
    ctx.close_path();
}
