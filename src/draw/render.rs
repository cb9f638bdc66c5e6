//! Cairo-based rendering functions for annotations.

use super::annotation::{Annotation, AnnotationKind};
use super::color::{Color, WHITE};
use super::font::FontDescriptor;
use super::style::{RenderStyle, resolve_color};
use crate::util;
use std::f64::consts::PI;

/// Side of the square design box the marker glyphs are authored in.
const GLYPH_DESIGN_SIZE: f64 = 24.0;

/// Renders all annotations in a collection to a Cairo context.
///
/// Annotations are drawn in list order (first annotation = bottom layer).
pub fn render_annotations(ctx: &cairo::Context, annotations: &[Annotation], style: &RenderStyle) {
    for annotation in annotations {
        render_annotation(ctx, annotation, style);
    }
}

/// Renders a single annotation to a Cairo context.
///
/// Dispatches to the per-variant rendering function.
pub fn render_annotation(ctx: &cairo::Context, annotation: &Annotation, style: &RenderStyle) {
    let kind = annotation.kind();
    match annotation {
        Annotation::Socket { x, y }
        | Annotation::Switch { x, y }
        | Annotation::Lan { x, y }
        | Annotation::Tv { x, y } => {
            render_marker(ctx, kind, *x, *y, style.marker_diameter);
        }
        Annotation::Text {
            x,
            y,
            text,
            color,
            font_size,
        } => {
            render_text(
                ctx,
                *x,
                *y,
                text,
                resolve_color(Some(color), kind),
                *font_size,
                &style.font,
                style.text_outline_width,
            );
        }
        Annotation::Arrow {
            x,
            y,
            x2,
            y2,
            color,
        } => {
            render_arrow(
                ctx,
                *x,
                *y,
                *x2,
                *y2,
                resolve_color(color.as_deref(), kind),
                style,
            );
        }
        Annotation::Line {
            x,
            y,
            x2,
            y2,
            color,
        } => {
            render_line(
                ctx,
                *x,
                *y,
                *x2,
                *y2,
                resolve_color(color.as_deref(), kind),
                style.stroke_width,
            );
        }
        Annotation::Frame {
            x,
            y,
            width,
            height,
            color,
        } => {
            render_frame(
                ctx,
                *x,
                *y,
                *width,
                *height,
                resolve_color(color.as_deref(), kind),
                style.stroke_width,
            );
        }
    }
}

fn set_color(ctx: &cairo::Context, color: Color) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
}

/// Render an icon marker: a filled disc in the kind color with a white glyph on top.
pub fn render_marker(ctx: &cairo::Context, kind: AnnotationKind, x: f64, y: f64, diameter: f64) {
    ctx.save().ok();

    set_color(ctx, resolve_color(None, kind));
    ctx.new_path();
    ctx.arc(x, y, diameter / 2.0, 0.0, 2.0 * PI);
    let _ = ctx.fill();

    render_glyph(ctx, kind, x, y, diameter);

    ctx.restore().ok();
}

/// Strokes the marker glyph centered on `(cx, cy)`.
///
/// Glyphs are authored in a 24-unit box with a 2-unit stroke and scaled to the
/// marker diameter.
fn render_glyph(ctx: &cairo::Context, kind: AnnotationKind, cx: f64, cy: f64, diameter: f64) {
    let scale = diameter / GLYPH_DESIGN_SIZE;

    ctx.save().ok();
    ctx.translate(cx - diameter / 2.0, cy - diameter / 2.0);
    ctx.scale(scale, scale);
    ctx.new_path();

    set_color(ctx, WHITE);
    ctx.set_line_width(2.0);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    let segment = |x1: f64, y1: f64, x2: f64, y2: f64| {
        ctx.move_to(x1, y1);
        ctx.line_to(x2, y2);
    };

    match kind {
        AnnotationKind::Socket => {
            ctx.new_sub_path();
            ctx.arc(12.0, 12.0, 10.0, 0.0, 2.0 * PI);
            segment(12.0, 8.0, 12.0, 12.0);
            segment(8.0, 16.0, 10.0, 16.0);
            segment(14.0, 16.0, 16.0, 16.0);
        }
        AnnotationKind::Switch => {
            ctx.new_sub_path();
            ctx.arc(12.0, 12.0, 10.0, 0.0, 2.0 * PI);
            segment(15.0, 15.0, 20.0, 10.0);
            segment(0.5, 4.5, 5.5, 9.5);
        }
        AnnotationKind::Lan => {
            rounded_rect(ctx, 3.0, 14.0, 18.0, 7.0, 2.0);
            for x in [6.0, 10.0, 14.0, 18.0] {
                segment(x, 14.0, x, 10.0);
            }
            segment(12.0, 10.0, 12.0, 3.0);
            ctx.move_to(8.0, 3.0);
            ctx.line_to(16.0, 3.0);
            ctx.line_to(12.0, 7.0);
            ctx.close_path();
        }
        AnnotationKind::Tv => {
            rounded_rect(ctx, 2.0, 7.0, 20.0, 15.0, 2.0);
            ctx.move_to(17.0, 2.0);
            ctx.line_to(12.0, 7.0);
            ctx.line_to(7.0, 2.0);
        }
        _ => {}
    }

    let _ = ctx.stroke();
    ctx.restore().ok();
}

fn rounded_rect(ctx: &cairo::Context, x: f64, y: f64, w: f64, h: f64, r: f64) {
    ctx.new_sub_path();
    ctx.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    ctx.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    ctx.arc(x + r, y + h - r, r, PI / 2.0, PI);
    ctx.arc(x + r, y + r, r, PI, 3.0 * PI / 2.0);
    ctx.close_path();
}

/// Render a straight line
pub fn render_line(
    ctx: &cairo::Context,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    thick: f64,
) {
    set_color(ctx, color);
    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Butt);

    ctx.new_path();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    let _ = ctx.stroke();
}

/// Render a rectangle outline
pub fn render_frame(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    color: Color,
    thick: f64,
) {
    set_color(ctx, color);
    ctx.set_line_width(thick);
    ctx.set_line_join(cairo::LineJoin::Miter);

    // Live previews may still carry negative extents
    let (norm_x, norm_w) = util::normalize_span(x, x + w);
    let (norm_y, norm_h) = util::normalize_span(y, y + h);

    ctx.new_path();
    ctx.rectangle(norm_x, norm_y, norm_w, norm_h);
    let _ = ctx.stroke();
}

/// Render an arrow: shaft from `(x1, y1)` to `(x2, y2)` plus a filled head at the tip.
pub fn render_arrow(
    ctx: &cairo::Context,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    style: &RenderStyle,
) {
    render_line(ctx, x1, y1, x2, y2, color, style.stroke_width);

    let [(lx, ly), (rx, ry)] = util::arrowhead_points(
        x1,
        y1,
        x2,
        y2,
        style.arrow_head_length,
        style.arrow_head_angle,
    );

    set_color(ctx, color);
    ctx.new_path();
    ctx.move_to(x2, y2);
    ctx.line_to(lx, ly);
    ctx.line_to(rx, ry);
    ctx.close_path();
    let _ = ctx.fill();
}

/// Renders a text label with its baseline starting at `(x, y)`.
///
/// The glyphs are filled with `color` over a contrasting outline so labels stay
/// legible on both light and dark areas of the plan.
#[allow(clippy::too_many_arguments)]
pub fn render_text(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    text: &str,
    color: Color,
    size: f64,
    font_descriptor: &FontDescriptor,
    outline_width: f64,
) {
    if text.is_empty() {
        return;
    }

    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&font_descriptor.to_pango(size)));
    layout.set_text(text);

    // Pango positions layouts by their top-left corner; shift up to the baseline
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;

    ctx.new_path();
    ctx.move_to(x, y - baseline);
    pangocairo::functions::layout_path(ctx, &layout);

    set_color(ctx, color.contrasting());
    ctx.set_line_width(outline_width);
    ctx.set_line_join(cairo::LineJoin::Round);
    let _ = ctx.stroke_preserve();

    set_color(ctx, color);
    let _ = ctx.fill();

    ctx.restore().ok();
}
