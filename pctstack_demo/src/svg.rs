// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a `pctstack_core::Scene`.

use std::fmt::Write as _;

use peniko::Brush;
use pctstack_core::{Mark, MarkPayload, RectMark, Scene, TextAnchor, TextBaseline, TextMark};

/// Serializes `scene` in paint order.
pub(crate) fn scene_to_svg(scene: &Scene) -> String {
    let size = scene.size();
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = size.width,
        h = size.height,
    );
    for mark in scene.sorted() {
        match &mark.payload {
            MarkPayload::Rect(r) => write_rect(&mut out, mark, r),
            MarkPayload::Text(t) => write_text(&mut out, mark, t),
        }
    }
    out.push_str("</svg>\n");
    out
}

fn write_rect(out: &mut String, mark: &Mark, r: &RectMark) {
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        r.rect.x0,
        r.rect.y0,
        r.rect.width(),
        r.rect.height(),
    );
    write_paint_attr(out, "fill", &r.fill);
    if let Some(stroke) = &r.stroke {
        write_paint_attr(out, "stroke", &stroke.brush);
        let _ = write!(out, r#" stroke-width="{}""#, stroke.width);
    }
    write_common_attrs(out, mark);
    match &mark.title {
        Some(title) => {
            let _ = writeln!(out, "><title>{}</title></rect>", escape_xml(title));
        }
        None => out.push_str("/>\n"),
    }
}

fn write_text(out: &mut String, mark: &Mark, t: &TextMark) {
    let baseline = match t.baseline {
        TextBaseline::Middle => "middle",
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Hanging => "hanging",
    };
    let anchor = match t.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}" dominant-baseline="{baseline}""#,
        t.pos.x, t.pos.y, t.style.font_size,
    );
    if let Some(family) = &t.style.font_family {
        let _ = write!(out, r#" font-family="{}""#, escape_xml(family));
    }
    if t.style.bold {
        out.push_str(r#" font-weight="bold""#);
    }
    write_paint_attr(out, "fill", &t.fill);
    write_common_attrs(out, mark);
    out.push('>');

    for line in &t.lines {
        let _ = write!(out, r#"<tspan x="{}" dy="{}em""#, t.pos.x, line.dy_em);
        if let Some(size) = line.font_size {
            let _ = write!(out, r#" font-size="{size}""#);
        }
        if line.bold {
            out.push_str(r#" font-weight="bold""#);
        }
        let _ = write!(out, ">{}</tspan>", escape_xml(&line.text));
    }
    if let Some(title) = &mark.title {
        let _ = write!(out, "<title>{}</title>", escape_xml(title));
    }
    out.push_str("</text>\n");
}

fn write_common_attrs(out: &mut String, mark: &Mark) {
    if mark.opacity != 1.0 {
        let _ = write!(out, r#" opacity="{}""#, mark.opacity);
    }
    if !mark.visible {
        out.push_str(r#" display="none""#);
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
