// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks: the visual primitives a render pass emits.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;

use kurbo::{Point, Rect};
use peniko::Brush;
use smallvec::SmallVec;

/// Stable identity for a mark.
///
/// Chart code derives ids from a per-layer base plus a row index, so the same logical element
/// keeps the same id across update cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates an id at `index` within the id range starting at `base`.
    pub const fn offset(base: u64, index: usize) -> Self {
        Self(base + index as u64)
    }
}

/// Horizontal text anchor, matching SVG `text-anchor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor position.
    Start,
    /// Text is centered on the anchor position.
    Middle,
    /// Text ends at the anchor position.
    End,
}

/// Vertical text baseline, matching SVG `dominant-baseline`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Alphabetic baseline.
    Alphabetic,
    /// The anchor position is the vertical middle of the first line.
    Middle,
    /// The anchor position is the top of the first line.
    Hanging,
}

/// Font settings shared by every line of a text mark.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family, or `None` for the host default.
    pub font_family: Option<Arc<str>>,
    /// Whether the text is bold.
    pub bold: bool,
}

impl TextStyle {
    /// Creates a regular-weight style in the host default family.
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: None,
            bold: false,
        }
    }

    /// Sets the font family.
    pub fn with_family(mut self, family: impl Into<Arc<str>>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Sets the weight.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }
}

/// One line of a (possibly multi-line) text mark.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    /// Line content.
    pub text: String,
    /// Vertical offset from the previous line (or from the anchor, for the first line), in em.
    pub dy_em: f64,
    /// Per-line font size override.
    pub font_size: Option<f64>,
    /// Per-line bold override.
    pub bold: bool,
}

impl TextLine {
    /// Creates a line with an offset in em.
    pub fn new(text: impl Into<String>, dy_em: f64) -> Self {
        Self {
            text: text.into(),
            dy_em,
            font_size: None,
            bold: false,
        }
    }

    /// Overrides the font size for this line.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Makes this line bold.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }
}

/// A paint + width pair for rectangle borders.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in pixels.
    pub width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, width: f64) -> Self {
        Self {
            brush: brush.into(),
            width,
        }
    }
}

/// A filled (and optionally stroked) rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Border.
    pub stroke: Option<StrokeStyle>,
}

/// A text element made of zero or more lines.
///
/// A text mark with no lines is still meaningful: it can carry a tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Lines, laid out top to bottom using each line's `dy_em`.
    pub lines: SmallVec<[TextLine; 3]>,
    /// Font settings.
    pub style: TextStyle,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

impl TextMark {
    /// Creates an empty text mark at `pos`.
    pub fn new(pos: Point, style: TextStyle) -> Self {
        Self {
            pos,
            lines: SmallVec::new(),
            style,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Middle,
            fill: Brush::default(),
        }
    }

    /// Returns all line contents joined by `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&line.text);
        }
        out
    }
}

/// Mark geometry and paint.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A rectangle.
    Rect(RectMark),
    /// A text element.
    Text(TextMark),
}

impl MarkPayload {
    /// Returns the exact bounds for geometry with known extent.
    ///
    /// Text has no intrinsic bounds without shaping, so it returns `None`.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Text(_) => None,
        }
    }
}

/// A rendered element.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable id.
    pub id: MarkId,
    /// Rendering order hint. Renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Element opacity in `[0, 1]`.
    pub opacity: f64,
    /// Whether the element is displayed at all.
    pub visible: bool,
    /// Tooltip text.
    pub title: Option<String>,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Starts building a mark with the given id.
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder {
            id,
            z_index: 0,
            opacity: 1.0,
            title: None,
        }
    }

    /// Returns the rectangle payload, if this is a rect mark.
    pub fn as_rect(&self) -> Option<&RectMark> {
        match &self.payload {
            MarkPayload::Rect(r) => Some(r),
            MarkPayload::Text(_) => None,
        }
    }

    /// Returns the text payload, if this is a text mark.
    pub fn as_text(&self) -> Option<&TextMark> {
        match &self.payload {
            MarkPayload::Text(t) => Some(t),
            MarkPayload::Rect(_) => None,
        }
    }
}

/// Builder returned by [`Mark::builder`].
#[derive(Clone, Debug)]
pub struct MarkBuilder {
    id: MarkId,
    z_index: i32,
    opacity: f64,
    title: Option<String>,
}

impl MarkBuilder {
    /// Sets the z-index.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Attaches a tooltip.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Finishes as a rect mark.
    pub fn rect(self, rect: RectMark) -> Mark {
        self.build(MarkPayload::Rect(rect))
    }

    /// Finishes as a text mark.
    pub fn text(self, text: TextMark) -> Mark {
        self.build(MarkPayload::Text(text))
    }

    fn build(self, payload: MarkPayload) -> Mark {
        Mark {
            id: self.id,
            z_index: self.z_index,
            opacity: self.opacity,
            visible: true,
            title: self.title,
            payload,
        }
    }
}
