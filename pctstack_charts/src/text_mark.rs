// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text mark generation.

extern crate alloc;

use alloc::string::String;

use kurbo::Point;
use peniko::Brush;
use pctstack_core::{Mark, MarkId, TextAnchor, TextBaseline, TextLine, TextMark, TextStyle};
use smallvec::SmallVec;

/// A text mark spec.
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Lines, top to bottom (unshaped).
    pub lines: SmallVec<[TextLine; 3]>,
    /// Font settings.
    pub style: TextStyle,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Tooltip.
    pub title: Option<String>,
    /// Rendering order hint (`pctstack_core::Mark::z_index`).
    pub z_index: i32,
}

impl TextMarkSpec {
    /// Creates a new, empty text mark spec with default styling.
    pub fn new(id: MarkId, pos: Point) -> Self {
        Self {
            id,
            pos,
            lines: SmallVec::new(),
            style: TextStyle::new(12.0),
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Middle,
            fill: Brush::default(),
            title: None,
            z_index: crate::z_order::SEGMENT_LABELS,
        }
    }

    /// Appends a line.
    pub fn with_line(mut self, line: TextLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Sets the font settings.
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the text anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the text baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Attaches a tooltip.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mut text = TextMark::new(self.pos, self.style.clone());
        text.lines = self.lines.clone();
        text.anchor = self.anchor;
        text.baseline = self.baseline;
        text.fill = self.fill.clone();

        let builder = Mark::builder(self.id).z_index(self.z_index);
        match &self.title {
            Some(title) => builder.title(title.clone()).text(text),
            None => builder.text(text),
        }
    }
}
