// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle mark generation.

use kurbo::Rect;
use peniko::Brush;
use pctstack_core::{Mark, MarkId, RectMark, StrokeStyle};

/// A rectangle mark spec.
#[derive(Clone, Debug)]
pub struct RectMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Rectangle geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Optional border.
    pub stroke: Option<StrokeStyle>,
    /// Element opacity.
    pub opacity: f64,
    /// Rendering order hint (`pctstack_core::Mark::z_index`).
    pub z_index: i32,
}

impl RectMarkSpec {
    /// Creates a new rectangle mark spec.
    pub fn new(id: MarkId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            fill: Brush::default(),
            stroke: None,
            opacity: 1.0,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the border. A non-positive width means no border.
    pub fn with_stroke(mut self, brush: impl Into<Brush>, width: f64) -> Self {
        self.stroke = (width > 0.0).then(|| StrokeStyle::solid(brush, width));
        self
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        Mark::builder(self.id)
            .z_index(self.z_index)
            .opacity(self.opacity)
            .rect(RectMark {
                rect: self.rect,
                fill: self.fill.clone(),
                stroke: self.stroke.clone(),
            })
    }
}
