// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Responsive layout: content width, plot rectangle and scales.
//!
//! The chart keeps a minimum column width. Few categories still fill a fixed visible-column
//! budget; many categories widen the content past the viewport, and the host scrolls it
//! horizontally. Heights always follow the viewport.

use kurbo::{Rect, Size};

use crate::scale::{ScaleBand, ScaleLinear};

/// Space reserved around the plot rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// Above the plot (room for total labels).
    pub top: f64,
    /// Right of the plot.
    pub right: f64,
    /// Below the plot (room for axis labels).
    pub bottom: f64,
    /// Left of the plot.
    pub left: f64,
}

impl Margins {
    /// The chart's fixed margins.
    pub const DEFAULT: Self = Self {
        top: 40.0,
        right: 20.0,
        bottom: 80.0,
        left: 40.0,
    };

    /// Returns `left + right`.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Returns `top + bottom`.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Number of columns the minimum content width is sized for.
pub const MAX_VISIBLE_COLUMNS: usize = 5;
/// Width budget per column before spacing, in pixels.
pub const MIN_COLUMN_WIDTH: f64 = 140.0;

/// Output of [`ChartLayout::compute`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Margins around the plot.
    pub margins: Margins,
    /// Width of the whole drawing surface (may exceed the viewport).
    pub total_width: f64,
    /// Width of the plot area (`total_width` minus horizontal margins, never negative).
    pub available_width: f64,
    /// Height of the plot area (viewport height minus vertical margins, never negative).
    pub chart_height: f64,
    /// Surface height (the viewport height).
    pub height: f64,
    /// Category band scale over `[0, available_width]`, in plot coordinates.
    pub band: ScaleBand,
    /// Fraction scale `[0, 1] -> [chart_height, 0]`, in plot coordinates.
    pub y: ScaleLinear,
}

impl ChartLayout {
    /// Lays out `category_count` columns in `viewport` with the given inter-bar spacing.
    pub fn compute(category_count: usize, viewport: Size, spacing: f64) -> Self {
        Self::compute_with_margins(category_count, viewport, spacing, Margins::DEFAULT)
    }

    /// Like [`ChartLayout::compute`], with explicit margins.
    pub fn compute_with_margins(
        category_count: usize,
        viewport: Size,
        spacing: f64,
        margins: Margins,
    ) -> Self {
        let n = category_count as f64;
        let visible_width = MAX_VISIBLE_COLUMNS as f64 * MIN_COLUMN_WIDTH;
        let padding_space = n * MIN_COLUMN_WIDTH * spacing;
        let total_width = visible_width.max(n * MIN_COLUMN_WIDTH + padding_space);
        let available_width = (total_width - margins.horizontal()).max(0.0);

        let height = viewport.height.max(0.0);
        let chart_height = (height - margins.vertical()).max(0.0);

        Self {
            margins,
            total_width,
            available_width,
            chart_height,
            height,
            band: ScaleBand::new((0.0, available_width), category_count).with_padding(spacing),
            y: ScaleLinear::new((0.0, 1.0), (chart_height, 0.0)),
        }
    }

    /// Returns the surface size: content width by viewport height.
    pub fn surface_size(&self) -> Size {
        Size::new(self.total_width, self.height)
    }

    /// Returns the plot rectangle in surface coordinates.
    pub fn plot(&self) -> Rect {
        Rect::new(
            self.margins.left,
            self.margins.top,
            self.margins.left + self.available_width,
            self.margins.top + self.chart_height,
        )
    }

    /// Returns the surface x where the column at `index` starts.
    pub fn column_x(&self, index: usize) -> f64 {
        self.margins.left + self.band.x(index)
    }

    /// Returns the surface x of the center of the column at `index`.
    pub fn column_center(&self, index: usize) -> f64 {
        self.margins.left + self.band.center(index)
    }

    /// Returns the column width.
    pub fn column_width(&self) -> f64 {
        self.band.band_width()
    }

    /// Returns the surface y for a stack fraction.
    pub fn y(&self, fraction: f64) -> f64 {
        self.margins.top + self.y.map(fraction)
    }

    /// Returns the surface rectangle of a stack span.
    pub fn segment_rect(&self, index: usize, y0: f64, y1: f64) -> Rect {
        let x0 = self.column_x(index);
        Rect::new(x0, self.y(y1), x0 + self.column_width(), self.y(y0))
    }
}
