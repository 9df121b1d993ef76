// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Renderers sort by `(z_index, MarkId)`, so marks within a layer keep their id order.

/// Stacked bar rectangles.
pub const SERIES_FILL: i32 = 0;
/// Segment labels drawn over the bars.
pub const SEGMENT_LABELS: i32 = 20;
/// Total labels above each column.
pub const TOTAL_LABELS: i32 = 30;
/// Category axis labels.
pub const AXIS_LABELS: i32 = 40;
