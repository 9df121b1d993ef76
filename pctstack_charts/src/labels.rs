// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment labels (inside the bars) and total labels (above the columns).

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use pctstack_core::{Mark, MarkId, TextAnchor, TextBaseline, TextLine, TextStyle};
use pctstack_transforms::{Segment, StackedData};
use smallvec::SmallVec;

use crate::format::{format_percent, format_value};
use crate::layout::ChartLayout;
use crate::settings::DataLabelSettings;
use crate::text_mark::TextMarkSpec;

/// First mark id used for segment labels; segment `i`'s label is `SEGMENT_LABEL_ID_BASE + i`.
pub const SEGMENT_LABEL_ID_BASE: u64 = 2 << 32;
/// First mark id used for total labels; category `i`'s total is `TOTAL_LABEL_ID_BASE + i`.
pub const TOTAL_LABEL_ID_BASE: u64 = 3 << 32;

/// Segments at most this tall (in pixels) get no inline label.
pub const MIN_LABEL_HEIGHT: f64 = 20.0;
/// Segments must be taller than this (in pixels) to fit the series-name line.
pub const MIN_SERIES_NAME_HEIGHT: f64 = 45.0;
/// Distance between consecutive label lines, in em.
pub const LINE_HEIGHT_EM: f64 = 1.2;
/// Gap between the top of the stack and its total label.
pub const TOTAL_LABEL_GAP: f64 = 10.0;

/// Chooses the inline lines for a segment `height` pixels tall.
///
/// Returns nothing for segments of [`MIN_LABEL_HEIGHT`] or less. Otherwise the series name
/// (when enabled and taller than [`MIN_SERIES_NAME_HEIGHT`]), the percent and the value
/// follow each other, and the block is vertically centered on the anchor.
pub fn segment_label_lines(
    segment: &Segment,
    height: f64,
    settings: &DataLabelSettings,
) -> SmallVec<[TextLine; 3]> {
    let mut lines = SmallVec::new();
    if segment.value <= 0.0 || height <= MIN_LABEL_HEIGHT {
        return lines;
    }

    let show_series = settings.show_series_names && height > MIN_SERIES_NAME_HEIGHT;
    let count = [show_series, settings.show_percent, settings.show_values]
        .into_iter()
        .filter(|&on| on)
        .count();
    let mut dy = if count > 1 {
        -((count - 1) as f64) * 0.5
    } else {
        0.0
    };

    if show_series {
        let size = (settings.label_font_size - 1.0).max(8.0);
        lines.push(
            TextLine::new(segment.series_name.as_str(), dy)
                .with_font_size(size)
                .with_bold(true),
        );
        dy = LINE_HEIGHT_EM;
    }
    if settings.show_percent {
        lines.push(TextLine::new(format_percent(segment.fraction()), dy));
        dy = LINE_HEIGHT_EM;
    }
    if settings.show_values {
        lines.push(TextLine::new(
            format_value(segment.value, settings.value_format),
            dy,
        ));
    }
    lines
}

/// Returns the tooltip of a segment: series name, percent and value on separate lines.
pub fn segment_tooltip(segment: &Segment, settings: &DataLabelSettings) -> String {
    format!(
        "{}\n{}\n{}",
        segment.series_name,
        format_percent(segment.fraction()),
        format_value(segment.value, settings.value_format)
    )
}

/// Labels drawn inside each bar.
///
/// Every segment gets a label mark, even when it is too short for inline text, so its
/// tooltip is always available.
#[derive(Clone, Debug)]
pub struct SegmentLabelSpec<'a> {
    /// Scales and plot placement.
    pub layout: &'a ChartLayout,
    /// Label visibility and formatting.
    pub settings: &'a DataLabelSettings,
    /// Rendering order hint (`pctstack_core::Mark::z_index`).
    pub z_index: i32,
}

impl<'a> SegmentLabelSpec<'a> {
    /// Creates a segment label spec.
    pub fn new(layout: &'a ChartLayout, settings: &'a DataLabelSettings) -> Self {
        Self {
            layout,
            settings,
            z_index: crate::z_order::SEGMENT_LABELS,
        }
    }

    /// Returns the id of the label for the segment at `index`.
    pub fn label_id(index: usize) -> MarkId {
        MarkId::offset(SEGMENT_LABEL_ID_BASE, index)
    }

    /// Generates one label mark per segment, in segment order.
    pub fn marks(&self, data: &StackedData) -> Vec<Mark> {
        let style = TextStyle::new(self.settings.label_font_size);
        data.segments()
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                let top = self.layout.y(segment.y1);
                let bottom = self.layout.y(segment.y0);
                let pos = Point::new(
                    self.layout.column_center(segment.category_index),
                    (top + bottom) * 0.5,
                );
                let mut spec = TextMarkSpec::new(Self::label_id(i), pos)
                    .with_style(style.clone())
                    .with_fill(self.settings.label_color.0)
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Middle)
                    .with_title(segment_tooltip(segment, self.settings))
                    .with_z_index(self.z_index);
                spec.lines = segment_label_lines(segment, bottom - top, self.settings);
                spec.mark()
            })
            .collect()
    }
}

/// Bold totals centered above each column.
#[derive(Clone, Debug)]
pub struct TotalLabelSpec<'a> {
    /// Scales and plot placement.
    pub layout: &'a ChartLayout,
    /// Label formatting.
    pub settings: &'a DataLabelSettings,
    /// Rendering order hint (`pctstack_core::Mark::z_index`).
    pub z_index: i32,
}

impl<'a> TotalLabelSpec<'a> {
    /// Creates a total label spec.
    pub fn new(layout: &'a ChartLayout, settings: &'a DataLabelSettings) -> Self {
        Self {
            layout,
            settings,
            z_index: crate::z_order::TOTAL_LABELS,
        }
    }

    /// Generates one total mark per included category, or nothing if totals are hidden.
    pub fn marks(&self, data: &StackedData) -> Vec<Mark> {
        if !self.settings.show_totals {
            return Vec::new();
        }
        let y = self.layout.y(1.0) - TOTAL_LABEL_GAP;
        let style = TextStyle::new(self.settings.total_font_size).with_bold(true);
        data.totals()
            .iter()
            .enumerate()
            .map(|(i, total)| {
                let pos = Point::new(self.layout.column_center(i), y);
                TextMarkSpec::new(MarkId::offset(TOTAL_LABEL_ID_BASE, i), pos)
                    .with_line(TextLine::new(
                        format_value(total.value, self.settings.value_format),
                        0.0,
                    ))
                    .with_style(style.clone())
                    .with_fill(self.settings.total_color.0)
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Alphabetic)
                    .with_z_index(self.z_index)
                    .mark()
            })
            .collect()
    }
}
