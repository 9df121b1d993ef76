// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Percent-of-total stacking.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use pctstack_core::SelectionKey;

use crate::dataset::{CategoryKey, Dataset};
use crate::identity::SelectionKeyBuilder;

/// The summed positive value of one included category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    /// Category key.
    pub category: CategoryKey,
    /// Row index of the category in the source dataset.
    pub source_index: usize,
    /// Sum of the category's strictly positive series values.
    pub value: f64,
}

/// One series' share of one category.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// Category key.
    pub category: CategoryKey,
    /// Position of the category among included categories (the band index).
    pub category_index: usize,
    /// Display name of the originating series.
    pub series_name: String,
    /// Ordinal of the series in the dataset (drives palette color).
    pub series_index: usize,
    /// Cumulative fraction where the segment starts.
    pub y0: f64,
    /// Cumulative fraction where the segment ends.
    pub y1: f64,
    /// Original, unnormalized value.
    pub value: f64,
    /// Identity of the `(category, series)` cell.
    pub selection_key: SelectionKey,
}

impl Segment {
    /// Returns the segment's share of its category total.
    pub fn fraction(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// Output of [`normalize`]: included categories with their totals, and their segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackedData {
    totals: Vec<CategoryTotal>,
    segments: Vec<Segment>,
    spans: Vec<Range<usize>>,
}

impl StackedData {
    /// Returns included categories (in dataset order) with their totals.
    pub fn totals(&self) -> &[CategoryTotal] {
        &self.totals
    }

    /// Returns all segments, grouped by category and stacked bottom to top.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the segments of the included category at `index`.
    pub fn category_segments(&self, index: usize) -> &[Segment] {
        self.spans
            .get(index)
            .map_or(&[], |span| &self.segments[span.clone()])
    }

    /// Returns the number of included categories.
    pub fn category_count(&self) -> usize {
        self.totals.len()
    }

    /// Returns `true` if no category survived filtering.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Normalizes a dataset into 100%-stacked segments.
///
/// Per category, only series with a strictly positive value take part, in series ordinal
/// order. Every segment but the last gets `value / total`; the last one gets whatever is left
/// of `1.0`, so the stack ends at exactly `1.0`. Categories with no positive value are dropped.
pub fn normalize(dataset: &Dataset, keys: &dyn SelectionKeyBuilder) -> StackedData {
    let mut out = StackedData::default();
    let mut positive: Vec<(usize, f64)> = Vec::with_capacity(dataset.series.len());

    for (source_index, category) in dataset.categories.iter().enumerate() {
        positive.clear();
        positive.extend(
            dataset
                .series
                .iter()
                .enumerate()
                .filter_map(|(j, s)| s.positive_value(source_index).map(|v| (j, v))),
        );
        if positive.is_empty() {
            continue;
        }

        let total: f64 = positive.iter().map(|&(_, v)| v).sum();
        if total <= 0.0 {
            log::debug!("dropping category {category}: total {total} is not usable");
            continue;
        }
        // Totals past `f64::MAX` are shared out relative to the largest cell.
        let (unit, share_total) = if total.is_finite() {
            (1.0, total)
        } else {
            let max = positive.iter().fold(0.0_f64, |m, &(_, v)| m.max(v));
            (max, positive.iter().map(|&(_, v)| v / max).sum())
        };

        let category_index = out.totals.len();
        let start = out.segments.len();
        let last = positive.len() - 1;
        let mut y0 = 0.0;
        let mut cumulative = 0.0;
        for (k, &(series_index, value)) in positive.iter().enumerate() {
            let fraction = if k == last {
                1.0 - cumulative
            } else {
                let f = value / unit / share_total;
                cumulative += f;
                f
            };
            let y1 = y0 + fraction;
            let series = &dataset.series[series_index];
            out.segments.push(Segment {
                category: category.clone(),
                category_index,
                series_name: series.name.clone(),
                series_index,
                y0,
                y1,
                value,
                selection_key: keys.key(category, source_index, series, series_index),
            });
            y0 = y1;
        }
        out.spans.push(start..out.segments.len());
        out.totals.push(CategoryTotal {
            category: category.clone(),
            source_index,
            value: total,
        });
    }

    log::debug!(
        "normalized {} of {} categories into {} segments",
        out.totals.len(),
        dataset.categories.len(),
        out.segments.len()
    );
    out
}
