// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One render pass: normalized data plus settings in, a fresh scene out.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Size;
use pctstack_core::{MarkId, Scene, SelectionKey};
use pctstack_transforms::StackedData;

use crate::axis::CategoryAxisSpec;
use crate::labels::{SegmentLabelSpec, TotalLabelSpec};
use crate::layout::ChartLayout;
use crate::settings::FormattingSettings;
use crate::stacked_bar_mark::StackedBarMarkSpec;

/// Links one segment's rendered elements back to its data.
///
/// The selection coordinator restyles marks through these handles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentHandle {
    /// Band index of the segment's category.
    pub category_index: usize,
    /// Identity of the segment's `(category, series)` cell.
    pub selection_key: SelectionKey,
    /// The bar rectangle.
    pub bar: MarkId,
    /// The segment label.
    pub label: MarkId,
}

/// The output of [`render`].
#[derive(Clone, Debug, Default)]
pub struct RenderedChart {
    /// Every mark of the chart.
    pub scene: Scene,
    /// Layout used for the pass, or `None` if there was nothing to draw.
    pub layout: Option<ChartLayout>,
    /// One handle per segment, in segment order.
    pub handles: Vec<SegmentHandle>,
}

/// Draws bars, total labels, segment labels and the category axis.
///
/// An empty `data` yields an empty scene the size of the viewport.
pub fn render(data: &StackedData, settings: &FormattingSettings, viewport: Size) -> RenderedChart {
    if data.is_empty() {
        log::debug!("nothing to render");
        return RenderedChart {
            scene: Scene::new(viewport),
            layout: None,
            handles: Vec::new(),
        };
    }

    let layout = ChartLayout::compute(data.category_count(), viewport, settings.chart.spacing);
    log::debug!(
        "layout: {} columns, content {}x{}, plot {}x{}",
        data.category_count(),
        layout.total_width,
        layout.height,
        layout.available_width,
        layout.chart_height
    );

    let mut scene = Scene::new(layout.surface_size());
    scene.extend(StackedBarMarkSpec::new(&layout, &settings.palette, &settings.chart).marks(data));
    scene.extend(TotalLabelSpec::new(&layout, &settings.labels).marks(data));
    scene.extend(SegmentLabelSpec::new(&layout, &settings.labels).marks(data));
    scene.extend(CategoryAxisSpec::new(&layout, &settings.category).marks(data.totals()));

    let handles = data
        .segments()
        .iter()
        .enumerate()
        .map(|(i, segment)| SegmentHandle {
            category_index: segment.category_index,
            selection_key: segment.selection_key.clone(),
            bar: StackedBarMarkSpec::bar_id(i),
            label: SegmentLabelSpec::label_id(i),
        })
        .collect();

    RenderedChart {
        scene,
        layout: Some(layout),
        handles,
    }
}
