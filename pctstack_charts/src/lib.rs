// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 100%-stacked column chart built on `pctstack_core` scenes.
//!
//! Each update runs one pipeline:
//! - **Settings** are read from the host's persisted values over declared defaults.
//! - **Normalization** (`pctstack_transforms`) turns the dataset into stacked segments.
//! - **Layout** sizes the content and builds the band and fraction scales.
//! - **Rendering** emits bars, total labels, segment labels and category axis labels as
//!   stable-id marks, plus handles linking segments to their marks.
//! - **Selection** restyles those marks from the host's selection, and turns clicks into
//!   host selection requests.
//!
//! [`StackedColumnVisual`] wires it together behind the host entry points.
//!
//! Text shaping is out of scope; text marks store unshaped lines.

#![no_std]

extern crate alloc;

mod axis;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod labels;
mod layout;
mod model;
mod rect_mark;
mod render;
mod scale;
mod selection;
mod settings;
mod stacked_bar_mark;
#[cfg(test)]
mod stacked_tests;
mod text_mark;
mod visual;
mod z_order;

pub use axis::{
    AVG_CHAR_WIDTH, AXIS_LABEL_ID_BASE, AXIS_OFFSET, CategoryAxisSpec, LABEL_OFFSET,
    MIN_WRAP_WIDTH, WRAP_LINE_HEIGHT_EM, char_budget, wrap_label,
};
pub use format::{format_percent, format_value};
pub use labels::{
    LINE_HEIGHT_EM, MIN_LABEL_HEIGHT, MIN_SERIES_NAME_HEIGHT, SEGMENT_LABEL_ID_BASE,
    SegmentLabelSpec, TOTAL_LABEL_GAP, TOTAL_LABEL_ID_BASE, TotalLabelSpec, segment_label_lines,
    segment_tooltip,
};
pub use layout::{ChartLayout, MAX_VISIBLE_COLUMNS, MIN_COLUMN_WIDTH, Margins};
pub use model::{DropdownItem, FormattingCard, FormattingModel, FormattingSlice, SliceControl};
pub use rect_mark::RectMarkSpec;
pub use render::{RenderedChart, SegmentHandle, render};
pub use scale::{ScaleBand, ScaleLinear};
pub use selection::{
    Click, DIMMED_OPACITY_FACTOR, HostError, MemorySelectionService, SelectionCoordinator,
    SelectionRequest, SelectionService, SelectionState,
};
pub use settings::{
    CategoryLabelSettings, ChartStyle, ColorPalette, ColorValue, DataLabelSettings,
    FormattingSettings, PALETTE_SIZE, SettingsError, ValueScale,
};
pub use stacked_bar_mark::{BAR_ID_BASE, StackedBarMarkSpec};
pub use text_mark::TextMarkSpec;
pub use visual::{ObjectInstance, StackedColumnVisual, UpdateOptions};
pub use z_order::*;
