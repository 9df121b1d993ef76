// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection identity construction.

extern crate alloc;

use alloc::format;

use pctstack_core::SelectionKey;

use crate::dataset::{CategoryKey, SeriesColumn};

/// Host service producing selection identities for `(category, series)` cells.
///
/// `category_index` is the row index in the host dataset (before empty categories are
/// dropped), so keys stay meaningful to the host's own data model.
pub trait SelectionKeyBuilder {
    /// Returns the identity for one cell.
    fn key(
        &self,
        category: &CategoryKey,
        category_index: usize,
        series: &SeriesColumn,
        series_index: usize,
    ) -> SelectionKey;
}

/// Builds keys from row/column positions and names.
///
/// Useful when the host has no identity service of its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralKeyBuilder;

impl SelectionKeyBuilder for StructuralKeyBuilder {
    fn key(
        &self,
        category: &CategoryKey,
        category_index: usize,
        series: &SeriesColumn,
        series_index: usize,
    ) -> SelectionKey {
        SelectionKey::new(format!(
            "{category_index}:{category}|{series_index}:{}",
            series.name
        ))
    }
}

impl<F> SelectionKeyBuilder for F
where
    F: Fn(&CategoryKey, usize, &SeriesColumn, usize) -> SelectionKey,
{
    fn key(
        &self,
        category: &CategoryKey,
        category_index: usize,
        series: &SeriesColumn,
        series_index: usize,
    ) -> SelectionKey {
        self(category, category_index, series, series_index)
    }
}
