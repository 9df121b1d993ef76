// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked bar mark generation (one rectangle per segment).

extern crate alloc;

use alloc::vec::Vec;

use peniko::Brush;
use pctstack_core::{Mark, MarkId};
use pctstack_transforms::StackedData;

use crate::layout::ChartLayout;
use crate::rect_mark::RectMarkSpec;
use crate::settings::{ChartStyle, ColorPalette};

/// First mark id used for bar rectangles; bar `i` (in segment order) is `BAR_ID_BASE + i`.
pub const BAR_ID_BASE: u64 = 1 << 32;

/// Vertical stacked bars derived from normalized segments.
///
/// Each segment spans `[y0, y1]` on the fraction scale inside its category's band. Fills come
/// from the palette by series ordinal, so a series keeps its color across categories even when
/// it is missing from some of them.
#[derive(Clone, Debug)]
pub struct StackedBarMarkSpec<'a> {
    /// Scales and plot placement.
    pub layout: &'a ChartLayout,
    /// Series fills.
    pub palette: &'a ColorPalette,
    /// Border and opacity.
    pub style: &'a ChartStyle,
    /// Rendering order hint (`pctstack_core::Mark::z_index`).
    pub z_index: i32,
}

impl<'a> StackedBarMarkSpec<'a> {
    /// Creates a stacked bar mark spec.
    pub fn new(layout: &'a ChartLayout, palette: &'a ColorPalette, style: &'a ChartStyle) -> Self {
        Self {
            layout,
            palette,
            style,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Returns the id of the bar for the segment at `index`.
    pub fn bar_id(index: usize) -> MarkId {
        MarkId::offset(BAR_ID_BASE, index)
    }

    /// Generates one mark per segment, in segment order.
    pub fn marks(&self, data: &StackedData) -> Vec<Mark> {
        let border = Brush::Solid(self.style.border_color.0);
        data.segments()
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                let rect = self
                    .layout
                    .segment_rect(segment.category_index, segment.y0, segment.y1);
                RectMarkSpec::new(Self::bar_id(i), rect)
                    .with_fill(self.palette.series_color(segment.series_index))
                    .with_stroke(border.clone(), self.style.border_width)
                    .with_opacity(self.style.bar_opacity)
                    .with_z_index(self.z_index)
                    .mark()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Size;
    use pctstack_transforms::{CategoryKey, Dataset, SeriesColumn, StructuralKeyBuilder, normalize};

    use super::*;

    fn data() -> StackedData {
        let d = Dataset::new(
            alloc::vec![CategoryKey::from("A"), CategoryKey::from("B")],
            alloc::vec![
                SeriesColumn::new("s0", [1.0, 0.0]),
                SeriesColumn::new("s1", [3.0, 2.0]),
            ],
        )
        .unwrap();
        normalize(&d, &StructuralKeyBuilder)
    }

    #[test]
    fn bars_follow_segments_and_palette() {
        let data = data();
        let layout = ChartLayout::compute(data.category_count(), Size::new(700.0, 320.0), 0.2);
        let palette = ColorPalette::default();
        let style = ChartStyle::default();
        let marks = StackedBarMarkSpec::new(&layout, &palette, &style).marks(&data);

        assert_eq!(marks.len(), 3);
        assert_eq!(marks[0].id, MarkId(BAR_ID_BASE));

        let r0 = marks[0].as_rect().unwrap();
        let r1 = marks[1].as_rect().unwrap();
        assert_eq!(r0.rect.y1, layout.y(0.0));
        assert_eq!(r0.rect.y0, r1.rect.y1);
        assert_eq!(r1.rect.y0, layout.y(1.0));
        assert!(r0.stroke.is_none());

        // Series 1 is alone in category B and keeps its palette slot.
        let r2 = marks[2].as_rect().unwrap();
        assert_eq!(r2.fill, Brush::Solid(palette.series_color(1)));
        assert_eq!(r2.rect.x0, layout.column_x(1));
        assert_eq!((r2.rect.y0, r2.rect.y1), (layout.y(1.0), layout.y(0.0)));
    }

    #[test]
    fn chart_style_drives_border_and_opacity() {
        let data = data();
        let layout = ChartLayout::compute(data.category_count(), Size::new(700.0, 320.0), 0.2);
        let palette = ColorPalette::default();
        let style = ChartStyle {
            bar_opacity: 0.8,
            border_width: 2.0,
            ..ChartStyle::default()
        };
        let marks = StackedBarMarkSpec::new(&layout, &palette, &style).marks(&data);
        assert!(marks.iter().all(|m| m.opacity == 0.8));
        let stroke = marks[0].as_rect().unwrap().stroke.as_ref().unwrap();
        assert_eq!(stroke.width, 2.0);
    }
}
