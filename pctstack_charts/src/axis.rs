// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category axis generation.
//!
//! The axis draws labels only: no domain line, no ticks. Each label sits under its column
//! and is wrapped onto two lines or truncated to fit a character budget derived from the
//! column width.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use pctstack_core::{Mark, MarkId, TextAnchor, TextBaseline, TextLine, TextStyle};
use pctstack_transforms::CategoryTotal;
use smallvec::{SmallVec, smallvec};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::layout::ChartLayout;
use crate::settings::CategoryLabelSettings;
use crate::text_mark::TextMarkSpec;

/// First mark id used for axis labels; the label of category `i` is `AXIS_LABEL_ID_BASE + i`.
pub const AXIS_LABEL_ID_BASE: u64 = 4 << 32;

/// Estimated average glyph width used to derive the per-column character budget.
pub const AVG_CHAR_WIDTH: f64 = 8.0;
/// Columns at most this wide never wrap; long labels are truncated instead.
pub const MIN_WRAP_WIDTH: f64 = 70.0;
/// Gap between the plot bottom and the axis.
pub const AXIS_OFFSET: f64 = 5.0;
/// Gap between the axis and the top of its labels.
pub const LABEL_OFFSET: f64 = 9.0;
/// Offset of the second wrapped line, in em.
pub const WRAP_LINE_HEIGHT_EM: f64 = 1.1;

/// Returns how many characters fit in a column `column_width` pixels wide.
pub fn char_budget(column_width: f64) -> usize {
    let budget = (column_width / AVG_CHAR_WIDTH).floor();
    if budget.is_finite() && budget > 0.0 {
        #[allow(clippy::cast_possible_truncation, reason = "finite and positive")]
        let budget = budget as usize;
        budget
    } else {
        0
    }
}

/// Fits a category label into a column.
///
/// Labels within budget are returned unchanged. Longer labels with a space, in columns wider
/// than [`MIN_WRAP_WIDTH`], break once at the last space at or before the budget (or, if
/// there is none past the first character, at the budget itself). Anything else that is too
/// long is cut to `budget - 1` characters plus `…`.
pub fn wrap_label(label: &str, column_width: f64) -> SmallVec<[String; 2]> {
    let budget = char_budget(column_width);
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= budget {
        return smallvec![String::from(label)];
    }

    if label.contains(' ') && column_width > MIN_WRAP_WIDTH {
        let break_at = chars[..=budget].iter().rposition(|&c| c == ' ').filter(|&i| i > 0);
        let (first, rest) = match break_at {
            Some(i) => (&chars[..i], &chars[i + 1..]),
            None => (&chars[..budget], &chars[budget..]),
        };
        return smallvec![first.iter().collect(), rest.iter().collect()];
    }

    let mut truncated: String = chars[..budget.saturating_sub(1)].iter().collect();
    truncated.push('…');
    smallvec![truncated]
}

/// A label-only category axis under the plot.
#[derive(Clone, Debug)]
pub struct CategoryAxisSpec<'a> {
    /// Scales and plot placement.
    pub layout: &'a ChartLayout,
    /// Label font and color.
    pub style: &'a CategoryLabelSettings,
    /// Rendering order hint (`pctstack_core::Mark::z_index`).
    pub z_index: i32,
}

impl<'a> CategoryAxisSpec<'a> {
    /// Creates a category axis spec.
    pub fn new(layout: &'a ChartLayout, style: &'a CategoryLabelSettings) -> Self {
        Self {
            layout,
            style,
            z_index: crate::z_order::AXIS_LABELS,
        }
    }

    /// Generates one label mark per included category.
    pub fn marks(&self, categories: &[CategoryTotal]) -> Vec<Mark> {
        let y = self.layout.plot().y1 + AXIS_OFFSET + LABEL_OFFSET;
        let column_width = self.layout.column_width();
        let text_style = TextStyle::new(self.style.font_size)
            .with_family(self.style.font_family.as_str())
            .with_bold(self.style.font_bold);

        categories
            .iter()
            .enumerate()
            .map(|(i, total)| {
                let pos = Point::new(self.layout.column_center(i), y);
                let mut spec = TextMarkSpec::new(MarkId::offset(AXIS_LABEL_ID_BASE, i), pos)
                    .with_style(text_style.clone())
                    .with_fill(self.style.font_color.0)
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Hanging)
                    .with_z_index(self.z_index);
                let label = alloc::format!("{}", total.category);
                for (line_no, line) in wrap_label(&label, column_width).into_iter().enumerate() {
                    let dy = if line_no == 0 { 0.0 } else { WRAP_LINE_HEIGHT_EM };
                    spec = spec.with_line(TextLine::new(line, dy));
                }
                spec.mark()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use kurbo::Size;
    use pctstack_transforms::CategoryKey;

    use super::*;

    fn lines(label: &str, width: f64) -> Vec<String> {
        wrap_label(label, width).into_vec()
    }

    #[test]
    fn budget_is_width_over_eight() {
        assert_eq!(char_budget(200.0), 25);
        assert_eq!(char_budget(100.0), 12);
        assert_eq!(char_budget(40.0), 5);
        assert_eq!(char_budget(7.9), 0);
        assert_eq!(char_budget(-10.0), 0);
    }

    #[test]
    fn short_labels_are_untouched() {
        assert_eq!(lines("Rio Grande do Sul", 200.0), vec!["Rio Grande do Sul"]);
    }

    #[test]
    fn long_labels_break_at_last_space_within_budget() {
        assert_eq!(lines("Rio Grande do Sul", 100.0), vec!["Rio Grande", "do Sul"]);
    }

    #[test]
    fn narrow_columns_truncate_instead_of_wrapping() {
        assert_eq!(lines("Rio Grande do Sul", 40.0), vec!["Rio …"]);
    }

    #[test]
    fn labels_without_spaces_truncate() {
        assert_eq!(lines("Pernambuco-Recife", 100.0), vec!["Pernambuco-…"]);
    }

    #[test]
    fn no_usable_space_splits_at_budget() {
        assert_eq!(
            lines("Supercalifragilistic word", 80.0),
            vec!["Supercalif", "ragilistic word"]
        );
        assert_eq!(lines(" leadingspace", 80.0), vec![" leadingsp", "ace"]);
    }

    #[test]
    fn zero_budget_truncates_to_ellipsis() {
        assert_eq!(lines("abc", 4.0), vec!["…"]);
    }

    #[test]
    fn axis_marks_sit_below_plot_with_hanging_baseline() {
        let layout = ChartLayout::compute(2, Size::new(700.0, 320.0), 0.2);
        let style = CategoryLabelSettings::default();
        let totals = vec![
            CategoryTotal {
                category: CategoryKey::from("Jan"),
                source_index: 0,
                value: 1.0,
            },
            CategoryTotal {
                category: CategoryKey::from("Minas Gerais e Rio Grande do Sul"),
                source_index: 1,
                value: 1.0,
            },
        ];
        let marks = CategoryAxisSpec::new(&layout, &style).marks(&totals);
        assert_eq!(marks.len(), 2);

        let jan = marks[0].as_text().unwrap();
        assert_eq!(jan.pos, Point::new(layout.column_center(0), 240.0 + 14.0));
        assert_eq!(jan.baseline, TextBaseline::Hanging);
        assert_eq!(jan.style.font_family.as_deref(), Some("Segoe UI"));
        assert_eq!(jan.text(), "Jan");

        let long = marks[1].as_text().unwrap();
        assert_eq!(long.lines.len(), 2);
        assert_eq!(long.lines[1].dy_em, WRAP_LINE_HEIGHT_EM);
    }
}
