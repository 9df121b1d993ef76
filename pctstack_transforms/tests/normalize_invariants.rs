// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for percent-of-total stacking.
//!
//! For any table of cells:
//! 1. Every included category ends its stack at exactly `1.0`.
//! 2. Segments of a category are contiguous and strictly increasing.
//! 3. A category is included iff it has a positive cell; its segment count is the number of
//!    positive cells and its total is their sum.

use pctstack_transforms::{
    CategoryKey, Dataset, RawValue, SeriesColumn, StructuralKeyBuilder, normalize,
};
use proptest::prelude::*;

fn cell_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => 1.0e-3..1.0e9_f64,
        1 => Just(0.0),
        1 => -1.0e6..0.0_f64,
    ]
}

fn table_strategy() -> impl Strategy<Value = (usize, Vec<Vec<f64>>)> {
    (1usize..8, 1usize..9).prop_flat_map(|(series, categories)| {
        (
            Just(categories),
            prop::collection::vec(prop::collection::vec(cell_strategy(), categories), series),
        )
    })
}

fn build(categories: usize, columns: &[Vec<f64>]) -> Dataset {
    Dataset::new(
        (0..categories).map(|i| CategoryKey::Text(format!("c{i}"))).collect(),
        columns
            .iter()
            .enumerate()
            .map(|(j, col)| SeriesColumn::new(format!("s{j}"), col.iter().copied()))
            .collect(),
    )
    .expect("columns are sized to the category count")
}

proptest! {
    #[test]
    fn stacks_end_at_exactly_one((categories, columns) in table_strategy()) {
        let data = build(categories, &columns);
        let out = normalize(&data, &StructuralKeyBuilder);
        for i in 0..out.category_count() {
            let segs = out.category_segments(i);
            prop_assert!(!segs.is_empty());
            prop_assert_eq!(segs[0].y0, 0.0);
            prop_assert_eq!(segs[segs.len() - 1].y1, 1.0);
            for w in segs.windows(2) {
                prop_assert_eq!(w[0].y1, w[1].y0, "segments must be contiguous");
                prop_assert!(w[0].series_index < w[1].series_index);
            }
            for s in segs {
                prop_assert!(s.y1 > s.y0, "empty segment {:?}", s);
            }
        }
    }

    #[test]
    fn inclusion_matches_positive_cells((categories, columns) in table_strategy()) {
        let data = build(categories, &columns);
        let out = normalize(&data, &StructuralKeyBuilder);

        let mut included = out.totals().iter();
        let mut band = 0;
        for c in 0..categories {
            let positives: Vec<f64> = columns
                .iter()
                .map(|col| RawValue::from(col[c]))
                .filter_map(|v| v.positive())
                .collect();
            if positives.is_empty() {
                continue;
            }
            let total = included.next().expect("category with a positive cell is included");
            prop_assert_eq!(total.source_index, c);
            prop_assert_eq!(total.value, positives.iter().sum::<f64>());
            prop_assert_eq!(out.category_segments(band).len(), positives.len());
            band += 1;
        }
        prop_assert!(included.next().is_none());
    }
}
