// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Size;
use peniko::Brush;
use pctstack_core::{MarkId, Scene};
use pctstack_transforms::{CategoryKey, Dataset, SeriesColumn, StructuralKeyBuilder, normalize};

use crate::{
    BAR_ID_BASE, FormattingSettings, SEGMENT_LABEL_ID_BASE, SelectionCoordinator, render,
};

fn render_scene(dataset: &Dataset, settings: &FormattingSettings, viewport: Size) -> Scene {
    let data = normalize(dataset, &StructuralKeyBuilder);
    render(&data, settings, viewport).scene
}

fn label_lines(scene: &Scene, index: usize) -> Vec<&str> {
    scene
        .get(MarkId::offset(SEGMENT_LABEL_ID_BASE, index))
        .and_then(|m| m.as_text())
        .map(|t| t.lines.iter().map(|l| l.text.as_str()).collect())
        .unwrap_or_default()
}

fn one_eighth() -> Dataset {
    Dataset::new(
        vec![CategoryKey::from("Jan")],
        vec![SeriesColumn::new("Small", [1.0]), SeriesColumn::new("Large", [7.0])],
    )
    .unwrap()
}

#[test]
fn label_threshold_is_exclusive_at_twenty_pixels() {
    let settings = FormattingSettings::default();

    // Chart height 160: the 1/8 segment is exactly 20px tall.
    let scene = render_scene(&one_eighth(), &settings, Size::new(700.0, 280.0));
    let bar = scene.get(MarkId(BAR_ID_BASE)).unwrap().as_rect().unwrap();
    assert_eq!(bar.rect.height(), 20.0);
    assert!(label_lines(&scene, 0).is_empty());
    assert_eq!(label_lines(&scene, 1), ["87.5%", "7,00"]);

    // Chart height 168: 21px.
    let scene = render_scene(&one_eighth(), &settings, Size::new(700.0, 288.0));
    assert_eq!(label_lines(&scene, 0), ["12.5%", "1,00"]);
}

#[test]
fn series_names_only_in_tall_segments() {
    let mut settings = FormattingSettings::default();
    settings.labels.show_series_names = true;
    let scene = render_scene(&one_eighth(), &settings, Size::new(700.0, 288.0));
    assert_eq!(label_lines(&scene, 0), ["12.5%", "1,00"]);
    assert_eq!(label_lines(&scene, 1), ["Large", "87.5%", "7,00"]);
}

#[test]
fn palette_cycles_across_seven_series() {
    let series = (0..7)
        .map(|i| SeriesColumn::new(alloc::format!("s{i}"), [1.0]))
        .collect();
    let dataset = Dataset::new(vec![CategoryKey::from("Jan")], series).unwrap();
    let settings = FormattingSettings::default();
    let scene = render_scene(&dataset, &settings, Size::new(700.0, 400.0));

    let fill = |i: usize| {
        scene
            .get(MarkId::offset(BAR_ID_BASE, i))
            .and_then(|m| m.as_rect())
            .map(|r| r.fill.clone())
            .unwrap()
    };
    assert_eq!(fill(5), fill(0));
    assert_eq!(fill(6), fill(1));
    assert_eq!(fill(0), Brush::Solid(settings.palette.color1.0));
    assert_ne!(fill(0), fill(1));
}

#[test]
fn skipped_series_keep_their_color() {
    let dataset = Dataset::new(
        vec![CategoryKey::from("A"), CategoryKey::from("B")],
        vec![
            SeriesColumn::new("s0", [1.0, 0.0]),
            SeriesColumn::new("s1", [1.0, 1.0]),
        ],
    )
    .unwrap();
    let settings = FormattingSettings::default();
    let scene = render_scene(&dataset, &settings, Size::new(700.0, 400.0));
    let b_bar = scene.get(MarkId::offset(BAR_ID_BASE, 2)).unwrap().as_rect().unwrap();
    assert_eq!(b_bar.fill, Brush::Solid(settings.palette.color2.0));
}

#[test]
fn selection_dims_unmatched_columns_and_restores() {
    let dataset = Dataset::new(
        vec![CategoryKey::from("A"), CategoryKey::from("B"), CategoryKey::from("C")],
        vec![SeriesColumn::new("s0", [3.0, 4.0, 5.0])],
    )
    .unwrap();
    let data = normalize(&dataset, &StructuralKeyBuilder);
    let settings = FormattingSettings::default();
    let mut out = render(&data, &settings, Size::new(700.0, 400.0));
    let coordinator = SelectionCoordinator::new(out.handles.clone(), 1.0);

    let b = out.handles[1].selection_key.clone();
    coordinator.reconcile(&mut out.scene, &[b]);
    let opacity =
        |scene: &Scene, i: usize| scene.get(MarkId::offset(BAR_ID_BASE, i)).unwrap().opacity;
    assert_eq!(
        [opacity(&out.scene, 0), opacity(&out.scene, 1), opacity(&out.scene, 2)],
        [0.3, 1.0, 0.3]
    );

    coordinator.reconcile(&mut out.scene, &[]);
    assert_eq!(
        [opacity(&out.scene, 0), opacity(&out.scene, 1), opacity(&out.scene, 2)],
        [1.0, 1.0, 1.0]
    );
}

#[test]
fn wide_datasets_overflow_the_viewport() {
    let categories: Vec<CategoryKey> = (0..12).map(|i| CategoryKey::from(f64::from(i))).collect();
    let dataset = Dataset::new(categories, vec![SeriesColumn::new("s0", [1.0; 12])]).unwrap();
    let scene = render_scene(&dataset, &FormattingSettings::default(), Size::new(600.0, 400.0));
    assert!(scene.size().width > 600.0);

    let last = scene.get(MarkId::offset(BAR_ID_BASE, 11)).unwrap().as_rect().unwrap();
    assert!(last.rect.x1 <= scene.size().width - 20.0 + 1e-9);
}
