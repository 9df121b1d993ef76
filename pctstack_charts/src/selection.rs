// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection: the host-owned selection set and how the chart reflects it.
//!
//! The chart never updates its own look optimistically. A click is turned into a
//! [`SelectionRequest`] synchronously; the request owns everything it needs, so the host can
//! keep updating the chart while it is in flight. Once the host confirms, its selection is
//! read back and applied to whatever scene is current at that point.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::future::{Future, ready};

use hashbrown::{HashMap, HashSet};
use kurbo::Point;
use pctstack_core::{MarkId, Scene, SelectionKey};

use crate::render::SegmentHandle;

/// Opacity multiplier for bars of categories outside the selection.
pub const DIMMED_OPACITY_FACTOR: f64 = 0.3;

/// Errors reported by a [`SelectionService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The host refused a selection request.
    #[error("host rejected {operation}: {reason}")]
    Rejected {
        /// The refused operation (`select` or `clear`).
        operation: &'static str,
        /// Host-provided reason.
        reason: String,
    },
}

/// The host's cross-visual selection set.
pub trait SelectionService {
    /// Returns the currently selected identities.
    fn selection(&self) -> Vec<SelectionKey>;

    /// Toggles `key`. With `additive`, other selected keys are kept; otherwise `key` replaces
    /// the selection.
    fn select(
        &mut self,
        key: &SelectionKey,
        additive: bool,
    ) -> impl Future<Output = Result<(), HostError>>;

    /// Clears the selection.
    fn clear(&mut self) -> impl Future<Output = Result<(), HostError>>;
}

/// A single-user, in-memory [`SelectionService`].
///
/// Exclusive selection of the only selected key deselects it; additive selection toggles
/// membership. Requests complete immediately.
#[derive(Clone, Debug, Default)]
pub struct MemorySelectionService {
    selected: Vec<SelectionKey>,
    reject: Option<String>,
}

impl MemorySelectionService {
    /// Creates a service with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service that refuses every request with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            selected: Vec::new(),
            reject: Some(reason.into()),
        }
    }

    fn check(&self, operation: &'static str) -> Result<(), HostError> {
        match &self.reject {
            Some(reason) => Err(HostError::Rejected {
                operation,
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl SelectionService for MemorySelectionService {
    fn selection(&self) -> Vec<SelectionKey> {
        self.selected.clone()
    }

    fn select(
        &mut self,
        key: &SelectionKey,
        additive: bool,
    ) -> impl Future<Output = Result<(), HostError>> {
        let result = self.check("select").map(|()| {
            if additive {
                match self.selected.iter().position(|k| k == key) {
                    Some(i) => {
                        self.selected.remove(i);
                    }
                    None => self.selected.push(key.clone()),
                }
            } else if self.selected.len() == 1 && self.selected[0] == *key {
                self.selected.clear();
            } else {
                self.selected.clear();
                self.selected.push(key.clone());
            }
        });
        ready(result)
    }

    fn clear(&mut self) -> impl Future<Output = Result<(), HostError>> {
        let result = self.check("clear").map(|()| self.selected.clear());
        ready(result)
    }
}

/// A pointer click delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Click {
    /// Position in scene coordinates.
    pub pos: Point,
    /// Whether a multi-select modifier (ctrl/meta) was held.
    pub additive: bool,
}

impl Click {
    /// An exclusive click.
    pub fn at(pos: Point) -> Self {
        Self {
            pos,
            additive: false,
        }
    }

    /// A click with the multi-select modifier held.
    pub fn additive_at(pos: Point) -> Self {
        Self {
            pos,
            additive: true,
        }
    }
}

/// How the scene currently reflects the host selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing selected: everything at base opacity, labels visible.
    #[default]
    Unfiltered,
    /// Something selected: only `matched_categories` (band indices, ascending) stay at base
    /// opacity and keep their segment labels.
    Filtered {
        /// Categories containing at least one selected segment.
        matched_categories: Vec<usize>,
    },
}

/// Restyles a rendered scene from host selection state and forwards clicks to the host.
#[derive(Clone, Debug, Default)]
pub struct SelectionCoordinator {
    base_opacity: f64,
    handles: Vec<SegmentHandle>,
    bars: HashMap<MarkId, usize>,
}

impl SelectionCoordinator {
    /// Creates a coordinator for the handles of one render pass.
    pub fn new(handles: Vec<SegmentHandle>, base_opacity: f64) -> Self {
        let bars = handles.iter().enumerate().map(|(i, h)| (h.bar, i)).collect();
        Self {
            base_opacity,
            handles,
            bars,
        }
    }

    /// Returns the handle of the bar under `pos`, if any.
    pub fn bar_at(&self, scene: &Scene, pos: Point) -> Option<&SegmentHandle> {
        let id = scene.hit_test(pos)?;
        self.bars.get(&id).map(|&i| &self.handles[i])
    }

    /// Returns the categories (band indices, ascending) that contain a selected segment.
    pub fn matched_categories(&self, selected: &[SelectionKey]) -> Vec<usize> {
        let selected: HashSet<&SelectionKey> = selected.iter().collect();
        let mut matched: Vec<usize> = self
            .handles
            .iter()
            .filter(|h| selected.contains(&h.selection_key))
            .map(|h| h.category_index)
            .collect();
        matched.sort_unstable();
        matched.dedup();
        matched
    }

    /// Applies `selected` to the scene and returns the resulting state.
    pub fn reconcile(&self, scene: &mut Scene, selected: &[SelectionKey]) -> SelectionState {
        if selected.is_empty() {
            for h in &self.handles {
                self.style(scene, h, true);
            }
            return SelectionState::Unfiltered;
        }

        let matched_categories = self.matched_categories(selected);
        for h in &self.handles {
            let keep = matched_categories.binary_search(&h.category_index).is_ok();
            self.style(scene, h, keep);
        }
        log::trace!(
            "{} selected keys match categories {:?}",
            selected.len(),
            matched_categories
        );
        SelectionState::Filtered { matched_categories }
    }

    fn style(&self, scene: &mut Scene, handle: &SegmentHandle, keep: bool) {
        if let Some(bar) = scene.get_mut(handle.bar) {
            bar.opacity = if keep {
                self.base_opacity
            } else {
                self.base_opacity * DIMMED_OPACITY_FACTOR
            };
        }
        if let Some(label) = scene.get_mut(handle.label) {
            label.visible = keep;
        }
    }

    /// Turns a click into a host request: select the bar under the pointer, or clear the
    /// selection if there is none.
    pub fn request(&self, scene: &Scene, click: Click) -> SelectionRequest {
        match self.bar_at(scene, click.pos) {
            Some(h) => SelectionRequest::Select {
                key: h.selection_key.clone(),
                additive: click.additive,
            },
            None => SelectionRequest::Clear,
        }
    }
}

/// A pending change to the host selection.
///
/// Built from a click by [`SelectionCoordinator::request`]. It borrows nothing from the chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionRequest {
    /// Select `key`, keeping the other selected keys if `additive`.
    Select {
        /// Identity of the clicked segment.
        key: SelectionKey,
        /// Whether a multi-select modifier was held.
        additive: bool,
    },
    /// Clear the selection.
    Clear,
}

impl SelectionRequest {
    /// Sends the request and waits for the host to complete it.
    pub async fn send<S: SelectionService>(&self, host: &mut S) -> Result<(), HostError> {
        let result = match self {
            Self::Select { key, additive } => {
                log::trace!("selecting {key} (additive: {additive})");
                host.select(key, *additive).await
            }
            Self::Clear => {
                log::trace!("background click, clearing selection");
                host.clear().await
            }
        };
        if let Err(err) = &result {
            log::warn!("selection request failed: {err}");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use kurbo::Size;
    use pctstack_transforms::{CategoryKey, Dataset, SeriesColumn, StructuralKeyBuilder, normalize};
    use pollster::block_on;

    use super::*;
    use crate::render::{RenderedChart, render};
    use crate::settings::FormattingSettings;

    fn chart(base_opacity: f64) -> (RenderedChart, SelectionCoordinator) {
        let d = Dataset::new(
            vec![CategoryKey::from("A"), CategoryKey::from("B"), CategoryKey::from("C")],
            vec![
                SeriesColumn::new("s0", [1.0, 1.0, 1.0]),
                SeriesColumn::new("s1", [1.0, 1.0, 1.0]),
            ],
        )
        .unwrap();
        let data = normalize(&d, &StructuralKeyBuilder);
        let mut settings = FormattingSettings::default();
        settings.chart.bar_opacity = base_opacity;
        let out = render(&data, &settings, Size::new(700.0, 400.0));
        let coordinator = SelectionCoordinator::new(out.handles.clone(), base_opacity);
        (out, coordinator)
    }

    fn opacities(scene: &Scene, handles: &[SegmentHandle]) -> Vec<f64> {
        handles.iter().map(|h| scene.get(h.bar).unwrap().opacity).collect()
    }

    fn click<S: SelectionService>(
        out: &mut RenderedChart,
        coordinator: &SelectionCoordinator,
        host: &mut S,
        at: Click,
    ) -> Result<SelectionState, HostError> {
        let request = coordinator.request(&out.scene, at);
        block_on(request.send(host))?;
        Ok(coordinator.reconcile(&mut out.scene, &host.selection()))
    }

    fn bar_center(scene: &Scene, handle: &SegmentHandle) -> Point {
        scene.get(handle.bar).unwrap().as_rect().unwrap().rect.center()
    }

    #[test]
    fn selecting_one_category_dims_the_others() {
        let (mut out, coordinator) = chart(0.8);
        let b_key = out.handles[2].selection_key.clone();

        let state = coordinator.reconcile(&mut out.scene, &[b_key]);
        assert_eq!(
            state,
            SelectionState::Filtered {
                matched_categories: vec![1]
            }
        );
        let dim = 0.8 * DIMMED_OPACITY_FACTOR;
        assert_eq!(
            opacities(&out.scene, &out.handles),
            vec![dim, dim, 0.8, 0.8, dim, dim]
        );
        let visible: Vec<bool> = out
            .handles
            .iter()
            .map(|h| out.scene.get(h.label).unwrap().visible)
            .collect();
        assert_eq!(visible, vec![false, false, true, true, false, false]);

        assert_eq!(coordinator.reconcile(&mut out.scene, &[]), SelectionState::Unfiltered);
        assert!(opacities(&out.scene, &out.handles).iter().all(|&o| o == 0.8));
        assert!(out.handles.iter().all(|h| out.scene.get(h.label).unwrap().visible));
    }

    #[test]
    fn unknown_keys_dim_everything() {
        let (mut out, coordinator) = chart(1.0);
        let state = coordinator.reconcile(&mut out.scene, &[SelectionKey::from("elsewhere")]);
        assert_eq!(
            state,
            SelectionState::Filtered {
                matched_categories: vec![]
            }
        );
        assert!(opacities(&out.scene, &out.handles).iter().all(|&o| o == 0.3));
    }

    #[test]
    fn hit_testing_finds_bars_but_not_background() {
        let (out, coordinator) = chart(1.0);
        let p = bar_center(&out.scene, &out.handles[3]);
        assert_eq!(coordinator.bar_at(&out.scene, p), Some(&out.handles[3]));
        assert_eq!(coordinator.bar_at(&out.scene, Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn click_selects_then_reconciles() {
        let (mut out, coordinator) = chart(1.0);
        let mut host = MemorySelectionService::new();

        let p = bar_center(&out.scene, &out.handles[0]);
        let state = click(&mut out, &coordinator, &mut host, Click::at(p)).unwrap();
        assert_eq!(host.selection(), vec![out.handles[0].selection_key.clone()]);
        assert_eq!(
            state,
            SelectionState::Filtered {
                matched_categories: vec![0]
            }
        );

        let p = bar_center(&out.scene, &out.handles[5]);
        let state = click(&mut out, &coordinator, &mut host, Click::additive_at(p)).unwrap();
        assert_eq!(host.selection().len(), 2);
        assert_eq!(
            state,
            SelectionState::Filtered {
                matched_categories: vec![0, 2]
            }
        );

        let background = Click::at(Point::new(1.0, 1.0));
        let state = click(&mut out, &coordinator, &mut host, background).unwrap();
        assert_eq!(state, SelectionState::Unfiltered);
        assert!(host.selection().is_empty());
    }

    #[test]
    fn dimmed_bars_are_still_clickable() {
        let (mut out, coordinator) = chart(1.0);
        let mut host = MemorySelectionService::new();
        let a = bar_center(&out.scene, &out.handles[0]);
        let c = bar_center(&out.scene, &out.handles[4]);
        click(&mut out, &coordinator, &mut host, Click::at(a)).unwrap();
        let state = click(&mut out, &coordinator, &mut host, Click::at(c)).unwrap();
        assert_eq!(
            state,
            SelectionState::Filtered {
                matched_categories: vec![2]
            }
        );
    }

    #[test]
    fn rejected_requests_leave_scene_untouched() {
        let (mut out, coordinator) = chart(1.0);
        let mut host = MemorySelectionService::rejecting("read-only report");
        let p = bar_center(&out.scene, &out.handles[0]);
        let err = click(&mut out, &coordinator, &mut host, Click::at(p)).unwrap_err();
        assert_eq!(
            err,
            HostError::Rejected {
                operation: "select",
                reason: "read-only report".into()
            }
        );
        assert!(opacities(&out.scene, &out.handles).iter().all(|&o| o == 1.0));
    }

    #[test]
    fn clicks_become_owned_requests() {
        let (out, coordinator) = chart(1.0);
        let p = bar_center(&out.scene, &out.handles[3]);
        assert_eq!(
            coordinator.request(&out.scene, Click::additive_at(p)),
            SelectionRequest::Select {
                key: out.handles[3].selection_key.clone(),
                additive: true
            }
        );
        assert_eq!(
            coordinator.request(&out.scene, Click::at(Point::new(1.0, 1.0))),
            SelectionRequest::Clear
        );
    }

    #[test]
    fn memory_service_toggles() {
        let mut host = MemorySelectionService::new();
        let a = SelectionKey::from("a");
        let b = SelectionKey::from("b");

        block_on(host.select(&a, false)).unwrap();
        block_on(host.select(&b, true)).unwrap();
        assert_eq!(host.selection(), vec![a.clone(), b.clone()]);
        block_on(host.select(&a, true)).unwrap();
        assert_eq!(host.selection(), vec![b.clone()]);
        block_on(host.select(&a, false)).unwrap();
        assert_eq!(host.selection(), vec![a.clone()]);
        block_on(host.select(&a, false)).unwrap();
        assert!(host.selection().is_empty());
        block_on(host.clear()).unwrap();
        assert!(host.selection().is_empty());
    }
}
