// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing visual: update, click, formatting model.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Size;
use pctstack_core::{Scene, SelectionKey};
use pctstack_transforms::{
    Dataset, SelectionKeyBuilder, StackedData, StructuralKeyBuilder, normalize,
};

use crate::model::FormattingModel;
use crate::render::render;
use crate::selection::{
    Click, SelectionCoordinator, SelectionRequest, SelectionService, SelectionState,
};
use crate::settings::FormattingSettings;

/// Inputs of one update cycle.
#[derive(Clone, Debug, Default)]
pub struct UpdateOptions {
    /// The dataset snapshot, or `None` if the host has no data bound.
    pub dataset: Option<Dataset>,
    /// Viewport size in pixels.
    pub viewport: Size,
    /// Persisted formatting values (`null` when nothing is persisted).
    pub persisted: serde_json::Value,
}

/// An object instance returned by the legacy enumeration entry point.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInstance {
    /// Group name.
    pub object_name: String,
    /// Option values.
    pub properties: serde_json::Value,
}

/// A 100%-stacked column chart.
///
/// Every [`update`](Self::update) recomputes everything from its inputs and replaces the
/// previous scene. Between updates, the scene is only restyled from the host's selection.
///
/// Clicks go through the host in two phases:
///
/// ```
/// use kurbo::Point;
/// use pctstack_charts::{Click, MemorySelectionService, SelectionService, StackedColumnVisual};
///
/// let mut visual = <StackedColumnVisual>::default();
/// let mut host = MemorySelectionService::new();
///
/// let request = visual.on_click(Click::at(Point::new(10.0, 10.0)));
/// pollster::block_on(request.send(&mut host)).unwrap();
/// visual.apply_selection(&host.selection());
/// ```
#[derive(Debug)]
pub struct StackedColumnVisual<K = StructuralKeyBuilder> {
    keys: K,
    settings: FormattingSettings,
    scene: Scene,
    coordinator: SelectionCoordinator,
    selection_state: SelectionState,
}

impl Default for StackedColumnVisual {
    fn default() -> Self {
        Self::new(StructuralKeyBuilder)
    }
}

impl<K: SelectionKeyBuilder> StackedColumnVisual<K> {
    /// Creates a visual that builds selection identities with `keys`.
    pub fn new(keys: K) -> Self {
        Self {
            keys,
            settings: FormattingSettings::default(),
            scene: Scene::default(),
            coordinator: SelectionCoordinator::default(),
            selection_state: SelectionState::Unfiltered,
        }
    }

    /// Runs one update cycle and applies the host's current selection.
    ///
    /// Never fails: unreadable settings fall back to defaults, and missing or empty data
    /// renders an empty scene.
    pub fn update(&mut self, options: &UpdateOptions, selection: &impl SelectionService) {
        self.settings =
            FormattingSettings::from_persisted(&options.persisted).unwrap_or_else(|err| {
                log::warn!("{err}; using default formatting");
                FormattingSettings::default()
            });

        let data = match &options.dataset {
            Some(dataset) if dataset.has_data() => normalize(dataset, &self.keys),
            _ => {
                log::debug!("no data bound");
                StackedData::default()
            }
        };

        let rendered = render(&data, &self.settings, options.viewport);
        self.scene = rendered.scene;
        self.coordinator =
            SelectionCoordinator::new(rendered.handles, self.settings.chart.bar_opacity);
        self.apply_selection(&selection.selection());
    }

    /// Turns a pointer click into a host request: select the bar under it, or clear the
    /// selection on the background.
    ///
    /// The request does not borrow the visual, so updates may run while the host handles it.
    /// Pass the host's confirmed selection to [`apply_selection`](Self::apply_selection)
    /// afterwards.
    pub fn on_click(&self, click: Click) -> SelectionRequest {
        self.coordinator.request(&self.scene, click)
    }

    /// Restyles the current scene from the host's selection and returns the new state.
    ///
    /// Always applied to the latest scene, so the last confirmed selection wins.
    pub fn apply_selection(&mut self, selected: &[SelectionKey]) -> SelectionState {
        self.selection_state = self.coordinator.reconcile(&mut self.scene, selected);
        self.selection_state.clone()
    }

    /// Returns the current scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns the settings of the last update.
    pub fn settings(&self) -> &FormattingSettings {
        &self.settings
    }

    /// Returns how the scene reflects the host selection.
    pub fn selection_state(&self) -> &SelectionState {
        &self.selection_state
    }

    /// Returns the formatting model for the host property pane.
    pub fn get_formatting_model(&self) -> FormattingModel {
        self.settings.formatting_model()
    }

    /// Legacy property enumeration. The formatting model supersedes it, so it lists nothing.
    pub fn enumerate_object_instances(&self, object_name: &str) -> Vec<ObjectInstance> {
        log::trace!("legacy enumeration of `{object_name}` ignored");
        Vec::new()
    }
}
