// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene: an owned set of marks produced by one render pass.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Size};

use crate::mark::{Mark, MarkId};

/// An owned scene graph.
///
/// Marks keep insertion order; [`Scene::sorted`] gives paint order. Inserting a mark whose id
/// is already present replaces the previous mark in place.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    size: Size,
    marks: Vec<Mark>,
    index: HashMap<MarkId, usize>,
}

impl Scene {
    /// Creates an empty scene covering `size`.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            marks: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the surface size (content width may exceed the host viewport).
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the scene has no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Inserts or replaces a mark.
    pub fn insert(&mut self, mark: Mark) {
        match self.index.get(&mark.id) {
            Some(&i) => self.marks[i] = mark,
            None => {
                self.index.insert(mark.id, self.marks.len());
                self.marks.push(mark);
            }
        }
    }

    /// Returns marks in insertion order.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Looks up a mark by id.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.index.get(&id).map(|&i| &self.marks[i])
    }

    /// Looks up a mark by id for restyling.
    pub fn get_mut(&mut self, id: MarkId) -> Option<&mut Mark> {
        self.index.get(&id).map(|&i| &mut self.marks[i])
    }

    /// Returns marks in paint order: `(z_index, id)` ascending.
    pub fn sorted(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.iter().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }

    /// Returns the topmost visible mark with known bounds that contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<MarkId> {
        self.marks
            .iter()
            .filter(|m| m.visible)
            .filter(|m| m.payload.bounds().is_some_and(|b| b.contains(point)))
            .max_by_key(|m| (m.z_index, m.id))
            .map(|m| m.id)
    }
}

impl Extend<Mark> for Scene {
    fn extend<T: IntoIterator<Item = Mark>>(&mut self, iter: T) {
        for mark in iter {
            self.insert(mark);
        }
    }
}
