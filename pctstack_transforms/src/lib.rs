// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset model and percent-of-total stacking.
//!
//! This crate turns the host's raw category × series table into stacked segments:
//! - categories without a single positive value are dropped,
//! - each surviving category is normalized so its segments span exactly `[0, 1]`, and
//! - every segment carries a selection key built by the host's identity service.
//!
//! It is a full recompute: nothing is cached between update cycles.

#![no_std]

extern crate alloc;

mod dataset;
mod identity;
mod normalize;

pub use dataset::{CategoryKey, Dataset, DatasetError, RawValue, SeriesColumn};
pub use identity::{SelectionKeyBuilder, StructuralKeyBuilder};
pub use normalize::{CategoryTotal, Segment, StackedData, normalize};
