// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: mapping fractions and category indices to pixels.

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }
}

/// A discrete band scale for categorical charts.
///
/// Bands are laid out in index order with `padding_inner` steps between bands and
/// `padding_outer` steps before the first and after the last, and the whole run is centered
/// in the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a band scale covering `count` bands over `range`, with no padding.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    /// Sets inner and outer padding to the same fraction of a step.
    ///
    /// Inner padding is clamped to `[0, 1]`; outer padding only to `>= 0`.
    pub fn with_padding(mut self, padding: f64) -> Self {
        let padding = if padding.is_nan() { 0.0 } else { padding };
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding.max(0.0);
        self
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        let denom = (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0);
        (r1 - r0).abs() / denom
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.step() * (1.0 - self.padding_inner)
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the x-position where the band at `index` starts.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let lo = r0.min(r1);
        let width = (r1 - r0).abs();
        let step = self.step();
        let used = step * (self.count as f64 - self.padding_inner);
        let start = lo + (width - used) * 0.5;
        start + step * index as f64
    }

    /// Returns the x-position of the center of the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.x(index) + self.band_width() * 0.5
    }
}
