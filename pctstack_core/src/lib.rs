// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene graph primitives for 100%-stacked column charts.
//!
//! A render pass produces a [`Scene`]: an owned, ordered list of [`Mark`]s with stable
//! [`MarkId`]s. Nothing here holds on to a drawing surface; the host walks the scene and
//! paints it however it likes (SVG, canvas, a GPU renderer).
//!
//! Marks carry just enough state for local interaction feedback (`opacity`, `visible`), so a
//! selection pass can restyle an existing scene without re-running layout.

#![no_std]

extern crate alloc;

mod key;
mod mark;
mod scene;

pub use key::SelectionKey;
pub use mark::{
    Mark, MarkBuilder, MarkId, MarkPayload, RectMark, StrokeStyle, TextAnchor, TextBaseline,
    TextLine, TextMark, TextStyle,
};
pub use scene::Scene;
