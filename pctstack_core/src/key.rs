// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection identities.

extern crate alloc;

use alloc::sync::Arc;

/// An opaque, comparable token correlating a rendered element with host selection state.
///
/// Keys compare by value: the host hands back keys it previously received from us, and
/// reconciliation only needs equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionKey(Arc<str>);

impl SelectionKey {
    /// Creates a key from its string form.
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Returns the string form of the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SelectionKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
