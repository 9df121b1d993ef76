// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host dataset snapshot: one categorical dimension plus N value columns.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// Errors returned when building a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    /// The payload was not a valid dataset document.
    #[error("invalid dataset JSON: {0}")]
    Json(String),
    /// A value column has more entries than there are categories.
    #[error("series `{series}` has {len} values but there are only {categories} categories")]
    ColumnTooLong {
        /// Display name of the offending series.
        series: String,
        /// Number of values in the column.
        len: usize,
        /// Number of categories.
        categories: usize,
    },
}

/// A categorical value along the horizontal axis.
///
/// Keys are opaque to the chart: they are compared for equality and stringified for labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryKey {
    /// A numeric category (years, codes).
    Number(f64),
    /// A boolean category.
    Bool(bool),
    /// A text category (names, formatted dates).
    Text(String),
    /// A blank category.
    Null,
}

impl core::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for CategoryKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CategoryKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CategoryKey {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A raw cell as delivered by the host's query layer.
///
/// Cells are not guaranteed to be numeric; [`RawValue::coerce`] turns them into numbers the
/// way a loosely-typed host would (`"12.5"` is 12.5, `true` is 1, blanks are 0, junk is NaN).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A number.
    Number(f64),
    /// A boolean.
    Bool(bool),
    /// Text that may or may not hold a number.
    Text(String),
    /// A missing cell.
    Null,
}

impl RawValue {
    /// Coerces the cell to a number.
    pub fn coerce(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Bool(true) => 1.0,
            Self::Bool(false) | Self::Null => 0.0,
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
        }
    }

    /// Returns the coerced value if it is finite and strictly positive.
    pub fn positive(&self) -> Option<f64> {
        let v = self.coerce();
        (v.is_finite() && v > 0.0).then_some(v)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One named value column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesColumn {
    /// Display name.
    pub name: String,
    /// One cell per category. Cells past the end of the column count as missing.
    #[serde(default)]
    pub values: Vec<RawValue>,
}

impl SeriesColumn {
    /// Creates a column from anything convertible into raw cells.
    pub fn new<V: Into<RawValue>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the cell for `category`, treating out-of-range cells as missing.
    pub fn cell(&self, category: usize) -> &RawValue {
        self.values.get(category).unwrap_or(&RawValue::Null)
    }

    /// Returns the strictly positive value for `category`, if any.
    pub fn positive_value(&self, category: usize) -> Option<f64> {
        self.cell(category).positive()
    }
}

/// A dataset snapshot: ordered categories and per-category cells for each series.
///
/// Series order is the stable series ordinal used for stacking order and palette colors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Category keys, in axis order.
    #[serde(default)]
    pub categories: Vec<CategoryKey>,
    /// Value columns, in series ordinal order.
    #[serde(default)]
    pub series: Vec<SeriesColumn>,
}

impl Dataset {
    /// Creates a validated dataset.
    pub fn new(
        categories: Vec<CategoryKey>,
        series: Vec<SeriesColumn>,
    ) -> Result<Self, DatasetError> {
        let dataset = Self { categories, series };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Parses and validates a dataset from its JSON form.
    ///
    /// ```json
    /// { "categories": ["Jan", "Feb"],
    ///   "series": [{ "name": "Sales", "values": [100, "0"] }] }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let dataset: Self =
            serde_json::from_str(json).map_err(|e| DatasetError::Json(e.to_string()))?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Parses and validates a dataset from an already-decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DatasetError> {
        let dataset: Self =
            serde_json::from_value(value).map_err(|e| DatasetError::Json(e.to_string()))?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Checks that no column is longer than the category list.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let categories = self.categories.len();
        for s in &self.series {
            if s.values.len() > categories {
                return Err(DatasetError::ColumnTooLong {
                    series: s.name.clone(),
                    len: s.values.len(),
                    categories,
                });
            }
        }
        Ok(())
    }

    /// Returns `true` if there is at least one category and one value column.
    pub fn has_data(&self) -> bool {
        !self.categories.is_empty() && !self.series.is_empty()
    }
}
