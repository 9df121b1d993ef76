// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! User-adjustable formatting options.
//!
//! Options are grouped the way the host property pane shows them. Each group deserializes
//! from the host's persisted values with per-field defaults, so a partial (or empty) payload
//! yields a complete configuration.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of palette slots. Series beyond this reuse slots cyclically.
pub const PALETTE_SIZE: usize = 5;

/// Errors returned when reading persisted formatting values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The persisted payload did not match the expected option types.
    #[error("invalid persisted formatting values: {0}")]
    Invalid(String),
}

/// A color option.
///
/// Persisted colors are accepted as `"#rrggbb"` strings (any CSS color syntax works), as host
/// fill objects `{"solid": {"color": "#rrggbb"}}`, or as picker values `{"value": "#rrggbb"}`.
/// They serialize back as hex strings, and compare at 8-bit precision.
#[derive(Clone, Copy, Debug)]
pub struct ColorValue(pub Color);

impl PartialEq for ColorValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_rgba8() == other.0.to_rgba8()
    }
}

impl ColorValue {
    /// Creates a color from 8-bit RGB components.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self(Color::from_rgb8(r, g, b))
    }

    /// Parses a CSS color string.
    pub fn parse(s: &str) -> Result<Self, SettingsError> {
        parse_color(s.trim())
            .map(|c| Self(c.to_alpha_color::<Srgb>()))
            .map_err(|e| SettingsError::Invalid(format!("color `{s}`: {e}")))
    }

    /// Returns the `#rrggbb` (or `#rrggbbaa`) form.
    pub fn to_hex(self) -> String {
        let c = self.0.to_rgba8();
        if c.a == 255 {
            format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
        }
    }
}

impl From<ColorValue> for Color {
    fn from(value: ColorValue) -> Self {
        value.0
    }
}

#[derive(Deserialize)]
struct SolidFill {
    color: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Css(String),
    Fill { solid: SolidFill },
    Picker { value: String },
}

impl<'de> Deserialize<'de> for ColorValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = match ColorRepr::deserialize(deserializer)? {
            ColorRepr::Css(s) => s,
            ColorRepr::Fill { solid } => solid.color,
            ColorRepr::Picker { value } => value,
        };
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for ColorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Unit scaling applied to value and total labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueScale {
    /// Pick billions/millions/thousands by magnitude.
    #[default]
    #[serde(rename = "none")]
    Automatic,
    /// Always divide by one thousand.
    #[serde(rename = "mil")]
    Thousands,
    /// Always divide by one million.
    #[serde(rename = "milhao")]
    Millions,
}

impl ValueScale {
    /// All choices, in the order the property pane lists them.
    pub const ALL: [Self; 3] = [Self::Automatic, Self::Thousands, Self::Millions];

    /// Returns the persisted key of this choice.
    pub fn key(self) -> &'static str {
        match self {
            Self::Automatic => "none",
            Self::Thousands => "mil",
            Self::Millions => "milhao",
        }
    }

    /// Returns the display name of this choice.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Automatic => "Automatic",
            Self::Thousands => "Thousands",
            Self::Millions => "Millions",
        }
    }
}

// Dropdowns persist either the bare key or the selected `{ value, displayName }` item.
fn value_scale_item<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ValueScale, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Bare(ValueScale),
        Item { value: ValueScale },
    }
    Ok(match Repr::deserialize(deserializer)? {
        Repr::Bare(v) | Repr::Item { value: v } => v,
    })
}

/// Category axis label appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryLabelSettings {
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family.
    pub font_family: String,
    /// Bold labels.
    pub font_bold: bool,
    /// Label color.
    pub font_color: ColorValue,
}

impl Default for CategoryLabelSettings {
    fn default() -> Self {
        Self {
            font_size: 11.0,
            font_family: "Segoe UI".to_string(),
            font_bold: false,
            font_color: ColorValue::rgb8(0x00, 0x00, 0x00),
        }
    }
}

/// Series color palette.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPalette {
    /// Slot 1.
    pub color1: ColorValue,
    /// Slot 2.
    pub color2: ColorValue,
    /// Slot 3.
    pub color3: ColorValue,
    /// Slot 4.
    pub color4: ColorValue,
    /// Slot 5.
    pub color5: ColorValue,
}

impl ColorPalette {
    /// Returns the slots in order.
    pub fn colors(&self) -> [Color; PALETTE_SIZE] {
        [
            self.color1.0,
            self.color2.0,
            self.color3.0,
            self.color4.0,
            self.color5.0,
        ]
    }

    /// Returns the color for the series with the given ordinal.
    pub fn series_color(&self, series_index: usize) -> Color {
        self.colors()[series_index % PALETTE_SIZE]
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            color1: ColorValue::rgb8(0x1f, 0x77, 0xb4),
            color2: ColorValue::rgb8(0xff, 0x7f, 0x0e),
            color3: ColorValue::rgb8(0x2c, 0xa0, 0x2c),
            color4: ColorValue::rgb8(0xd6, 0x27, 0x28),
            color5: ColorValue::rgb8(0x94, 0x67, 0xbd),
        }
    }
}

/// Data label visibility and formatting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataLabelSettings {
    /// Show the percent line in segment labels.
    pub show_percent: bool,
    /// Show the value line in segment labels.
    pub show_values: bool,
    /// Show the series name line in segment labels (needs a taller segment).
    pub show_series_names: bool,
    /// Show total labels above each column.
    pub show_totals: bool,
    /// Unit scaling for value and total labels.
    #[serde(deserialize_with = "value_scale_item")]
    pub value_format: ValueScale,
    /// Segment label font size in pixels.
    pub label_font_size: f64,
    /// Segment label color.
    pub label_color: ColorValue,
    /// Total label font size in pixels.
    pub total_font_size: f64,
    /// Total label color.
    pub total_color: ColorValue,
}

impl Default for DataLabelSettings {
    fn default() -> Self {
        Self {
            show_percent: true,
            show_values: true,
            show_series_names: false,
            show_totals: true,
            value_format: ValueScale::Automatic,
            label_font_size: 12.0,
            label_color: ColorValue::rgb8(0xff, 0xff, 0xff),
            total_font_size: 11.0,
            total_color: ColorValue::rgb8(0x22, 0x22, 0x22),
        }
    }
}

/// Bar appearance and spacing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartStyle {
    /// Bar opacity in `[0, 1]`.
    pub bar_opacity: f64,
    /// Bar border width in pixels.
    pub border_width: f64,
    /// Bar border color.
    pub border_color: ColorValue,
    /// Inter-bar spacing as a fraction of the band step, in `[0, 1]`.
    pub spacing: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            bar_opacity: 1.0,
            border_width: 0.0,
            border_color: ColorValue::rgb8(0x00, 0x00, 0x00),
            spacing: 0.2,
        }
    }
}

/// The complete formatting configuration for one update cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingSettings {
    /// Category axis labels.
    #[serde(rename = "categorySettings")]
    pub category: CategoryLabelSettings,
    /// Series palette.
    #[serde(rename = "colorPalette")]
    pub palette: ColorPalette,
    /// Data labels.
    #[serde(rename = "formatting")]
    pub labels: DataLabelSettings,
    /// Bar style.
    #[serde(rename = "chartSettings")]
    pub chart: ChartStyle,
}

impl FormattingSettings {
    /// Reads persisted values, filling anything absent from the defaults.
    ///
    /// `null` means "nothing persisted yet".
    pub fn from_persisted(persisted: &serde_json::Value) -> Result<Self, SettingsError> {
        if persisted.is_null() {
            return Ok(Self::default());
        }
        Self::deserialize(persisted).map_err(|e| SettingsError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use serde_json::json;

    use super::*;

    #[test]
    fn empty_payload_yields_defaults() {
        let s = FormattingSettings::from_persisted(&serde_json::Value::Null).unwrap();
        assert_eq!(s, FormattingSettings::default());
        let s = FormattingSettings::from_persisted(&json!({})).unwrap();
        assert_eq!(s, FormattingSettings::default());
    }

    #[test]
    fn defaults_match_documented_values() {
        let s = FormattingSettings::default();
        assert_eq!(s.category.font_size, 11.0);
        assert_eq!(s.category.font_family, "Segoe UI");
        assert!(!s.category.font_bold);
        assert!(s.labels.show_percent && s.labels.show_values && s.labels.show_totals);
        assert!(!s.labels.show_series_names);
        assert_eq!(s.labels.value_format, ValueScale::Automatic);
        assert_eq!(s.chart.bar_opacity, 1.0);
        assert_eq!(s.chart.border_width, 0.0);
        assert_eq!(s.chart.spacing, 0.2);
        assert_eq!(s.palette.color1.to_hex(), "#1f77b4");
        assert_eq!(s.labels.total_color.to_hex(), "#222222");
    }

    #[test]
    fn partial_payload_merges_over_defaults() {
        let s = FormattingSettings::from_persisted(&json!({
            "categorySettings": { "fontSize": 14, "fontBold": true },
            "colorPalette": { "color2": { "solid": { "color": "#00ff00" } } },
            "formatting": { "valueFormat": { "value": "milhao", "displayName": "Millions" } },
            "chartSettings": { "spacing": 0.5, "borderColor": { "value": "#ff0000" } }
        }))
        .unwrap();
        assert_eq!(s.category.font_size, 14.0);
        assert!(s.category.font_bold);
        assert_eq!(s.category.font_family, "Segoe UI");
        assert_eq!(s.palette.color2.to_hex(), "#00ff00");
        assert_eq!(s.palette.color1.to_hex(), "#1f77b4");
        assert_eq!(s.labels.value_format, ValueScale::Millions);
        assert_eq!(s.chart.spacing, 0.5);
        assert_eq!(s.chart.border_color.to_hex(), "#ff0000");
        assert_eq!(s.chart.bar_opacity, 1.0);
    }

    #[test]
    fn bare_dropdown_keys_are_accepted() {
        let s = FormattingSettings::from_persisted(&json!({
            "formatting": { "valueFormat": "mil" }
        }))
        .unwrap();
        assert_eq!(s.labels.value_format, ValueScale::Thousands);
    }

    #[test]
    fn bad_values_are_reported() {
        let err = FormattingSettings::from_persisted(&json!({
            "colorPalette": { "color1": "not-a-color" }
        }))
        .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = FormattingSettings::from_persisted(&json!({
            "chartSettings": { "barOpacity": "opaque" }
        }));
        assert!(err.is_err());
    }

    #[test]
    fn palette_cycles_every_five_series() {
        let p = ColorPalette::default();
        let rgba = |i: usize| p.series_color(i).to_rgba8();
        assert_eq!(rgba(5), rgba(0));
        assert_eq!(rgba(6), rgba(1));
        assert_ne!(rgba(0), rgba(1));
    }

    #[test]
    fn settings_round_trip_through_json() {
        let mut s = FormattingSettings::default();
        s.labels.value_format = ValueScale::Thousands;
        s.palette.color3 = ColorValue::rgb8(1, 2, 3);
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["formatting"]["valueFormat"], "mil");
        assert_eq!(v["colorPalette"]["color3"], "#010203");
        assert_eq!(FormattingSettings::from_persisted(&v).unwrap(), s);
    }
}
