// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The declarative formatting model handed to the host property pane.

extern crate alloc;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use serde::Serialize;
use serde_json::Value;

use crate::settings::{ColorValue, FormattingSettings, ValueScale};

/// Every formatting card, in pane order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormattingModel {
    /// Cards.
    pub cards: Vec<FormattingCard>,
}

impl FormattingModel {
    /// Looks up a card by its persisted group name.
    pub fn card(&self, name: &str) -> Option<&FormattingCard> {
        self.cards.iter().find(|c| c.name == name)
    }
}

/// One option group.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingCard {
    /// Persisted group name.
    pub name: &'static str,
    /// Pane title.
    pub display_name: &'static str,
    /// Options, in pane order.
    pub slices: Vec<FormattingSlice>,
}

impl FormattingCard {
    /// Looks up an option by its persisted name.
    pub fn slice(&self, name: &str) -> Option<&FormattingSlice> {
        self.slices.iter().find(|s| s.name == name)
    }
}

/// One option: its control, current value and default.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingSlice {
    /// Persisted option name.
    pub name: &'static str,
    /// Pane label.
    pub display_name: &'static str,
    /// Editor control.
    #[serde(flatten)]
    pub control: SliceControl,
    /// Current value.
    pub value: Value,
    /// Declared default.
    pub default_value: Value,
}

/// The editor a slice is shown with.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SliceControl {
    /// Numeric spinner with optional bounds.
    NumUpDown {
        /// Lower bound.
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Upper bound.
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Font family picker.
    FontPicker,
    /// On/off switch.
    ToggleSwitch,
    /// Color picker.
    ColorPicker,
    /// Closed set of choices.
    ItemDropdown {
        /// Allowed values.
        items: Vec<DropdownItem>,
    },
}

/// One allowed value of a dropdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownItem {
    /// Persisted value.
    pub value: &'static str,
    /// Pane label.
    pub display_name: &'static str,
}

fn number(
    name: &'static str,
    display_name: &'static str,
    value: f64,
    default: f64,
) -> FormattingSlice {
    bounded(name, display_name, value, default, None, None)
}

fn bounded(
    name: &'static str,
    display_name: &'static str,
    value: f64,
    default: f64,
    min: Option<f64>,
    max: Option<f64>,
) -> FormattingSlice {
    FormattingSlice {
        name,
        display_name,
        control: SliceControl::NumUpDown { min, max },
        value: Value::from(value),
        default_value: Value::from(default),
    }
}

fn toggle(
    name: &'static str,
    display_name: &'static str,
    value: bool,
    default: bool,
) -> FormattingSlice {
    FormattingSlice {
        name,
        display_name,
        control: SliceControl::ToggleSwitch,
        value: Value::Bool(value),
        default_value: Value::Bool(default),
    }
}

fn color(
    name: &'static str,
    display_name: &'static str,
    value: ColorValue,
    default: ColorValue,
) -> FormattingSlice {
    FormattingSlice {
        name,
        display_name,
        control: SliceControl::ColorPicker,
        value: Value::String(value.to_hex()),
        default_value: Value::String(default.to_hex()),
    }
}

fn font(
    name: &'static str,
    display_name: &'static str,
    value: &str,
    default: &str,
) -> FormattingSlice {
    FormattingSlice {
        name,
        display_name,
        control: SliceControl::FontPicker,
        value: Value::String(String::from(value)),
        default_value: Value::String(String::from(default)),
    }
}

fn value_scale(value: ValueScale) -> FormattingSlice {
    FormattingSlice {
        name: "valueFormat",
        display_name: "Value format",
        control: SliceControl::ItemDropdown {
            items: ValueScale::ALL
                .iter()
                .map(|s| DropdownItem {
                    value: s.key(),
                    display_name: s.display_name(),
                })
                .collect(),
        },
        value: Value::from(value.key()),
        default_value: Value::from(ValueScale::default().key()),
    }
}

impl FormattingSettings {
    /// Describes these settings (and their defaults) for the host property pane.
    pub fn formatting_model(&self) -> FormattingModel {
        let d = Self::default();
        let (c, dc) = (&self.category, &d.category);
        let (p, dp) = (&self.palette, &d.palette);
        let (l, dl) = (&self.labels, &d.labels);
        let (s, ds) = (&self.chart, &d.chart);

        FormattingModel {
            cards: vec![
                FormattingCard {
                    name: "categorySettings",
                    display_name: "Category labels",
                    slices: vec![
                        number("fontSize", "Font size", c.font_size, dc.font_size),
                        font("fontFamily", "Font family", &c.font_family, &dc.font_family),
                        toggle("fontBold", "Bold", c.font_bold, dc.font_bold),
                        color("fontColor", "Font color", c.font_color, dc.font_color),
                    ],
                },
                FormattingCard {
                    name: "colorPalette",
                    display_name: "Color palette",
                    slices: vec![
                        color("color1", "Series 1 color", p.color1, dp.color1),
                        color("color2", "Series 2 color", p.color2, dp.color2),
                        color("color3", "Series 3 color", p.color3, dp.color3),
                        color("color4", "Series 4 color", p.color4, dp.color4),
                        color("color5", "Series 5 color", p.color5, dp.color5),
                    ],
                },
                FormattingCard {
                    name: "formatting",
                    display_name: "Data labels",
                    slices: vec![
                        toggle("showPercent", "Show percent", l.show_percent, dl.show_percent),
                        toggle("showValues", "Show values", l.show_values, dl.show_values),
                        toggle(
                            "showSeriesNames",
                            "Show series names",
                            l.show_series_names,
                            dl.show_series_names,
                        ),
                        toggle("showTotals", "Show totals", l.show_totals, dl.show_totals),
                        value_scale(l.value_format),
                        number(
                            "labelFontSize",
                            "Label font size",
                            l.label_font_size,
                            dl.label_font_size,
                        ),
                        color("labelColor", "Label color", l.label_color, dl.label_color),
                        number(
                            "totalFontSize",
                            "Total font size",
                            l.total_font_size,
                            dl.total_font_size,
                        ),
                        color("totalColor", "Total color", l.total_color, dl.total_color),
                    ],
                },
                FormattingCard {
                    name: "chartSettings",
                    display_name: "Chart",
                    slices: vec![
                        bounded(
                            "barOpacity",
                            "Bar opacity",
                            s.bar_opacity,
                            ds.bar_opacity,
                            Some(0.0),
                            Some(1.0),
                        ),
                        bounded(
                            "borderWidth",
                            "Border width",
                            s.border_width,
                            ds.border_width,
                            Some(0.0),
                            None,
                        ),
                        color("borderColor", "Border color", s.border_color, ds.border_color),
                        bounded(
                            "spacing",
                            "Bar spacing",
                            s.spacing,
                            ds.spacing,
                            Some(0.0),
                            Some(1.0),
                        ),
                    ],
                },
            ],
        }
    }
}
