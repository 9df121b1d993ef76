// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for value, total and percent labels.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::settings::ValueScale;

/// Formats a value with unit scaling and pt-BR separators.
///
/// The scaled number always has two fraction digits, a comma decimal separator and period
/// thousands separators; the unit suffix (`" Bi"`, `" Mi"`, `" Mil"`) follows.
///
/// ```
/// use pctstack_charts::{ValueScale, format_value};
///
/// assert_eq!(format_value(1_234_567.0, ValueScale::Automatic), "1,23 Mi");
/// assert_eq!(format_value(1_234_567.0, ValueScale::Thousands), "1.234,57 Mil");
/// assert_eq!(format_value(150.0, ValueScale::Automatic), "150,00");
/// ```
pub fn format_value(value: f64, scale: ValueScale) -> String {
    if !value.is_finite() {
        return grouped_decimal(value);
    }
    let (divisor, suffix) = match scale {
        ValueScale::Millions => (1e6, " Mi"),
        ValueScale::Thousands => (1e3, " Mil"),
        ValueScale::Automatic => {
            let abs = value.abs();
            if abs >= 1e9 {
                (1e9, " Bi")
            } else if abs >= 1e6 {
                (1e6, " Mi")
            } else if abs >= 1e3 {
                (1e3, " Mil")
            } else {
                (1.0, "")
            }
        }
    };
    let mut out = grouped_decimal(value / divisor);
    out.push_str(suffix);
    out
}

/// Formats a `[0, 1]` fraction as a percentage with one fraction digit (`0.6667` is `66.7%`).
///
/// Exact ties round away from zero, so `0.0625` is `6.3%`.
pub fn format_percent(fraction: f64) -> String {
    let percent = fraction * 100.0;
    let rounded = round_ties_away(percent.abs(), 10.0);
    let sign = if percent < 0.0 && rounded > 0.0 { "-" } else { "" };
    format!("{sign}{rounded:.1}%")
}

/// Moves `abs` off an exact tie at `1 / scale` precision so fixed-precision formatting
/// rounds it up.
///
/// `{:.N}` breaks exact binary ties to even (`1.125` prints as `1.12`); labels round half
/// away from zero. Non-ties are returned unchanged.
fn round_ties_away(abs: f64, scale: f64) -> f64 {
    let halves = 2.0 * scale;
    let t = (abs * halves).floor();
    let exact = abs.mul_add(halves, -t) == 0.0;
    let odd = t - 2.0 * (t * 0.5).floor() == 1.0;
    if exact && odd {
        (t + 1.0) / halves
    } else {
        abs
    }
}

fn grouped_decimal(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "∞" } else { "-∞" });
    }

    let fixed = format!("{:.2}", round_ties_away(value.abs(), 100.0));
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut out = String::with_capacity(fixed.len() + int.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(frac);
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn automatic_scale_picks_suffix_by_magnitude() {
        assert_eq!(format_value(2_500_000_000.0, ValueScale::Automatic), "2,50 Bi");
        assert_eq!(format_value(1_500_000.0, ValueScale::Automatic), "1,50 Mi");
        assert_eq!(format_value(1_000.0, ValueScale::Automatic), "1,00 Mil");
        assert_eq!(format_value(999.994, ValueScale::Automatic), "999,99");
        assert_eq!(format_value(-2_000.0, ValueScale::Automatic), "-2,00 Mil");
    }

    #[test]
    fn fixed_scales_ignore_magnitude() {
        assert_eq!(format_value(500.0, ValueScale::Thousands), "0,50 Mil");
        assert_eq!(format_value(2_500_000_000.0, ValueScale::Millions), "2.500,00 Mi");
        assert_eq!(format_value(1_234_567_890.0, ValueScale::Thousands), "1.234.567,89 Mil");
    }

    #[test]
    fn thousands_separators_group_by_three() {
        assert_eq!(grouped_decimal(0.0), "0,00");
        assert_eq!(grouped_decimal(12.5), "12,50");
        assert_eq!(grouped_decimal(123_456.0), "123.456,00");
        assert_eq!(grouped_decimal(1_234_567.126), "1.234.567,13");
    }

    #[test]
    fn non_finite_values_do_not_panic() {
        assert_eq!(format_value(f64::NAN, ValueScale::Automatic), "NaN");
        assert_eq!(format_value(f64::INFINITY, ValueScale::Automatic), "∞");
    }

    #[test]
    fn percent_has_one_fraction_digit() {
        assert_eq!(format_percent(100.0 / 150.0), "66.7%");
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(0.05), "5.0%");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(format_value(1125.0, ValueScale::Automatic), "1,13 Mil");
        assert_eq!(format_value(0.125, ValueScale::Automatic), "0,13");
        assert_eq!(format_value(-0.125, ValueScale::Automatic), "-0,13");
        assert_eq!(format_value(2.5, ValueScale::Automatic), "2,50");
        assert_eq!(format_percent(0.0625), "6.3%");
        assert_eq!(format_percent(1.0 / 16.0 * 3.0), "18.8%");
    }

    #[test]
    fn near_ties_keep_their_exact_rounding() {
        // 1.005 is stored just below the tie.
        assert_eq!(format_value(1.005, ValueScale::Automatic), "1,00");
        assert_eq!(format_percent(0.00045), "0.0%");
    }
}
