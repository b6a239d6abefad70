// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick and year label formatting.

/// Formats a tick value using a decimal count derived from the tick step.
///
/// A step of `0.25` formats ticks with two decimals, a step of `5` with none.
/// This keeps labels along one axis consistent with each other.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let decimals = step_decimals(step);
    // Avoid "-0" style labels.
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v:.decimals$}")
}

fn step_decimals(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 || step >= 1.0 {
        return 0;
    }
    let d = -step.log10().floor();
    if d.is_finite() && d > 0.0 { (d as usize).min(6) } else { 0 }
}

/// Formats a calendar year as an era label.
///
/// Negative years are BCE by magnitude; zero and positive years are CE:
/// `-500` → `"500 BCE"`, `0` → `"0 CE"`, `1200` → `"1200 CE"`.
pub fn format_year(year: f64) -> String {
    if !year.is_finite() {
        return format!("{year}");
    }
    let y = year.round() as i64;
    if y < 0 {
        format!("{} BCE", -y)
    } else {
        format!("{y} CE")
    }
}

/// Formats an inclusive year range, e.g. `"2000 BCE - 900 CE"`.
pub fn format_year_span(start: f64, end: f64) -> String {
    format!("{} - {}", format_year(start), format_year(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_labels_cover_bce_zero_and_ce() {
        assert_eq!(format_year(-500.0), "500 BCE");
        assert_eq!(format_year(0.0), "0 CE");
        assert_eq!(format_year(1200.0), "1200 CE");
    }

    #[test]
    fn year_span_formats_both_endpoints() {
        assert_eq!(format_year_span(-2000.0, 900.0), "2000 BCE - 900 CE");
    }

    #[test]
    fn tick_decimals_follow_the_step() {
        assert_eq!(format_tick_with_step(2.5, 0.5), "2.5");
        assert_eq!(format_tick_with_step(5.0, 5.0), "5");
        assert_eq!(format_tick_with_step(0.25, 0.05), "0.25");
        assert_eq!(format_tick_with_step(-0.0, 1.0), "0");
    }
}
