//! Numeric scaling and duration formatting shared by the widgets

use std::fmt::Write as _;

pub(crate) const MINUTE: u64 = 60;
pub(crate) const HOUR: u64 = 60 * MINUTE;
pub(crate) const DAY: u64 = 24 * HOUR;

/// How a duration is broken into day/hour/minute/second fields.
///
/// `Auto` picks the coarsest nonzero unit, so a 95 second duration renders
/// as minutes and seconds while a 5 second one renders seconds only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationStyle {
    /// `D:HH:MM:SS`
    Dhms,
    /// `HH:MM:SS`
    Hms,
    /// `MM:SS`
    Ms,
    /// `SS`
    Secs,
    /// Coarsest nonzero unit and below
    Auto,
}

/// Format `value`, scaling it down by `step` and attaching the matching
/// unit prefix while the value is large enough and prefixes remain.
pub(crate) fn scaled(
    value: f64,
    decimals: Option<usize>,
    prefixes: Option<&[&str]>,
    step: f64,
) -> String {
    let Some(prefixes) = prefixes else {
        return plain(value, decimals);
    };
    if prefixes.is_empty() || step <= 1.0 {
        return plain(value, decimals);
    }
    let mut scaled = value;
    let mut power = 0;
    while scaled >= step && power + 1 < prefixes.len() {
        scaled /= step;
        power += 1;
    }
    let mut out = plain(scaled, decimals);
    out.push_str(prefixes[power]);
    out
}

/// Format a bare numeric value with an optional fixed decimal count.
/// Without one, integral values drop the fractional part entirely.
pub(crate) fn plain(value: f64, decimals: Option<usize>) -> String {
    match decimals {
        Some(prec) => format!("{value:.prec$}"),
        None => {
            if value.fract() == 0.0 && value.abs() < 9e15 {
                format!("{}", value as i64)
            } else {
                value.to_string()
            }
        }
    }
}

/// Format a duration in whole seconds according to the requested style,
/// optionally labelling each field with its unit.
pub(crate) fn duration(total_secs: u64, style: DurationStyle, units: bool) -> String {
    let style = match style {
        DurationStyle::Auto => {
            if total_secs >= DAY {
                DurationStyle::Dhms
            } else if total_secs >= HOUR {
                DurationStyle::Hms
            } else if total_secs >= MINUTE {
                DurationStyle::Ms
            } else {
                DurationStyle::Secs
            }
        }
        other => other,
    };

    let mut secs = total_secs;
    let mut out = String::new();
    match style {
        DurationStyle::Dhms => {
            let days = secs / DAY;
            secs %= DAY;
            let hours = secs / HOUR;
            secs %= HOUR;
            let minutes = secs / MINUTE;
            secs %= MINUTE;
            let _ = if units {
                write!(out, "{days}d {hours}h {minutes}m {secs}s")
            } else {
                write!(out, "{days}:{hours:02}:{minutes:02}:{secs:02}")
            };
        }
        DurationStyle::Hms => {
            let hours = secs / HOUR;
            secs %= HOUR;
            let minutes = secs / MINUTE;
            secs %= MINUTE;
            let _ = if units {
                write!(out, "{hours}h {minutes}m {secs}s")
            } else {
                write!(out, "{hours:02}:{minutes:02}:{secs:02}")
            };
        }
        DurationStyle::Ms => {
            let minutes = secs / MINUTE;
            secs %= MINUTE;
            let _ = if units {
                write!(out, "{minutes}m {secs}s")
            } else {
                write!(out, "{minutes:02}:{secs:02}")
            };
        }
        DurationStyle::Secs | DurationStyle::Auto => {
            let _ = if units {
                write!(out, "{secs}s")
            } else {
                write!(out, "{secs}")
            };
        }
    }
    out
}
