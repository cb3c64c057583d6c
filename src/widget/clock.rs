//! Wall-clock, elapsed-time and ETA widgets.

use std::fmt::Write as _;

use anyhow::anyhow;
use chrono::{DateTime, Local};

use crate::fmt::{self, DurationStyle};
use crate::widget::RenderCtx;
use crate::{Error, Result};

/// Current wall-clock time with a strftime template.
#[derive(Debug, Clone, Default)]
pub struct Time {
    template: Option<String>,
}

impl Time {
    /// Without a template the full representation is shown,
    /// e.g. `2026-08-26 14:03:21.182733`.
    pub fn new() -> Self {
        Self { template: None }
    }

    #[inline(always)]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub(crate) fn render(&self) -> Result<String> {
        let now = Local::now();
        match &self.template {
            None => strftime(&now, "%Y-%m-%d %H:%M:%S%.6f", "time"),
            Some(template) => strftime(&now, template, "time"),
        }
    }
}

/// Elapsed time since the bar started, frozen once the bar finishes.
#[derive(Debug, Clone)]
pub struct Timer {
    style: DurationStyle,
    units: bool,
}

impl Timer {
    pub fn new(style: DurationStyle) -> Self {
        Self {
            style,
            units: false,
        }
    }

    /// Label each field with its unit, e.g. `2m 5s` instead of `02:05`
    #[inline(always)]
    pub fn units(mut self, units: bool) -> Self {
        self.units = units;
        self
    }

    pub(crate) fn render(&self, ctx: &RenderCtx<'_>) -> String {
        fmt::duration(ctx.state.elapsed.max(0.0) as u64, self.style, self.units)
    }
}

/// Estimated time to completion.
///
/// Renders as a duration, or as the absolute finish time when an
/// [`absolute`](Eta::absolute) strftime template is set. Unknown maximum,
/// too few samples or stalled progress all render the placeholder.
#[derive(Debug, Clone)]
pub struct Eta {
    style: DurationStyle,
    units: bool,
    adaptive: bool,
    absolute: Option<String>,
}

impl Eta {
    pub fn new(style: DurationStyle) -> Self {
        Self {
            style,
            units: false,
            adaptive: true,
            absolute: None,
        }
    }

    #[inline(always)]
    pub fn units(mut self, units: bool) -> Self {
        self.units = units;
        self
    }

    /// Estimate from the retained sample window only. Default `true`.
    #[inline(always)]
    pub fn adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    /// Show the expected finish as a point in time with the given
    /// strftime template, instead of a remaining duration.
    #[inline(always)]
    pub fn absolute(mut self, template: impl Into<String>) -> Self {
        self.absolute = Some(template.into());
        self
    }

    pub(crate) fn render(&self, ctx: &RenderCtx<'_>) -> Result<String> {
        let state = ctx.state;
        if state.maximum.is_none() {
            return Ok(ctx.placeholder.to_string());
        }
        let secs = if state.finished {
            0.0
        } else {
            match ctx
                .estimator
                .remaining_secs(state.current, state.maximum, self.adaptive)
            {
                Some(secs) => secs,
                None => return Ok(ctx.placeholder.to_string()),
            }
        };
        match &self.absolute {
            None => Ok(fmt::duration(secs as u64, self.style, self.units)),
            Some(template) => match chrono::Duration::try_seconds(secs as i64) {
                Some(delta) => strftime(&(Local::now() + delta), template, "eta"),
                None => Ok(ctx.placeholder.to_string()),
            },
        }
    }
}

fn strftime(at: &DateTime<Local>, template: &str, tag: &str) -> Result<String> {
    let mut out = String::new();
    match write!(out, "{}", at.format(template)) {
        Ok(()) => Ok(out),
        Err(_) => Err(Error::WidgetRender {
            tag: tag.to_string(),
            source: anyhow!("invalid strftime template `{template}`"),
        }),
    }
}
