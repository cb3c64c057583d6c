//! Value-producing widgets: bar properties, speed and caller-supplied
//! callbacks.

use std::fmt;
use std::sync::Arc;

use crate::widget::RenderCtx;
use crate::{Error, Result};

/// Which numeric bar property a [`Property`] widget displays.
///
/// `Percent` is derived as `100 * (current - minimum) / (maximum - minimum)`
/// and is unknown while the maximum is unknown or equal to the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Current,
    Minimum,
    Maximum,
    Percent,
}

/// Displays a bar property, optionally scaled with unit prefixes.
#[derive(Debug, Clone)]
pub struct Property {
    field: Field,
    decimals: Option<usize>,
    prefixes: Option<&'static [&'static str]>,
    step: f64,
}

impl Property {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            decimals: None,
            prefixes: None,
            step: 1000.0,
        }
    }

    /// Fixed number of decimal places
    #[inline(always)]
    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Scale the value by `step` per unit prefix, e.g.
    /// [`catalog::PREFIXES`](crate::catalog::PREFIXES) with step `1000`
    /// renders `1500` as `1.5k`.
    #[inline(always)]
    pub fn prefixes(mut self, prefixes: &'static [&'static str], step: f64) -> Self {
        self.prefixes = Some(prefixes);
        self.step = step;
        self
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub(crate) fn render(&self, ctx: &RenderCtx<'_>) -> String {
        let value = match self.field {
            Field::Current => Some(ctx.state.current),
            Field::Minimum => Some(ctx.state.minimum),
            Field::Maximum => ctx.state.maximum,
            Field::Percent => ctx.state.percent(),
        };
        match value {
            Some(value) => crate::fmt::scaled(value, self.decimals, self.prefixes, self.step),
            None => ctx.placeholder.to_string(),
        }
    }
}

/// Displays the estimated progress speed, with the same prefix scaling
/// as [`Property`].
#[derive(Debug, Clone)]
pub struct Speed {
    decimals: Option<usize>,
    prefixes: Option<&'static [&'static str]>,
    step: f64,
    adaptive: bool,
}

impl Speed {
    pub fn new() -> Self {
        Self {
            decimals: Some(2),
            prefixes: None,
            step: 1000.0,
            adaptive: true,
        }
    }

    #[inline(always)]
    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }

    #[inline(always)]
    pub fn prefixes(mut self, prefixes: &'static [&'static str], step: f64) -> Self {
        self.prefixes = Some(prefixes);
        self.step = step;
        self
    }

    /// Compute from the retained sample window only, instead of the whole
    /// run. Default `true`.
    #[inline(always)]
    pub fn adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    pub(crate) fn render(&self, ctx: &RenderCtx<'_>) -> String {
        // once finished the adaptive window is stale, report the whole run
        let adaptive = self.adaptive && !ctx.state.finished;
        match ctx.estimator.speed(adaptive) {
            Some(speed) => crate::fmt::scaled(speed, self.decimals, self.prefixes, self.step),
            None => ctx.placeholder.to_string(),
        }
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders a caller-supplied value on every pass.
///
/// The callback takes no arguments and returns the final formatted string.
/// A callback `Err` is converted into [`Error::WidgetRender`] and recovered
/// by the bar: the segment renders as the placeholder and the pass
/// completes.
#[derive(Clone)]
pub struct Variable {
    callback: Arc<dyn Fn() -> anyhow::Result<String>>,
}

impl Variable {
    pub fn new(callback: impl Fn() -> anyhow::Result<String> + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
        }
    }

    pub(crate) fn render(&self) -> Result<String> {
        (self.callback)().map_err(|source| Error::WidgetRender {
            tag: "variable".to_string(),
            source,
        })
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Variable(..)")
    }
}

/// A user-registered widget backed by a render function over the bar state
/// and estimator, for extensions that are more than a plain variable.
#[derive(Clone)]
pub struct Custom {
    name: String,
    render_fn: Arc<dyn for<'a> Fn(&RenderCtx<'a>) -> anyhow::Result<String>>,
}

impl Custom {
    pub fn new(
        name: impl Into<String>,
        render_fn: impl for<'a> Fn(&RenderCtx<'a>) -> anyhow::Result<String> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            render_fn: Arc::new(render_fn),
        }
    }

    pub(crate) fn render(&self, ctx: &RenderCtx<'_>) -> Result<String> {
        (self.render_fn)(ctx).map_err(|source| Error::WidgetRender {
            tag: self.name.clone(),
            source,
        })
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Custom({})", self.name)
    }
}
