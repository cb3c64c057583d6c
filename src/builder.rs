//! Builder for a [`Bar`].

use std::io::Write;
use std::time::Duration;

use crate::bar::Bar;
use crate::catalog;
use crate::history::Keep;
use crate::template::Part;
use crate::widget::Widget;

/// Configures and builds a [`Bar`].
///
/// Template pieces and explicit widget instances can be interleaved in any
/// order; the bar renders them in the order they were added. Without any
/// parts a default template is picked when the bar starts, depending on
/// whether the maximum is known.
///
/// ```rust
/// use textbar::{Bar, Keep};
///
/// let bar = Bar::builder()
///     .template("Processed: {count} {gauge} ETA {eta}")
///     .maximum(1000.0)
///     .refresh(0.25)
///     .keep(Keep::Count(20))
///     .build();
/// ```
pub struct BarBuilder {
    pub(crate) parts: Vec<Part>,
    pub(crate) minimum: f64,
    pub(crate) maximum: Option<f64>,
    pub(crate) size: Option<usize>,
    pub(crate) refresh: Duration,
    pub(crate) keep: Keep,
    pub(crate) placeholder: String,
    pub(crate) sink: Option<Box<dyn Write>>,
}

impl BarBuilder {
    /// Start building. [`Bar::builder`] is the canonical shorthand.
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            minimum: 0.0,
            maximum: None,
            size: None,
            refresh: Duration::from_millis(500),
            keep: Keep::Fraction(0.05),
            placeholder: catalog::NA.to_string(),
            sink: None,
        }
    }

    /// Append a template piece; `{tag}` placeholders are resolved against
    /// the bar's registry when the bar starts.
    #[inline(always)]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.parts.push(Part::Template(template.into()));
        self
    }

    /// Append a ready widget instance at this position.
    #[inline(always)]
    pub fn widget(mut self, widget: Widget) -> Self {
        self.parts.push(Part::Widget(widget));
        self
    }

    /// Minimum progress value. Default `0`.
    #[inline(always)]
    pub fn minimum(mut self, minimum: f64) -> Self {
        self.minimum = minimum;
        self
    }

    /// Maximum progress value. Without one the bar is unbounded: percent,
    /// ETA and the proportional gauge are unknown.
    #[inline(always)]
    pub fn maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Characters available for one rendered line. Default is the terminal
    /// width, or 80 when that cannot be determined.
    #[inline(always)]
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Minimum seconds between displayed updates. Default `0.5`.
    #[inline(always)]
    pub fn refresh(mut self, secs: f64) -> Self {
        self.refresh = Duration::from_secs_f64(secs.max(0.0));
        self
    }

    /// Sample retention policy for the adaptive speed/ETA window.
    /// Default `Keep::Fraction(0.05)`, which requires a known maximum.
    #[inline(always)]
    pub fn keep(mut self, keep: Keep) -> Self {
        self.keep = keep;
        self
    }

    /// Text rendered for unknown values and failed widgets. Default `N/A`.
    #[inline(always)]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Where rendered lines go. Default is stdout. The sink only needs to
    /// support `write` and `flush`; the bar emits carriage returns and the
    /// clear-line sequence, nothing else terminal-specific.
    #[inline(always)]
    pub fn sink(mut self, sink: impl Write + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build the bar. Nothing is written until [`Bar::start`].
    pub fn build(self) -> Bar {
        Bar::from_builder(self)
    }
}

impl Default for BarBuilder {
    fn default() -> Self {
        Self::new()
    }
}
