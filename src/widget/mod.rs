//! The widget implementations behind the built-in tags.
//!
//! A widget is a configured, stateless-at-render-time unit: its
//! configuration is fixed at construction and `render` is pure given the
//! bar state and the estimator. Animation (spinner cycling, gauge bounce)
//! derives from the bar's emitted-render counter instead of hidden widget
//! state.

mod clock;
mod gauge;
mod spin;
mod value;

pub use clock::{Eta, Time, Timer};
pub use gauge::Gauge;
pub use spin::Spin;
pub use value::{Custom, Field, Property, Speed, Variable};

use crate::Result;
use crate::bar::BarState;
use crate::estimate::Estimator;

/// Everything a widget may consult while rendering.
pub struct RenderCtx<'a> {
    pub state: &'a BarState,
    pub estimator: Estimator<'a>,
    /// Rendered in place of unknown or failed values
    pub placeholder: &'a str,
}

/// A renderable unit of the bar line.
#[derive(Debug, Clone)]
pub enum Widget {
    Property(Property),
    Time(Time),
    Timer(Timer),
    Eta(Eta),
    Speed(Speed),
    Gauge(Gauge),
    Spin(Spin),
    Variable(Variable),
    Custom(Custom),
}

impl Widget {
    /// Widgets without a fixed size claim a share of the leftover line width.
    pub(crate) fn is_expanding(&self) -> bool {
        matches!(self, Widget::Gauge(gauge) if gauge.is_expanding())
    }

    /// Render against the current bar state. `width` carries the allotted
    /// line share for expanding widgets and is ignored by the rest.
    pub(crate) fn render(&self, ctx: &RenderCtx<'_>, width: usize) -> Result<String> {
        match self {
            Widget::Property(w) => Ok(w.render(ctx)),
            Widget::Time(w) => w.render(),
            Widget::Timer(w) => Ok(w.render(ctx)),
            Widget::Eta(w) => w.render(ctx),
            Widget::Speed(w) => Ok(w.render(ctx)),
            Widget::Gauge(w) => Ok(w.render(ctx, width)),
            Widget::Spin(w) => Ok(w.render(ctx)),
            Widget::Variable(w) => w.render(),
            Widget::Custom(w) => w.render(ctx),
        }
    }
}
