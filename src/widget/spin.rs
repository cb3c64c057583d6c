//! The animated spinner widget.

use crate::widget::RenderCtx;

/// Cycles through a marker sequence.
///
/// In cycling mode the next character is shown on every emitted render,
/// wrapping around. In [`relative`](Spin::relative) mode the characters are
/// spread across the progress range instead, which needs a known maximum;
/// without one the spinner falls back to cycling. Once the bar finishes,
/// the configured final character (or the last of the sequence) is shown.
#[derive(Debug, Clone)]
pub struct Spin {
    markers: String,
    fin: Option<char>,
    relative: bool,
}

impl Spin {
    /// See [`catalog`](crate::catalog) for predefined marker sequences.
    pub fn new(markers: impl Into<String>) -> Self {
        Self {
            markers: markers.into(),
            fin: None,
            relative: false,
        }
    }

    /// Character shown after the bar finished
    #[inline(always)]
    pub fn fin(mut self, fin: char) -> Self {
        self.fin = Some(fin);
        self
    }

    /// Map the sequence onto the progress range instead of cycling
    #[inline(always)]
    pub fn relative(mut self, relative: bool) -> Self {
        self.relative = relative;
        self
    }

    pub(crate) fn render(&self, ctx: &RenderCtx<'_>) -> String {
        let count = self.markers.chars().count();
        if count == 0 {
            return ctx.placeholder.to_string();
        }
        if ctx.state.finished {
            return match self.fin {
                Some(fin) => fin.to_string(),
                None => self
                    .markers
                    .chars()
                    .last()
                    .map(String::from)
                    .unwrap_or_default(),
            };
        }
        let index = match (self.relative, ctx.state.percent()) {
            (true, Some(percent)) => {
                ((percent / 100.0).clamp(0.0, 1.0) * (count - 1) as f64).floor() as usize
            }
            _ => (ctx.state.updates % count as u64) as usize,
        };
        self.markers
            .chars()
            .nth(index.min(count - 1))
            .map(String::from)
            .unwrap_or_default()
    }
}
