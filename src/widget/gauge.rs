//! The proportionally filled bar widget.

use unicode_width::UnicodeWidthStr;

use crate::widget::RenderCtx;

/// A fixed-width bar: `left + markers + tip + fill + right`.
///
/// Without a configured [`size`](Gauge::size) the gauge is *expanding*: it
/// receives its share of whatever line width the other segments left over.
/// When the bar's maximum is unknown the marker bounces back and forth
/// across the width instead of representing a fraction.
#[derive(Debug, Clone)]
pub struct Gauge {
    marker: char,
    left: String,
    right: String,
    fill: char,
    tip: Option<char>,
    size: Option<usize>,
}

impl Gauge {
    pub fn new() -> Self {
        Self {
            marker: '|',
            left: "|".to_string(),
            right: "|".to_string(),
            fill: '-',
            tip: None,
            size: None,
        }
    }

    /// Character used for the filled portion
    #[inline(always)]
    pub fn marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    /// Left and right edge strings, may be empty
    #[inline(always)]
    pub fn edges(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.left = left.into();
        self.right = right.into();
        self
    }

    /// Character used for the unfilled portion
    #[inline(always)]
    pub fn fill(mut self, fill: char) -> Self {
        self.fill = fill;
        self
    }

    /// Character drawn after the filled portion while space remains
    #[inline(always)]
    pub fn tip(mut self, tip: char) -> Self {
        self.tip = Some(tip);
        self
    }

    /// Fixed total width; without one the gauge expands into the
    /// remaining line width
    #[inline(always)]
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub(crate) fn is_expanding(&self) -> bool {
        self.size.is_none()
    }

    pub(crate) fn render(&self, ctx: &RenderCtx<'_>, available: usize) -> String {
        let width = self.size.unwrap_or(available);
        let inner = width.saturating_sub(self.left.width() + self.right.width());
        let mut out = String::with_capacity(width * 4 + 8);
        out.push_str(&self.left);
        self.render_inner(ctx, inner, &mut out);
        out.push_str(&self.right);
        out
    }

    fn render_inner(&self, ctx: &RenderCtx<'_>, inner: usize, out: &mut String) {
        if inner == 0 {
            return;
        }
        if ctx.state.finished {
            for _ in 0..inner {
                out.push(self.marker);
            }
            return;
        }
        if let Some(percent) = ctx.state.percent() {
            let filled = ((percent / 100.0).clamp(0.0, 1.0) * inner as f64) as usize;
            for _ in 0..filled {
                out.push(self.marker);
            }
            let mut rest = inner - filled;
            if rest > 0 {
                if let Some(tip) = self.tip {
                    out.push(tip);
                    rest -= 1;
                }
            }
            for _ in 0..rest {
                out.push(self.fill);
            }
            return;
        }
        // unknown maximum: triangle wave over the emitted-render count,
        // turning only at the edges
        let position = if inner == 1 {
            0
        } else {
            let period = (2 * (inner - 1)) as u64;
            let phase = (ctx.state.updates % period) as usize;
            if phase < inner { phase } else { period as usize - phase }
        };
        for _ in 0..position {
            out.push(self.fill);
        }
        out.push(self.marker);
        for _ in 0..inner.saturating_sub(position + 1) {
            out.push(self.fill);
        }
    }
}

impl Default for Gauge {
    fn default() -> Self {
        Self::new()
    }
}
