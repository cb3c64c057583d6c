//! The bar itself: owns the state, applies updates, throttles redraws and
//! writes lines to the sink.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use unicode_width::UnicodeWidthStr;

use crate::builder::BarBuilder;
use crate::catalog;
use crate::estimate::Estimator;
use crate::history::{Keep, SampleHistory};
use crate::template::{self, Part, Registry, Segment};
use crate::widget::{RenderCtx, Widget};
use crate::{Error, Result};

// the only control sequence the bar emits
const LINE_CLEAR: &str = "\x1b[2K";

/// Snapshot of the bar the widgets render from.
///
/// Owned by the [`Bar`]; widgets receive it read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct BarState {
    pub minimum: f64,
    pub maximum: Option<f64>,
    pub current: f64,
    /// Seconds since start, frozen once finished
    pub elapsed: f64,
    pub finished: bool,
    /// Render passes emitted so far; drives spinner cycling and the
    /// gauge bounce animation
    pub updates: u64,
}

impl BarState {
    /// Progress as a percentage of the configured range; `None` while the
    /// maximum is unknown or the range is empty.
    pub fn percent(&self) -> Option<f64> {
        let maximum = self.maximum?;
        let span = maximum - self.minimum;
        if span <= 0.0 {
            return None;
        }
        Some(100.0 * (self.current - self.minimum) / span)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    Running,
    Finished,
}

/// A live textual progress monitor.
///
/// A bar is built from a widget template, started once, driven by
/// [`update`](Bar::update) / [`increase`](Bar::increase) (or `bar += n`),
/// and finished once. Each accepted update records a time-stamped sample;
/// a redraw is emitted only when the refresh interval elapsed since the
/// previous one, except for the mandatory renders on start, permanent
/// writes and finish.
///
/// All methods take `&mut self` and perform no locking: a bar expects one
/// logical thread of control, and concurrent producers must serialize
/// access externally.
///
/// ```rust,no_run
/// use textbar::Bar;
///
/// fn main() -> textbar::Result<()> {
///     let mut bar = Bar::builder()
///         .template("{count} of {max} ({percent}%) {bar} ETA {autoeta}")
///         .maximum(100.0)
///         .build();
///     bar.start()?;
///     for _ in 0..100 {
///         bar.increase(1.0)?;
///     }
///     bar.finish()?;
///     Ok(())
/// }
/// ```
pub struct Bar {
    parts: Vec<Part>,
    segments: Vec<Segment>,
    registry: Registry,
    state: BarState,
    phase: Phase,
    history: SampleHistory,
    keep: Keep,
    size: usize,
    refresh: Duration,
    placeholder: String,
    sink: Box<dyn Write>,
    started_at: Option<Instant>,
    last_render: Option<Instant>,
    render_errors: Vec<Error>,
}

impl Bar {
    pub fn builder() -> BarBuilder {
        BarBuilder::new()
    }

    /// A bar with the given template and the default configuration.
    pub fn new(template: impl Into<String>) -> Self {
        BarBuilder::new().template(template).build()
    }

    pub(crate) fn from_builder(builder: BarBuilder) -> Self {
        let size = builder
            .size
            .or_else(|| terminal_size::terminal_size().map(|(w, _)| w.0 as usize))
            .unwrap_or(80);
        let sink = builder.sink.unwrap_or_else(|| Box::new(io::stdout()));
        Self {
            parts: builder.parts,
            segments: Vec::new(),
            registry: Registry::default(),
            state: BarState {
                minimum: builder.minimum,
                maximum: builder.maximum,
                current: builder.minimum,
                elapsed: 0.0,
                finished: false,
                updates: 0,
            },
            phase: Phase::Created,
            history: SampleHistory::new(2),
            keep: builder.keep,
            size,
            refresh: builder.refresh,
            placeholder: builder.placeholder,
            sink,
            started_at: None,
            last_render: None,
            render_errors: Vec::new(),
        }
    }

    /// Register a widget under a tag, inserting or overwriting.
    ///
    /// Already-compiled segment lists are unaffected; the next compile
    /// (at [`start`](Bar::start), a [`write`](Bar::write) of a template,
    /// or [`finish_with`](Bar::finish_with)) sees the new entry.
    pub fn register(&mut self, tag: impl AsRef<str>, widget: Widget) {
        self.registry.register(tag, widget);
    }

    /// Start the bar: resolve the retention policy, compile the template,
    /// record the initial sample and emit the first render.
    ///
    /// Fails on a malformed template, an unknown tag, or a fractional
    /// keep policy while the maximum is unknown.
    pub fn start(&mut self) -> Result<()> {
        self.start_at(Instant::now())
    }

    /// Like [`start`](Bar::start), but bind the range first.
    ///
    /// `None` leaves the corresponding configured value in place. This is
    /// how a maximum that only becomes known at start time, such as a
    /// response's content length or a scanned file count, reaches the bar.
    pub fn start_range(&mut self, minimum: Option<f64>, maximum: Option<f64>) -> Result<()> {
        self.start_range_at(Instant::now(), minimum, maximum)
    }

    /// Set the progress to an absolute value.
    ///
    /// Records a sample and redraws if the refresh interval elapsed.
    /// Outside the running phase this is a no-op reported via `log`.
    pub fn update(&mut self, value: f64) -> Result<()> {
        self.update_at(Instant::now(), value)
    }

    /// Increase the progress by `delta`. See [`update`](Bar::update).
    pub fn increase(&mut self, delta: f64) -> Result<()> {
        self.increase_at(Instant::now(), delta)
    }

    /// Write a message to the sink.
    ///
    /// The text is compiled as a widget template, so `{tag}` placeholders
    /// work in messages. A permanent message goes to scrollback (ends with
    /// a newline) and is immediately followed by a fresh bar line; an
    /// ephemeral one replaces the current line and stays until the next
    /// actual redraw.
    pub fn write(&mut self, text: &str, permanent: bool) -> Result<()> {
        self.write_at(Instant::now(), text, permanent)
    }

    /// Finish the bar: freeze the elapsed time, set the progress to the
    /// maximum when known, and emit one last unthrottled render kept in
    /// scrollback. Further updates are ignored.
    pub fn finish(&mut self) -> Result<()> {
        self.finish_at(Instant::now(), None, true)
    }

    /// Like [`finish`](Bar::finish), but renders the given replacement
    /// template instead of the bar's own segments.
    pub fn finish_with(&mut self, template: &str) -> Result<()> {
        self.finish_at(Instant::now(), Some(template), true)
    }

    /// Like [`finish`](Bar::finish), but clears the bar line instead of
    /// keeping it.
    pub fn finish_and_clear(&mut self) -> Result<()> {
        self.finish_at(Instant::now(), None, false)
    }

    pub fn minimum(&self) -> f64 {
        self.state.minimum
    }

    pub fn maximum(&self) -> Option<f64> {
        self.state.maximum
    }

    pub fn current(&self) -> f64 {
        self.state.current
    }

    pub fn percent(&self) -> Option<f64> {
        self.state.percent()
    }

    /// Seconds since start; live while running, frozen once finished.
    pub fn elapsed(&self) -> f64 {
        match (self.phase, self.started_at) {
            (Phase::Running, Some(started)) => started.elapsed().as_secs_f64(),
            (Phase::Finished, _) => self.state.elapsed,
            _ => 0.0,
        }
    }

    pub fn finished(&self) -> bool {
        self.state.finished
    }

    /// Number of render passes emitted so far.
    pub fn updates(&self) -> u64 {
        self.state.updates
    }

    pub fn state(&self) -> &BarState {
        &self.state
    }

    /// The recorded sample history.
    pub fn samples(&self) -> &SampleHistory {
        &self.history
    }

    /// Drain the widget render failures recovered since the last call.
    ///
    /// A failing widget does not abort a render pass; its segment shows
    /// the placeholder and the error lands here.
    pub fn take_render_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.render_errors)
    }

    // -- deterministic-clock entry points, used by the tests

    #[doc(hidden)]
    pub fn start_at(&mut self, now: Instant) -> Result<()> {
        if self.phase != Phase::Created {
            log::warn!("start on a bar that was already started is ignored");
            return Ok(());
        }
        let bound = self.keep.resolve(self.state.maximum)?;
        if self.parts.is_empty() {
            let template = if self.state.maximum.is_some() {
                catalog::DEFAULT_TEMPLATE
            } else {
                catalog::DEFAULT_TEMPLATE_UNBOUNDED
            };
            self.parts.push(Part::Template(template.to_string()));
        }
        self.segments = template::compile(&self.parts, &self.registry)?;
        self.history = SampleHistory::new(bound);
        self.state.current = self.state.minimum;
        self.state.elapsed = 0.0;
        self.state.finished = false;
        self.started_at = Some(now);
        self.history.record(0.0, self.state.minimum);
        self.phase = Phase::Running;
        self.render_now(now)
    }

    #[doc(hidden)]
    pub fn start_range_at(
        &mut self,
        now: Instant,
        minimum: Option<f64>,
        maximum: Option<f64>,
    ) -> Result<()> {
        if self.phase == Phase::Created {
            if let Some(minimum) = minimum {
                self.state.minimum = minimum;
            }
            if let Some(maximum) = maximum {
                self.state.maximum = Some(maximum);
            }
        }
        self.start_at(now)
    }

    #[doc(hidden)]
    pub fn update_at(&mut self, now: Instant, value: f64) -> Result<()> {
        match self.phase {
            Phase::Created => {
                log::warn!("progress update before start is ignored");
                return Ok(());
            }
            Phase::Finished => {
                log::warn!("progress update after finish is ignored");
                return Ok(());
            }
            Phase::Running => {}
        }
        let elapsed = self.elapsed_at(now);
        self.state.current = value;
        self.state.elapsed = elapsed;
        self.history.record(elapsed, value);
        if self.should_render(now) {
            self.render_now(now)?;
        }
        Ok(())
    }

    #[doc(hidden)]
    pub fn increase_at(&mut self, now: Instant, delta: f64) -> Result<()> {
        self.update_at(now, self.state.current + delta)
    }

    #[doc(hidden)]
    pub fn write_at(&mut self, now: Instant, text: &str, permanent: bool) -> Result<()> {
        if self.phase == Phase::Created {
            log::warn!("write on a bar that was not started is ignored");
            return Ok(());
        }
        let parts = [Part::Template(text.to_string())];
        let segments = template::compile(&parts, &self.registry)?;
        if !self.state.finished {
            self.state.elapsed = self.elapsed_at(now);
        }
        let (line, errors) = format_line(
            &segments,
            &self.state,
            &self.history,
            &self.placeholder,
            self.size,
        );
        self.report_render_errors(errors);
        self.emit(&line, permanent)?;
        if permanent {
            // put a fresh bar line back under the scrollback message
            self.render_now(now)?;
        }
        Ok(())
    }

    #[doc(hidden)]
    pub fn finish_at(
        &mut self,
        now: Instant,
        replacement: Option<&str>,
        permanent: bool,
    ) -> Result<()> {
        if self.phase != Phase::Running {
            log::warn!("finish on a bar that is not running is ignored");
            return Ok(());
        }
        let replacement = match replacement {
            Some(text) => {
                let parts = [Part::Template(text.to_string())];
                Some(template::compile(&parts, &self.registry)?)
            }
            None => None,
        };
        self.state.elapsed = self.elapsed_at(now);
        if let Some(maximum) = self.state.maximum {
            self.state.current = maximum;
        }
        self.history.record(self.state.elapsed, self.state.current);
        self.state.finished = true;
        self.phase = Phase::Finished;
        if let Some(segments) = replacement {
            self.segments = segments;
        }
        self.render_now(now)?;
        if permanent {
            writeln!(self.sink)?;
            self.sink.flush()?;
        } else {
            self.emit("", false)?;
        }
        Ok(())
    }

    // --

    fn elapsed_at(&self, now: Instant) -> f64 {
        self.started_at
            .map(|started| now.duration_since(started).as_secs_f64())
            .unwrap_or(0.0)
    }

    fn should_render(&self, now: Instant) -> bool {
        match self.last_render {
            None => true,
            Some(last) => now.duration_since(last) >= self.refresh,
        }
    }

    fn render_now(&mut self, now: Instant) -> Result<()> {
        if !self.state.finished {
            self.state.elapsed = self.elapsed_at(now);
        }
        let (line, errors) = format_line(
            &self.segments,
            &self.state,
            &self.history,
            &self.placeholder,
            self.size,
        );
        self.report_render_errors(errors);
        self.emit(&line, false)?;
        self.state.updates += 1;
        self.last_render = Some(now);
        Ok(())
    }

    fn report_render_errors(&mut self, errors: Vec<Error>) {
        for error in &errors {
            log::warn!("{error}");
        }
        self.render_errors.extend(errors);
    }

    fn emit(&mut self, line: &str, permanent: bool) -> Result<()> {
        write!(self.sink, "{LINE_CLEAR}\r{line}")?;
        if permanent {
            writeln!(self.sink)?;
        }
        self.sink.flush()?;
        Ok(())
    }
}

impl std::ops::AddAssign<f64> for Bar {
    /// `bar += n` is [`increase`](Bar::increase); a failed render is
    /// reported via `log` since the operator cannot return it.
    fn add_assign(&mut self, delta: f64) {
        if let Err(error) = self.increase(delta) {
            log::warn!("progress update failed: {error}");
        }
    }
}

/// Render the segments into one line of at most `size` display cells of
/// content, giving expanding widgets their share of the leftover space.
///
/// Per-widget failures do not abort the pass: the segment renders as the
/// placeholder and the error is returned alongside the line.
fn format_line(
    segments: &[Segment],
    state: &BarState,
    history: &SampleHistory,
    placeholder: &str,
    size: usize,
) -> (String, Vec<Error>) {
    let ctx = RenderCtx {
        state,
        estimator: Estimator::new(history),
        placeholder,
    };
    let mut errors = Vec::new();
    let mut rendered: Vec<Option<String>> = Vec::with_capacity(segments.len());
    let mut expanding = Vec::new();
    let mut space = size as i64;

    for (index, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Literal(text) => {
                space -= text.width() as i64;
                rendered.push(Some(text.clone()));
            }
            Segment::Widget(widget) if widget.is_expanding() => {
                rendered.push(None);
                expanding.push(index);
            }
            Segment::Widget(widget) => {
                let text = match widget.render(&ctx, 0) {
                    Ok(text) => text,
                    Err(error) => {
                        errors.push(error);
                        placeholder.to_string()
                    }
                };
                space -= text.width() as i64;
                rendered.push(Some(text));
            }
        }
    }

    // expanding widgets split the leftover space, each taking the ceiling
    // share of what remains
    let mut remaining = expanding.len();
    for index in expanding {
        let width = if space > 0 {
            (space as usize).div_ceil(remaining)
        } else {
            0
        };
        if let Segment::Widget(widget) = &segments[index] {
            let text = match widget.render(&ctx, width) {
                Ok(text) => text,
                Err(error) => {
                    errors.push(error);
                    placeholder.to_string()
                }
            };
            space -= text.width() as i64;
            rendered[index] = Some(text);
        }
        remaining -= 1;
    }

    let mut line = String::new();
    for piece in rendered.into_iter().flatten() {
        line.push_str(&piece);
    }
    (line, errors)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use crate::widget::Variable;

    #[derive(Clone, Default)]
    struct SharedSink(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedSink {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }

        /// Chunks emitted between clear-line sequences
        fn chunks(&self) -> Vec<String> {
            self.contents()
                .split(LINE_CLEAR)
                .map(|chunk| chunk.trim_start_matches('\r').to_string())
                .filter(|chunk| !chunk.is_empty())
                .collect()
        }

        fn emit_count(&self) -> usize {
            self.contents().matches(LINE_CLEAR).count()
        }
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn bounded_bar(template: &str, maximum: f64, sink: &SharedSink) -> Bar {
        Bar::builder()
            .template(template)
            .maximum(maximum)
            .refresh(0.0)
            .size(40)
            .sink(sink.clone())
            .build()
    }

    #[test]
    fn scenario_full_run() {
        let sink = SharedSink::default();
        let mut bar = bounded_bar("{count} {timer}", 100.0, &sink);
        let t0 = Instant::now();
        bar.start_at(t0).unwrap();
        for i in 1..=10u64 {
            bar.update_at(t0 + secs(i), (i * 10) as f64).unwrap();
        }
        bar.finish_at(t0 + secs(10), None, true).unwrap();

        assert!(bar.finished());
        assert_eq!(bar.current(), 100.0);
        let chunks = sink.chunks();
        let last = chunks.last().unwrap();
        assert_eq!(last, "100 00:00:10\n");
    }

    #[test]
    fn percent_is_monotonic_for_monotonic_updates() {
        let sink = SharedSink::default();
        let mut bar = bounded_bar("{percent}", 100.0, &sink);
        let t0 = Instant::now();
        bar.start_at(t0).unwrap();
        let mut last = -1.0;
        for (i, value) in [0.0, 5.0, 5.0, 20.0, 55.0, 90.0, 100.0].into_iter().enumerate() {
            bar.update_at(t0 + secs(i as u64 + 1), value).unwrap();
            let percent = bar.percent().unwrap();
            assert!(percent >= last, "{percent} < {last}");
            last = percent;
        }
    }

    #[test]
    fn redraws_are_throttled_by_refresh_interval() {
        let sink = SharedSink::default();
        let mut bar = Bar::builder()
            .template("{count}")
            .maximum(100.0)
            .refresh(10.0)
            .size(40)
            .sink(sink.clone())
            .build();
        let t0 = Instant::now();
        bar.start_at(t0).unwrap();
        assert_eq!(sink.emit_count(), 1);

        // inside the refresh interval: sampled but not drawn
        bar.update_at(t0 + secs(1), 10.0).unwrap();
        bar.update_at(t0 + secs(5), 20.0).unwrap();
        assert_eq!(sink.emit_count(), 1);
        assert_eq!(bar.current(), 20.0);

        bar.update_at(t0 + secs(11), 30.0).unwrap();
        assert_eq!(sink.emit_count(), 2);
    }

    #[test]
    fn ephemeral_message_survives_suppressed_updates() {
        let sink = SharedSink::default();
        let mut bar = Bar::builder()
            .template("{count}")
            .maximum(100.0)
            .refresh(10.0)
            .size(40)
            .sink(sink.clone())
            .build();
        let t0 = Instant::now();
        bar.start_at(t0).unwrap();

        bar.write_at(t0 + secs(1), "checking index", false).unwrap();
        assert!(sink.contents().ends_with("checking index"));

        // throttled update must not erase the message
        bar.update_at(t0 + secs(2), 10.0).unwrap();
        assert!(sink.contents().ends_with("checking index"));

        // the next actual redraw replaces it
        bar.update_at(t0 + secs(12), 20.0).unwrap();
        assert!(sink.contents().ends_with("20"));
    }

    #[test]
    fn permanent_message_is_followed_by_a_fresh_bar_line() {
        let sink = SharedSink::default();
        let mut bar = bounded_bar("{count}", 100.0, &sink);
        let t0 = Instant::now();
        bar.start_at(t0).unwrap();
        bar.update_at(t0 + secs(1), 42.0).unwrap();

        bar.write_at(t0 + secs(2), "halfway there", true).unwrap();
        let chunks = sink.chunks();
        let n = chunks.len();
        assert_eq!(chunks[n - 2], "halfway there\n");
        assert_eq!(chunks[n - 1], "42");
    }

    #[test]
    fn messages_may_use_tags() {
        let sink = SharedSink::default();
        let mut bar = bounded_bar("{count}", 100.0, &sink);
        let t0 = Instant::now();
        bar.start_at(t0).unwrap();
        bar.update_at(t0 + secs(1), 30.0).unwrap();
        bar.write_at(t0 + secs(2), "at {percent}% now", true).unwrap();
        assert!(sink.contents().contains("at 30% now"));
    }

    #[test]
    fn update_outside_running_is_a_noop() {
        let sink = SharedSink::default();
        let mut bar = bounded_bar("{count}", 100.0, &sink);
        let t0 = Instant::now();

        // before start: ignored, nothing written
        bar.update_at(t0, 10.0).unwrap();
        assert_eq!(bar.current(), 0.0);
        assert_eq!(sink.emit_count(), 0);

        bar.start_at(t0).unwrap();
        bar.update_at(t0 + secs(1), 10.0).unwrap();
        bar.finish_at(t0 + secs(2), None, true).unwrap();
        let emitted = sink.emit_count();

        // after finish: ignored
        bar.update_at(t0 + secs(3), 50.0).unwrap();
        assert_eq!(bar.current(), 100.0);
        assert_eq!(sink.emit_count(), emitted);
    }

    #[test]
    fn double_start_and_double_finish_are_noops() {
        let sink = SharedSink::default();
        let mut bar = bounded_bar("{count}", 100.0, &sink);
        let t0 = Instant::now();
        bar.start_at(t0).unwrap();
        assert_eq!(sink.emit_count(), 1);
        bar.start_at(t0 + secs(1)).unwrap();
        assert_eq!(sink.emit_count(), 1);

        bar.finish_at(t0 + secs(2), None, true).unwrap();
        let emitted = sink.emit_count();
        bar.finish_at(t0 + secs(3), None, true).unwrap();
        assert_eq!(sink.emit_count(), emitted);
    }

    #[test]
    fn finish_freezes_elapsed_and_renders_replacement() {
        let sink = SharedSink::default();
        let mut bar = bounded_bar("{count}", 100.0, &sink);
        let t0 = Instant::now();
        bar.start_at(t0).unwrap();
        bar.update_at(t0 + secs(1), 40.0).unwrap();
        bar.finish_at(t0 + secs(5), Some("done in {timer}"), true)
            .unwrap();
        assert_eq!(bar.elapsed(), 5.0);
        assert!(sink.contents().contains("done in 00:00:05"));
    }

    #[test]
    fn finish_and_clear_leaves_no_line() {
        let sink = SharedSink::default();
        let mut bar = bounded_bar("{count}", 100.0, &sink);
        let t0 = Instant::now();
        bar.start_at(t0).unwrap();
        bar.finish_at(t0 + secs(1), None, false).unwrap();
        assert!(sink.contents().ends_with(&format!("{LINE_CLEAR}\r")));
    }

    #[test]
    fn unknown_tag_fails_start_and_bar_stays_created() {
        let sink = SharedSink::default();
        let mut bar = Bar::builder()
            .template("{nosuchtag}")
            .maximum(10.0)
            .sink(sink.clone())
            .build();
        let t0 = Instant::now();
        assert!(matches!(bar.start_at(t0), Err(Error::UnknownTag(_))));
        assert_eq!(sink.emit_count(), 0);
        // registering the tag afterwards makes start work
        bar.register("nosuchtag", Widget::Variable(Variable::new(|| Ok("hi".into()))));
        bar.start_at(t0).unwrap();
        assert!(sink.contents().contains("hi"));
    }

    #[test]
    fn range_can_be_bound_at_start() {
        let sink = SharedSink::default();
        let mut bar = Bar::builder()
            .template("{count} of {max}")
            .refresh(0.0)
            .size(40)
            .sink(sink.clone())
            .build();
        let t0 = Instant::now();
        // default fractional keep resolves against the late maximum
        bar.start_range_at(t0, Some(10.0), Some(110.0)).unwrap();
        assert_eq!(bar.minimum(), 10.0);
        assert_eq!(bar.maximum(), Some(110.0));

        bar.update_at(t0 + secs(1), 60.0).unwrap();
        assert_eq!(bar.percent(), Some(50.0));
        assert!(sink.contents().contains("60 of 110"));

        // once started the range is fixed
        bar.start_range_at(t0 + secs(2), None, Some(999.0)).unwrap();
        assert_eq!(bar.maximum(), Some(110.0));
    }

    #[test]
    fn fractional_keep_without_maximum_fails_start() {
        let sink = SharedSink::default();
        let mut bar = Bar::builder()
            .template("{count}")
            .sink(sink.clone())
            .build();
        let err = bar.start_at(Instant::now()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn default_template_depends_on_maximum() {
        let sink = SharedSink::default();
        let mut bar = Bar::builder()
            .maximum(100.0)
            .refresh(0.0)
            .size(60)
            .sink(sink.clone())
            .build();
        bar.start_at(Instant::now()).unwrap();
        assert!(sink.contents().contains(" of 100 "));

        let sink = SharedSink::default();
        let mut bar = Bar::builder()
            .keep(Keep::Count(10))
            .refresh(0.0)
            .size(60)
            .sink(sink.clone())
            .build();
        bar.start_at(Instant::now()).unwrap();
        assert!(!sink.contents().contains(" of "));
    }

    #[test]
    fn failed_widget_renders_placeholder_and_reports() {
        let sink = SharedSink::default();
        let mut bar = Bar::builder()
            .template("state {flaky} end")
            .maximum(10.0)
            .refresh(0.0)
            .size(40)
            .sink(sink.clone())
            .build();
        bar.register(
            "flaky",
            Widget::Variable(Variable::new(|| anyhow::bail!("backend gone"))),
        );
        let t0 = Instant::now();
        bar.start_at(t0).unwrap();

        // the pass completed with the placeholder in place
        assert!(sink.contents().contains("state N/A end"));
        let errors = bar.take_render_errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], Error::WidgetRender { .. }));
        // drained
        assert!(bar.take_render_errors().is_empty());
    }

    #[test]
    fn increase_and_operator_accumulate() {
        let sink = SharedSink::default();
        let mut bar = bounded_bar("{count}", 100.0, &sink);
        let t0 = Instant::now();
        bar.start_at(t0).unwrap();
        bar.update_at(t0 + secs(1), 10.0).unwrap();
        bar.increase_at(t0 + secs(2), 5.0).unwrap();
        assert_eq!(bar.current(), 15.0);
        bar += 5.0;
        assert_eq!(bar.current(), 20.0);
    }

    #[test]
    fn whole_run_speed_over_trimmed_history() {
        let sink = SharedSink::default();
        let mut bar = Bar::builder()
            .template("{count}")
            .maximum(100.0)
            .refresh(0.0)
            .size(40)
            .keep(Keep::Count(3))
            .sink(sink.clone())
            .build();
        let t0 = Instant::now();
        bar.start_at(t0).unwrap();
        for i in 1..=10u64 {
            bar.update_at(t0 + secs(i), (i * 10) as f64).unwrap();
        }
        // trimmed to the keep bound, whole-run stats still intact
        assert_eq!(bar.samples().len(), 3);
        let estimator = Estimator::new(bar.samples());
        assert_eq!(estimator.speed(false), Some(10.0));
    }

    #[test]
    fn expanding_gauge_fills_leftover_width() {
        let sink = SharedSink::default();
        let mut bar = Bar::builder()
            .template("[{gauge}]")
            .maximum(10.0)
            .refresh(0.0)
            .size(22)
            .sink(sink.clone())
            .build();
        let t0 = Instant::now();
        bar.start_at(t0).unwrap();
        bar.update_at(t0 + secs(1), 5.0).unwrap();
        // 22 cells minus the 2 literal brackets = 20 for the gauge
        let last = sink.chunks().last().unwrap().clone();
        assert_eq!(last.chars().count(), 22);
        assert!(last.starts_with("[|"));
        assert!(last.ends_with("|]"));
    }
}
