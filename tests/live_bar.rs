//! End-to-end runs through the public surface with a captured sink.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use textbar::{Bar, DurationStyle, Keep, Widget, widget};

const LINE_CLEAR: &str = "\x1b[2K";

#[derive(Clone, Default)]
struct Capture(Rc<RefCell<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    fn lines(&self) -> Vec<String> {
        self.contents()
            .split(LINE_CLEAR)
            .map(|chunk| chunk.trim_start_matches('\r').to_string())
            .filter(|chunk| !chunk.is_empty())
            .collect()
    }
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn download_style_run() {
    let sink = Capture::default();
    let mut bar = Bar::builder()
        .template("{data} of {datamax} {gauge} {timer} ETA {eta}")
        .maximum((10 * 1024 * 1024) as f64)
        .refresh(0.0)
        .size(60)
        .sink(sink.clone())
        .build();

    let t0 = Instant::now();
    bar.start_at(t0).unwrap();
    for i in 1..=10u64 {
        bar.update_at(t0 + secs(i), (i * 1024 * 1024) as f64).unwrap();
    }
    bar.finish_at(t0 + secs(10), None, true).unwrap();

    let lines = sink.lines();
    let last = lines.last().unwrap();
    // final line shows the full size, a full gauge and the frozen timer
    assert!(last.contains("10.00M of 10.00M"), "{last}");
    assert!(last.contains("00:00:10"), "{last}");
    assert!(!last.contains("-"), "gauge not full: {last}");
    assert!(last.ends_with('\n'));
}

#[test]
fn unbounded_run_uses_placeholders_not_errors() {
    let sink = Capture::default();
    let mut bar = Bar::builder()
        .template("{count} {timer} ETA {eta} {percent}")
        .keep(Keep::Count(16))
        .placeholder("?")
        .refresh(0.0)
        .size(60)
        .sink(sink.clone())
        .build();

    let t0 = Instant::now();
    bar.start_at(t0).unwrap();
    bar.update_at(t0 + secs(1), 7.0).unwrap();
    assert!(sink.contents().contains("ETA ? ?"));
    assert!(bar.take_render_errors().is_empty());
    bar.finish_at(t0 + secs(2), None, true).unwrap();
}

#[test]
fn positional_widgets_and_registered_tags_mix() {
    let sink = Capture::default();
    let mut bar = Bar::builder()
        .template("{count} files ")
        .widget(Widget::Timer(widget::Timer::new(DurationStyle::Secs)))
        .template("s, host {host}")
        .maximum(4.0)
        .refresh(0.0)
        .size(60)
        .sink(sink.clone())
        .build();
    bar.register(
        "host",
        Widget::Variable(widget::Variable::new(|| Ok("node-7".to_string()))),
    );

    let t0 = Instant::now();
    bar.start_at(t0).unwrap();
    bar.update_at(t0 + secs(3), 2.0).unwrap();
    assert!(sink.contents().contains("2 files 3s, host node-7"));
}

#[test]
fn permanent_writes_interleave_with_the_bar() {
    let sink = Capture::default();
    let mut bar = Bar::builder()
        .template("{count}/{max}")
        .maximum(3.0)
        .refresh(0.0)
        .size(40)
        .sink(sink.clone())
        .build();

    let t0 = Instant::now();
    bar.start_at(t0).unwrap();
    bar.update_at(t0 + secs(1), 1.0).unwrap();
    bar.write_at(t0 + secs(1), "copied a.txt", true).unwrap();
    bar.update_at(t0 + secs(2), 2.0).unwrap();
    bar.write_at(t0 + secs(2), "copied b.txt", true).unwrap();
    bar.finish_at(t0 + secs(3), Some("3 files in {timer}"), true)
        .unwrap();

    let lines = sink.lines();
    let scrollback: Vec<&String> = lines.iter().filter(|l| l.ends_with('\n')).collect();
    assert_eq!(
        scrollback,
        ["copied a.txt\n", "copied b.txt\n", "3 files in 00:00:03\n"]
    );
}

#[test]
fn malformed_template_fails_before_anything_is_written() {
    let sink = Capture::default();
    let mut bar = Bar::builder()
        .template("{count")
        .maximum(10.0)
        .sink(sink.clone())
        .build();
    assert!(bar.start_at(Instant::now()).is_err());
    assert!(sink.contents().is_empty());
}
