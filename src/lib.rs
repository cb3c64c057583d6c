//! Live, template-driven textual progress bars.
//!
//! A bar is assembled from *widgets* — literal text and dynamic value
//! renderers — selected with a `{tag}` template, and continuously redrawn
//! in place on an output sink.
//!
//! ```rust,no_run
//! use textbar::Bar;
//!
//! fn main() -> textbar::Result<()> {
//!     let mut bar = Bar::builder()
//!         .template("Processed: {count} of {max} {gauge} {percent}% ETA {autoeta}")
//!         .maximum(1000.0)
//!         .build();
//!     bar.start()?;
//!     for _ in 0..1000 {
//!         bar += 1.0;
//!     }
//!     bar.finish()?;
//!     Ok(())
//! }
//! ```
//!
//! # Templates and tags
//! A template is split on balanced `{` `}` delimiters: text outside braces
//! becomes literal segments, text inside is looked up in the bar's
//! [`Registry`]. The built-in tags live in [`catalog`]; custom widgets are
//! added with [`Bar::register`]:
//!
//! ```rust
//! use textbar::{Bar, Keep, Widget, widget::Variable};
//!
//! let mut bar = Bar::builder()
//!     .template("{spin} {count} items, {files} open")
//!     .keep(Keep::Count(10))
//!     .build();
//! bar.register("files", Widget::Variable(Variable::new(|| Ok("3".to_string()))));
//! ```
//!
//! Widget instances can also be placed positionally between template
//! pieces with [`BarBuilder::widget`], preserving the caller's ordering.
//!
//! # Speed and ETA
//! Every accepted update records a `(elapsed, value)` sample in a bounded
//! history; the retention bound is the [`Keep`] policy. Speed and ETA are
//! computed either *adaptively* from the retained window or from the whole
//! run, and resolve to a placeholder (default `N/A`) instead of failing
//! whenever the arithmetic is undefined.
//!
//! # Rendering
//! Redraws are throttled by a wall-clock refresh interval; starting,
//! finishing and permanent messages always render. The bar overwrites its
//! previous line with a carriage return and a clear-line sequence, and
//! flushes the sink after every emitted render. [`Bar::write`] emits
//! messages either permanently (kept in scrollback above the bar) or
//! ephemerally (replaced on the next redraw).
//!
//! The bar expects a single logical thread of control and does no locking
//! internally.

mod error;
pub use error::{Error, Result};

mod history;
pub use history::{Keep, Sample, SampleHistory};

mod estimate;
pub use estimate::Estimator;

mod template;
pub use template::{Part, Registry, Segment};

pub mod widget;
pub use widget::{RenderCtx, Widget};

pub mod catalog;

mod fmt;
pub use fmt::DurationStyle;

mod builder;
pub use builder::BarBuilder;

mod bar;
pub use bar::{Bar, BarState};
