//! Built-in tag catalog and the constant tables the widgets draw from.
//!
//! Every bar's registry is seeded from [`builtin_registry`]. The tag set
//! mirrors the classic progress-monitor vocabulary: property tags
//! (`{count}`, `{percent}`, `{data}` ...), time tags (`{timer}`, `{eta}`,
//! `{abseta}` ...), the gauges (`{gauge}`, `{bar}`) and a family of
//! spinners (`{spin}`, `{dots}`, `{moon}` ...).

use crate::fmt::DurationStyle;
use crate::template::Registry;
use crate::widget::{Eta, Field, Gauge, Property, Speed, Spin, Time, Timer, Widget};

/// Unit prefixes for power-of-`step` scaling
pub const PREFIXES: &[&str] = &["", "k", "M", "G", "T", "P", "E", "Z", "Y"];

/// Placeholder for unknown values
pub const NA: &str = "N/A";

/// strftime template for absolute timestamps
pub const TIME_ABS: &str = "%Y-%m-%d %H:%M:%S";

/// Default template when the maximum is known
pub const DEFAULT_TEMPLATE: &str =
    "{count} of {max} ({percent}%) {bar} {timer} | {speed}/s | ETA {autoeta}";

/// Default template when the maximum is unknown
pub const DEFAULT_TEMPLATE_UNBOUNDED: &str = "{count} {bar} {timer} | {speed}/s";

// spinner marker sequences
pub const ARROW: &str = "→↘↓↙←↖↑↗";
pub const CIRCLE: &str = " .oO";
pub const DOTS: &str = " ⡀⡄⡆⡇⣇⣧⣷⣿";
pub const FADE: &str = " ░▒▓█";
pub const LINE: &str = "⎽⎼⎻⎺⎻⎼";
pub const MOON: &str = "◑◒◐◓";
pub const PIE: &str = "○◔◑◕●";
pub const PIXEL: &str = "⣾⣷⣯⣟⡿⢿⣻⣽";
pub const HBAR: &str = " ▏▎▍▌▋▊▉█";
pub const SNAKE: &str = " ▖▌▛█";
pub const STAR: &str = "-\\|/";
pub const VBAR: &str = " ▁▂▃▄▅▆▇█";

/// The registry every bar starts from.
pub(crate) fn builtin_registry() -> Registry {
    let mut r = Registry::empty();

    // plain properties
    r.register("current", Widget::Property(Property::new(Field::Current)));
    r.register("minimum", Widget::Property(Property::new(Field::Minimum)));
    r.register("maximum", Widget::Property(Property::new(Field::Maximum)));
    r.register("min", Widget::Property(Property::new(Field::Minimum)));
    r.register("max", Widget::Property(Property::new(Field::Maximum)));
    r.register("count", Widget::Property(Property::new(Field::Current).decimals(0)));
    r.register("percent", Widget::Property(Property::new(Field::Percent).decimals(0)));

    // scaled properties, binary step for data and decimal for sci
    for (tag, field) in [
        ("data", Field::Current),
        ("dataminimum", Field::Minimum),
        ("datamin", Field::Minimum),
        ("datamaximum", Field::Maximum),
        ("datamax", Field::Maximum),
    ] {
        r.register(
            tag,
            Widget::Property(Property::new(field).decimals(2).prefixes(PREFIXES, 1024.0)),
        );
    }
    for (tag, field) in [
        ("sci", Field::Current),
        ("sciminimum", Field::Minimum),
        ("scimin", Field::Minimum),
        ("scimaximum", Field::Maximum),
        ("scimax", Field::Maximum),
    ] {
        r.register(
            tag,
            Widget::Property(Property::new(field).decimals(2).prefixes(PREFIXES, 1000.0)),
        );
    }

    // wall clock and elapsed time
    r.register("time", Widget::Time(Time::new()));
    r.register("timer", Widget::Timer(Timer::new(DurationStyle::Hms)));
    r.register(
        "autotimer",
        Widget::Timer(Timer::new(DurationStyle::Auto).units(true)),
    );

    // estimated time of completion
    r.register("eta", Widget::Eta(Eta::new(DurationStyle::Hms)));
    r.register(
        "autoeta",
        Widget::Eta(Eta::new(DurationStyle::Auto).units(true)),
    );
    r.register(
        "abseta",
        Widget::Eta(Eta::new(DurationStyle::Hms).absolute(TIME_ABS)),
    );

    // speed
    r.register("speed", Widget::Speed(Speed::new()));
    r.register("bps", Widget::Speed(Speed::new().prefixes(PREFIXES, 1024.0)));
    r.register("dataspeed", Widget::Speed(Speed::new().prefixes(PREFIXES, 1024.0)));
    r.register("scispeed", Widget::Speed(Speed::new().prefixes(PREFIXES, 1000.0)));

    // gauges
    r.register("gauge", Widget::Gauge(Gauge::new()));
    r.register("bar", Widget::Gauge(Gauge::new().marker('█').edges("", "")));

    // spinners
    r.register("arrow", Widget::Spin(Spin::new(ARROW).fin('↑')));
    r.register("circle", Widget::Spin(Spin::new(CIRCLE)));
    r.register("dots", Widget::Spin(Spin::new(DOTS)));
    r.register("fade", Widget::Spin(Spin::new(FADE)));
    r.register("hbar", Widget::Spin(Spin::new(HBAR)));
    r.register("line", Widget::Spin(Spin::new(LINE)));
    r.register("moon", Widget::Spin(Spin::new(MOON)));
    r.register("pie", Widget::Spin(Spin::new(PIE)));
    r.register("pixel", Widget::Spin(Spin::new(PIXEL).fin('⣿')));
    r.register("snake", Widget::Spin(Spin::new(SNAKE)));
    r.register("spin", Widget::Spin(Spin::new(STAR).fin('|')));
    r.register("star", Widget::Spin(Spin::new(STAR).fin('|')));
    r.register("vbar", Widget::Spin(Spin::new(VBAR)));
    r.register("reldots", Widget::Spin(Spin::new(DOTS).relative(true)));
    r.register("relfade", Widget::Spin(Spin::new(FADE).relative(true)));
    r.register("relhbar", Widget::Spin(Spin::new(HBAR).relative(true)));
    r.register("relpie", Widget::Spin(Spin::new(PIE).relative(true)));
    r.register("relsnake", Widget::Spin(Spin::new(SNAKE).relative(true)));
    r.register("relvbar", Widget::Spin(Spin::new(VBAR).relative(true)));

    r
}
