use core::fmt;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Once,
};

use env_logger::fmt::{Color, Style, StyledValue};
use log::Level;

use crate::config::{CARGO_PKG_NAME, DEFAULT_LOG_LEVEL};

const LOG_FILTER_ENV: &str = "RUST_LOG";

/// Widest target printed so far, so that messages stay aligned
static MAX_TARGET_WIDTH: AtomicUsize = AtomicUsize::new(0);

static SETUP_LOGS: Once = Once::new();

/// Installs the global logger. Only the first call has an effect.
pub fn setup_logger() {
    SETUP_LOGS.call_once(|| {
        // Fails only when the embedding application installed its own logger, keep that one
        let _ = build_logger().is_test(cfg!(test)).try_init();
    });
}

fn build_logger() -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    builder.format(move |f, record| {
        use std::io::Write;
        let target = short_target(record.target());
        let width = max_target_width(target);

        let mut style = f.style();
        let level = colored_level(&mut style, record.level());

        let mut style = f.style();
        let target = style.set_bold(true).value(Padded {
            value: target,
            width,
        });

        let time = format!("{t}", t = f.timestamp_micros());
        let time = time.get(11..).unwrap_or(time.as_str()); // skip date
        writeln!(f, "{time} {level} {target} > {}", record.args())
    });

    builder.filter_level(DEFAULT_LOG_LEVEL);
    builder.parse_env(LOG_FILTER_ENV);

    builder
}

/// Strips the crate name from module paths: `tupledb::storage::tuple` becomes
/// `storage::tuple`. Targets from other crates are left as they are.
fn short_target(target: &str) -> &str {
    match target.strip_prefix(CARGO_PKG_NAME) {
        Some("") => CARGO_PKG_NAME,
        Some(rest) => rest.strip_prefix("::").unwrap_or(target),
        None => target,
    }
}

struct Padded<T> {
    value: T,
    width: usize,
}

impl<T: fmt::Display> fmt::Display for Padded<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{: <width$}", self.value, width = self.width)
    }
}

fn max_target_width(target: &str) -> usize {
    MAX_TARGET_WIDTH
        .fetch_max(target.len(), Ordering::Relaxed)
        .max(target.len())
}

fn colored_level<'a>(style: &'a mut Style, level: Level) -> StyledValue<'a, &'static str> {
    match level {
        Level::Trace => style.set_color(Color::Magenta).value("TRACE"),
        Level::Debug => style.set_color(Color::Blue).value("DEBUG"),
        Level::Info => style.set_color(Color::Green).value("INFO "),
        Level::Warn => style.set_color(Color::Yellow).value("WARN "),
        Level::Error => style.set_color(Color::Red).value("ERROR"),
    }
}
