#![forbid(unsafe_code)]

//! `tracing` layer that forwards events to the browser console.
//!
//! Each event is rendered as one line, `[target] message key=value ...`,
//! and handed to a sink together with its level. In the browser the sink is
//! [`write_to_console`], which picks `console.error`, `console.warn`,
//! `console.info` or `console.debug` by level.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Layer rendering events to a line sink.
pub struct ConsoleLayer<F = fn(Level, &str)> {
    sink: F,
    max_level: LevelFilter,
}

impl<F> ConsoleLayer<F>
where
    F: Fn(Level, &str) + Send + Sync + 'static,
{
    /// Forward `INFO` and above to `sink`.
    pub fn new(sink: F) -> Self {
        Self {
            sink,
            max_level: LevelFilter::INFO,
        }
    }

    #[must_use]
    pub fn with_max_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }
}

impl<S, F> Layer<S> for ConsoleLayer<F>
where
    S: Subscriber,
    F: Fn(Level, &str) + Send + Sync + 'static,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.max_level >= *metadata.level()
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        (self.sink)(*event.metadata().level(), &format_event(event));
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn push(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if field.name() == "message" {
            let _ = self.message.write_fmt(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, format_args!("{value}"));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format_args!("{value:?}"));
    }
}

/// Render `event` as a single console line.
pub fn format_event(event: &Event<'_>) -> String {
    let mut visitor = LineVisitor::default();
    event.record(&mut visitor);
    format!(
        "[{}] {}{}",
        event.metadata().target(),
        visitor.message,
        visitor.fields
    )
}

/// Console sink used in the browser.
#[cfg(target_arch = "wasm32")]
pub fn write_to_console(level: Level, line: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let line = JsValue::from_str(line);
    match level {
        Level::ERROR => console::error_1(&line),
        Level::WARN => console::warn_1(&line),
        Level::INFO => console::info_1(&line),
        _ => console::debug_1(&line),
    }
}

/// Install the console layer as the global subscriber.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(target_arch = "wasm32")]
pub fn install(max_level: LevelFilter) -> bool {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::registry::Registry;

    let layer = ConsoleLayer::new(write_to_console as fn(Level, &str)).with_max_level(max_level);
    tracing::subscriber::set_global_default(Registry::default().with(layer)).is_ok()
}
