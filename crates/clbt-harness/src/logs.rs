#![forbid(unsafe_code)]

//! Capture `tracing` output for assertions.
//!
//! ```
//! use clbt_harness::{capture, venue_coordinator};
//!
//! let mut c = venue_coordinator();
//! let (opened, logs) = capture(|| c.open("unknownId"));
//! assert!(!opened);
//! assert_eq!(logs.warnings().count(), 1);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    /// Value of a structured field, formatted.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Events recorded by [`capture`], in emission order.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    events: Vec<CapturedEvent>,
}

impl CapturedLogs {
    #[must_use]
    pub fn events(&self) -> &[CapturedEvent] {
        &self.events
    }

    pub fn at(&self, level: Level) -> impl Iterator<Item = &CapturedEvent> {
        self.events.iter().filter(move |e| e.level == level)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &CapturedEvent> {
        self.at(Level::WARN)
    }

    pub fn errors(&self) -> impl Iterator<Item = &CapturedEvent> {
        self.at(Level::ERROR)
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.fields.push((field.name().to_owned(), value.to_owned()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push((field.name().to_owned(), format!("{value:?}")));
        }
    }
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let meta = event.metadata();
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedEvent {
                level: *meta.level(),
                target: meta.target().to_owned(),
                message: visitor.message,
                fields: visitor.fields,
            });
    }
}

/// Run `f` with a capturing subscriber as the thread default.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, CapturedLogs) {
    let layer = CaptureLayer::default();
    let events = Arc::clone(&layer.events);
    let subscriber = Registry::default().with(layer);
    let result = tracing::subscriber::with_default(subscriber, f);
    let events = events
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    (result, CapturedLogs { events })
}
