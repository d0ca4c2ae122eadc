//! Host event capability.
//!
//! FLUSH is the only instruction that externalizes state. The VM does
//! not own an event transport; the caller supplies one through
//! [`EventSink`] and the VM calls it synchronously. Whatever the host
//! does with the event afterwards (software bus, log, test buffer) is
//! its own business.

/// Event-type codes, numbered as the surrounding framework numbers its
/// event severities. The VM itself attaches no meaning to these; hosted
/// programs push them as plain numbers.
pub const EVENT_TYPE_DEBUG: u32 = 1;
pub const EVENT_TYPE_INFORMATION: u32 = 2;
pub const EVENT_TYPE_ERROR: u32 = 3;
pub const EVENT_TYPE_CRITICAL: u32 = 4;

/// Receives the events a hosted program flushes.
pub trait EventSink {
    /// Deliver one event. `message` is the text accumulated in the
    /// output queue since the previous flush.
    fn emit(&mut self, event_type: u32, event_id: u32, message: &str);
}

/// One delivered event, as captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub event_type: u32,
    pub event_id: u32,
    pub message: String,
}

/// An [`EventSink`] that records every event, for tests and tooling.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Events in delivery order.
    pub events: Vec<Event>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event_type: u32, event_id: u32, message: &str) {
        self.events.push(Event {
            event_type,
            event_id,
            message: message.to_owned(),
        });
    }
}
