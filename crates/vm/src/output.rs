//! The Strait VM's output queue.
//!
//! Hosted programs build event messages piecewise: OUTPUT pops a value
//! and appends its text form here, and FLUSH hands the accumulated text
//! to the host as one event and empties the queue. The buffer is sized
//! to the framework's maximum event-message length, with the final byte
//! reserved, so no hosted program can construct a message the event
//! service would truncate.

use strait_common::StringTable;

use crate::error::RuntimeError;
use crate::event::EventSink;

/// Maximum event-message length in bytes, including the reserved final
/// byte. Matches the framework's event-service limit.
pub const MAX_EVENT_MESSAGE: usize = 122;

/// Enqueue-only text buffer plus the program's string table.
///
/// Invariant: the accumulated text never exceeds
/// `MAX_EVENT_MESSAGE - 1` bytes.
#[derive(Debug)]
pub struct OutputQueue<'a> {
    strings: StringTable<'a>,
    buffer: String,
}

impl<'a> OutputQueue<'a> {
    /// An empty queue drawing string literals from `strings`.
    pub fn new(strings: StringTable<'a>) -> Self {
        Self {
            strings,
            buffer: String::with_capacity(MAX_EVENT_MESSAGE - 1),
        }
    }

    /// Bytes accumulated since the last flush.
    pub fn tail(&self) -> usize {
        self.buffer.len()
    }

    /// The accumulated message text.
    pub fn message(&self) -> &str {
        &self.buffer
    }

    /// Append `true` or `false`.
    pub fn enqueue_bool(&mut self, value: bool) -> Result<(), RuntimeError> {
        self.enqueue(if value { "true" } else { "false" })
    }

    /// Append the decimal form of a number: no sign, no padding, no
    /// leading zeros.
    pub fn enqueue_number(&mut self, value: u32) -> Result<(), RuntimeError> {
        self.enqueue(&value.to_string())
    }

    /// Append a string-table entry.
    ///
    /// References outside the table fail with `InvalidLiteral`.
    pub fn enqueue_string(&mut self, index: u16) -> Result<(), RuntimeError> {
        let text = self
            .strings
            .get(index)
            .ok_or(RuntimeError::InvalidLiteral)?;
        self.enqueue(text)
    }

    /// Deliver the accumulated text to the host as one event and reset
    /// the queue.
    pub fn flush(&mut self, event_type: u32, event_id: u32, sink: &mut dyn EventSink) {
        sink.emit(event_type, event_id, &self.buffer);
        self.buffer.clear();
    }

    /// Append `text` whole, or fail with `OutOfBounds` leaving the
    /// queue unchanged.
    fn enqueue(&mut self, text: &str) -> Result<(), RuntimeError> {
        if self.buffer.len() + text.len() > MAX_EVENT_MESSAGE - 1 {
            return Err(RuntimeError::OutOfBounds);
        }
        self.buffer.push_str(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RecordingSink;

    fn queue<'a>(strings: &'a [&'a str]) -> OutputQueue<'a> {
        OutputQueue::new(StringTable::new(strings).unwrap())
    }

    #[test]
    fn booleans_append_their_text() {
        let mut out = queue(&[]);
        out.enqueue_bool(true).unwrap();
        out.enqueue_bool(false).unwrap();
        assert_eq!(out.message(), "truefalse");
    }

    #[test]
    fn numbers_append_decimal() {
        let mut out = queue(&[]);
        out.enqueue_number(0).unwrap();
        out.enqueue_number(42).unwrap();
        out.enqueue_number(u32::MAX).unwrap();
        assert_eq!(out.message(), "0424294967295");
    }

    #[test]
    fn strings_come_from_the_table() {
        let mut out = queue(&["Table entry ", " parm "]);
        out.enqueue_string(0).unwrap();
        out.enqueue_number(2).unwrap();
        out.enqueue_string(1).unwrap();
        assert_eq!(out.message(), "Table entry 2 parm ");
    }

    #[test]
    fn string_reference_out_of_table() {
        let mut out = queue(&["only"]);
        assert_eq!(out.enqueue_string(1), Err(RuntimeError::InvalidLiteral));
        assert_eq!(out.tail(), 0);
    }

    #[test]
    fn appends_that_overflow_leave_the_queue_unchanged() {
        let long = "x".repeat(MAX_EVENT_MESSAGE - 2);
        let strings = [long.as_str()];
        let mut out = queue(&strings);

        out.enqueue_string(0).unwrap();
        assert_eq!(out.tail(), MAX_EVENT_MESSAGE - 2);

        // One more byte fits; two do not.
        assert_eq!(out.enqueue_number(12), Err(RuntimeError::OutOfBounds));
        assert_eq!(out.tail(), MAX_EVENT_MESSAGE - 2);
        out.enqueue_number(7).unwrap();
        assert_eq!(out.tail(), MAX_EVENT_MESSAGE - 1);
        assert_eq!(out.enqueue_number(0), Err(RuntimeError::OutOfBounds));
    }

    #[test]
    fn flush_delivers_and_resets() {
        let mut out = queue(&["hello"]);
        let mut sink = RecordingSink::new();

        out.enqueue_string(0).unwrap();
        out.flush(3, 0x2001, &mut sink);
        assert_eq!(out.tail(), 0);

        // An empty queue still flushes an (empty) event.
        out.flush(2, 0x0008, &mut sink);

        assert_eq!(sink.events.len(), 2);
        assert_eq!(sink.events[0].message, "hello");
        assert_eq!(sink.events[0].event_type, 3);
        assert_eq!(sink.events[1].message, "");
    }
}
