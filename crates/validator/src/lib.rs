//! Reference parameter-table validator, twice over.
//!
//! The same decision procedure exists in two renditions with identical
//! observable behavior:
//!
//! - [`native::validate`] — written directly in Rust, and
//! - [`program::validate`] — a program hosted on the Strait VM, which
//!   gets control-flow safety, memory safety, and termination from the
//!   machine itself rather than from review.
//!
//! Both take a raw 48-byte table image and an event sink, emit the same
//! events in the same order (per-entry errors by entry index and
//! event-id order, then one statistics event), and return the same
//! verdict. The conformance tests hold them to that.
//!
//! # Usage
//!
//! ```
//! use strait_validator::table::{Table, TableEntry, PARM_BAT};
//! use strait_vm::RecordingSink;
//!
//! let image = Table {
//!     entries: [
//!         TableEntry::in_use(PARM_BAT, 0x10, 0x1000),
//!         TableEntry::unused(),
//!         TableEntry::unused(),
//!         TableEntry::unused(),
//!     ],
//! }
//! .to_image();
//!
//! let mut sink = RecordingSink::new();
//! assert!(strait_validator::validate(&image, &mut sink));
//! assert_eq!(sink.events.len(), 1);
//! ```

pub mod events;
pub mod native;
pub mod program;
pub mod table;

pub use program::{PROGRAM, STRINGS};

use strait_vm::EventSink;

/// Validate a table image with the hosted rendition.
///
/// Returns true iff the image is valid; problems are reported through
/// `sink` before this returns.
pub fn validate(image: &[u8], sink: &mut dyn EventSink) -> bool {
    program::validate(image, sink)
}
