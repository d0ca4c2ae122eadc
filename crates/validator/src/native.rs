//! Native rendition of the table validator.
//!
//! This is the decision procedure the hosted program reproduces,
//! written directly in Rust. When given an invalid image it emits one
//! error event per distinct validity problem (ordered by entry index,
//! then by event-id value within an entry), followed by one statistics
//! event, and returns invalid. A problem is always blamed on a
//! particular entry; there is no concept of a table-level fault that
//! belongs to no entry.

use strait_vm::event::{EventSink, EVENT_TYPE_ERROR, EVENT_TYPE_INFORMATION};

use crate::events::{
    TBL_EXTRA_ERR_EID, TBL_HBND_ERR_EID, TBL_LBND_ERR_EID, TBL_ORDER_ERR_EID, TBL_PAD_ERR_EID,
    TBL_PARM_ERR_EID, TBL_REDEF_ERR_EID, TBL_ZERO_ERR_EID, VALIDATION_INF_EID,
};
use crate::table::{parm_name, ParmClass, Table, TableEntry};

/// Validate a raw table image, reporting problems through `sink`.
///
/// Returns true iff every entry is valid or unused. An image that is
/// not even table-sized is invalid with no per-entry events, the same
/// way the hosted rendition fails its run.
pub fn validate(image: &[u8], sink: &mut dyn EventSink) -> bool {
    let Some(table) = Table::from_image(image) else {
        return false;
    };

    let mut saw_valid_unused = false;
    let mut parms_seen: u8 = 0;
    let mut count_unused = 0u32;
    let mut count_valid = 0u32;
    let mut count_invalid = 0u32;

    for (i, entry) in table.entries.iter().enumerate() {
        let entry_no = (i + 1) as u32;

        match ParmClass::of(entry.parm_id) {
            ParmClass::Unused => {
                if unused_entry_is_valid(entry, entry_no, sink) {
                    count_unused += 1;
                    saw_valid_unused = true;
                } else {
                    count_invalid += 1;
                }
            }
            class @ (ParmClass::Animal | ParmClass::Direction) => {
                let (min, max) = class.range().unwrap_or((0, 0));
                if inuse_entry_is_valid(entry, entry_no, saw_valid_unused, parms_seen, min, max, sink)
                {
                    count_valid += 1;
                } else {
                    count_invalid += 1;
                }
                // Remember this entry's parm whether or not it was valid.
                parms_seen |= entry.parm_id;
            }
            ParmClass::Invalid => {
                sink.emit(
                    EVENT_TYPE_ERROR,
                    TBL_PARM_ERR_EID,
                    &format!("Table entry {entry_no} invalid Parm ID"),
                );
                count_invalid += 1;
            }
        }
    }

    sink.emit(
        EVENT_TYPE_INFORMATION,
        VALIDATION_INF_EID,
        &format!(
            "Table image entries: {count_valid} valid, {count_invalid} invalid, {count_unused} unused"
        ),
    );

    count_invalid == 0
}

/// An unused entry is valid iff every other field is zero.
fn unused_entry_is_valid(entry: &TableEntry, entry_no: u32, sink: &mut dyn EventSink) -> bool {
    let zeroed = entry.pad == [0; 3] && entry.bound_low == 0 && entry.bound_high == 0;
    if zeroed {
        return true;
    }

    sink.emit(
        EVENT_TYPE_ERROR,
        TBL_ZERO_ERR_EID,
        &format!(
            "Table entry {entry_no} parm {} not zeroed",
            parm_name(entry.parm_id)
        ),
    );
    false
}

/// All checks for an in-use entry with a well-formed parm id, applied
/// independently so one image problem never hides another.
fn inuse_entry_is_valid(
    entry: &TableEntry,
    entry_no: u32,
    saw_valid_unused: bool,
    parms_seen: u8,
    min: u32,
    max: u32,
    sink: &mut dyn EventSink,
) -> bool {
    let mut result = true;

    if !pad_is_valid(entry, entry_no, sink) {
        result = false;
    }
    if !bounds_are_valid(entry, entry_no, min, max, sink) {
        result = false;
    }

    // In-use entries that follow a valid unused entry are a problem;
    // a malformed "unused" entry does not count.
    if saw_valid_unused {
        sink.emit(
            EVENT_TYPE_ERROR,
            TBL_EXTRA_ERR_EID,
            &format!(
                "Table entry {entry_no} parm {} follows an unused entry",
                parm_name(entry.parm_id)
            ),
        );
        result = false;
    }

    // Entries that reuse an earlier entry's parm id are a problem. The
    // ids are single bits, so the seen-set is a byte.
    if parms_seen & entry.parm_id != 0 {
        sink.emit(
            EVENT_TYPE_ERROR,
            TBL_REDEF_ERR_EID,
            &format!(
                "Table entry {entry_no} parm {} redefines earlier entry",
                parm_name(entry.parm_id)
            ),
        );
        result = false;
    }

    result
}

fn pad_is_valid(entry: &TableEntry, entry_no: u32, sink: &mut dyn EventSink) -> bool {
    if entry.pad == [0; 3] {
        return true;
    }

    sink.emit(
        EVENT_TYPE_ERROR,
        TBL_PAD_ERR_EID,
        &format!(
            "Table entry {entry_no} parm {} padding not zeroed",
            parm_name(entry.parm_id)
        ),
    );
    false
}

fn bounds_are_valid(
    entry: &TableEntry,
    entry_no: u32,
    min: u32,
    max: u32,
    sink: &mut dyn EventSink,
) -> bool {
    let name = parm_name(entry.parm_id);
    let mut result = true;

    if !(min..=max).contains(&entry.bound_low) {
        sink.emit(
            EVENT_TYPE_ERROR,
            TBL_LBND_ERR_EID,
            &format!("Table entry {entry_no} parm {name} invalid low bound"),
        );
        result = false;
    }

    if !(min..=max).contains(&entry.bound_high) {
        sink.emit(
            EVENT_TYPE_ERROR,
            TBL_HBND_ERR_EID,
            &format!("Table entry {entry_no} parm {name} invalid high bound"),
        );
        result = false;
    }

    if entry.bound_low > entry.bound_high {
        sink.emit(
            EVENT_TYPE_ERROR,
            TBL_ORDER_ERR_EID,
            &format!("Table entry {entry_no} parm {name} invalid bound order"),
        );
        result = false;
    }

    result
}
