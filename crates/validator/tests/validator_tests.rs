//! Conformance tests for the table validator.
//!
//! Every scenario runs against both renditions, the native decision
//! procedure and the hosted Strait program, asserting the exact event
//! sequence (type, id, message) and the final verdict, then asserting
//! the two renditions agree with each other. A proptest sweep extends
//! the agreement check to randomized images.

use proptest::prelude::*;
use strait_common::{Program, StringTable};
use strait_vm::event::{EVENT_TYPE_ERROR, EVENT_TYPE_INFORMATION};
use strait_vm::{run, Halt, RecordingSink};
use strait_validator::events::{
    TBL_EXTRA_ERR_EID, TBL_HBND_ERR_EID, TBL_LBND_ERR_EID, TBL_ORDER_ERR_EID, TBL_PAD_ERR_EID,
    TBL_PARM_ERR_EID, TBL_REDEF_ERR_EID, VALIDATION_INF_EID,
};
use strait_validator::table::{
    Table, TableEntry, PARM_APE, PARM_BAT, PARM_DOG, PARM_EAST, PARM_SOUTH, PARM_WEST, TABLE_SIZE,
};
use strait_validator::{native, program, PROGRAM, STRINGS};

// ============================================================
// Helpers
// ============================================================

fn image(entries: [TableEntry; 4]) -> [u8; TABLE_SIZE] {
    Table { entries }.to_image()
}

/// Run one rendition and capture (verdict, events).
fn run_rendition(
    validate: fn(&[u8], &mut dyn strait_vm::EventSink) -> bool,
    image: &[u8],
) -> (bool, Vec<(u32, u32, String)>) {
    let mut sink = RecordingSink::new();
    let verdict = validate(image, &mut sink);
    let events = sink
        .events
        .into_iter()
        .map(|e| (e.event_type, e.event_id, e.message))
        .collect();
    (verdict, events)
}

/// Assert both renditions produce exactly `expected` and agree.
fn assert_scenario(image: &[u8], expected_valid: bool, expected: &[(u32, u32, &str)]) {
    for (name, validate) in [
        ("native", native::validate as fn(&[u8], &mut dyn strait_vm::EventSink) -> bool),
        ("hosted", program::validate),
    ] {
        let (verdict, events) = run_rendition(validate, image);
        assert_eq!(verdict, expected_valid, "{name} verdict");
        let got: Vec<(u32, u32, &str)> = events
            .iter()
            .map(|(t, i, m)| (*t, *i, m.as_str()))
            .collect();
        assert_eq!(got, expected, "{name} events");
    }
}

// ============================================================
// End-to-end scenarios
// ============================================================

#[test]
fn scenario_all_unused() {
    assert_scenario(
        &image([TableEntry::unused(); 4]),
        true,
        &[(
            EVENT_TYPE_INFORMATION,
            VALIDATION_INF_EID,
            "Table image entries: 0 valid, 0 invalid, 4 unused",
        )],
    );
}

#[test]
fn scenario_two_valid_in_use() {
    assert_scenario(
        &image([
            TableEntry::in_use(PARM_BAT, 0x10, 0x1000),
            TableEntry::in_use(PARM_EAST, 0x1_0000, 0x100_0000),
            TableEntry::unused(),
            TableEntry::unused(),
        ]),
        true,
        &[(
            EVENT_TYPE_INFORMATION,
            VALIDATION_INF_EID,
            "Table image entries: 2 valid, 0 invalid, 2 unused",
        )],
    );
}

#[test]
fn scenario_in_use_after_unused() {
    assert_scenario(
        &image([
            TableEntry::in_use(PARM_BAT, 0x10, 0x1000),
            TableEntry::unused(),
            TableEntry::unused(),
            TableEntry::in_use(PARM_APE, 0x10, 0x1000),
        ]),
        false,
        &[
            (
                EVENT_TYPE_ERROR,
                TBL_EXTRA_ERR_EID,
                "Table entry 4 parm Ape follows an unused entry",
            ),
            (
                EVENT_TYPE_INFORMATION,
                VALIDATION_INF_EID,
                "Table image entries: 1 valid, 1 invalid, 2 unused",
            ),
        ],
    );
}

#[test]
fn scenario_misordered_bounds() {
    // Both bounds are inside the animal range individually; only their
    // order is wrong. The equal-bounds direction entry is fine.
    assert_scenario(
        &image([
            TableEntry::in_use(PARM_SOUTH, 0x1_0000, 0x1_0000),
            TableEntry::in_use(PARM_APE, 0x1000, 0x10),
            TableEntry::unused(),
            TableEntry::unused(),
        ]),
        false,
        &[
            (
                EVENT_TYPE_ERROR,
                TBL_ORDER_ERR_EID,
                "Table entry 2 parm Ape invalid bound order",
            ),
            (
                EVENT_TYPE_INFORMATION,
                VALIDATION_INF_EID,
                "Table image entries: 1 valid, 1 invalid, 2 unused",
            ),
        ],
    );
}

#[test]
fn scenario_redefined_parm() {
    assert_scenario(
        &image([
            TableEntry::in_use(PARM_WEST, 0x80_8000, 0x100_0000),
            TableEntry::in_use(PARM_WEST, 0x1_0000, 0x100_0000),
            TableEntry::unused(),
            TableEntry::unused(),
        ]),
        false,
        &[
            (
                EVENT_TYPE_ERROR,
                TBL_REDEF_ERR_EID,
                "Table entry 2 parm West redefines earlier entry",
            ),
            (
                EVENT_TYPE_INFORMATION,
                VALIDATION_INF_EID,
                "Table image entries: 1 valid, 1 invalid, 2 unused",
            ),
        ],
    );
}

#[test]
fn scenario_every_in_use_error_at_once() {
    let broken_dog = TableEntry {
        parm_id: PARM_DOG,
        pad: [0xFF; 3],
        bound_low: 0x100_0001,
        bound_high: 0x0F,
    };
    let composite = TableEntry {
        parm_id: PARM_DOG | PARM_WEST,
        pad: [0xFF; 3],
        bound_low: 0x100_0001,
        bound_high: 0x0F,
    };

    assert_scenario(
        &image([composite, TableEntry::unused(), broken_dog, broken_dog]),
        false,
        &[
            // Entry 1: a composite parm id reports nothing else.
            (EVENT_TYPE_ERROR, TBL_PARM_ERR_EID, "Table entry 1 invalid Parm ID"),
            // Entry 3: every independent check fires, in event-id order.
            (
                EVENT_TYPE_ERROR,
                TBL_PAD_ERR_EID,
                "Table entry 3 parm Dog padding not zeroed",
            ),
            (
                EVENT_TYPE_ERROR,
                TBL_LBND_ERR_EID,
                "Table entry 3 parm Dog invalid low bound",
            ),
            (
                EVENT_TYPE_ERROR,
                TBL_HBND_ERR_EID,
                "Table entry 3 parm Dog invalid high bound",
            ),
            (
                EVENT_TYPE_ERROR,
                TBL_ORDER_ERR_EID,
                "Table entry 3 parm Dog invalid bound order",
            ),
            (
                EVENT_TYPE_ERROR,
                TBL_EXTRA_ERR_EID,
                "Table entry 3 parm Dog follows an unused entry",
            ),
            // Entry 4: the same five, plus the redefinition of entry 3.
            // Entry 1's composite must not mask it.
            (
                EVENT_TYPE_ERROR,
                TBL_PAD_ERR_EID,
                "Table entry 4 parm Dog padding not zeroed",
            ),
            (
                EVENT_TYPE_ERROR,
                TBL_LBND_ERR_EID,
                "Table entry 4 parm Dog invalid low bound",
            ),
            (
                EVENT_TYPE_ERROR,
                TBL_HBND_ERR_EID,
                "Table entry 4 parm Dog invalid high bound",
            ),
            (
                EVENT_TYPE_ERROR,
                TBL_ORDER_ERR_EID,
                "Table entry 4 parm Dog invalid bound order",
            ),
            (
                EVENT_TYPE_ERROR,
                TBL_EXTRA_ERR_EID,
                "Table entry 4 parm Dog follows an unused entry",
            ),
            (
                EVENT_TYPE_ERROR,
                TBL_REDEF_ERR_EID,
                "Table entry 4 parm Dog redefines earlier entry",
            ),
            (
                EVENT_TYPE_INFORMATION,
                VALIDATION_INF_EID,
                "Table image entries: 0 valid, 3 invalid, 1 unused",
            ),
        ],
    );
}

// ============================================================
// Additional contract details
// ============================================================

#[test]
fn malformed_unused_entry_does_not_condemn_later_entries() {
    // Entry 2 claims unused but is not zeroed: it gets ZERO_ERR and
    // does NOT trigger follows-an-unused-entry on entry 3.
    let mut dirty_unused = TableEntry::unused();
    dirty_unused.bound_high = 1;

    assert_scenario(
        &image([
            TableEntry::in_use(PARM_APE, 0x10, 0x1000),
            dirty_unused,
            TableEntry::in_use(PARM_BAT, 0x10, 0x1000),
            TableEntry::unused(),
        ]),
        false,
        &[
            (
                EVENT_TYPE_ERROR,
                strait_validator::events::TBL_ZERO_ERR_EID,
                "Table entry 2 parm Unused not zeroed",
            ),
            (
                EVENT_TYPE_INFORMATION,
                VALIDATION_INF_EID,
                "Table image entries: 2 valid, 1 invalid, 1 unused",
            ),
        ],
    );
}

#[test]
fn hosted_run_reports_the_verdict_as_a_halt() {
    let program = Program::new(&PROGRAM).unwrap();
    let strings = StringTable::new(&STRINGS).unwrap();

    let mut sink = RecordingSink::new();
    let valid = image([TableEntry::unused(); 4]);
    assert_eq!(
        run(program, &valid, strings, &mut sink),
        Ok(Halt::True)
    );

    let mut sink = RecordingSink::new();
    let invalid = image([
        TableEntry::in_use(PARM_BAT, 0x10, 0x1000),
        TableEntry::unused(),
        TableEntry::unused(),
        TableEntry::in_use(PARM_APE, 0x10, 0x1000),
    ]);
    assert_eq!(
        run(program, &invalid, strings, &mut sink),
        Ok(Halt::False)
    );
}

#[test]
fn truncated_images_are_invalid_in_both_renditions() {
    for len in [0usize, 8, 32, 47] {
        let short = vec![0u8; len];
        let mut sink = RecordingSink::new();
        assert!(!native::validate(&short, &mut sink), "native, {len} bytes");
        let mut sink = RecordingSink::new();
        assert!(!program::validate(&short, &mut sink), "hosted, {len} bytes");
    }
}

#[test]
fn error_events_sort_by_entry_then_event_id() {
    let broken = TableEntry {
        parm_id: PARM_DOG,
        pad: [1, 0, 0],
        bound_low: 0x100_0001,
        bound_high: 0x0F,
    };
    let (_, events) = run_rendition(program::validate, &image([
        broken,
        TableEntry::in_use(PARM_DOG, 0x10, 0x10),
        TableEntry::unused(),
        TableEntry::unused(),
    ]));

    // All but the trailing summary are errors; their (entry, id) keys
    // must be nondecreasing. Entry numbers sit at a fixed offset in the
    // message text.
    let keys: Vec<(char, u32)> = events[..events.len() - 1]
        .iter()
        .map(|(_, id, msg)| (msg.chars().nth("Table entry ".len()).unwrap(), *id))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

// ============================================================
// Native / hosted agreement over randomized images
// ============================================================

fn arb_entry() -> impl Strategy<Value = TableEntry> {
    let parm = prop::sample::select(vec![
        0x00u8, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x03, 0x88, 0xFF,
    ]);
    let pad = prop::sample::select(vec![[0u8; 3], [0xFF; 3], [1, 0, 0], [0, 0, 2]]);
    let bound = prop::sample::select(vec![
        0u32, 0x0F, 0x10, 0x1000, 0x1001, 0x1_0000, 0x80_8000, 0x100_0000, 0x100_0001,
    ]);
    (parm, pad, bound.clone(), bound).prop_map(|(parm_id, pad, bound_low, bound_high)| TableEntry {
        parm_id,
        pad,
        bound_low,
        bound_high,
    })
}

proptest! {
    /// Whatever the image holds, the two renditions emit identical
    /// event sequences and verdicts.
    #[test]
    fn renditions_agree(entries in [arb_entry(), arb_entry(), arb_entry(), arb_entry()]) {
        let image = Table { entries }.to_image();
        let (native_verdict, native_events) = run_rendition(native::validate, &image);
        let (hosted_verdict, hosted_events) = run_rendition(program::validate, &image);
        prop_assert_eq!(native_verdict, hosted_verdict);
        prop_assert_eq!(native_events, hosted_events);
    }

    /// The closing statistics always account for exactly four entries.
    #[test]
    fn summary_counts_add_up(entries in [arb_entry(), arb_entry(), arb_entry(), arb_entry()]) {
        let image = Table { entries }.to_image();
        let (_, events) = run_rendition(program::validate, &image);
        let (_, id, message) = events.last().unwrap().clone();
        prop_assert_eq!(id, VALIDATION_INF_EID);

        let counts: Vec<u32> = message
            .split(|c: char| !c.is_ascii_digit())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().unwrap())
            .collect();
        prop_assert_eq!(counts.len(), 3);
        prop_assert_eq!(counts.iter().sum::<u32>(), 4);
    }
}
