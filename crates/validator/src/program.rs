//! Hosted rendition of the table validator: a Strait program.
//!
//! The program is authored directly at the instruction level, so it has
//! three parts: the constant string table its messages draw from, a set
//! of address constants that place each subroutine (the listing is
//! position-dependent because CALL targets are absolute), and the
//! instruction listing itself. Each instruction carries a stack-effect
//! comment; `--` separates the listing position from the argument-stack
//! picture after the instruction, topmost value rightmost.
//!
//! Calling conventions are noted at each subroutine header. Common
//! shorthand in the stack pictures: `u` and `v` are the running unused
//! and valid entry counts, `s1 s2 s3` the parm ids seen in earlier
//! entries, `e` the 1-based entry number, `p` the current entry's parm
//! id, and `?`-suffixed names are Boolean check results.

use strait_common::{Instruction as I, Program, StringTable};
use strait_vm::event::{EventSink, EVENT_TYPE_ERROR, EVENT_TYPE_INFORMATION};
use strait_vm::{run, Halt};

use crate::events::{
    TBL_EXTRA_ERR_EID, TBL_HBND_ERR_EID, TBL_LBND_ERR_EID, TBL_ORDER_ERR_EID, TBL_PAD_ERR_EID,
    TBL_PARM_ERR_EID, TBL_REDEF_ERR_EID, TBL_ZERO_ERR_EID, VALIDATION_INF_EID,
};
use crate::table::{
    ANIMAL_MAX, ANIMAL_MIN, DIRECTION_MAX, DIRECTION_MIN, PARM_APE, PARM_BAT, PARM_CAT, PARM_DOG,
    PARM_EAST, PARM_NORTH, PARM_SOUTH, PARM_UNUSED, PARM_WEST, TABLE_ENTRIES,
};

/// The program's constant strings, indexed by the `STR_*` constants.
pub static STRINGS: [&str; 24] = [
    // Summary message pieces.
    "Table image entries: ",
    " valid, ",
    " invalid, ",
    " unused",
    // Error message pieces.
    "Table entry ",
    " parm ",
    " not zeroed",
    " invalid Parm ID",
    " padding not zeroed",
    " invalid low bound",
    " invalid high bound",
    " invalid bound order",
    " follows an unused entry",
    " redefines earlier entry",
    // Parm id names.
    "Unused",
    "Ape",
    "Bat",
    "Cat",
    "Dog",
    "North",
    "South",
    "East",
    "West",
    "Unknown",
];

const STR_SUMMARY_HEAD: u16 = 0;
const STR_SUMMARY_VALID: u16 = 1;
const STR_SUMMARY_INVALID: u16 = 2;
const STR_SUMMARY_UNUSED: u16 = 3;
const STR_ENTRY: u16 = 4;
const STR_PARM: u16 = 5;
const STR_NOT_ZEROED: u16 = 6;
const STR_BAD_PARM_ID: u16 = 7;
const STR_PAD: u16 = 8;
const STR_LOW_BOUND: u16 = 9;
const STR_HIGH_BOUND: u16 = 10;
const STR_BOUND_ORDER: u16 = 11;
const STR_EXTRA: u16 = 12;
const STR_REDEF: u16 = 13;
const STR_NAME_UNUSED: u16 = 14;
const STR_NAME_APE: u16 = 15;
const STR_NAME_BAT: u16 = 16;
const STR_NAME_CAT: u16 = 17;
const STR_NAME_DOG: u16 = 18;
const STR_NAME_NORTH: u16 = 19;
const STR_NAME_SOUTH: u16 = 20;
const STR_NAME_EAST: u16 = 21;
const STR_NAME_WEST: u16 = 22;
const STR_NAME_UNKNOWN: u16 = 23;

// Subroutine addresses. Every length constant must match the number of
// instructions in its section of the listing below; the array length
// check enforces the sum.
const MAIN: u16 = 0;
const MAIN_LEN: u16 = 33;
const CHECK_ENTRY: u16 = MAIN + MAIN_LEN;
const CHECK_ENTRY_LEN: u16 = 52;
const IS_UNUSED: u16 = CHECK_ENTRY + CHECK_ENTRY_LEN;
const IS_UNUSED_LEN: u16 = 3;
const IS_ANIMAL: u16 = IS_UNUSED + IS_UNUSED_LEN;
const IS_ANIMAL_LEN: u16 = 16;
const IS_DIRECTION: u16 = IS_ANIMAL + IS_ANIMAL_LEN;
const IS_DIRECTION_LEN: u16 = 16;
const CHECK_UNUSED: u16 = IS_DIRECTION + IS_DIRECTION_LEN;
const CHECK_UNUSED_LEN: u16 = 18;
const CHECK_IN_USE: u16 = CHECK_UNUSED + CHECK_UNUSED_LEN;
const CHECK_IN_USE_LEN: u16 = 26;
const CHECK_PAD: u16 = CHECK_IN_USE + CHECK_IN_USE_LEN;
const CHECK_PAD_LEN: u16 = 17;
const CHECK_BOUNDS: u16 = CHECK_PAD + CHECK_PAD_LEN;
const CHECK_BOUNDS_LEN: u16 = 26;
const CHECK_RANGE: u16 = CHECK_BOUNDS + CHECK_BOUNDS_LEN;
const CHECK_RANGE_LEN: u16 = 15;
const CHECK_ORDER: u16 = CHECK_RANGE + CHECK_RANGE_LEN;
const CHECK_ORDER_LEN: u16 = 13;
const CHECK_EXTRA: u16 = CHECK_ORDER + CHECK_ORDER_LEN;
const CHECK_EXTRA_LEN: u16 = 15;
const CHECK_REDEF: u16 = CHECK_EXTRA + CHECK_EXTRA_LEN;
const CHECK_REDEF_LEN: u16 = 26;
const REPORT_BAD_PARM: u16 = CHECK_REDEF + CHECK_REDEF_LEN;
const REPORT_BAD_PARM_LEN: u16 = 10;
const BUMP_UNUSED: u16 = REPORT_BAD_PARM + REPORT_BAD_PARM_LEN;
const BUMP_UNUSED_LEN: u16 = 6;
const BUMP_VALID: u16 = BUMP_UNUSED + BUMP_UNUSED_LEN;
const BUMP_VALID_LEN: u16 = 5;
const COUNT_INVALID: u16 = BUMP_VALID + BUMP_VALID_LEN;
const COUNT_INVALID_LEN: u16 = 7;
const FINAL_VERDICT: u16 = COUNT_INVALID + COUNT_INVALID_LEN;
const FINAL_VERDICT_LEN: u16 = 7;
const EMIT_SUMMARY: u16 = FINAL_VERDICT + FINAL_VERDICT_LEN;
const EMIT_SUMMARY_LEN: u16 = 15;
const EMIT_PARM_ERROR: u16 = EMIT_SUMMARY + EMIT_SUMMARY_LEN;
const EMIT_PARM_ERROR_LEN: u16 = 9;
const EMIT_ERROR: u16 = EMIT_PARM_ERROR + EMIT_PARM_ERROR_LEN;
const EMIT_ERROR_LEN: u16 = 12;
const PARM_TO_NAME: u16 = EMIT_ERROR + EMIT_ERROR_LEN;
const PARM_TO_NAME_LEN: u16 = 75;

/// Total instruction count.
pub const PROGRAM_LEN: usize = (PARM_TO_NAME + PARM_TO_NAME_LEN) as usize;

/// The validator as a Strait instruction listing.
pub static PROGRAM: [I; PROGRAM_LEN] = [
    // ------------------------------------------------------------
    // MAIN:  -- ok?
    //
    // Runs CHECK_ENTRY over each of the four entries, threading the
    // unused/valid counts and the parm ids seen so far through the
    // stack, then computes and reports the verdict.
    //
    // CHECK_ENTRY takes (u v s1 s2 s3 e) and returns (u v p): updated
    // counts plus the entry's own parm id, which MAIN squirrels away as
    // the s-values for the later entries' redefinition checks.
    // ------------------------------------------------------------

    // Entry 1. No earlier parm ids exist yet, so the s-values start as
    // the unused id, which never collides with an in-use entry.
    I::pushn(0),                     // -- u
    I::pushn(0),                     // -- u v
    I::pushn(PARM_UNUSED as u32),    // -- u v s1
    I::pushn(PARM_UNUSED as u32),    // -- u v s1 s2
    I::pushn(PARM_UNUSED as u32),    // -- u v s1 s2 s3
    I::pushn(1),                     // -- u v s1 s2 s3 e
    I::call(CHECK_ENTRY),            // -- u v s1

    // Keep copies of entry 1's parm id for the entry 3 and 4 checks.
    I::dup(1),                       // -- u v s1 s1
    I::roll(4),                      // -- s1 u v s1
    I::dup(1),                       // -- s1 u v s1 s1
    I::roll(4),                      // -- s1 s1 u v s1

    // Entry 2.
    I::pushn(PARM_UNUSED as u32),    // -- s1 s1 u v s1 s2
    I::pushn(PARM_UNUSED as u32),    // -- s1 s1 u v s1 s2 s3
    I::pushn(2),                     // -- s1 s1 u v s1 s2 s3 e
    I::call(CHECK_ENTRY),            // -- s1 s1 u v s2

    // Keep a copy of entry 2's parm id for the entry 4 check.
    I::dup(1),                       // -- s1 s1 u v s2 s2
    I::roll(5),                      // -- s1 s2 s1 u v s2

    // Entry 3.
    I::roll(3),                      // -- s1 s2 s1 s2 u v
    I::roll(4),                      // -- s1 s2 v s1 s2 u
    I::roll(4),                      // -- s1 s2 u v s1 s2
    I::pushn(PARM_UNUSED as u32),    // -- s1 s2 u v s1 s2 s3
    I::pushn(3),                     // -- s1 s2 u v s1 s2 s3 e
    I::call(CHECK_ENTRY),            // -- s1 s2 u v s3

    // Entry 4.
    I::roll(3),                      // -- s1 s2 s3 u v
    I::roll(5),                      // -- v s1 s2 s3 u
    I::roll(5),                      // -- u v s1 s2 s3
    I::pushn(4),                     // -- u v s1 s2 s3 e
    I::call(CHECK_ENTRY),            // -- u v s4

    // Verdict and summary for the table as a whole.
    I::pop(1),                       // -- u v
    I::call(COUNT_INVALID),          // -- u i v
    I::call(FINAL_VERDICT),          // -- ok? u i v
    I::call(EMIT_SUMMARY),           // -- ok?
    I::halt(),

    // ------------------------------------------------------------
    // CHECK_ENTRY:  u v s1 s2 s3 e -- u v p
    //
    // Reads the entry's parm id and dispatches on its class: unused
    // entries to CHECK_UNUSED, animal and direction entries to
    // CHECK_IN_USE with the class's bound range, anything else to
    // REPORT_BAD_PARM. Bumps the matching counter when the entry is
    // valid and hands the parm id back for the caller's bookkeeping.
    // ------------------------------------------------------------
    I::input(1),                     // -- u v s1 s2 s3 e p
    I::dup(1),                       // -- u v s1 s2 s3 e p p
    I::roll(6),                      // -- u v p s1 s2 s3 e p
    I::dup(1),                       // -- u v p s1 s2 s3 e p p
    I::call(IS_UNUSED),              // -- u v p s1 s2 s3 e p unused?
    I::not(),                        // -- u v p s1 s2 s3 e p in-use?
    I::jmpif(9),                     // -- u v p s1 s2 s3 e p

    // Unused entry: the s-values play no part, drop them.
    I::roll(5),                      // -- u v p p s1 s2 s3 e
    I::roll(5),                      // -- u v p e p s1 s2 s3
    I::pop(3),                       // -- u v p e p
    I::call(CHECK_UNUSED),           // -- u v p ok?
    I::jmpif(2),                     // -- u v p
    I::ret(),
    I::call(BUMP_UNUSED),            // -- u' v p
    I::ret(),

    // In-use entry: rearrange so the unused count (which gates the
    // follows-an-unused-entry check) rides along with the entry
    // number and parm id.
    I::roll(8),                      // -- p u v p s1 s2 s3 e
    I::roll(8),                      // -- e p u v p s1 s2 s3
    I::roll(8),                      // -- s3 e p u v p s1 s2
    I::roll(8),                      // -- s2 s3 e p u v p s1
    I::roll(8),                      // -- s1 s2 s3 e p u v p
    I::roll(8),                      // -- p s1 s2 s3 e p u v
    I::roll(8),                      // -- v p s1 s2 s3 e p u
    I::dup(1),                       // -- v p s1 s2 s3 e p u u
    I::roll(9),                      // -- u v p s1 s2 s3 e p u
    I::roll(3),                      // -- u v p s1 s2 s3 u e p

    // Animal entry?
    I::dup(1),                       // -- u v p s1 s2 s3 u e p p
    I::call(IS_ANIMAL),              // -- u v p s1 s2 s3 u e p animal?
    I::not(),                        // -- u v p s1 s2 s3 u e p other?
    I::jmpif(8),                     // -- u v p s1 s2 s3 u e p
    I::pushn(ANIMAL_MAX),            // -- u v p s1 s2 s3 u e p max
    I::pushn(ANIMAL_MIN),            // -- u v p s1 s2 s3 u e p max min
    I::call(CHECK_IN_USE),           // -- u v p ok?
    I::jmpif(2),                     // -- u v p
    I::ret(),
    I::call(BUMP_VALID),             // -- u v' p
    I::ret(),

    // Direction entry?
    I::dup(1),                       // -- u v p s1 s2 s3 u e p p
    I::call(IS_DIRECTION),           // -- u v p s1 s2 s3 u e p direction?
    I::not(),                        // -- u v p s1 s2 s3 u e p other?
    I::jmpif(8),                     // -- u v p s1 s2 s3 u e p
    I::pushn(DIRECTION_MAX),         // -- u v p s1 s2 s3 u e p max
    I::pushn(DIRECTION_MIN),         // -- u v p s1 s2 s3 u e p max min
    I::call(CHECK_IN_USE),           // -- u v p ok?
    I::jmpif(2),                     // -- u v p
    I::ret(),
    I::call(BUMP_VALID),             // -- u v' p
    I::ret(),

    // Neither class: a bad parm id.
    I::pop(1),                       // -- u v p s1 s2 s3 u e
    I::roll(5),                      // -- u v p e s1 s2 s3 u
    I::pop(4),                       // -- u v p e
    I::call(REPORT_BAD_PARM),        // -- u v p
    I::ret(),

    // ------------------------------------------------------------
    // IS_UNUSED:  p -- unused?
    // ------------------------------------------------------------
    I::pushn(PARM_UNUSED as u32),    // -- p id
    I::eq(2),                        // -- unused?
    I::ret(),

    // ------------------------------------------------------------
    // IS_ANIMAL:  p -- animal?
    // ------------------------------------------------------------
    I::dup(1),                       // -- p p
    I::pushn(PARM_APE as u32),       // -- p p id
    I::eq(2),                        // -- p ape?
    I::roll(2),                      // -- ape? p
    I::dup(1),                       // -- ape? p p
    I::pushn(PARM_BAT as u32),       // -- ape? p p id
    I::eq(2),                        // -- ape? p bat?
    I::roll(2),                      // -- ape? bat? p
    I::dup(1),                       // -- ape? bat? p p
    I::pushn(PARM_CAT as u32),       // -- ape? bat? p p id
    I::eq(2),                        // -- ape? bat? p cat?
    I::roll(2),                      // -- ape? bat? cat? p
    I::pushn(PARM_DOG as u32),       // -- ape? bat? cat? p id
    I::eq(2),                        // -- ape? bat? cat? dog?
    I::or(4),                        // -- animal?
    I::ret(),

    // ------------------------------------------------------------
    // IS_DIRECTION:  p -- direction?
    // ------------------------------------------------------------
    I::dup(1),                       // -- p p
    I::pushn(PARM_NORTH as u32),     // -- p p id
    I::eq(2),                        // -- p north?
    I::roll(2),                      // -- north? p
    I::dup(1),                       // -- north? p p
    I::pushn(PARM_SOUTH as u32),     // -- north? p p id
    I::eq(2),                        // -- north? p south?
    I::roll(2),                      // -- north? south? p
    I::dup(1),                       // -- north? south? p p
    I::pushn(PARM_EAST as u32),      // -- north? south? p p id
    I::eq(2),                        // -- north? south? p east?
    I::roll(2),                      // -- north? south? east? p
    I::pushn(PARM_WEST as u32),      // -- north? south? east? p id
    I::eq(2),                        // -- north? south? east? west?
    I::or(4),                        // -- direction?
    I::ret(),

    // ------------------------------------------------------------
    // CHECK_UNUSED:  e p -- ok?
    //
    // An unused entry is valid only when every remaining field of the
    // entry is zero.
    // ------------------------------------------------------------
    I::input(1),                     // -- e p pad0
    I::input(2),                     // -- e p pad0 pad12
    I::input(4),                     // -- e p pad0 pad12 low
    I::input(4),                     // -- e p pad0 pad12 low high
    I::pushn(0),                     // -- e p pad0 pad12 low high 0
    I::eq(5),                        // -- e p zeroed?
    I::jmpif(9),                     // -- e p

    // Not zeroed.
    I::roll(2),                      // -- p e
    I::pushn(TBL_ZERO_ERR_EID),      // -- p e eid
    I::roll(3),                      // -- eid p e
    I::pushs(STR_NOT_ZEROED),        // -- eid p e msg
    I::roll(3),                      // -- eid msg p e
    I::call(EMIT_ERROR),             // --
    I::pushb(false),                 // -- ok?
    I::ret(),

    // Zeroed.
    I::pop(2),                       // --
    I::pushb(true),                  // -- ok?
    I::ret(),

    // ------------------------------------------------------------
    // CHECK_IN_USE:  s1 s2 s3 u e p max min -- ok?
    //
    // Runs the four in-use checks independently so every problem with
    // an entry is reported, then ANDs their results. The stack work is
    // mostly dealing copies of (e p) to each check in turn.
    // ------------------------------------------------------------
    I::roll(8),                      // -- min s1 s2 s3 u e p max
    I::roll(8),                      // -- max min s1 s2 s3 u e p
    I::dup(2),                       // -- max min s1 s2 s3 u e p e p
    I::call(CHECK_PAD),              // -- max min s1 s2 s3 u e p pad?
    I::roll(9),                      // -- pad? max min s1 s2 s3 u e p

    // Deal (e p max min) to the bounds checks.
    I::dup(2),                       // -- pad? max min s1 s2 s3 u e p e p
    I::roll(10),                     // -- pad? p max min s1 s2 s3 u e p e
    I::roll(10),                     // -- pad? e p max min s1 s2 s3 u e p
    I::roll(10),                     // -- pad? p e p max min s1 s2 s3 u e
    I::roll(10),                     // -- pad? e p e p max min s1 s2 s3 u
    I::roll(10),                     // -- pad? u e p e p max min s1 s2 s3
    I::roll(10),                     // -- pad? s3 u e p e p max min s1 s2
    I::roll(10),                     // -- pad? s2 s3 u e p e p max min s1
    I::roll(10),                     // -- pad? s1 s2 s3 u e p e p max min
    I::call(CHECK_BOUNDS),           // -- pad? s1 s2 s3 u e p bounds?
    I::roll(7),                      // -- pad? bounds? s1 s2 s3 u e p

    // Deal (e p u) to the follows-unused check.
    I::dup(2),                       // -- pad? bounds? s1 s2 s3 u e p e p
    I::roll(5),                      // -- pad? bounds? s1 s2 s3 p u e p e
    I::roll(5),                      // -- pad? bounds? s1 s2 s3 e p u e p
    I::roll(3),                      // -- pad? bounds? s1 s2 s3 e p p u e
    I::roll(3),                      // -- pad? bounds? s1 s2 s3 e p e p u
    I::call(CHECK_EXTRA),            // -- pad? bounds? s1 s2 s3 e p extra?
    I::roll(7),                      // -- pad? extra? bounds? s1 s2 s3 e p

    // The redefinition check consumes what is left.
    I::call(CHECK_REDEF),            // -- pad? extra? bounds? redef?
    I::and(4),                       // -- ok?
    I::ret(),

    // ------------------------------------------------------------
    // CHECK_PAD:  e p -- ok?
    // ------------------------------------------------------------
    I::input(1),                     // -- e p pad0
    I::input(2),                     // -- e p pad0 pad12
    I::pushn(0),                     // -- e p pad0 pad12 0
    I::eq(3),                        // -- e p zeroed?
    I::not(),                        // -- e p dirty?
    I::jmpif(4),                     // -- e p

    I::pop(2),                       // --
    I::pushb(true),                  // -- ok?
    I::ret(),

    I::roll(2),                      // -- p e
    I::pushn(TBL_PAD_ERR_EID),       // -- p e eid
    I::roll(3),                      // -- eid p e
    I::pushs(STR_PAD),               // -- eid p e msg
    I::roll(3),                      // -- eid msg p e
    I::call(EMIT_ERROR),             // --
    I::pushb(false),                 // -- ok?
    I::ret(),

    // ------------------------------------------------------------
    // CHECK_BOUNDS:  e p max min -- ok?
    //
    // Three checks: the low bound is in range, the high bound is in
    // range, and low <= high. Copies of each bound are kept below the
    // working values for the final order comparison.
    // ------------------------------------------------------------

    // Low bound.
    I::dup(4),                       // -- e p max min e p max min
    I::input(4),                     // -- e p max min e p max min l
    I::dup(1),                       // -- e p max min e p max min l l
    I::roll(10),                     // -- l e p max min e p max min l
    I::pushn(TBL_LBND_ERR_EID),      // -- l e p max min e p max min l eid
    I::roll(6),                      // -- l e p max min eid e p max min l
    I::pushs(STR_LOW_BOUND),         // -- l e p max min eid e p max min l msg
    I::roll(6),                      // -- l e p max min eid msg e p max min l
    I::call(CHECK_RANGE),            // -- l e p max min low?
    I::roll(6),                      // -- low? l e p max min

    // High bound.
    I::dup(4),                       // -- low? l e p max min e p max min
    I::input(4),                     // -- low? l e p max min e p max min h
    I::dup(1),                       // -- low? l e p max min e p max min h h
    I::roll(11),                     // -- low? h l e p max min e p max min h
    I::pushn(TBL_HBND_ERR_EID),      // -- low? h l e p max min e p max min h eid
    I::roll(6),                      // -- low? h l e p max min eid e p max min h
    I::pushs(STR_HIGH_BOUND),        // -- low? h l e p max min eid e p max min h msg
    I::roll(6),                      // -- low? h l e p max min eid msg e p max min h
    I::call(CHECK_RANGE),            // -- low? h l e p max min high?
    I::roll(8),                      // -- high? low? h l e p max min

    // Bound order.
    I::pop(2),                       // -- high? low? h l e p
    I::roll(4),                      // -- high? low? p h l e
    I::roll(4),                      // -- high? low? e p h l
    I::call(CHECK_ORDER),            // -- high? low? order?
    I::and(3),                       // -- ok?
    I::ret(),

    // ------------------------------------------------------------
    // CHECK_RANGE:  eid msg e p max min b -- ok?
    //
    // Reports the caller's chosen event when b falls outside
    // [min, max]; consumes the message arguments either way.
    // ------------------------------------------------------------
    I::dup(1),                       // -- eid msg e p max min b b
    I::roll(4),                      // -- eid msg e p b max min b
    I::roll(2),                      // -- eid msg e p b max b min
    I::lt(),                         // -- eid msg e p b max below?
    I::roll(3),                      // -- eid msg e p below? b max
    I::gt(),                         // -- eid msg e p below? above?
    I::or(2),                        // -- eid msg e p outside?
    I::jmpif(4),                     // -- eid msg e p

    I::pop(4),                       // --
    I::pushb(true),                  // -- ok?
    I::ret(),

    I::roll(2),                      // -- eid msg p e
    I::call(EMIT_ERROR),             // --
    I::pushb(false),                 // -- ok?
    I::ret(),

    // ------------------------------------------------------------
    // CHECK_ORDER:  e p h l -- ok?
    // ------------------------------------------------------------
    I::lt(),                         // -- e p misordered?
    I::jmpif(4),                     // -- e p

    I::pop(2),                       // --
    I::pushb(true),                  // -- ok?
    I::ret(),

    I::roll(2),                      // -- p e
    I::pushs(STR_BOUND_ORDER),       // -- p e msg
    I::roll(3),                      // -- msg p e
    I::pushn(TBL_ORDER_ERR_EID),     // -- msg p e eid
    I::roll(4),                      // -- eid msg p e
    I::call(EMIT_ERROR),             // --
    I::pushb(false),                 // -- ok?
    I::ret(),

    // ------------------------------------------------------------
    // CHECK_EXTRA:  e p u -- ok?
    //
    // Any in-use entry that follows a proper unused entry is invalid.
    // Only proper unused entries count, which is why the gate is the
    // valid-unused count rather than a parm id comparison: a malformed
    // "unused" entry does not condemn the entries after it.
    // ------------------------------------------------------------
    I::pushn(0),                     // -- e p u 0
    I::eq(2),                        // -- e p none?
    I::not(),                        // -- e p follows?
    I::jmpif(4),                     // -- e p

    I::pop(2),                       // --
    I::pushb(true),                  // -- ok?
    I::ret(),

    I::roll(2),                      // -- p e
    I::pushs(STR_EXTRA),             // -- p e msg
    I::roll(3),                      // -- msg p e
    I::pushn(TBL_EXTRA_ERR_EID),     // -- msg p e eid
    I::roll(4),                      // -- eid msg p e
    I::call(EMIT_ERROR),             // --
    I::pushb(false),                 // -- ok?
    I::ret(),

    // ------------------------------------------------------------
    // CHECK_REDEF:  s1 s2 s3 e p -- ok?
    //
    // The current parm id is compared byte-for-byte against each
    // earlier entry's parm id. Exact equality keeps an invalid
    // composite id from masking a later single-flag entry.
    // ------------------------------------------------------------
    I::dup(1),                       // -- s1 s2 s3 e p p
    I::roll(5),                      // -- s1 p s2 s3 e p
    I::dup(1),                       // -- s1 p s2 s3 e p p
    I::roll(4),                      // -- s1 p s2 p s3 e p
    I::dup(1),                       // -- s1 p s2 p s3 e p p
    I::roll(3),                      // -- s1 p s2 p s3 p e p
    I::roll(8),                      // -- p s1 p s2 p s3 p e
    I::roll(8),                      // -- e p s1 p s2 p s3 p

    I::eq(2),                        // -- e p s1 p s2 p third?
    I::roll(5),                      // -- e p third? s1 p s2 p
    I::eq(2),                        // -- e p third? s1 p second?
    I::roll(3),                      // -- e p third? second? s1 p
    I::eq(2),                        // -- e p third? second? first?
    I::or(3),                        // -- e p redef?
    I::jmpif(4),                     // -- e p

    I::pop(2),                       // --
    I::pushb(true),                  // -- ok?
    I::ret(),

    I::roll(2),                      // -- p e
    I::pushs(STR_REDEF),             // -- p e msg
    I::roll(3),                      // -- msg p e
    I::pushn(TBL_REDEF_ERR_EID),     // -- msg p e eid
    I::roll(4),                      // -- eid msg p e
    I::call(EMIT_ERROR),             // --
    I::pushb(false),                 // -- ok?
    I::ret(),

    // ------------------------------------------------------------
    // REPORT_BAD_PARM:  e --
    //
    // Consumes the rest of the entry's bytes so the input cursor lands
    // on the next entry, then reports the bad parm id.
    // ------------------------------------------------------------
    I::input(1),                     // -- e pad0
    I::pop(1),                       // -- e
    I::input(2),                     // -- e pad12
    I::pop(1),                       // -- e
    I::input(4),                     // -- e low
    I::pop(1),                       // -- e
    I::input(4),                     // -- e high
    I::pop(1),                       // -- e
    I::call(EMIT_PARM_ERROR),        // --
    I::ret(),

    // ------------------------------------------------------------
    // BUMP_UNUSED:  u v p -- u+1 v p
    // ------------------------------------------------------------
    I::roll(3),                      // -- p u v
    I::roll(3),                      // -- v p u
    I::pushn(1),                     // -- v p u 1
    I::add(),                        // -- v p u'
    I::roll(3),                      // -- u' v p
    I::ret(),

    // ------------------------------------------------------------
    // BUMP_VALID:  u v p -- u v+1 p
    // ------------------------------------------------------------
    I::roll(2),                      // -- u p v
    I::pushn(1),                     // -- u p v 1
    I::add(),                        // -- u p v'
    I::roll(2),                      // -- u v' p
    I::ret(),

    // ------------------------------------------------------------
    // COUNT_INVALID:  u v -- u i v
    //
    // Every entry not counted valid or unused is invalid.
    // ------------------------------------------------------------
    I::dup(2),                       // -- u v u v
    I::add(),                        // -- u v counted
    I::pushn(TABLE_ENTRIES as u32),  // -- u v counted total
    I::roll(2),                      // -- u v total counted
    I::sub(),                        // -- u v i
    I::roll(2),                      // -- u i v
    I::ret(),

    // ------------------------------------------------------------
    // FINAL_VERDICT:  u i v -- ok? u i v
    //
    // The table is valid exactly when no entry was invalid.
    // ------------------------------------------------------------
    I::roll(2),                      // -- u v i
    I::dup(1),                       // -- u v i i
    I::pushn(0),                     // -- u v i i 0
    I::eq(2),                        // -- u v i ok?
    I::roll(4),                      // -- ok? u v i
    I::roll(2),                      // -- ok? u i v
    I::ret(),

    // ------------------------------------------------------------
    // EMIT_SUMMARY:  u i v --
    // ------------------------------------------------------------
    I::pushs(STR_SUMMARY_HEAD),      // -- u i v msg
    I::output(),                     // -- u i v
    I::output(),                     // -- u i
    I::pushs(STR_SUMMARY_VALID),     // -- u i msg
    I::output(),                     // -- u i
    I::output(),                     // -- u
    I::pushs(STR_SUMMARY_INVALID),   // -- u msg
    I::output(),                     // -- u
    I::output(),                     // --
    I::pushs(STR_SUMMARY_UNUSED),    // -- msg
    I::output(),                     // --
    I::pushn(EVENT_TYPE_INFORMATION), // -- etype
    I::pushn(VALIDATION_INF_EID),    // -- etype eid
    I::flush(),                      // --
    I::ret(),

    // ------------------------------------------------------------
    // EMIT_PARM_ERROR:  e --
    // ------------------------------------------------------------
    I::pushs(STR_ENTRY),             // -- e msg
    I::output(),                     // -- e
    I::output(),                     // --
    I::pushs(STR_BAD_PARM_ID),       // -- msg
    I::output(),                     // --
    I::pushn(EVENT_TYPE_ERROR),      // -- etype
    I::pushn(TBL_PARM_ERR_EID),      // -- etype eid
    I::flush(),                      // --
    I::ret(),

    // ------------------------------------------------------------
    // EMIT_ERROR:  eid msg p e --
    //
    // Builds "Table entry <e> parm <name><msg>" and flushes it as an
    // error event with the caller's event id.
    // ------------------------------------------------------------
    I::pushs(STR_ENTRY),             // -- eid msg p e head
    I::output(),                     // -- eid msg p e
    I::output(),                     // -- eid msg p
    I::pushs(STR_PARM),              // -- eid msg p mid
    I::output(),                     // -- eid msg p
    I::call(PARM_TO_NAME),           // -- eid msg name
    I::output(),                     // -- eid msg
    I::output(),                     // -- eid
    I::pushn(EVENT_TYPE_ERROR),      // -- eid etype
    I::roll(2),                      // -- etype eid
    I::flush(),                      // --
    I::ret(),

    // ------------------------------------------------------------
    // PARM_TO_NAME:  p -- name
    //
    // One comparison block per id; falls through to "Unknown".
    // ------------------------------------------------------------
    I::dup(1),                       // -- p p
    I::pushn(PARM_UNUSED as u32),    // -- p p id
    I::eq(2),                        // -- p match?
    I::not(),                        // -- p other?
    I::jmpif(4),                     // -- p
    I::pop(1),                       // --
    I::pushs(STR_NAME_UNUSED),       // -- name
    I::ret(),

    I::dup(1),                       // -- p p
    I::pushn(PARM_APE as u32),       // -- p p id
    I::eq(2),                        // -- p match?
    I::not(),                        // -- p other?
    I::jmpif(4),                     // -- p
    I::pop(1),                       // --
    I::pushs(STR_NAME_APE),          // -- name
    I::ret(),

    I::dup(1),                       // -- p p
    I::pushn(PARM_BAT as u32),       // -- p p id
    I::eq(2),                        // -- p match?
    I::not(),                        // -- p other?
    I::jmpif(4),                     // -- p
    I::pop(1),                       // --
    I::pushs(STR_NAME_BAT),          // -- name
    I::ret(),

    I::dup(1),                       // -- p p
    I::pushn(PARM_CAT as u32),       // -- p p id
    I::eq(2),                        // -- p match?
    I::not(),                        // -- p other?
    I::jmpif(4),                     // -- p
    I::pop(1),                       // --
    I::pushs(STR_NAME_CAT),          // -- name
    I::ret(),

    I::dup(1),                       // -- p p
    I::pushn(PARM_DOG as u32),       // -- p p id
    I::eq(2),                        // -- p match?
    I::not(),                        // -- p other?
    I::jmpif(4),                     // -- p
    I::pop(1),                       // --
    I::pushs(STR_NAME_DOG),          // -- name
    I::ret(),

    I::dup(1),                       // -- p p
    I::pushn(PARM_NORTH as u32),     // -- p p id
    I::eq(2),                        // -- p match?
    I::not(),                        // -- p other?
    I::jmpif(4),                     // -- p
    I::pop(1),                       // --
    I::pushs(STR_NAME_NORTH),        // -- name
    I::ret(),

    I::dup(1),                       // -- p p
    I::pushn(PARM_SOUTH as u32),     // -- p p id
    I::eq(2),                        // -- p match?
    I::not(),                        // -- p other?
    I::jmpif(4),                     // -- p
    I::pop(1),                       // --
    I::pushs(STR_NAME_SOUTH),        // -- name
    I::ret(),

    I::dup(1),                       // -- p p
    I::pushn(PARM_EAST as u32),      // -- p p id
    I::eq(2),                        // -- p match?
    I::not(),                        // -- p other?
    I::jmpif(4),                     // -- p
    I::pop(1),                       // --
    I::pushs(STR_NAME_EAST),         // -- name
    I::ret(),

    I::dup(1),                       // -- p p
    I::pushn(PARM_WEST as u32),      // -- p p id
    I::eq(2),                        // -- p match?
    I::not(),                        // -- p other?
    I::jmpif(4),                     // -- p
    I::pop(1),                       // --
    I::pushs(STR_NAME_WEST),         // -- name
    I::ret(),

    I::pop(1),                       // --
    I::pushs(STR_NAME_UNKNOWN),      // -- name
    I::ret(),
];

/// Validate a raw table image by running the hosted program over it.
///
/// Any runtime error in the run reads as an invalid table, the same
/// status the caller would see for a genuinely invalid image.
pub fn validate(image: &[u8], sink: &mut dyn EventSink) -> bool {
    // Both tables are compile-time constants well inside the u16 index
    // space; the constructors only reject lengths past 65535.
    let program = Program::new(&PROGRAM).expect("reference listing fits the program counter");
    let strings = StringTable::new(&STRINGS).expect("reference strings fit a string reference");

    matches!(run(program, image, strings, sink), Ok(Halt::True))
}
