//! Event ids the validator reports.
//!
//! One id per distinct validity problem plus one for the closing
//! statistics event. Error events describe what was wrong for the
//! operator; only the validator's return value controls whether the
//! table service activates the image.

/// Table validation statistics (information).
pub const VALIDATION_INF_EID: u32 = 0x0008;

/// Unused entry not zeroed.
pub const TBL_ZERO_ERR_EID: u32 = 0x2001;
/// Entry has an invalid parm id value.
pub const TBL_PARM_ERR_EID: u32 = 0x2002;
/// Entry has a nonzero padding byte.
pub const TBL_PAD_ERR_EID: u32 = 0x2004;
/// Low bound out of range.
pub const TBL_LBND_ERR_EID: u32 = 0x2008;
/// High bound out of range.
pub const TBL_HBND_ERR_EID: u32 = 0x2010;
/// High bound is smaller than low.
pub const TBL_ORDER_ERR_EID: u32 = 0x2020;
/// In-use entry follows a valid unused entry.
pub const TBL_EXTRA_ERR_EID: u32 = 0x2040;
/// Parm id already used by an earlier entry.
pub const TBL_REDEF_ERR_EID: u32 = 0x2080;
