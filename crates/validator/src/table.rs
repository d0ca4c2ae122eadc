//! Parameter-table layout and constants.
//!
//! A table image is four 12-byte entries, 48 bytes total. Each entry
//! names one parameter by a single-bit id and gives it an inclusive
//! `[bound_low, bound_high]` range; the three pad bytes exist only for
//! field alignment and must be zero. All multibyte fields are
//! little-endian.

/// Entry is not in use.
pub const PARM_UNUSED: u8 = 0x00;
/// Animal parameters.
pub const PARM_APE: u8 = 0x01;
pub const PARM_BAT: u8 = 0x02;
pub const PARM_CAT: u8 = 0x04;
pub const PARM_DOG: u8 = 0x08;
/// Direction parameters.
pub const PARM_NORTH: u8 = 0x10;
pub const PARM_SOUTH: u8 = 0x20;
pub const PARM_EAST: u8 = 0x40;
pub const PARM_WEST: u8 = 0x80;

/// Inclusive bound range for animal parameters.
pub const ANIMAL_MIN: u32 = 0x0000_0010;
pub const ANIMAL_MAX: u32 = 0x0000_1000;
/// Inclusive bound range for direction parameters.
pub const DIRECTION_MIN: u32 = 0x0001_0000;
pub const DIRECTION_MAX: u32 = 0x0100_0000;

/// Entries per table.
pub const TABLE_ENTRIES: usize = 4;
/// Bytes per entry: parm id, three pad bytes, two u32 bounds.
pub const ENTRY_SIZE: usize = 12;
/// Bytes per table image.
pub const TABLE_SIZE: usize = TABLE_ENTRIES * ENTRY_SIZE;

/// Which validity rule set applies to a parm id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParmClass {
    /// `PARM_UNUSED`: every other field must be zero.
    Unused,
    /// One of the four animal flags.
    Animal,
    /// One of the four direction flags.
    Direction,
    /// Anything else, including multi-flag combinations.
    Invalid,
}

impl ParmClass {
    /// Classify a raw parm id byte.
    pub fn of(parm_id: u8) -> Self {
        match parm_id {
            PARM_UNUSED => ParmClass::Unused,
            PARM_APE | PARM_BAT | PARM_CAT | PARM_DOG => ParmClass::Animal,
            PARM_NORTH | PARM_SOUTH | PARM_EAST | PARM_WEST => ParmClass::Direction,
            _ => ParmClass::Invalid,
        }
    }

    /// The inclusive bound range for in-use classes.
    pub fn range(self) -> Option<(u32, u32)> {
        match self {
            ParmClass::Animal => Some((ANIMAL_MIN, ANIMAL_MAX)),
            ParmClass::Direction => Some((DIRECTION_MIN, DIRECTION_MAX)),
            ParmClass::Unused | ParmClass::Invalid => None,
        }
    }
}

/// Descriptive name for a parm id, as used in event messages.
pub fn parm_name(parm_id: u8) -> &'static str {
    match parm_id {
        PARM_UNUSED => "Unused",
        PARM_APE => "Ape",
        PARM_BAT => "Bat",
        PARM_CAT => "Cat",
        PARM_DOG => "Dog",
        PARM_NORTH => "North",
        PARM_SOUTH => "South",
        PARM_EAST => "East",
        PARM_WEST => "West",
        _ => "Unknown",
    }
}

/// One decoded table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    pub parm_id: u8,
    pub pad: [u8; 3],
    pub bound_low: u32,
    pub bound_high: u32,
}

impl TableEntry {
    /// An all-zero (valid unused) entry.
    pub const fn unused() -> Self {
        Self {
            parm_id: PARM_UNUSED,
            pad: [0; 3],
            bound_low: 0,
            bound_high: 0,
        }
    }

    /// An in-use entry with zeroed padding.
    pub const fn in_use(parm_id: u8, bound_low: u32, bound_high: u32) -> Self {
        Self {
            parm_id,
            pad: [0; 3],
            bound_low,
            bound_high,
        }
    }

    /// Decode one entry from its 12 bytes.
    pub fn from_bytes(bytes: &[u8; ENTRY_SIZE]) -> Self {
        Self {
            parm_id: bytes[0],
            pad: [bytes[1], bytes[2], bytes[3]],
            bound_low: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            bound_high: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        }
    }

    /// Encode this entry into its 12 bytes.
    pub fn to_bytes(&self) -> [u8; ENTRY_SIZE] {
        let mut bytes = [0u8; ENTRY_SIZE];
        bytes[0] = self.parm_id;
        bytes[1..4].copy_from_slice(&self.pad);
        bytes[4..8].copy_from_slice(&self.bound_low.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.bound_high.to_le_bytes());
        bytes
    }
}

/// A decoded four-entry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub entries: [TableEntry; TABLE_ENTRIES],
}

impl Table {
    /// Decode a 48-byte image. Any other length is no table at all.
    pub fn from_image(image: &[u8]) -> Option<Self> {
        if image.len() != TABLE_SIZE {
            return None;
        }

        let mut entries = [TableEntry::unused(); TABLE_ENTRIES];
        for (i, chunk) in image.chunks_exact(ENTRY_SIZE).enumerate() {
            let bytes: &[u8; ENTRY_SIZE] = chunk.try_into().ok()?;
            entries[i] = TableEntry::from_bytes(bytes);
        }
        Some(Self { entries })
    }

    /// Encode the table into a 48-byte image.
    pub fn to_image(&self) -> [u8; TABLE_SIZE] {
        let mut image = [0u8; TABLE_SIZE];
        for (i, entry) in self.entries.iter().enumerate() {
            image[i * ENTRY_SIZE..(i + 1) * ENTRY_SIZE].copy_from_slice(&entry.to_bytes());
        }
        image
    }
}
