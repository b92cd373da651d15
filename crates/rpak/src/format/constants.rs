/// Magic number at the start of the lead.
pub const LEAD_MAGIC: u32 = 0xEDAB_EEDB;

/// Length of the lead in bytes.
pub const LEAD_LENGTH: usize = 96;

/// Magic number and version at the start of each header.
pub const HEADER_MAGIC: u32 = 0x8EAD_E801;

/// Length of the fixed part of a header: magic, reserved, index count, data size.
pub const HEADER_PREAMBLE_LENGTH: usize = 16;

/// Length of one index entry.
pub const INDEX_ENTRY_LENGTH: usize = 16;

/// The signature header is followed by zeroes up to this alignment.
pub const SIGNATURE_ALIGNMENT: u64 = 8;

/// Most index entries a header may declare.
pub const MAX_INDEX_COUNT: u32 = 0xFFFF;

/// Largest data blob a header may declare.
pub const MAX_DATA_SIZE: u32 = 256 * 1024 * 1024;

/// Lead package type for binary packages.
pub const PACKAGE_TYPE_BINARY: i16 = 0;

/// Lead package type for source packages.
pub const PACKAGE_TYPE_SOURCE: i16 = 1;
