//! Wire-format constants for creature blueprints.
//!
//! Every count and width the decoder enforces lives here so the codec and the
//! model agree on them.

/// Maximum name length in UTF-8 bytes.
pub const MAX_NAME_LEN: usize = 150;

/// Name length byte meaning "the name was never set".
pub const UNSET_NAME_SENTINEL: u8 = 255;

/// Maximum number of emote slot overrides.
pub const MAX_SLOT_OVERRIDES: usize = 16;

/// Maximum entries in any list whose count is a single byte.
pub const MAX_U8_COUNT: usize = u8::MAX as usize;

/// Maximum content pack URI length (u16 length prefix).
pub const MAX_CONTENT_PACK_URI_LEN: usize = u16::MAX as usize;

/// Number of packed morph scale lanes.
pub const MORPH_SCALE_COUNT: usize = 10;

/// Width of one morph scale lane in bits.
pub const MORPH_SCALE_BITS: u32 = 6;

/// Mask selecting one morph scale lane.
pub const MORPH_SCALE_MASK: u64 = (1 << MORPH_SCALE_BITS) - 1;

/// Raw lane units per 1.0 of scale.
pub const MORPH_SCALE_UNITS: f32 = 4.0;

/// Number of opaque u16 values in the first reserved block.
pub const RESERVED0_COUNT: usize = 8;

/// Number of opaque u8 values in the second reserved block.
pub const RESERVED1_COUNT: usize = 3;

/// Number of stats: hit points followed by eight campaign stats.
pub const STAT_COUNT: usize = 9;

/// Width of a UUID on the wire.
pub const UUID_LEN: usize = 16;

/// Prefix of a creature blueprint URL.
pub const URL_PREFIX: &str = "talespire://creature-blueprint/";
