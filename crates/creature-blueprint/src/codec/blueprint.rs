//! Blueprint encoding/decoding.
//!
//! Field order on the wire (little-endian throughout):
//!
//! ```text
//! version               u16
//! name                  u8 length (255 = unset) + UTF-8 bytes
//! content_packs         V2 only: i32 count, then u16 length + UTF-8 per URI
//! morph_references      u8 count, then per morph: (V2 only: i32 pack index) + UUID
//! active_morph_index    u8
//! morph_scales          u64, ten 6-bit lanes
//! reserved0             8 x u16
//! reserved1             3 x u8
//! stats                 9 x (f32 value, f32 max)
//! flags                 u8: bit0 torch, bit1 hidden, bit2 flying
//! slot_overrides        u8 count (max 16), then UUID + u16 per entry
//! active_emote_ids      u8 count, then UUID per entry
//! ```
//!
//! The order is fixed; no field depends on one that comes after it.

use tracing::{debug, trace};

use crate::codec::primitives::{pack_morph_scales, unpack_morph_scales, Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{
    MAX_CONTENT_PACK_URI_LEN, MAX_NAME_LEN, MAX_SLOT_OVERRIDES, MAX_U8_COUNT, RESERVED0_COUNT,
    RESERVED1_COUNT, STAT_COUNT, UNSET_NAME_SENTINEL, UUID_LEN,
};
use crate::model::{Blueprint, MorphReference, SchemaVersion, SlotOverride, Stat};

const FLAG_TORCH: u8 = 0x01;
const FLAG_HIDDEN: u8 = 0x02;
const FLAG_FLYING: u8 = 0x04;
const FLAG_RESERVED_MASK: u8 = 0xF8;

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a blueprint from its raw binary payload.
///
/// The whole buffer must be consumed: bytes after the emote list fail with
/// [`DecodeError::TrailingBytes`]. This is stricter than the game client's own
/// reader, which ignores anything past the last field. Any failure aborts the
/// decode; no partially populated blueprint is ever returned.
pub fn decode_blueprint(input: &[u8]) -> Result<Blueprint, DecodeError> {
    let mut reader = Reader::new(input);

    let raw_version = reader.read_u16("version")?;
    let version = SchemaVersion::try_from(raw_version)?;
    debug!(version = raw_version, len = input.len(), "decoding blueprint");

    let name = decode_name(&mut reader)?;
    let content_packs = if version.has_content_packs() {
        decode_content_packs(&mut reader)?
    } else {
        Vec::new()
    };
    let morph_references = decode_morph_references(&mut reader, version)?;
    let active_morph_index = reader.read_u8("active_morph_index")?;
    let morph_scales = unpack_morph_scales(reader.read_u64("morph_scales")?);

    let mut reserved0 = [0u16; RESERVED0_COUNT];
    for slot in &mut reserved0 {
        *slot = reader.read_u16("reserved0")?;
    }
    let mut reserved1 = [0u8; RESERVED1_COUNT];
    for slot in &mut reserved1 {
        *slot = reader.read_u8("reserved1")?;
    }

    trace!(offset = reader.position(), "reading stats");
    let mut stats = [Stat::default(); STAT_COUNT];
    for stat in &mut stats {
        let (value, max) = reader.read_f32_pair("stats")?;
        *stat = Stat { value, max };
    }

    let flags = reader.read_u8("flags")?;
    let slot_overrides = decode_slot_overrides(&mut reader)?;
    let active_emote_ids = {
        let count = reader.read_u8("active_emote_count")? as usize;
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            ids.push(reader.read_uuid("active_emote_ids")?);
        }
        ids
    };

    if !reader.is_empty() {
        return Err(DecodeError::TrailingBytes {
            offset: reader.position(),
            remaining: reader.remaining_len(),
        });
    }

    Ok(Blueprint {
        version,
        name,
        content_packs,
        morph_references,
        active_morph_index,
        morph_scales,
        reserved0,
        reserved1,
        stats,
        torch_enabled: flags & FLAG_TORCH != 0,
        explicitly_hidden: flags & FLAG_HIDDEN != 0,
        flying_enabled: flags & FLAG_FLYING != 0,
        reserved_flags: flags & FLAG_RESERVED_MASK,
        slot_overrides,
        active_emote_ids,
    })
}

/// Decodes the name; the 255 length byte means the name was never set.
fn decode_name(reader: &mut Reader<'_>) -> Result<Option<String>, DecodeError> {
    let offset = reader.position();
    let len = reader.read_u8("name_length")?;
    if len == UNSET_NAME_SENTINEL {
        return Ok(None);
    }
    let len = len as usize;
    if len > MAX_NAME_LEN {
        return Err(DecodeError::FieldLimitExceeded {
            field: "name",
            offset,
            len: len as i64,
            max: MAX_NAME_LEN,
        });
    }
    reader.read_str(len, "name").map(Some)
}

fn decode_content_packs(reader: &mut Reader<'_>) -> Result<Vec<String>, DecodeError> {
    let offset = reader.position();
    let count = reader.read_i32("content_pack_count")?;
    let count = usize::try_from(count).map_err(|_| DecodeError::FieldLimitExceeded {
        field: "content_packs",
        offset,
        len: count as i64,
        max: i32::MAX as usize,
    })?;
    trace!(offset, count, "reading content packs");

    // Each entry needs at least its 2-byte length, so a bogus count fails on
    // read instead of reserving a huge buffer.
    let mut uris = Vec::with_capacity(count.min(reader.remaining_len() / 2));
    for _ in 0..count {
        let len = reader.read_u16("content_pack_uri_length")? as usize;
        uris.push(reader.read_str(len, "content_pack_uri")?);
    }
    Ok(uris)
}

fn decode_morph_references(
    reader: &mut Reader<'_>,
    version: SchemaVersion,
) -> Result<Vec<MorphReference>, DecodeError> {
    let count = reader.read_u8("morph_count")? as usize;
    let mut morphs = Vec::with_capacity(count);
    for _ in 0..count {
        let content_pack_index = if version.has_content_packs() {
            Some(reader.read_i32("morph_content_pack_index")?)
        } else {
            None
        };
        let id = reader.read_uuid("morph_id")?;
        morphs.push(MorphReference {
            content_pack_index,
            id,
        });
    }
    Ok(morphs)
}

fn decode_slot_overrides(reader: &mut Reader<'_>) -> Result<Vec<SlotOverride>, DecodeError> {
    let offset = reader.position();
    let count = reader.read_u8("slot_override_count")? as usize;
    if count > MAX_SLOT_OVERRIDES {
        return Err(DecodeError::FieldLimitExceeded {
            field: "slot_overrides",
            offset,
            len: count as i64,
            max: MAX_SLOT_OVERRIDES,
        });
    }
    let mut overrides = Vec::with_capacity(count);
    for _ in 0..count {
        let id = reader.read_uuid("slot_override_id")?;
        let index = reader.read_u16("slot_override_index")?;
        overrides.push(SlotOverride { id, index });
    }
    Ok(overrides)
}

// =============================================================================
// ENCODING
// =============================================================================

fn check_len(field: &'static str, len: usize, min: usize, max: usize) -> Result<(), EncodeError> {
    if len < min || len > max {
        return Err(EncodeError::FieldLimitExceeded {
            field,
            len,
            min,
            max,
        });
    }
    Ok(())
}

/// Rejects blueprints the wire format cannot represent.
fn validate_blueprint_inputs(blueprint: &Blueprint) -> Result<(), EncodeError> {
    let version = blueprint.version;

    if let Some(name) = &blueprint.name {
        check_len("name", name.len(), 0, MAX_NAME_LEN)?;
    }

    if version.has_content_packs() {
        check_len("content_packs", blueprint.content_packs.len(), 0, i32::MAX as usize)?;
        for uri in &blueprint.content_packs {
            check_len("content_pack_uri", uri.len(), 0, MAX_CONTENT_PACK_URI_LEN)?;
        }
    } else if !blueprint.content_packs.is_empty() {
        return Err(EncodeError::VersionMismatch {
            field: "content_packs",
            version: version.as_u16(),
            reason: "content packs require version 2",
        });
    }

    check_len("morph_references", blueprint.morph_references.len(), 1, MAX_U8_COUNT)?;
    for morph in &blueprint.morph_references {
        match (version.has_content_packs(), morph.content_pack_index) {
            (true, None) => {
                return Err(EncodeError::VersionMismatch {
                    field: "morph_content_pack_index",
                    version: version.as_u16(),
                    reason: "every morph needs a content pack index",
                });
            }
            (false, Some(_)) => {
                return Err(EncodeError::VersionMismatch {
                    field: "morph_content_pack_index",
                    version: version.as_u16(),
                    reason: "content pack indices require version 2",
                });
            }
            _ => {}
        }
    }

    check_len("slot_overrides", blueprint.slot_overrides.len(), 0, MAX_SLOT_OVERRIDES)?;
    check_len("active_emote_ids", blueprint.active_emote_ids.len(), 0, MAX_U8_COUNT)?;
    Ok(())
}

fn encoded_size_hint(blueprint: &Blueprint) -> usize {
    // version, name length, morph count, active index, scale word, reserved
    // blocks, stats, flags, two trailing counts
    let fixed = 2 + 1 + 1 + 1 + 8 + 16 + 3 + 8 * STAT_COUNT + 1 + 1 + 1;
    let name = blueprint.name.as_ref().map_or(0, String::len);
    let packs: usize = blueprint.content_packs.iter().map(|uri| 2 + uri.len()).sum();
    fixed
        + name
        + 4
        + packs
        + blueprint.morph_references.len() * (4 + UUID_LEN)
        + blueprint.slot_overrides.len() * (UUID_LEN + 2)
        + blueprint.active_emote_ids.len() * UUID_LEN
}

/// Encodes a blueprint to its raw binary payload.
///
/// The blueprint's own `version` decides whether content packs and per-morph
/// content pack indices are written. An unset name is written as the 255
/// sentinel; reserved fields and unused flag bits are written back verbatim.
pub fn encode_blueprint(blueprint: &Blueprint) -> Result<Vec<u8>, EncodeError> {
    validate_blueprint_inputs(blueprint)?;

    let version = blueprint.version;
    let mut writer = Writer::with_capacity(encoded_size_hint(blueprint));

    writer.write_u16(version.as_u16());

    match &blueprint.name {
        Some(name) => {
            writer.write_u8(name.len() as u8);
            writer.write_bytes(name.as_bytes());
        }
        None => writer.write_u8(UNSET_NAME_SENTINEL),
    }

    if version.has_content_packs() {
        writer.write_i32(blueprint.content_packs.len() as i32);
        for uri in &blueprint.content_packs {
            writer.write_u16(uri.len() as u16);
            writer.write_bytes(uri.as_bytes());
        }
    }

    writer.write_u8(blueprint.morph_references.len() as u8);
    for morph in &blueprint.morph_references {
        if let Some(index) = morph.content_pack_index {
            writer.write_i32(index);
        }
        writer.write_uuid(&morph.id);
    }

    writer.write_u8(blueprint.active_morph_index);
    writer.write_u64(pack_morph_scales(&blueprint.morph_scales));

    for value in &blueprint.reserved0 {
        writer.write_u16(*value);
    }
    for value in &blueprint.reserved1 {
        writer.write_u8(*value);
    }

    for stat in &blueprint.stats {
        writer.write_f32_pair(stat.value, stat.max);
    }

    let mut flags = blueprint.reserved_flags & FLAG_RESERVED_MASK;
    if blueprint.torch_enabled {
        flags |= FLAG_TORCH;
    }
    if blueprint.explicitly_hidden {
        flags |= FLAG_HIDDEN;
    }
    if blueprint.flying_enabled {
        flags |= FLAG_FLYING;
    }
    writer.write_u8(flags);

    writer.write_u8(blueprint.slot_overrides.len() as u8);
    for slot in &blueprint.slot_overrides {
        writer.write_uuid(&slot.id);
        writer.write_u16(slot.index);
    }

    writer.write_u8(blueprint.active_emote_ids.len() as u8);
    for id in &blueprint.active_emote_ids {
        writer.write_uuid(id);
    }

    let bytes = writer.into_bytes();
    debug!(version = version.as_u16(), len = bytes.len(), "encoded blueprint");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    /// Writes everything after the morph list with neutral values.
    fn write_tail(writer: &mut Writer, slot_count: u8) {
        writer.write_u8(0); // active morph
        writer.write_u64(pack_morph_scales(&[1.0; 10]));
        for _ in 0..RESERVED0_COUNT {
            writer.write_u16(0);
        }
        for _ in 0..RESERVED1_COUNT {
            writer.write_u8(0);
        }
        for i in 0..STAT_COUNT {
            writer.write_f32_pair(i as f32, 10.0);
        }
        writer.write_u8(0); // flags
        writer.write_u8(slot_count);
        for i in 0..slot_count {
            writer.write_uuid(&Uuid::from_bytes([i; 16]));
            writer.write_u16(i as u16);
        }
        writer.write_u8(0); // emotes
    }

    fn v1_with_name(name_len: u8, name: &[u8]) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.write_u16(1);
        writer.write_u8(name_len);
        writer.write_bytes(name);
        writer.write_u8(1);
        writer.write_uuid(&Uuid::from_bytes([9; 16]));
        write_tail(&mut writer, 0);
        writer.into_bytes()
    }

    fn v1_with_slots(slot_count: u8) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.write_u16(1);
        writer.write_u8(UNSET_NAME_SENTINEL);
        writer.write_u8(1);
        writer.write_uuid(&Uuid::from_bytes([9; 16]));
        write_tail(&mut writer, slot_count);
        writer.into_bytes()
    }

    #[test]
    fn test_decode_v1_layout() {
        let bytes = v1_with_name(4, b"Goob");
        let bp = decode_blueprint(&bytes).unwrap();

        assert_eq!(bp.version, SchemaVersion::V1);
        assert_eq!(bp.name.as_deref(), Some("Goob"));
        assert!(bp.content_packs.is_empty());
        assert_eq!(bp.morph_references, vec![MorphReference::new(Uuid::from_bytes([9; 16]))]);
        assert_eq!(bp.morph_scales, [1.0; 10]);
        assert_eq!(bp.stats[0], Stat::new(0.0, 10.0));
        assert_eq!(bp.stats[8], Stat::new(8.0, 10.0));
        assert!(bp.slot_overrides.is_empty());
        assert_eq!(encode_blueprint(&bp).unwrap(), bytes);
    }

    #[test]
    fn test_v1_never_reads_pack_fields() {
        // A V1 payload whose morph UUID starts with bytes that would parse as
        // a pack count: decoding must still take them as the UUID.
        let mut writer = Writer::new();
        writer.write_u16(1);
        writer.write_u8(0);
        writer.write_u8(1);
        let id = Uuid::from_bytes([1, 0, 0, 0, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]);
        writer.write_uuid(&id);
        write_tail(&mut writer, 0);
        let bytes = writer.into_bytes();

        let bp = decode_blueprint(&bytes).unwrap();
        assert_eq!(bp.morph_references[0].id, id);
        assert_eq!(bp.morph_references[0].content_pack_index, None);
        assert_eq!(encode_blueprint(&bp).unwrap(), bytes);
    }

    #[test]
    fn test_decode_v2_layout() {
        let mut writer = Writer::new();
        writer.write_u16(2);
        writer.write_u8(0);
        writer.write_i32(2);
        writer.write_u16(5);
        writer.write_bytes(b"br:aa");
        writer.write_u16(0);
        writer.write_u8(2);
        writer.write_i32(1);
        writer.write_uuid(&Uuid::from_bytes([3; 16]));
        writer.write_i32(-1);
        writer.write_uuid(&Uuid::from_bytes([4; 16]));
        write_tail(&mut writer, 0);
        let bytes = writer.into_bytes();

        let bp = decode_blueprint(&bytes).unwrap();
        assert_eq!(bp.version, SchemaVersion::V2);
        assert_eq!(bp.name.as_deref(), Some(""));
        assert_eq!(bp.content_packs, vec!["br:aa".to_string(), String::new()]);
        assert_eq!(
            bp.morph_references,
            vec![
                MorphReference::in_pack(1, Uuid::from_bytes([3; 16])),
                MorphReference::in_pack(-1, Uuid::from_bytes([4; 16])),
            ]
        );
        assert_eq!(bp.content_pack_of(&bp.morph_references[0]), Some(""));
        assert_eq!(encode_blueprint(&bp).unwrap(), bytes);
    }

    #[test]
    fn test_unset_name_sentinel() {
        let bytes = v1_with_name(UNSET_NAME_SENTINEL, b"");
        let bp = decode_blueprint(&bytes).unwrap();
        assert_eq!(bp.name, None);

        let encoded = encode_blueprint(&bp).unwrap();
        assert_eq!(encoded[2], UNSET_NAME_SENTINEL);
        assert_eq!(encoded, bytes);
    }

    #[test]
    fn test_name_length_boundary() {
        let name = vec![b'x'; 150];
        let bp = decode_blueprint(&v1_with_name(150, &name)).unwrap();
        assert_eq!(bp.name.map(|n| n.len()), Some(150));

        let name = vec![b'x'; 151];
        let err = decode_blueprint(&v1_with_name(151, &name)).unwrap_err();
        assert_eq!(
            err,
            DecodeError::FieldLimitExceeded {
                field: "name",
                offset: 2,
                len: 151,
                max: 150,
            }
        );
    }

    #[test]
    fn test_name_invalid_utf8() {
        let err = decode_blueprint(&v1_with_name(2, &[0xC3, 0x28])).unwrap_err();
        assert_eq!(err, DecodeError::MalformedText { field: "name", offset: 3 });
    }

    #[test]
    fn test_slot_override_boundary() {
        let bp = decode_blueprint(&v1_with_slots(16)).unwrap();
        assert_eq!(bp.slot_overrides.len(), 16);
        assert_eq!(bp.slot_overrides[15].index, 15);

        let err = decode_blueprint(&v1_with_slots(17)).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::FieldLimitExceeded { field: "slot_overrides", len: 17, .. }
        ));
    }

    #[test]
    fn test_unsupported_versions() {
        for version in [0u16, 3, 0xFFFF] {
            let mut bytes = v1_with_name(0, b"");
            bytes[..2].copy_from_slice(&version.to_le_bytes());
            assert_eq!(
                decode_blueprint(&bytes),
                Err(DecodeError::UnsupportedVersion { version })
            );
        }
    }

    #[test]
    fn test_negative_content_pack_count() {
        let mut writer = Writer::new();
        writer.write_u16(2);
        writer.write_u8(UNSET_NAME_SENTINEL);
        writer.write_i32(-1);
        let err = decode_blueprint(writer.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::FieldLimitExceeded { field: "content_packs", offset: 3, len: -1, .. }
        ));
    }

    #[test]
    fn test_huge_content_pack_count_fails_out_of_bounds() {
        let mut writer = Writer::new();
        writer.write_u16(2);
        writer.write_u8(UNSET_NAME_SENTINEL);
        writer.write_i32(i32::MAX);
        writer.write_u16(1);
        writer.write_bytes(b"a");
        let err = decode_blueprint(writer.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::OutOfBounds { field: "content_pack_uri_length", .. }
        ));
    }

    #[test]
    fn test_every_truncation_is_out_of_bounds() {
        let bytes = v1_with_slots(2);
        for len in 0..bytes.len() {
            let err = decode_blueprint(&bytes[..len]).unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::OutOfBounds, "prefix {}", len);
        }
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = v1_with_slots(0);
        let len = bytes.len();
        bytes.push(0);
        assert_eq!(
            decode_blueprint(&bytes),
            Err(DecodeError::TrailingBytes { offset: len, remaining: 1 })
        );
    }

    #[test]
    fn test_flag_bits() {
        let mut bytes = v1_with_slots(0);
        // flags sit just before the slot and emote counts
        let flags_at = bytes.len() - 3;
        bytes[flags_at] = 0b1010_1101;

        let bp = decode_blueprint(&bytes).unwrap();
        assert!(bp.torch_enabled);
        assert!(!bp.explicitly_hidden);
        assert!(bp.flying_enabled);
        assert_eq!(bp.reserved_flags, 0b1010_1000);
        assert_eq!(encode_blueprint(&bp).unwrap(), bytes);

        let mut cleared = bp.clone();
        cleared.torch_enabled = false;
        cleared.explicitly_hidden = true;
        let encoded = encode_blueprint(&cleared).unwrap();
        assert_eq!(encoded[flags_at], 0b1010_1110);
    }

    #[test]
    fn test_encode_masks_low_bits_of_reserved_flags() {
        let mut bp = Blueprint::default();
        bp.reserved_flags = 0xFF;
        let bytes = encode_blueprint(&bp).unwrap();
        let flags = bytes[bytes.len() - 3];
        assert_eq!(flags, 0xF8);
    }

    #[test]
    fn test_default_encodes() {
        let bp = Blueprint::default();
        let bytes = encode_blueprint(&bp).unwrap();
        assert_eq!(&bytes[..3], &[1, 0, UNSET_NAME_SENTINEL]);
        assert_eq!(decode_blueprint(&bytes).unwrap(), bp);
    }

    #[test]
    fn test_encode_rejects_long_name() {
        let mut bp = Blueprint::default();
        bp.name = Some("n".repeat(151));
        assert_eq!(
            encode_blueprint(&bp),
            Err(EncodeError::FieldLimitExceeded {
                field: "name",
                len: 151,
                min: 0,
                max: 150,
            })
        );
        bp.name = Some("n".repeat(150));
        assert!(encode_blueprint(&bp).is_ok());
    }

    #[test]
    fn test_encode_rejects_empty_morphs() {
        let mut bp = Blueprint::default();
        bp.morph_references.clear();
        assert_eq!(
            encode_blueprint(&bp),
            Err(EncodeError::FieldLimitExceeded {
                field: "morph_references",
                len: 0,
                min: 1,
                max: 255,
            })
        );
    }

    #[test]
    fn test_encode_rejects_too_many_slot_overrides() {
        let mut bp = Blueprint::default();
        bp.slot_overrides = vec![SlotOverride { id: Uuid::nil(), index: 0 }; 17];
        assert_eq!(
            encode_blueprint(&bp),
            Err(EncodeError::FieldLimitExceeded {
                field: "slot_overrides",
                len: 17,
                min: 0,
                max: 16,
            })
        );
    }

    #[test]
    fn test_encode_rejects_version_mismatch() {
        let mut bp = Blueprint::default();
        bp.content_packs.push("br:pack".to_string());
        assert!(matches!(
            encode_blueprint(&bp),
            Err(EncodeError::VersionMismatch { field: "content_packs", version: 1, .. })
        ));

        let mut bp = Blueprint::default();
        bp.morph_references[0].content_pack_index = Some(0);
        assert!(matches!(
            encode_blueprint(&bp),
            Err(EncodeError::VersionMismatch { field: "morph_content_pack_index", .. })
        ));

        let mut bp = Blueprint::default();
        bp.version = SchemaVersion::V2;
        assert!(matches!(
            encode_blueprint(&bp),
            Err(EncodeError::VersionMismatch { field: "morph_content_pack_index", version: 2, .. })
        ));
    }

    fn arb_uuid() -> impl Strategy<Value = Uuid> {
        any::<[u8; 16]>().prop_map(Uuid::from_bytes)
    }

    fn arb_stat() -> impl Strategy<Value = (f32, f32)> {
        (-1.0e6f32..1.0e6f32, -1.0e6f32..1.0e6f32)
    }

    prop_compose! {
        fn arb_blueprint()(
            v2 in any::<bool>(),
            name in proptest::option::of("[a-zA-Z0-9 <>=]{0,150}"),
            packs in proptest::collection::vec("[a-z0-9:]{0,48}", 0..4),
            morphs in proptest::collection::vec((arb_uuid(), any::<i32>()), 1..6),
            active_and_flags in any::<(u8, u8)>(),
            scale_raw in proptest::array::uniform10(0u8..64),
            reserved in any::<([u16; 8], [u8; 3])>(),
            stats in proptest::array::uniform9(arb_stat()),
            slots in proptest::collection::vec((arb_uuid(), any::<u16>()), 0..=16),
            emotes in proptest::collection::vec(arb_uuid(), 0..4),
        ) -> Blueprint {
            let (active_morph_index, flags) = active_and_flags;
            Blueprint {
                version: if v2 { SchemaVersion::V2 } else { SchemaVersion::V1 },
                name,
                content_packs: if v2 { packs } else { Vec::new() },
                morph_references: morphs
                    .into_iter()
                    .map(|(id, index)| MorphReference { content_pack_index: v2.then_some(index), id })
                    .collect(),
                active_morph_index,
                morph_scales: scale_raw.map(|raw| raw as f32 / 4.0),
                reserved0: reserved.0,
                reserved1: reserved.1,
                stats: stats.map(|(value, max)| Stat { value, max }),
                torch_enabled: flags & FLAG_TORCH != 0,
                explicitly_hidden: flags & FLAG_HIDDEN != 0,
                flying_enabled: flags & FLAG_FLYING != 0,
                reserved_flags: flags & FLAG_RESERVED_MASK,
                slot_overrides: slots
                    .into_iter()
                    .map(|(id, index)| SlotOverride { id, index })
                    .collect(),
                active_emote_ids: emotes,
            }
        }
    }

    proptest! {
        #[test]
        fn test_blueprint_roundtrip(bp in arb_blueprint()) {
            let bytes = encode_blueprint(&bp).unwrap();
            let decoded = decode_blueprint(&bytes).unwrap();
            prop_assert_eq!(&decoded, &bp);
            prop_assert_eq!(encode_blueprint(&decoded).unwrap(), bytes);
        }

        #[test]
        fn test_decode_arbitrary_bytes_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode_blueprint(&bytes);
        }
    }
}
