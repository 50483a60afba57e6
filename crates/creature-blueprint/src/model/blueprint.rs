//! The blueprint record and its component types.

use uuid::Uuid;

use crate::error::DecodeError;
use crate::limits::{MORPH_SCALE_COUNT, RESERVED0_COUNT, RESERVED1_COUNT, STAT_COUNT};

/// Schema version of a blueprint payload.
///
/// The version decides whether content packs and per-morph content pack
/// indices are present on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub enum SchemaVersion {
    /// Original layout, no content packs.
    #[default]
    V1,
    /// Adds content pack URIs and a content pack index per morph.
    V2,
}

impl SchemaVersion {
    /// Maps a wire version tag to a known schema version.
    pub fn from_u16(version: u16) -> Option<Self> {
        match version {
            1 => Some(SchemaVersion::V1),
            2 => Some(SchemaVersion::V2),
            _ => None,
        }
    }

    /// Returns the wire version tag.
    pub fn as_u16(self) -> u16 {
        match self {
            SchemaVersion::V1 => 1,
            SchemaVersion::V2 => 2,
        }
    }

    /// True when the layout carries content packs and per-morph pack indices.
    pub fn has_content_packs(self) -> bool {
        self >= SchemaVersion::V2
    }
}

impl TryFrom<u16> for SchemaVersion {
    type Error = DecodeError;

    fn try_from(version: u16) -> Result<Self, Self::Error> {
        SchemaVersion::from_u16(version).ok_or(DecodeError::UnsupportedVersion { version })
    }
}

impl From<SchemaVersion> for u16 {
    fn from(version: SchemaVersion) -> Self {
        version.as_u16()
    }
}

/// A morph the creature can take, optionally sourced from a content pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MorphReference {
    /// Index into [`Blueprint::content_packs`]. Always `Some` at V2, `None` at V1.
    pub content_pack_index: Option<i32>,
    /// Asset UUID of the morph model.
    pub id: Uuid,
}

impl MorphReference {
    /// Creates a V1-style reference with no content pack index.
    pub fn new(id: Uuid) -> Self {
        Self {
            content_pack_index: None,
            id,
        }
    }

    /// Creates a reference into a content pack.
    pub fn in_pack(content_pack_index: i32, id: Uuid) -> Self {
        Self {
            content_pack_index: Some(content_pack_index),
            id,
        }
    }
}

/// A current/maximum stat pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stat {
    pub value: f32,
    pub max: f32,
}

impl Stat {
    pub fn new(value: f32, max: f32) -> Self {
        Self { value, max }
    }
}

/// An emote slot override. Not observed populated in captured blueprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotOverride {
    pub id: Uuid,
    pub index: u16,
}

/// Decoded state of one creature token.
///
/// A blueprint is a plain value: decode produces a fresh one, callers mutate
/// fields in place and encode it again. Decoding and re-encoding an unmodified
/// blueprint reproduces the original bytes exactly, including the reserved
/// blocks and the unused flag bits.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blueprint {
    /// Schema version used on encode.
    pub version: SchemaVersion,
    /// Creature name; `None` when the name was never set.
    pub name: Option<String>,
    /// Content pack URIs referenced by morphs (V2 only).
    pub content_packs: Vec<String>,
    /// Morphs in wire order. Must not be empty.
    pub morph_references: Vec<MorphReference>,
    /// Index into `morph_references` of the morph currently shown.
    pub active_morph_index: u8,
    /// Scale per morph slot, in quarter units from 0.0 to 15.75.
    pub morph_scales: [f32; MORPH_SCALE_COUNT],
    /// Opaque, carried verbatim.
    pub reserved0: [u16; RESERVED0_COUNT],
    /// Opaque, carried verbatim.
    pub reserved1: [u8; RESERVED1_COUNT],
    /// Hit points followed by the eight campaign stats.
    pub stats: [Stat; STAT_COUNT],
    pub torch_enabled: bool,
    pub explicitly_hidden: bool,
    pub flying_enabled: bool,
    /// Bits 3-7 of the flag byte, kept in place.
    pub reserved_flags: u8,
    pub slot_overrides: Vec<SlotOverride>,
    /// Persistent emotes such as knocked down.
    pub active_emote_ids: Vec<Uuid>,
}

impl Default for Blueprint {
    fn default() -> Self {
        Self {
            version: SchemaVersion::V1,
            name: None,
            content_packs: Vec::new(),
            morph_references: vec![MorphReference::new(Uuid::nil())],
            active_morph_index: 0,
            morph_scales: [1.0; MORPH_SCALE_COUNT],
            reserved0: [0; RESERVED0_COUNT],
            reserved1: [0; RESERVED1_COUNT],
            stats: [Stat::default(); STAT_COUNT],
            torch_enabled: false,
            explicitly_hidden: false,
            flying_enabled: false,
            reserved_flags: 0,
            slot_overrides: Vec::new(),
            active_emote_ids: Vec::new(),
        }
    }
}

impl Blueprint {
    /// Creates a blueprint for a single morph at the given version.
    ///
    /// At V2 the morph gets content pack index 0 and no pack is registered;
    /// callers add the URI to `content_packs` themselves.
    pub fn new(version: SchemaVersion, morph: Uuid) -> Self {
        let reference = if version.has_content_packs() {
            MorphReference::in_pack(0, morph)
        } else {
            MorphReference::new(morph)
        };
        Self {
            version,
            morph_references: vec![reference],
            ..Self::default()
        }
    }

    /// Returns the name, or an empty string when unset.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn hit_points(&self) -> &Stat {
        &self.stats[0]
    }

    pub fn hit_points_mut(&mut self) -> &mut Stat {
        &mut self.stats[0]
    }

    /// The eight stats after hit points, in campaign order.
    pub fn campaign_stats(&self) -> &[Stat] {
        &self.stats[1..]
    }

    /// Returns the active morph, if the index points at one.
    pub fn active_morph(&self) -> Option<&MorphReference> {
        self.morph_references.get(self.active_morph_index as usize)
    }

    /// Resolves the content pack URI a morph comes from.
    pub fn content_pack_of(&self, morph: &MorphReference) -> Option<&str> {
        let index = usize::try_from(morph.content_pack_index?).ok()?;
        self.content_packs.get(index).map(String::as_str)
    }
}
