//! Binary encoding/decoding for creature blueprints.
//!
//! [`primitives`] holds the byte cursor ([`Reader`], [`Writer`]) and the
//! morph-scale bit packing; [`blueprint`] walks the versioned field layout.

pub mod blueprint;
pub mod primitives;

pub use blueprint::{decode_blueprint, encode_blueprint};
pub use primitives::{pack_morph_scales, unpack_morph_scales, Reader, Writer};
