//! Creature blueprints: the binary format behind TaleSpire's
//! `talespire://creature-blueprint/` URLs.
//!
//! This crate decodes a blueprint payload into a [`Blueprint`] record and
//! encodes it back. Decoding and re-encoding an unmodified blueprint
//! reproduces the original bytes exactly.
//!
//! # Quick Start
//!
//! ```rust
//! use creature_blueprint::{decode_url, encode_url};
//!
//! let url = "talespire://creature-blueprint/\
//!            AQAHQWJvbGV0aAFKbKpDJxNtSIiDNlZLt1zmAAgAAAAAAAAAAAAA\
//!            AAAAAAAAAAAAAAAAAAAAAAAAWEMAAFhDAACIQQAAiEEAACBBAAAgQgAAoEAA\
//!            AKBAAACAvwAAgL8AAABAAAAAQAAAgEAAAIBAAAAAQAAAAEAAAIBAAACAQAAAAA==";
//!
//! let mut creature = decode_url(url).unwrap();
//! assert_eq!(creature.name.as_deref(), Some("Aboleth"));
//! assert_eq!(creature.hit_points().value, 216.0);
//!
//! // Unmodified blueprints re-encode byte for byte.
//! assert_eq!(encode_url(&creature).unwrap(), url);
//!
//! creature.flying_enabled = true;
//! let edited = encode_url(&creature).unwrap();
//! assert_ne!(edited, url);
//! ```
//!
//! # Modules
//!
//! - [`model`]: the [`Blueprint`] record and its parts
//! - [`codec`]: byte cursor and the versioned field layout
//! - [`url`]: base64 URL transport
//! - [`error`]: error types
//! - [`limits`]: wire-format constants
//!
//! # Versions
//!
//! Version 1 and version 2 payloads are both supported. Version 2 adds a list
//! of content pack URIs and a content pack index per morph. Other versions are
//! rejected with [`DecodeError::UnsupportedVersion`].

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod url;

// Re-export commonly used types at crate root
pub use codec::{decode_blueprint, encode_blueprint};
pub use error::{DecodeError, EncodeError, ErrorKind, UrlError};
pub use model::{Blueprint, MorphReference, SchemaVersion, SlotOverride, Stat};
pub use url::{decode_url, encode_url, payload_from_url, url_from_payload};
