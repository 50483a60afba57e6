//! Error types for blueprint decoding, encoding and URL transport.

use thiserror::Error;

/// Broad category of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The buffer ended before a field was complete.
    OutOfBounds,
    /// A count or length exceeded what the format allows.
    FieldLimitExceeded,
    /// A text span was not valid UTF-8.
    MalformedText,
    /// The version tag is not one this crate understands.
    UnsupportedVersion,
    /// Bytes remained after the last field.
    TrailingBytes,
}

impl ErrorKind {
    /// Returns a short stable name for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::OutOfBounds => "out-of-bounds",
            ErrorKind::FieldLimitExceeded => "field-limit-exceeded",
            ErrorKind::MalformedText => "malformed-text",
            ErrorKind::UnsupportedVersion => "unsupported-version",
            ErrorKind::TrailingBytes => "trailing-bytes",
        }
    }
}

/// Error during binary decoding.
///
/// Every variant names the field being read and the byte offset at which that
/// field started. A decode that fails never yields a partial blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input reading {field} at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    OutOfBounds {
        field: &'static str,
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("{field} length {len} at offset {offset} exceeds maximum {max}")]
    FieldLimitExceeded {
        field: &'static str,
        offset: usize,
        len: i64,
        max: usize,
    },

    #[error("invalid UTF-8 in {field} at offset {offset}")]
    MalformedText { field: &'static str, offset: usize },

    #[error("unsupported blueprint version {version}")]
    UnsupportedVersion { version: u16 },

    #[error("{remaining} trailing bytes after blueprint at offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },
}

impl DecodeError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            DecodeError::FieldLimitExceeded { .. } => ErrorKind::FieldLimitExceeded,
            DecodeError::MalformedText { .. } => ErrorKind::MalformedText,
            DecodeError::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
            DecodeError::TrailingBytes { .. } => ErrorKind::TrailingBytes,
        }
    }

    /// Returns the field the error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DecodeError::OutOfBounds { field, .. }
            | DecodeError::FieldLimitExceeded { field, .. }
            | DecodeError::MalformedText { field, .. } => Some(field),
            DecodeError::UnsupportedVersion { .. } => Some("version"),
            DecodeError::TrailingBytes { .. } => None,
        }
    }

    /// Returns the byte offset the error refers to.
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::OutOfBounds { offset, .. }
            | DecodeError::FieldLimitExceeded { offset, .. }
            | DecodeError::MalformedText { offset, .. }
            | DecodeError::TrailingBytes { offset, .. } => *offset,
            DecodeError::UnsupportedVersion { .. } => 0,
        }
    }
}

/// Error during binary encoding.
///
/// Encoding only fails when the blueprint breaks an invariant the wire format
/// cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{field} length {len} outside allowed range {min}..={max}")]
    FieldLimitExceeded {
        field: &'static str,
        len: usize,
        min: usize,
        max: usize,
    },

    #[error("{field} cannot be encoded at version {version}: {reason}")]
    VersionMismatch {
        field: &'static str,
        version: u16,
        reason: &'static str,
    },
}

/// Error while converting between a blueprint URL and a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("blueprint URL has no payload segment")]
    MissingPayload,

    #[error("invalid base64 payload: {0}")]
    Base64(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode_blueprint;

    #[test]
    fn test_decode_errors_locate_field() {
        // Version 1, then nothing where the name length belongs.
        let err = decode_blueprint(&[1, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!(err.field(), Some("name_length"));
        assert_eq!(err.offset(), 2);

        let err = decode_blueprint(&[1, 0, 151]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldLimitExceeded);
        assert_eq!(err.field(), Some("name"));
        assert_eq!(err.offset(), 2);

        let err = decode_blueprint(&[1, 0, 2, 0xC3, 0x28]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedText);
        assert_eq!(err.field(), Some("name"));
        assert_eq!(err.offset(), 3);

        let err = decode_blueprint(&[9, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedVersion);
        assert_eq!(err.field(), Some("version"));
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn test_trailing_bytes_has_no_field() {
        let err = DecodeError::TrailingBytes { offset: 130, remaining: 1 };
        assert_eq!(err.kind(), ErrorKind::TrailingBytes);
        assert_eq!(err.field(), None);
        assert_eq!(err.offset(), 130);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ErrorKind::OutOfBounds.as_str(), "out-of-bounds");
        assert_eq!(ErrorKind::FieldLimitExceeded.as_str(), "field-limit-exceeded");
        assert_eq!(ErrorKind::MalformedText.as_str(), "malformed-text");
        assert_eq!(ErrorKind::UnsupportedVersion.as_str(), "unsupported-version");
        assert_eq!(ErrorKind::TrailingBytes.as_str(), "trailing-bytes");
    }

    #[test]
    fn test_encode_limit_message() {
        let err = EncodeError::FieldLimitExceeded {
            field: "morph_references",
            len: 0,
            min: 1,
            max: 255,
        };
        assert_eq!(
            err.to_string(),
            "morph_references length 0 outside allowed range 1..=255"
        );
    }
}
