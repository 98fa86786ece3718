// Self-describing salts
//
// A salt carries its own length in the low bit pairs of its first four bytes,
// so a consumer holding only `[salt][plaintext]` can find where the salt ends.

pub mod generator;
pub mod prepend;

use std::fmt;

use crate::crypto::Result;

/// Shortest salt that has room for the embedded length
pub const MIN_SALT_LENGTH: usize = 4;

/// Longest salt whose length fits in the four 2-bit pieces
pub const MAX_SALT_LENGTH: usize = 255;

pub const DEFAULT_SALT_LENGTH: usize = 16;

/// Owned salt bytes, immutable once generated
#[derive(Clone, PartialEq, Eq)]
pub struct Salt {
    bytes: Vec<u8>,
}

impl Salt {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Salt { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Length recovered from the bits embedded in the first four bytes
    pub fn encoded_length(&self) -> Result<usize> {
        generator::decode_salt_length(&self.bytes)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Salt")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl AsRef<[u8]> for Salt {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Salt> for Vec<u8> {
    fn from(salt: Salt) -> Self {
        salt.bytes
    }
}
