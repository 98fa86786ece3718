//! Byte-level helpers for salting values before they are hashed or encrypted.
//!
//! - [`generate_random_number`]: integer in an inclusive range, seeded from the OS entropy source
//! - [`generate_salt`]: non-zero random salt that embeds its own length in its first four bytes
//! - [`add_salt_to_bytes`] / [`add_salt_bytes_to_bytes`]: `[salt][plaintext]` concatenation
//! - [`decode_salt_length`] / [`split_salted_bytes`]: recover the salt boundary from salted bytes
//!
//! Hashing and encryption of the salted bytes are left to the caller.

pub mod crypto;
pub mod salt;

pub use crypto::random::{generate_random_number, generate_random_number_with, SecureRandom};
pub use crypto::{CryptoError, Result};
pub use salt::generator::{
    decode_salt_length, encode_salt_length, generate_salt, generate_salt_with,
};
pub use salt::prepend::{
    add_salt_bytes_to_bytes, add_salt_to_bytes, add_salt_to_bytes_with, split_salted_bytes,
};
pub use salt::{Salt, DEFAULT_SALT_LENGTH, MAX_SALT_LENGTH, MIN_SALT_LENGTH};
