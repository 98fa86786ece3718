// Prepending salts to plaintext buffers

use log::trace;

use crate::crypto::random::SecureRandom;
use crate::crypto::{CryptoError, Result};
use crate::salt::generator::{decode_salt_length, generate_salt, generate_salt_with};
use crate::salt::MIN_SALT_LENGTH;

/// Generate a fresh `salt_length`-byte salt and return `[salt][plaintext]`.
pub fn add_salt_to_bytes(plaintext: &[u8], salt_length: usize) -> Result<Vec<u8>> {
    let salt = generate_salt(salt_length)?;
    Ok(add_salt_bytes_to_bytes(plaintext, &salt))
}

/// Same as [`add_salt_to_bytes`], drawing the salt from `source`.
///
/// Nothing is returned unless the whole salt was generated.
pub fn add_salt_to_bytes_with<S>(
    source: &mut S,
    plaintext: &[u8],
    salt_length: usize,
) -> Result<Vec<u8>>
where
    S: SecureRandom + ?Sized,
{
    let salt = generate_salt_with(source, salt_length)?;
    Ok(add_salt_bytes_to_bytes(plaintext, &salt))
}

/// Return `[salt][plaintext]` for a caller-supplied salt.
///
/// The salt is used as-is; an empty salt or empty plaintext is accepted.
pub fn add_salt_bytes_to_bytes(plaintext: &[u8], salt: impl AsRef<[u8]>) -> Vec<u8> {
    let salt = salt.as_ref();
    let mut salted = Vec::with_capacity(salt.len() + plaintext.len());
    salted.extend_from_slice(salt);
    salted.extend_from_slice(plaintext);

    trace!("prepended {}-byte salt to {}-byte plaintext", salt.len(), plaintext.len());
    salted
}

/// Split a buffer built from a generated salt back into `(salt, plaintext)`.
///
/// The boundary comes from the length embedded in the salt's first four bytes.
/// Buffers built from arbitrary caller-supplied salts cannot be split this way.
pub fn split_salted_bytes(salted: &[u8]) -> Result<(&[u8], &[u8])> {
    let salt_length = decode_salt_length(salted)?;
    if salt_length < MIN_SALT_LENGTH {
        return Err(CryptoError::InvalidSaltLength(salt_length));
    }
    if salted.len() < salt_length {
        return Err(CryptoError::TruncatedSaltedBuffer {
            expected: salt_length,
            actual: salted.len(),
        });
    }
    Ok(salted.split_at(salt_length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::random::DeterministicRng;

    /// Hands out `budget` bytes, then fails
    struct RationedSource {
        budget: usize,
    }

    impl SecureRandom for RationedSource {
        fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
            if dest.len() > self.budget {
                return Err(CryptoError::from(rand::Error::new("entropy pool starved")));
            }
            self.budget -= dest.len();
            dest.fill(0x5a);
            Ok(())
        }
    }

    #[test]
    fn test_explicit_salt_is_literal_prefix() {
        let salted = add_salt_bytes_to_bytes(&[0x41, 0x42], [0x01u8, 0x02, 0x03, 0x04]);
        assert_eq!(salted, vec![0x01, 0x02, 0x03, 0x04, 0x41, 0x42]);
    }

    #[test]
    fn test_empty_inputs() {
        let salt = [0x01u8, 0x02, 0x03, 0x04];
        assert_eq!(add_salt_bytes_to_bytes(&[], salt), salt.to_vec());
        assert_eq!(add_salt_bytes_to_bytes(b"abc", [0u8; 0]), b"abc".to_vec());
        assert!(add_salt_bytes_to_bytes(&[], [0u8; 0]).is_empty());
    }

    #[test]
    fn test_inputs_not_mutated() {
        let plaintext = b"secret".to_vec();
        let salt = vec![9u8; 8];
        let _ = add_salt_bytes_to_bytes(&plaintext, &salt);
        assert_eq!(plaintext, b"secret");
        assert_eq!(salt, vec![9u8; 8]);
    }

    #[test]
    fn test_generated_salt_prefix() {
        let salted = add_salt_to_bytes(b"hunter2", 12).unwrap();

        assert_eq!(salted.len(), 12 + 7);
        assert_eq!(&salted[12..], b"hunter2");
        assert_eq!(decode_salt_length(&salted).unwrap(), 12);
    }

    #[test]
    fn test_seeded_generation() {
        let mut rng = DeterministicRng::new(b"prepend");
        let salted = add_salt_to_bytes_with(&mut rng, b"abc", 10).unwrap();

        assert_eq!(salted.len(), 13);
        assert_eq!(&salted[10..], b"abc");
        assert_eq!(decode_salt_length(&salted).unwrap(), 10);
    }

    #[test]
    fn test_entropy_failure_yields_no_buffer() {
        let mut source = RationedSource { budget: 7 };
        let result = add_salt_to_bytes_with(&mut source, b"plaintext", 8);
        assert!(matches!(result, Err(CryptoError::EntropyUnavailable(_))));

        let mut source = RationedSource { budget: 8 };
        let salted = add_salt_to_bytes_with(&mut source, b"plaintext", 8).unwrap();
        assert_eq!(salted.len(), 17);
    }

    #[test]
    fn test_generation_errors_propagate() {
        assert!(matches!(
            add_salt_to_bytes(b"x", 3),
            Err(CryptoError::InvalidSaltLength(3))
        ));
        assert!(matches!(
            add_salt_to_bytes(b"x", 256),
            Err(CryptoError::InvalidSaltLength(256))
        ));
    }

    #[test]
    fn test_split_recovers_parts() {
        let salted = add_salt_to_bytes(b"payload", 20).unwrap();
        let (salt, plaintext) = split_salted_bytes(&salted).unwrap();

        assert_eq!(salt.len(), 20);
        assert_eq!(plaintext, b"payload");
    }

    #[test]
    fn test_split_rejects_truncated_buffer() {
        // Encodes a length of 0xff in a 6-byte buffer
        let salted = [0x03, 0x0c, 0x30, 0xc0, 0x01, 0x01];
        assert!(matches!(
            split_salted_bytes(&salted),
            Err(CryptoError::TruncatedSaltedBuffer { expected: 255, actual: 6 })
        ));
    }

    #[test]
    fn test_split_rejects_short_or_bogus_headers() {
        assert!(matches!(
            split_salted_bytes(&[1, 2]),
            Err(CryptoError::InvalidSaltLength(2))
        ));
        assert!(matches!(
            split_salted_bytes(&[0, 0, 0, 0, 7]),
            Err(CryptoError::InvalidSaltLength(0))
        ));
    }
}
