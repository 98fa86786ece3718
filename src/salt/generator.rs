// Salt generation and length embedding

use log::{debug, trace};

use crate::crypto::random::{OsSecureRandom, SecureRandom};
use crate::crypto::{CryptoError, Result};
use crate::salt::{Salt, MAX_SALT_LENGTH, MIN_SALT_LENGTH};

/// Bit pair of the length stored in each of the first four bytes
const LENGTH_MASKS: [u8; 4] = [0x03, 0x0c, 0x30, 0xc0];

/// Generate a salt of `length` bytes using the OS entropy source.
///
/// Every byte is drawn non-zero, then the length is written into two bits of
/// each of bytes 0..4. Those four bytes keep 6 random bits each and may end up
/// zero after the merge; bytes 4.. are always non-zero.
///
/// Fails with [`CryptoError::InvalidSaltLength`] unless `4 <= length <= 255`.
pub fn generate_salt(length: usize) -> Result<Salt> {
    validate_length(length)?;
    let mut source = OsSecureRandom::new();
    generate_salt_with(&mut source, length)
}

/// Same as [`generate_salt`], drawing bytes from `source`.
pub fn generate_salt_with<S>(source: &mut S, length: usize) -> Result<Salt>
where
    S: SecureRandom + ?Sized,
{
    let encoded = validate_length(length)?;

    let mut bytes = vec![0u8; length];
    fill_non_zero(source, &mut bytes)?;
    encode_salt_length(&mut bytes, encoded)?;

    trace!("generated {}-byte salt", length);
    Ok(Salt::new(bytes))
}

/// Merge `length` into the first four bytes of `salt`, two bits per byte.
///
/// The remaining six bits of each byte are left untouched.
pub fn encode_salt_length(salt: &mut [u8], length: u8) -> Result<()> {
    let head = salt_head_mut(salt)?;
    for (byte, mask) in head.iter_mut().zip(LENGTH_MASKS) {
        *byte = (*byte & !mask) | (length & mask);
    }
    Ok(())
}

/// Recover the length embedded by [`encode_salt_length`].
pub fn decode_salt_length(salt: &[u8]) -> Result<usize> {
    if salt.len() < MIN_SALT_LENGTH {
        return Err(CryptoError::InvalidSaltLength(salt.len()));
    }

    let length = salt[..MIN_SALT_LENGTH]
        .iter()
        .zip(LENGTH_MASKS)
        .fold(0u8, |acc, (byte, mask)| acc | (byte & mask));
    Ok(usize::from(length))
}

fn validate_length(length: usize) -> Result<u8> {
    if !(MIN_SALT_LENGTH..=MAX_SALT_LENGTH).contains(&length) {
        debug!("rejected salt length {}", length);
        return Err(CryptoError::InvalidSaltLength(length));
    }
    u8::try_from(length)
        .map_err(|_| CryptoError::InvalidSaltLength(length))
}

fn salt_head_mut(salt: &mut [u8]) -> Result<&mut [u8]> {
    let len = salt.len();
    salt.get_mut(..MIN_SALT_LENGTH)
        .ok_or(CryptoError::InvalidSaltLength(len))
}

// Zero bytes are redrawn one at a time until the source yields a non-zero value.
fn fill_non_zero<S>(source: &mut S, bytes: &mut [u8]) -> Result<()>
where
    S: SecureRandom + ?Sized,
{
    source.fill_bytes(bytes)?;
    for byte in bytes.iter_mut() {
        while *byte == 0 {
            source.fill_bytes(std::slice::from_mut(byte))?;
        }
    }
    Ok(())
}
