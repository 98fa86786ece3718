// Random number generation

use log::{debug, trace, warn};
use rand::rngs::{OsRng, SmallRng};
use rand::{Rng, RngCore, SeedableRng};
use sha2::{Digest, Sha256};

use crate::crypto::{CryptoError, Result};

/// Source of cryptographically strong bytes
pub trait SecureRandom {
    /// Fill `dest` with random bytes
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()>;

    /// Generate `size` random bytes
    fn random_bytes(&mut self, size: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; size];
        self.fill_bytes(&mut bytes)?;
        Ok(bytes)
    }
}

/// OS-based secure random number generator
///
/// Holds no state of its own. The free functions in this crate create one per
/// call and drop it before returning, so no handle outlives a single operation.
/// Reads may block briefly while the platform entropy pool initializes.
#[derive(Debug, Default)]
pub struct OsSecureRandom {
    rng: OsRng,
}

impl OsSecureRandom {
    pub fn new() -> Self {
        OsSecureRandom { rng: OsRng }
    }
}

impl SecureRandom for OsSecureRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        self.rng.try_fill_bytes(dest).map_err(|err| {
            warn!("OS entropy source failed: {}", err);
            CryptoError::from(err)
        })
    }
}

/// Deterministic byte stream for tests and benchmarks
///
/// SHA-256 in counter mode over a fixed seed. Not a secure source.
pub struct DeterministicRng {
    seed: Vec<u8>,
    counter: u64,
    buffered: Vec<u8>,
}

impl DeterministicRng {
    pub fn new(seed: &[u8]) -> Self {
        DeterministicRng {
            seed: seed.to_vec(),
            counter: 0,
            buffered: Vec::new(),
        }
    }

    fn refill(&mut self) {
        let mut hasher = Sha256::new();
        hasher.update(&self.seed);
        hasher.update(self.counter.to_le_bytes());
        self.counter += 1;
        self.buffered.extend_from_slice(&hasher.finalize());
    }
}

impl SecureRandom for DeterministicRng {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        while self.buffered.len() < dest.len() {
            self.refill();
        }
        let rest = self.buffered.split_off(dest.len());
        dest.copy_from_slice(&self.buffered);
        self.buffered = rest;
        Ok(())
    }
}

/// Build the 31-bit PRNG seed from four entropy bytes.
///
/// The bytes are read big-endian with the sign bit of the first byte cleared,
/// so the result never exceeds `0x7fff_ffff`.
pub fn seed_from_bytes(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes([bytes[0] & 0x7f, bytes[1], bytes[2], bytes[3]])
}

/// Generate an integer in `[min, max]`, both ends inclusive.
///
/// Four bytes from the OS entropy source seed a fast, non-cryptographic
/// generator which then produces the value. Only the seed is
/// cryptographically strong: the draw itself is not, so do not use the result
/// where the value must be unpredictable to an attacker. It is meant for
/// cheap, collision-resistant picks such as choosing a salt length.
pub fn generate_random_number(min: i32, max: i32) -> Result<i32> {
    check_range(min, max)?;
    let mut source = OsSecureRandom::new();
    generate_random_number_with(&mut source, min, max)
}

/// Same as [`generate_random_number`], seeded from `source`.
pub fn generate_random_number_with<S>(source: &mut S, min: i32, max: i32) -> Result<i32>
where
    S: SecureRandom + ?Sized,
{
    check_range(min, max)?;

    let mut seed_bytes = [0u8; 4];
    source.fill_bytes(&mut seed_bytes)?;

    let mut rng = SmallRng::seed_from_u64(u64::from(seed_from_bytes(seed_bytes)));
    trace!("drawing random number in [{}, {}]", min, max);
    Ok(rng.gen_range(min..=max))
}

fn check_range(min: i32, max: i32) -> Result<()> {
    if min > max {
        debug!("rejected random range [{}, {}]", min, max);
        return Err(CryptoError::InvalidRange { min, max });
    }
    Ok(())
}
