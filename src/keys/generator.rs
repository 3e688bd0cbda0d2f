//! Random Key Generation
//!
//! Keys are strings over a 36-symbol alphabet (`0-9a-z`) drawn from the
//! operating system's CSPRNG.
//!
//! ## Uniformity
//!
//! Each symbol comes from one random byte. Bytes at or above 252 (the
//! largest multiple of 36 that fits in a byte) are thrown away, so the
//! remaining values map onto the alphabet with no modulo bias.

use rand::rngs::OsRng;
use rand::TryRngCore;

/// The symbols a key is made of.
pub const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Bytes below this value are accepted; `252 = 36 * 7`.
const ACCEPT_BELOW: u8 = (256 / ALPHABET.len() * ALPHABET.len()) as u8;

/// Random bytes pulled from the source per refill.
const CHUNK_SIZE: usize = 32;

/// Errors that can occur while generating a key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// The secure random source could not supply entropy. Not retryable.
    #[error("secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),
}

/// Produces random keys of a requested length.
///
/// The gateway receives one of these at construction, so tests can swap in
/// a scripted generator.
pub trait KeyGenerator: Send + Sync {
    /// Returns a key of exactly `len` alphabet symbols.
    fn generate(&self, len: usize) -> Result<String, KeyError>;
}

impl<F> KeyGenerator for F
where
    F: Fn(usize) -> Result<String, KeyError> + Send + Sync,
{
    fn generate(&self, len: usize) -> Result<String, KeyError> {
        self(len)
    }
}

/// The production generator, backed by [`OsRng`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OsKeyGenerator;

impl KeyGenerator for OsKeyGenerator {
    fn generate(&self, len: usize) -> Result<String, KeyError> {
        random_string(len)
    }
}

/// Returns a securely generated random key of `len` symbols.
///
/// # Example
///
/// ```
/// use airpaste::keys::{random_string, ALPHABET};
///
/// let key = random_string(6).unwrap();
/// assert_eq!(key.len(), 6);
/// assert!(key.bytes().all(|b| ALPHABET.contains(&b)));
/// ```
pub fn random_string(len: usize) -> Result<String, KeyError> {
    random_string_from(&mut OsRng, len)
}

/// Draws one byte from the OS random source.
///
/// Run once at startup; the process should refuse to serve if this fails.
pub fn assert_random_source() -> Result<(), KeyError> {
    draw_one_byte(&mut OsRng)
}

fn draw_one_byte<R>(rng: &mut R) -> Result<(), KeyError>
where
    R: TryRngCore + ?Sized,
{
    let mut byte = [0u8; 1];
    rng.try_fill_bytes(&mut byte).map_err(unavailable)
}

fn random_string_from<R>(rng: &mut R, len: usize) -> Result<String, KeyError>
where
    R: TryRngCore + ?Sized,
{
    let mut key = String::with_capacity(len);
    let mut chunk = [0u8; CHUNK_SIZE];

    while key.len() < len {
        rng.try_fill_bytes(&mut chunk).map_err(unavailable)?;

        for &byte in chunk.iter().filter(|&&b| b < ACCEPT_BELOW) {
            if key.len() == len {
                break;
            }
            let index = usize::from(byte) % ALPHABET.len();
            key.push(char::from(ALPHABET[index]));
        }
    }

    Ok(key)
}

fn unavailable(err: impl std::fmt::Display) -> KeyError {
    KeyError::RandomSourceUnavailable(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::io;

    /// A random source that always fails.
    struct BrokenRng;

    impl TryRngCore for BrokenRng {
        type Error = io::Error;

        fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
            Err(io::Error::other("entropy device gone"))
        }

        fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
            Err(io::Error::other("entropy device gone"))
        }

        fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> Result<(), Self::Error> {
            Err(io::Error::other("entropy device gone"))
        }
    }

    #[test]
    fn test_alphabet() {
        assert_eq!(ALPHABET.len(), 36);
        assert_eq!(ACCEPT_BELOW, 252);
    }

    #[test]
    fn test_lengths() {
        for len in [0, 1, 4, 8, 100] {
            let key = random_string(len).unwrap();
            assert_eq!(key.len(), len);
            assert!(key.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_os_generator() {
        let key = OsKeyGenerator.generate(4).unwrap();
        assert_eq!(key.len(), 4);
        assert!(assert_random_source().is_ok());
    }

    #[test]
    fn test_distribution_is_uniform() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let samples = 36 * 1000;

        let key = random_string_from(&mut rng, samples).unwrap();
        let mut counts: HashMap<char, usize> = HashMap::new();
        for c in key.chars() {
            *counts.entry(c).or_default() += 1;
        }

        // Every symbol shows up, none wildly over- or under-represented
        assert_eq!(counts.len(), 36);
        for (symbol, count) in counts {
            assert!(
                (800..=1200).contains(&count),
                "symbol {symbol} appeared {count} times"
            );
        }
    }

    #[test]
    fn test_positions_are_independent() {
        let mut rng = StdRng::seed_from_u64(42);

        // First symbol of many short keys should also spread over the alphabet
        let mut first = HashMap::new();
        for _ in 0..3600 {
            let key = random_string_from(&mut rng, 4).unwrap();
            *first.entry(key.as_bytes()[0]).or_insert(0usize) += 1;
        }
        assert_eq!(first.len(), 36);
        assert!(first.values().all(|&n| (50..=150).contains(&n)));
    }

    #[test]
    fn test_broken_source_is_reported() {
        let err = random_string_from(&mut BrokenRng, 4).unwrap_err();
        assert_eq!(
            err,
            KeyError::RandomSourceUnavailable("entropy device gone".to_string())
        );
    }

    #[test]
    fn test_startup_check_fails_on_broken_source() {
        let err = draw_one_byte(&mut BrokenRng).unwrap_err();
        assert_eq!(
            err,
            KeyError::RandomSourceUnavailable("entropy device gone".to_string())
        );
        assert_eq!(draw_one_byte(&mut StdRng::seed_from_u64(7)), Ok(()));
    }

    #[test]
    fn test_zero_length_never_touches_source() {
        assert_eq!(random_string_from(&mut BrokenRng, 0).unwrap(), "");
    }

    #[test]
    fn test_closure_is_a_generator() {
        let fixed = |len: usize| Ok::<_, KeyError>("x".repeat(len));
        assert_eq!(fixed.generate(5).unwrap(), "xxxxx");
    }
}
