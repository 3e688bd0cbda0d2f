//! Key Generation Module
//!
//! Short random keys are what clients type or paste to fetch a value back,
//! so they are drawn from a small single-case alphabet:
//! digits and lowercase ASCII letters.
//!
//! - `generator`: the [`KeyGenerator`] seam, the OS-backed implementation,
//!   and the startup self-check

pub mod generator;

pub use generator::{
    assert_random_source, random_string, KeyError, KeyGenerator, OsKeyGenerator, ALPHABET,
};
