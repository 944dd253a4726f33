//! Delimiter synthesis for raw string literals.
//!
//! The boundary token of a raw literal must never occur inside the payload
//! it wraps, or the literal terminates early. Candidates are sampled as
//! fixed-length lowercase-alphabetic tokens and rejected if they appear as
//! a substring of any payload; after a bounded number of rejections the run
//! fails closed rather than emit a corruptible header.

use rand::Rng;

use crate::error::{GenError, GenResult};

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Synthesize one collision-free delimiter for this run's payloads.
pub fn synthesize(payloads: &[&str], length: usize, retries: usize) -> GenResult<String> {
    synthesize_with(&mut rand::thread_rng(), payloads, length, retries)
}

/// Same, with a caller-supplied RNG so tests can seed it.
pub fn synthesize_with<R: Rng>(
    rng: &mut R,
    payloads: &[&str],
    length: usize,
    retries: usize,
) -> GenResult<String> {
    for _ in 0..retries {
        let candidate = sample(rng, length);
        if payloads.iter().all(|payload| !payload.contains(&candidate)) {
            return Ok(candidate);
        }
    }
    Err(GenError::Configuration(format!(
        "no collision-free {}-character delimiter found in {} attempts",
        length, retries
    )))
}

fn sample<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
