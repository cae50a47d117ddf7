use rand::rngs::OsRng;
use rand::Rng;

use crate::domain::short_id::{ShortId, ShortIdGenerator, SHORT_ID_ALPHABET, SHORT_ID_LENGTHS};

/// Picks a length uniformly from `SHORT_ID_LENGTHS`, then every character
/// uniformly from `SHORT_ID_ALPHABET`.
pub fn generate_short_id_with<R: Rng>(rng: &mut R) -> ShortId {
    let len = SHORT_ID_LENGTHS[rng.gen_range(0..SHORT_ID_LENGTHS.len())];
    let alphabet = SHORT_ID_ALPHABET.as_bytes();
    let value: String = (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect();
    ShortId::from_generated(value)
}

/// Short IDs drawn from the OS random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRngShortIdGenerator;

impl ShortIdGenerator for OsRngShortIdGenerator {
    fn generate(&self) -> ShortId {
        generate_short_id_with(&mut OsRng)
    }
}
