//! Seeded selection
//!
//! The seed string (normally the raw prompt) is hashed with an
//! order-preserving polynomial hash, `sum(code_unit * 31^i) mod 2^31-1`, over
//! the UTF-16 code units of the string. The result is normalized into `[0, 1)`.
//! The exact algorithm is part of the output contract: changing it changes every
//! generated design, so it must stay bit-for-bit stable.

/// Modulus of the seed hash (the Mersenne prime 2^31 - 1)
pub const SEED_MODULUS: u64 = 2_147_483_647;

const SEED_BASE: u64 = 31;

/// Hash a seed string to an integer in `[0, SEED_MODULUS)`
pub fn seed_hash(seed: &str) -> u64 {
    let mut hash = 0u64;
    let mut power = 1u64;

    for unit in seed.encode_utf16() {
        hash = (hash + u64::from(unit) * power) % SEED_MODULUS;
        power = (power * SEED_BASE) % SEED_MODULUS;
    }

    hash
}

/// Hash a seed string to a float in `[0, 1)`
pub fn seed_to_unit(seed: &str) -> f64 {
    seed_hash(seed) as f64 / SEED_MODULUS as f64
}

/// Deterministic chooser derived from one seed string
///
/// Each facet (`"palette"`, `"layout"`, ...) gets its own value so that
/// independent choices do not move in lockstep.
#[derive(Debug, Clone)]
pub struct SeededSelector {
    seed: String,
}

impl SeededSelector {
    /// Create a selector from a seed string
    pub fn new(seed: impl Into<String>) -> Self {
        Self { seed: seed.into() }
    }

    /// The seed this selector was built from
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Unit value for a facet
    pub fn value(&self, facet: &str) -> f64 {
        seed_to_unit(&format!("{}::{}", self.seed, facet))
    }

    /// Index into a list of `len` options for a facet; `None` for empty lists
    pub fn index(&self, facet: &str, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let idx = (self.value(facet) * len as f64).floor() as usize;
        Some(idx.min(len - 1))
    }

    /// Pick one option for a facet
    pub fn pick<'a, T>(&self, facet: &str, options: &'a [T]) -> Option<&'a T> {
        self.index(facet, options.len()).map(|i| &options[i])
    }
}
