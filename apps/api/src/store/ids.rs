//! Short opaque identifier allocation.
//!
//! Identifiers are 9 random lowercase base-36 characters. Uniqueness is not
//! left to chance: the caller passes a predicate describing which ids are
//! taken and allocation retries until it finds a free one.

use rand::Rng;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
pub const ID_LENGTH: usize = 9;
const MAX_ATTEMPTS: usize = 64;

#[derive(Debug, Default, Clone, Copy)]
pub struct IdAllocator;

impl IdAllocator {
    /// Returns an id for which `is_taken` is false.
    ///
    /// After `MAX_ATTEMPTS` collisions the length grows by one character per
    /// further attempt, so allocation always terminates.
    pub fn allocate(&self, is_taken: impl Fn(&str) -> bool) -> String {
        let mut len = ID_LENGTH;
        let mut attempt = 0;
        loop {
            let candidate = random_id(len);
            if !is_taken(&candidate) {
                return candidate;
            }
            attempt += 1;
            tracing::debug!(attempt, "id collision, retrying");
            if attempt >= MAX_ATTEMPTS {
                len += 1;
            }
        }
    }
}

fn random_id(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
