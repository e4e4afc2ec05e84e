//! Pluggable tokenizer contract and its reference implementation.
//!
//! ARCHITECTURE: the budget controller needs token counting *inside* the
//! core, injected so tests can swap in a fake, so it lives here behind a
//! trait instead of being a bare free function on the CLI side.

use rustc_hash::FxHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::RwLock;
use tiktoken_rs::CoreBPE;

use crate::error::{DistillError, Result};

/// `count(text) → non-negative integer`, deterministic and safe for
/// concurrent callers.
pub trait Tokenizer: Send + Sync {
    fn count(&self, text: &str) -> Result<usize>;
}

fn fx_hash(text: &str) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}

/// Reference `Tokenizer` backed by `tiktoken-rs`'s `cl100k_base` encoding,
/// the same encoding the CLI's token-reduction stats use.
///
/// Caches counts keyed by an `FxHasher` digest of the input behind a
/// read-mostly `RwLock`: concurrent readers proceed uncontended, a cache miss
/// takes a brief exclusive lock to insert.
pub struct TiktokenTokenizer {
    bpe: CoreBPE,
    cache: RwLock<HashMap<u64, usize>>,
}

impl TiktokenTokenizer {
    /// # Errors
    /// Returns [`DistillError::TokenizerError`] if the `cl100k_base` encoding
    /// table fails to load.
    pub fn new() -> Result<Self> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| DistillError::TokenizerError(e.to_string()))?;
        Ok(Self {
            bpe,
            cache: RwLock::new(HashMap::new()),
        })
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn count(&self, text: &str) -> Result<usize> {
        let key = fx_hash(text);

        if let Ok(cache) = self.cache.read() {
            if let Some(&count) = cache.get(&key) {
                return Ok(count);
            }
        }

        let count = self.bpe.encode_with_special_tokens(text).len();

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key, count);
        }

        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_positive_for_nonempty_text() {
        let tokenizer = TiktokenTokenizer::new().unwrap();
        assert!(tokenizer.count("fn main() {}").unwrap() > 0);
    }

    #[test]
    fn counting_is_idempotent() {
        let tokenizer = TiktokenTokenizer::new().unwrap();
        let a = tokenizer.count("hello world").unwrap();
        let b = tokenizer.count("hello world").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_text_counts_to_zero() {
        let tokenizer = TiktokenTokenizer::new().unwrap();
        assert_eq!(tokenizer.count("").unwrap(), 0);
    }
}
