//! Random share-link tokens.

/// Generates short-link tokens.
#[derive(Debug, Clone)]
pub struct LinkTokenGenerator {
    /// Random bytes per token.
    token_bytes: usize,
}

impl LinkTokenGenerator {
    /// Creates a generator producing `token_bytes` random bytes per token.
    pub fn new(token_bytes: usize) -> Self {
        Self {
            token_bytes: token_bytes.max(8),
        }
    }

    /// Generates a cryptographically random, hex-encoded token.
    pub fn generate(&self) -> String {
        let bytes: Vec<u8> = (0..self.token_bytes).map(|_| rand::random::<u8>()).collect();
        hex::encode(bytes)
    }
}

impl Default for LinkTokenGenerator {
    fn default() -> Self {
        Self::new(16)
    }
}
