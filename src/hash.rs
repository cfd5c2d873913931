// src/hash.rs

//! SHA-256 content digests
//!
//! Used to tell whether an installed component still matches the copy the
//! package ships. Not used for any security decision.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a byte slice
pub fn sha256(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Incremental digest over a set of named files
///
/// Each file contributes its name and its content digest, so two trees with
/// the same contents under different names hash differently.
#[derive(Default)]
pub struct TreeHasher {
    inner: Sha256,
}

impl TreeHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one file; callers must add files in a stable order
    pub fn add(&mut self, name: &str, contents: &[u8]) {
        self.inner.update(name.as_bytes());
        self.inner.update([0u8]);
        self.inner.update(sha256(contents).as_bytes());
        self.inner.update([b'\n']);
    }

    pub fn finalize(self) -> String {
        hex::encode(self.inner.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            sha256(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_tree_hash_depends_on_names() {
        let mut a = TreeHasher::new();
        a.add("SKILL.md", b"x");
        let mut b = TreeHasher::new();
        b.add("OTHER.md", b"x");
        assert_ne!(a.finalize(), b.finalize());
    }

    #[test]
    fn test_tree_hash_is_deterministic() {
        let build = || {
            let mut h = TreeHasher::new();
            h.add("SKILL.md", b"skill");
            h.add("references/a.md", b"ref");
            h.finalize()
        };
        assert_eq!(build(), build());
    }
}
