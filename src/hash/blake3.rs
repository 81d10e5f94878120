//! BLAKE3 chunk hashing.

use crate::chunk::ChunkHash;

/// Hashes one chunk's bytes in one shot.
pub(crate) fn digest(data: &[u8]) -> ChunkHash {
    ChunkHash::new(blake3::hash(data).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        let hash = digest(b"hello world");
        assert_eq!(hash, digest(b"hello world"));
        assert_ne!(hash, digest(b"hello world!"));
    }

    #[test]
    fn test_digest_matches_incremental_blake3() {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        let expected: [u8; 32] = hasher.finalize().into();
        assert_eq!(digest(b"hello world").as_bytes(), &expected);
    }
}
