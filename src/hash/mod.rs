//! Strong hashing of chunk contents for the reader drivers.
//!
//! The splitter core never hashes; [`crate::SplitIter`] and the async stream
//! call [`hash_chunk`] on every chunk they yield. BLAKE3 is available with the
//! `hash-blake3` feature; without it no hash is produced.

use crate::chunk::ChunkHash;
use crate::config::HashConfig;

#[cfg(feature = "hash-blake3")]
mod blake3;

/// Hashes `data` if hashing is enabled and a hash backend is compiled in.
pub(crate) fn hash_chunk(config: &HashConfig, data: &[u8]) -> Option<ChunkHash> {
    if !config.enabled {
        return None;
    }
    #[cfg(feature = "hash-blake3")]
    return Some(blake3::digest(data));
    #[cfg(not(feature = "hash-blake3"))]
    {
        let _ = data;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_never_hashes() {
        assert!(hash_chunk(&HashConfig::disabled(), b"data").is_none());
    }

    #[test]
    #[cfg(feature = "hash-blake3")]
    fn test_enabled_hashes() {
        let a = hash_chunk(&HashConfig::enabled(), b"data");
        let b = hash_chunk(&HashConfig::enabled(), b"data");
        assert!(a.is_some());
        assert_eq!(a, b);
    }
}
