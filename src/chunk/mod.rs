//! Chunk types.
//!
//! - [`ChunkDescriptor`] - offset, length, level and finality of a chunk
//! - [`Chunk`] - a descriptor with the bytes it covers and an optional hash
//! - [`ChunkHash`] - 32-byte content hash

mod data;
mod descriptor;
mod hash;

pub use data::Chunk;
pub use descriptor::ChunkDescriptor;
pub use hash::ChunkHash;
