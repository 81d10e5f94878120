//! Content-defined boundary detection.
//!
//! This module contains the two pure building blocks the splitter drives:
//!
//! - [`RollingWindow`] - bup-style rolling checksum over the last W bytes
//! - [`BoundaryPolicy`] - turns a digest into a cut decision and level

mod policy;
mod rollsum;

pub use policy::{BoundaryDecision, BoundaryPolicy};
pub use rollsum::{CHAR_OFFSET, RollingWindow};
