//! Boundary detection policy with hierarchical levels.
//!
//! A position is a boundary when the rolling digest ends in at least
//! `base_bits` one-bits. Every further one-bit (up to `max_level_bits`) makes
//! the boundary rarer; `fan_bits` of them make one level. Because a level-L
//! position has strictly more trailing ones than any level below it, the
//! boundary sets nest: level L positions are a subset of level L-1 positions.

use crate::config::SplitConfig;

/// Outcome of classifying one scanned position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryDecision {
    /// Keep scanning.
    NotYet,
    /// Cut after the current byte, tagged with the given level.
    Boundary(u32),
}

impl BoundaryDecision {
    /// Returns true if this decision is a boundary of any level.
    pub fn is_boundary(&self) -> bool {
        matches!(self, BoundaryDecision::Boundary(_))
    }
}

/// Decides whether a position is a valid cut point, and at what level.
///
/// # Example
///
/// ```
/// use hashsplit::{BoundaryDecision, BoundaryPolicy, SplitConfig};
///
/// let policy = BoundaryPolicy::new(&SplitConfig::new(4, 2, 100)?);
///
/// // Four trailing ones: ordinary boundary
/// assert_eq!(policy.classify(0b0_1111, 10), BoundaryDecision::Boundary(0));
/// // Six trailing ones: two levels higher
/// assert_eq!(policy.classify(0b0_11_1111, 10), BoundaryDecision::Boundary(2));
/// // Too few ones
/// assert_eq!(policy.classify(0b0_111, 10), BoundaryDecision::NotYet);
/// // Below the minimum size a match is ignored
/// assert_eq!(policy.classify(0b0_1111, 1), BoundaryDecision::NotYet);
/// // At the maximum size a cut is forced
/// assert_eq!(policy.classify(0, 100), BoundaryDecision::Boundary(0));
/// # Ok::<(), hashsplit::SplitError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryPolicy {
    base_bits: u32,
    max_level_bits: u32,
    fan_bits: u32,
    min_size: usize,
    max_size: usize,
}

impl BoundaryPolicy {
    /// Builds a policy from a configuration.
    ///
    /// A `fan_bits` of zero is treated as one.
    pub fn new(config: &SplitConfig) -> Self {
        Self {
            base_bits: config.base_bits(),
            max_level_bits: config.max_level_bits(),
            fan_bits: config.fan_bits().max(1),
            min_size: config.min_size(),
            max_size: config.max_size(),
        }
    }

    /// Classifies a position given the digest there and the number of bytes
    /// scanned since the previous boundary (including this one).
    #[inline]
    pub fn classify(&self, checksum: u32, bytes_since_boundary: usize) -> BoundaryDecision {
        if bytes_since_boundary < self.min_size {
            return BoundaryDecision::NotYet;
        }

        if bytes_since_boundary >= self.max_size {
            return BoundaryDecision::Boundary(0);
        }

        match self.level_of(checksum) {
            Some(level) => BoundaryDecision::Boundary(level),
            None => BoundaryDecision::NotYet,
        }
    }

    /// Returns the level a digest qualifies for, ignoring size bounds.
    #[inline]
    pub fn level_of(&self, checksum: u32) -> Option<u32> {
        let bits = checksum.trailing_ones().min(self.max_level_bits);
        if bits < self.base_bits {
            return None;
        }
        Some((bits - self.base_bits) / self.fan_bits)
    }
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        Self::new(&SplitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(base_bits: u32, max_level_bits: u32, fan_bits: u32) -> BoundaryPolicy {
        BoundaryPolicy::new(
            &SplitConfig::default()
                .with_base_bits(base_bits)
                .with_max_level_bits(max_level_bits)
                .with_fan_bits(fan_bits)
                .with_min_size(1)
                .with_max_size(1 << 20),
        )
    }

    #[test]
    fn test_min_size_suppresses_matches() {
        let policy = BoundaryPolicy::new(&SplitConfig::new(4, 8, 64).unwrap());
        for n in 1..8 {
            assert_eq!(policy.classify(u32::MAX, n), BoundaryDecision::NotYet);
        }
        assert!(policy.classify(u32::MAX, 8).is_boundary());
    }

    #[test]
    fn test_max_size_forces_level_zero() {
        let policy = BoundaryPolicy::new(&SplitConfig::new(4, 1, 64).unwrap());
        assert_eq!(policy.classify(0, 63), BoundaryDecision::NotYet);
        assert_eq!(policy.classify(0, 64), BoundaryDecision::Boundary(0));
        // A high-level digest at the limit still reports level 0
        assert_eq!(policy.classify(u32::MAX, 64), BoundaryDecision::Boundary(0));
    }

    #[test]
    fn test_levels_count_extra_bits() {
        let policy = policy(3, 32, 1);
        assert_eq!(policy.level_of(0b011), None);
        assert_eq!(policy.level_of(0b0111), Some(0));
        assert_eq!(policy.level_of(0b01111), Some(1));
        assert_eq!(policy.level_of(0b0111_1111), Some(4));
        assert_eq!(policy.level_of(u32::MAX), Some(29));
    }

    #[test]
    fn test_max_level_bits_caps_levels() {
        let policy = policy(3, 5, 1);
        assert_eq!(policy.level_of(0b01111), Some(1));
        assert_eq!(policy.level_of(0b011111), Some(2));
        assert_eq!(policy.level_of(0b0111_1111), Some(2));
        assert_eq!(policy.level_of(u32::MAX), Some(2));
    }

    #[test]
    fn test_fan_bits_group_levels() {
        let policy = policy(4, 32, 4);
        assert_eq!(policy.level_of(0xf), Some(0));
        assert_eq!(policy.level_of(0x7f), Some(0));
        assert_eq!(policy.level_of(0xff), Some(1));
        assert_eq!(policy.level_of(0xfff), Some(2));
    }

    #[test]
    fn test_levels_nest() {
        let fine = policy(2, 16, 1);
        let coarse = policy(2, 16, 3);
        for checksum in 0..=0xffffu32 {
            let bits = checksum.trailing_ones().min(16);
            match fine.level_of(checksum) {
                Some(level) => assert_eq!(level, bits - 2),
                None => assert!(bits < 2),
            }
            // Coarser fan-out only regroups levels, it never adds boundaries.
            assert_eq!(
                fine.level_of(checksum).is_some(),
                coarse.level_of(checksum).is_some()
            );
            if let (Some(f), Some(c)) = (fine.level_of(checksum), coarse.level_of(checksum)) {
                assert_eq!(c, f / 3);
            }
        }
    }

    #[test]
    fn test_zero_fan_bits_treated_as_one() {
        let zero = policy(4, 32, 0);
        let one = policy(4, 32, 1);
        for checksum in [0b1111, 0b11_1111, 0b1_1111_1111, u32::MAX] {
            assert_eq!(zero.level_of(checksum), one.level_of(checksum));
            assert_eq!(zero.classify(checksum, 10), one.classify(checksum, 10));
        }
    }
}
