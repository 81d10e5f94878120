//! Configuration for splitting behavior.
//!
//! This module provides types to configure where the splitter cuts:
//!
//! - [`SplitConfig`] - Rolling window, boundary bits and chunk size bounds
//! - [`HashConfig`] - Whether reader drivers hash the chunks they yield
//!
//! # Example
//!
//! ```
//! use hashsplit::{HashConfig, SplitConfig};
//!
//! // ~8 KiB average chunks, never smaller than 2 KiB or larger than 32 KiB
//! let config = SplitConfig::new(13, 2048, 32768)?;
//!
//! // Coarser level hierarchy: one level per 4 extra bits
//! let config = config.with_fan_bits(4);
//!
//! // Disable hashing in the reader drivers
//! let config = config.with_hash_config(HashConfig::disabled());
//! # config.validate()?;
//! # Ok::<(), hashsplit::SplitError>(())
//! ```

use crate::error::SplitError;

/// Default rolling window size in bytes.
pub const DEFAULT_WINDOW_SIZE: usize = 64;

/// Default number of trailing one-bits required for a boundary (~8 KiB chunks).
pub const DEFAULT_BASE_BITS: u32 = 13;

/// Default cap on trailing one-bits counted for level tagging.
pub const DEFAULT_MAX_LEVEL_BITS: u32 = 32;

/// Default number of extra bits per level.
pub const DEFAULT_FAN_BITS: u32 = 1;

/// Default minimum chunk size (no minimum beyond one byte).
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 1;

/// Default maximum chunk size (32 KiB).
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 32 * 1024;

/// Width of the rolling checksum digest in bits.
pub const CHECKSUM_BITS: u32 = u32::BITS;

/// Configuration for content-defined splitting.
///
/// - `window_size` - Bytes covered by the rolling checksum (power of 2)
/// - `base_bits` - Trailing one-bits needed for a boundary; average chunk
///   size is about `2^base_bits` bytes
/// - `max_level_bits` - Cap on trailing one-bits counted for levels
/// - `fan_bits` - Extra trailing one-bits per level step
/// - `min_size` / `max_size` - Hard chunk size bounds
///
/// Constraints: `base_bits <= max_level_bits <= 32`, `fan_bits >= 1`,
/// `1 <= min_size <= max_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SplitConfig {
    window_size: usize,
    base_bits: u32,
    max_level_bits: u32,
    fan_bits: u32,
    min_size: usize,
    max_size: usize,
    hash_config: HashConfig,
}

impl SplitConfig {
    /// Creates a new configuration with the given boundary bits and size
    /// bounds, using defaults for everything else.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidConfig`] if the combination is invalid,
    /// see [`SplitConfig::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use hashsplit::SplitConfig;
    ///
    /// let config = SplitConfig::new(13, 1, 8192)?;
    /// assert_eq!(config.base_bits(), 13);
    /// assert_eq!(config.max_size(), 8192);
    /// # Ok::<(), hashsplit::SplitError>(())
    /// ```
    pub fn new(base_bits: u32, min_size: usize, max_size: usize) -> Result<Self, SplitError> {
        let config = Self {
            base_bits,
            min_size,
            max_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the rolling window size. Not validated until [`SplitConfig::validate`].
    pub fn with_window_size(mut self, size: usize) -> Self {
        self.window_size = size;
        self
    }

    /// Sets the number of trailing one-bits required for a boundary.
    pub fn with_base_bits(mut self, bits: u32) -> Self {
        self.base_bits = bits;
        self
    }

    /// Sets the cap on trailing one-bits counted for level tagging.
    pub fn with_max_level_bits(mut self, bits: u32) -> Self {
        self.max_level_bits = bits;
        self
    }

    /// Sets how many extra trailing one-bits make one level step.
    ///
    /// ```
    /// use hashsplit::SplitConfig;
    ///
    /// let config = SplitConfig::default().with_fan_bits(4);
    /// assert_eq!(config.fan_bits(), 4);
    /// ```
    pub fn with_fan_bits(mut self, bits: u32) -> Self {
        self.fan_bits = bits;
        self
    }

    /// Sets the minimum chunk size.
    pub fn with_min_size(mut self, size: usize) -> Self {
        self.min_size = size;
        self
    }

    /// Sets the maximum chunk size.
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Sets the hash configuration used by the reader drivers.
    pub fn with_hash_config(mut self, config: HashConfig) -> Self {
        self.hash_config = config;
        self
    }

    /// Returns the rolling window size.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Returns the number of trailing one-bits required for a boundary.
    pub fn base_bits(&self) -> u32 {
        self.base_bits
    }

    /// Returns the cap on counted trailing one-bits.
    pub fn max_level_bits(&self) -> u32 {
        self.max_level_bits
    }

    /// Returns the number of extra bits per level step.
    pub fn fan_bits(&self) -> u32 {
        self.fan_bits
    }

    /// Returns the minimum chunk size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Returns the maximum chunk size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the highest level a boundary can be tagged with.
    ///
    /// Never panics, even on a configuration that fails
    /// [`validate`](Self::validate).
    pub fn max_level(&self) -> u32 {
        self.max_level_bits.saturating_sub(self.base_bits) / self.fan_bits.max(1)
    }

    /// Returns the hash configuration.
    pub fn hash_config(&self) -> &HashConfig {
        &self.hash_config
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use hashsplit::SplitConfig;
    ///
    /// let config = SplitConfig::default().with_min_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.window_size < 2 || !self.window_size.is_power_of_two() {
            return Err(SplitError::InvalidConfig {
                message: "window_size must be a power of 2 and at least 2",
            });
        }

        if self.base_bits == 0 {
            return Err(SplitError::InvalidConfig {
                message: "base_bits must be non-zero",
            });
        }

        if self.max_level_bits > CHECKSUM_BITS {
            return Err(SplitError::InvalidConfig {
                message: "max_level_bits cannot exceed the checksum width (32)",
            });
        }

        if self.base_bits > self.max_level_bits {
            return Err(SplitError::InvalidConfig {
                message: "base_bits cannot be greater than max_level_bits",
            });
        }

        if self.fan_bits == 0 {
            return Err(SplitError::InvalidConfig {
                message: "fan_bits must be non-zero",
            });
        }

        if self.min_size == 0 {
            return Err(SplitError::InvalidConfig {
                message: "min_size must be non-zero",
            });
        }

        if self.min_size > self.max_size {
            return Err(SplitError::InvalidConfig {
                message: "min_size cannot be greater than max_size",
            });
        }

        Ok(())
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            base_bits: DEFAULT_BASE_BITS,
            max_level_bits: DEFAULT_MAX_LEVEL_BITS,
            fan_bits: DEFAULT_FAN_BITS,
            min_size: DEFAULT_MIN_CHUNK_SIZE,
            max_size: DEFAULT_MAX_CHUNK_SIZE,
            hash_config: HashConfig::default(),
        }
    }
}

/// Configuration for chunk hashing in the reader drivers.
///
/// `HashConfig` controls whether BLAKE3 hashes are computed for each chunk a
/// driver yields. The splitter core itself never hashes. Hashing is enabled
/// by default; it has no effect without the `hash-blake3` feature.
///
/// # Example
///
/// ```
/// use hashsplit::HashConfig;
///
/// assert!(HashConfig::enabled().enabled);
/// assert!(!HashConfig::disabled().enabled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashConfig {
    /// Whether to compute BLAKE3 hashes for chunks.
    pub enabled: bool,
}

impl HashConfig {
    /// Creates a new hash configuration.
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Enables hashing.
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Disables hashing.
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
