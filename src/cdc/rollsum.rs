//! Rolling checksum over a fixed sliding window.
//!
//! The checksum is the Adler-style two-accumulator sum used by bup and rsync:
//! `s1` is the sum of the bytes in the window and `s2` is the sum of the
//! successive `s1` values, so it weights each byte by its distance from the
//! end of the window. Both can be updated in O(1) when one byte enters and
//! another leaves:
//!
//! ```text
//! s1 += add - drop
//! s2 += s1 - W * (drop + CHAR_OFFSET)
//! ```
//!
//! Every byte is biased by [`CHAR_OFFSET`] so that runs of zero bytes still
//! contribute to the sums. The history starts as W zero bytes, which makes
//! the digest a pure function of the trailing W bytes (zero-padded right
//! after a reset), regardless of anything seen before.

/// Bias added to every byte before it enters the sums.
pub const CHAR_OFFSET: u32 = 31;

/// Incremental checksum over the last `W` bytes.
///
/// # Example
///
/// ```
/// use hashsplit::RollingWindow;
///
/// let mut a = RollingWindow::new(64);
/// let mut b = RollingWindow::new(64);
///
/// // Different history, same trailing 64 bytes...
/// for byte in b"some unrelated prefix".iter() {
///     a.roll(*byte);
/// }
/// let tail = [7u8; 64];
/// let (mut da, mut db) = (0, 0);
/// for &byte in &tail {
///     da = a.roll(byte);
///     db = b.roll(byte);
/// }
///
/// // ...same digest.
/// assert_eq!(da, db);
/// ```
#[derive(Debug, Clone)]
pub struct RollingWindow {
    s1: u32,
    s2: u32,
    history: Box<[u8]>,
    cursor: usize,
}

impl RollingWindow {
    /// Creates a window covering `window_size` bytes.
    ///
    /// Any non-zero size works; [`crate::SplitConfig`] additionally requires
    /// a power of two.
    ///
    /// # Panics
    ///
    /// Panics if `window_size` is zero.
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "rolling window size must be non-zero");
        let mut window = Self {
            s1: 0,
            s2: 0,
            history: vec![0u8; window_size].into_boxed_slice(),
            cursor: 0,
        };
        window.reset();
        window
    }

    /// Resets to the state of a window holding only zero bytes.
    pub fn reset(&mut self) {
        let w = self.history.len() as u32;
        self.s1 = w.wrapping_mul(CHAR_OFFSET);
        self.s2 = w.wrapping_mul(w.wrapping_sub(1)).wrapping_mul(CHAR_OFFSET);
        self.history.fill(0);
        self.cursor = 0;
    }

    /// Feeds one byte, evicts the oldest one and returns the new digest.
    #[inline]
    pub fn roll(&mut self, byte: u8) -> u32 {
        let w = self.history.len() as u32;
        let drop = u32::from(self.history[self.cursor]);
        let add = u32::from(byte);

        self.s1 = self.s1.wrapping_add(add).wrapping_sub(drop);
        self.s2 = self
            .s2
            .wrapping_add(self.s1)
            .wrapping_sub(w.wrapping_mul(drop + CHAR_OFFSET));

        self.history[self.cursor] = byte;
        self.cursor += 1;
        if self.cursor == self.history.len() {
            self.cursor = 0;
        }

        self.digest()
    }

    /// Returns the current digest: `s1` in the high half, `s2` in the low half.
    #[inline]
    pub fn digest(&self) -> u32 {
        (self.s1 << 16) | (self.s2 & 0xffff)
    }

    /// Returns the number of bytes covered by the window.
    pub fn window_size(&self) -> usize {
        self.history.len()
    }
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_WINDOW_SIZE)
    }
}
