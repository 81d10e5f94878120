//! Thread-local pool of backing stores for [`super::StreamBuffer`].
//!
//! Splitting many short streams on one thread would otherwise allocate and
//! free a fresh backing vector per stream.

use std::cell::RefCell;

/// Initial capacity of a pooled backing store.
pub const DEFAULT_STORAGE_SIZE: usize = 64 * 1024; // 64 KiB

/// Maximum number of stores kept per thread.
pub const MAX_POOL_SIZE: usize = 4;

thread_local! {
    static STORAGE_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

/// Takes an empty backing store from the pool, or allocates one.
pub(crate) fn take() -> Vec<u8> {
    STORAGE_POOL
        .with(|pool| pool.borrow_mut().pop())
        .unwrap_or_else(|| Vec::with_capacity(DEFAULT_STORAGE_SIZE))
}

/// Returns a backing store to the pool.
///
/// Stores that grew past twice the default size are dropped instead, so one
/// huge stream does not pin its memory for the rest of the thread.
pub(crate) fn recycle(mut storage: Vec<u8>) {
    if storage.capacity() > DEFAULT_STORAGE_SIZE * 2 {
        return;
    }
    storage.clear();
    STORAGE_POOL.with(|pool| {
        let mut pool = pool.borrow_mut();
        if pool.len() < MAX_POOL_SIZE {
            pool.push(storage);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_has_capacity() {
        let storage = take();
        assert!(storage.is_empty());
        assert!(storage.capacity() >= DEFAULT_STORAGE_SIZE);
    }

    #[test]
    fn test_recycle_clears_and_reuses() {
        let mut storage = take();
        storage.extend_from_slice(b"test data");
        recycle(storage);

        let reused = take();
        assert!(reused.is_empty());
        assert!(reused.capacity() >= DEFAULT_STORAGE_SIZE);
    }

    #[test]
    fn test_oversized_store_is_dropped() {
        // Drain whatever earlier tests on this thread left behind
        while STORAGE_POOL.with(|pool| pool.borrow_mut().pop()).is_some() {}

        recycle(Vec::with_capacity(DEFAULT_STORAGE_SIZE * 4));
        assert_eq!(STORAGE_POOL.with(|pool| pool.borrow().len()), 0);
    }
}
