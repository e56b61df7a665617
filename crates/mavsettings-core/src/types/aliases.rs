//! Type aliases for shared settings state.
//!
//! The registry is owned by the main application thread, while a dialog
//! session applies relayed changes from a watcher thread.

use parking_lot::Mutex;
use std::sync::Arc;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex` so locking never returns a poison error.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// Create a new [`ThreadSafe`] value.
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
