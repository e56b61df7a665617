//! Shared-state aliases.
//!
//! - [`aliases`]: the `Arc<Mutex<T>>` alias shared by the registry owner
//!   and the dialog watcher.

pub mod aliases;

pub use aliases::*;
