//! Scanning newly copied objects during a collection pause.
//!
//! A copying collector evacuates live objects into a to-space and then has to scan them so that
//! their referents get evacuated too. [`GreyObjectsWalker`] remembers where the to-space ended
//! when scanning started and walks whatever has been appended since, until the space stops
//! growing.

mod error;
mod grey_objects;

pub use self::error::ScanError;
pub use self::grey_objects::{AlignedFrontier, GreyObjectsWalker};
