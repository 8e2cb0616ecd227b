//! greywalk finds and scans the grey objects of a copying garbage collector.
//!
//! During a copying (or promoting) collection, live objects are evacuated into a to-space.
//! An evacuated object is grey until its own references have been traced, which may evacuate
//! more objects into the same to-space. greywalk keeps a frontier over the to-space, and walks
//! everything appended past it until the space stops growing.
//!
//! The main parts are:
//! * [`scan::GreyObjectsWalker`]: the frontier, and the drain loop.
//! * [`policy::space::Space`] and the chunk traits in [`policy::chunk`]: what the walker needs
//!   from a space. [`policy::chunkedspace::ChunkedSpace`] is a ready-made implementation.
//! * [`vm`]: the traits a VM binding implements (object sizes, fatal-error reporting) and the
//!   [`vm::ObjectVisitor`] applied to each grey object.
//!
//! A collection pause typically looks like this:
//!
//! ```ignore
//! let mut walker = GreyObjectsWalker::new(&to_space);
//! // Evacuate the roots into `to_space`.
//! walker.walk_grey_objects(&mut |object| scan_and_evacuate_referents(object));
//! ```

#[cfg(any(test, feature = "mock_test"))]
#[macro_use]
extern crate lazy_static;

pub mod policy;
pub mod scan;
pub mod util;
pub mod vm;

pub use crate::scan::GreyObjectsWalker;
