//! This module defines the traits a VM binding implements to use greywalk: the object layout,
//! the visitor applied to grey objects, and how fatal errors are reported.

mod collection;
mod object_model;
mod scanning;
mod vmbinding;

pub use self::collection::Collection;
pub use self::object_model::ObjectModel;
pub use self::scanning::ObjectVisitor;
pub use self::vmbinding::VMBinding;
