use crate::util::ObjectReference;
use crate::vm::VMBinding;

/// VM-specific methods for the object layout.
///
/// The scan frontier only needs to know how far to step over an object. Finding the inner
/// references of an object is up to the [`crate::vm::ObjectVisitor`] the binding passes in.
pub trait ObjectModel<VM: VMBinding> {
    /// Return the size used by an object, in bytes. A linear walk of a chunk advances by this
    /// size (rounded up to [`VMBinding::MIN_ALIGNMENT`]) to find the next object.
    ///
    /// Arguments:
    /// * `object`: The object to be queried.
    fn get_current_size(object: ObjectReference) -> usize;
}
