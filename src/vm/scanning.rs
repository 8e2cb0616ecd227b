use crate::util::ObjectReference;

/// Callback trait for walking the grey objects in a space. The visitor is expected to scan the
/// object and trace (and possibly copy) its referents, which may append more objects to the
/// space being walked.
pub trait ObjectVisitor {
    /// Visit an object. Return `false` if the object could not be visited. The failure is
    /// treated as fatal by the walker.
    fn visit_object(&mut self, object: ObjectReference) -> bool;
}

/// This lets us use closures as ObjectVisitor.
impl<F: FnMut(ObjectReference) -> bool> ObjectVisitor for F {
    fn visit_object(&mut self, object: ObjectReference) -> bool {
        self(object)
    }
}
