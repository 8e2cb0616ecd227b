use crate::scan::ScanError;
use crate::vm::VMBinding;

/// VM-specific methods for collection-wide events.
pub trait Collection<VM: VMBinding> {
    /// Report an unrecoverable internal error found while scanning. The heap is known to be
    /// inconsistent when this is called, so the implementation must not return: it should abort
    /// the process, or at least unwind out of the current collection.
    ///
    /// The default implementation panics with the error message.
    ///
    /// Arguments:
    /// * `error`: What went wrong, and where.
    fn report_fatal_error(error: ScanError) -> ! {
        panic!("{}", error)
    }
}
