use super::collection::Collection;
use super::object_model::ObjectModel;
use crate::util::constants::LOG_BYTES_IN_WORD;

/// Default min alignment: one word.
const DEFAULT_LOG_MIN_ALIGNMENT: u8 = LOG_BYTES_IN_WORD;

/// The `VMBinding` trait associates with each trait, and provides VM-specific constants.
pub trait VMBinding
where
    Self: Sized + 'static + Send + Sync + Default,
{
    /// The binding's object layout, used to step over objects in a linear chunk walk.
    type VMObjectModel: ObjectModel<Self>;
    /// The binding's fatal-error reporting.
    type VMCollection: Collection<Self>;

    /// Allowed minimal alignment in bytes. Every object in a chunked space starts and ends on
    /// this alignment.
    const MIN_ALIGNMENT: usize = 1 << DEFAULT_LOG_MIN_ALIGNMENT;
}
