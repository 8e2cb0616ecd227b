use crate::policy::chunk::{AlignedHeapChunk, UnalignedHeapChunk};
use crate::vm::VMBinding;

/// A space is an append-only pair of chunk lists: aligned chunks for small objects and
/// unaligned chunks for large ones. During a collection pause chunks are only appended at the
/// tail of either list, and existing chunks are never reordered or released.
///
/// All methods take `&self`: the promotion code appends to a space through a shared reference
/// while the scan frontier holds another one.
pub trait Space<VM: VMBinding> {
    /// The handle type of the aligned chunks of this space. A handle borrows the space.
    type AlignedChunk<'a>: AlignedHeapChunk<VM>
    where
        Self: 'a;
    /// The handle type of the unaligned chunks of this space. A handle borrows the space.
    type UnalignedChunk<'a>: UnalignedHeapChunk<VM>
    where
        Self: 'a;

    /// The space name, for diagnostics.
    fn get_name(&self) -> &'static str;

    fn first_aligned_chunk(&self) -> Option<Self::AlignedChunk<'_>>;
    fn last_aligned_chunk(&self) -> Option<Self::AlignedChunk<'_>>;
    fn first_unaligned_chunk(&self) -> Option<Self::UnalignedChunk<'_>>;
    fn last_unaligned_chunk(&self) -> Option<Self::UnalignedChunk<'_>>;
}
