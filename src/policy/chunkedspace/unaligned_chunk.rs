use super::header::{object_start_offset, ChunkHeader};
use crate::policy::chunk::UnalignedHeapChunk;
use crate::util::conversions::object_size_align_up;
use crate::util::{Address, ObjectReference};
use crate::vm::{ObjectModel, ObjectVisitor, VMBinding};
use std::marker::PhantomData;

/// A chunk that holds exactly one object. It is full as soon as it is created. The handle
/// borrows the space that owns the chunk.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct UnalignedChunk<'a>(Address, PhantomData<&'a ()>);

impl<'a> UnalignedChunk<'a> {
    /// Initialize a chunk header in freshly allocated memory `[start, start + size)` for one
    /// object of `object_size` bytes.
    ///
    /// # Safety
    /// The memory must be owned by the caller, large enough for the header and the object,
    /// and live for `'a`.
    pub(super) unsafe fn init<VM: VMBinding>(
        start: Address,
        size: usize,
        object_size: usize,
    ) -> Self {
        let object_end = start + object_start_offset::<VM>() + object_size;
        debug_assert!(object_end <= start + size);
        start.store(ChunkHeader {
            next: Address::ZERO,
            top: object_end,
            end: start + size,
        });
        UnalignedChunk(start, PhantomData)
    }

    /// # Safety
    /// `start` must be the base of an initialized chunk that lives for `'a`.
    pub(super) unsafe fn from_start(start: Address) -> Self {
        UnalignedChunk(start, PhantomData)
    }

    pub fn start(self) -> Address {
        self.0
    }

    pub fn get_end(self) -> Address {
        unsafe { ChunkHeader::end(self.0) }
    }

    pub fn get_next(self) -> Option<UnalignedChunk<'a>> {
        unsafe { ChunkHeader::next(self.0) }
            .non_zero()
            .map(|next| UnalignedChunk(next, PhantomData))
    }

    pub fn get_object_start<VM: VMBinding>(self) -> Address {
        self.0 + object_start_offset::<VM>()
    }

    pub fn get_object<VM: VMBinding>(self) -> ObjectReference {
        ObjectReference::from_raw_address(self.get_object_start::<VM>())
    }

    pub fn walk_objects_from<VM: VMBinding, V: ObjectVisitor>(
        self,
        offset: Address,
        visitor: &mut V,
    ) -> bool {
        debug_assert_eq!(offset, self.get_object_start::<VM>());
        let object = ObjectReference::from_raw_address(offset);
        let size = VM::VMObjectModel::get_current_size(object);
        if !visitor.visit_object(object) {
            return false;
        }
        let top = unsafe { ChunkHeader::top(self.0) };
        // The object must end exactly at the top. The size wraps to zero if it is corrupt.
        let step = object_size_align_up(size, VM::MIN_ALIGNMENT);
        step != 0 && offset <= top && step == top - offset
    }
}

impl std::fmt::Debug for UnalignedChunk<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UnalignedChunk({})", self.0)
    }
}

impl<VM: VMBinding> UnalignedHeapChunk<VM> for UnalignedChunk<'_> {
    fn start(self) -> Address {
        UnalignedChunk::start(self)
    }
    fn get_next(self) -> Option<Self> {
        UnalignedChunk::get_next(self)
    }
    fn get_object_start(self) -> Address {
        UnalignedChunk::get_object_start::<VM>(self)
    }
    fn walk_objects_from<V: ObjectVisitor>(self, offset: Address, visitor: &mut V) -> bool {
        UnalignedChunk::walk_objects_from::<VM, V>(self, offset, visitor)
    }
}
