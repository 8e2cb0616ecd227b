use super::header::{object_start_offset, ChunkHeader};
use crate::policy::chunk::AlignedHeapChunk;
use crate::util::conversions::object_size_align_up;
use crate::util::{Address, ObjectReference};
use crate::vm::{ObjectModel, ObjectVisitor, VMBinding};
use std::marker::PhantomData;

/// A power-of-two sized and aligned chunk that bump-allocates small objects. The handle
/// borrows the space that owns the chunk.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct AlignedChunk<'a>(Address, PhantomData<&'a ()>);

impl<'a> AlignedChunk<'a> {
    /// Initialize a chunk header in freshly allocated memory `[start, start + size)`.
    ///
    /// # Safety
    /// The memory must be owned by the caller, at least one header large, and live for `'a`.
    pub(super) unsafe fn init<VM: VMBinding>(start: Address, size: usize) -> Self {
        start.store(ChunkHeader {
            next: Address::ZERO,
            top: start + object_start_offset::<VM>(),
            end: start + size,
        });
        AlignedChunk(start, PhantomData)
    }

    /// # Safety
    /// `start` must be the base of an initialized chunk that lives for `'a`.
    pub(super) unsafe fn from_start(start: Address) -> Self {
        AlignedChunk(start, PhantomData)
    }

    pub fn start(self) -> Address {
        self.0
    }

    #[inline(always)]
    pub fn get_top(self) -> Address {
        unsafe { ChunkHeader::top(self.0) }
    }

    pub fn get_end(self) -> Address {
        unsafe { ChunkHeader::end(self.0) }
    }

    pub fn get_next(self) -> Option<AlignedChunk<'a>> {
        unsafe { ChunkHeader::next(self.0) }
            .non_zero()
            .map(|next| AlignedChunk(next, PhantomData))
    }

    pub fn get_object_start<VM: VMBinding>(self) -> Address {
        self.0 + object_start_offset::<VM>()
    }

    /// Bump the top by `size` bytes. Returns the old top, or zero if the chunk is full.
    pub(super) fn bump(self, size: usize) -> Address {
        let result = self.get_top();
        if size > self.get_end() - result {
            return Address::ZERO;
        }
        unsafe { ChunkHeader::set_top(self.0, result + size) };
        result
    }

    pub fn walk_objects_from<VM: VMBinding, V: ObjectVisitor>(
        self,
        offset: Address,
        visitor: &mut V,
    ) -> bool {
        debug_assert!(offset >= self.get_object_start::<VM>() && offset <= self.get_top());
        let mut cursor = offset;
        loop {
            // The visitor may copy objects into this very chunk, so the top is re-read every step.
            let top = self.get_top();
            if cursor >= top {
                break;
            }
            let object = ObjectReference::from_raw_address(cursor);
            let size = VM::VMObjectModel::get_current_size(object);
            if !visitor.visit_object(object) {
                return false;
            }
            // A size that wraps to zero or runs past the top is a corrupt object.
            let step = object_size_align_up(size, VM::MIN_ALIGNMENT);
            if step == 0 || step > top - cursor {
                return false;
            }
            cursor += step;
        }
        cursor == self.get_top()
    }
}

impl std::fmt::Debug for AlignedChunk<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AlignedChunk({})", self.0)
    }
}

impl<VM: VMBinding> AlignedHeapChunk<VM> for AlignedChunk<'_> {
    fn start(self) -> Address {
        AlignedChunk::start(self)
    }
    #[inline(always)]
    fn get_top(self) -> Address {
        AlignedChunk::get_top(self)
    }
    fn get_next(self) -> Option<Self> {
        AlignedChunk::get_next(self)
    }
    fn get_object_start(self) -> Address {
        AlignedChunk::get_object_start::<VM>(self)
    }
    fn walk_objects_from<V: ObjectVisitor>(self, offset: Address, visitor: &mut V) -> bool {
        AlignedChunk::walk_objects_from::<VM, V>(self, offset, visitor)
    }
}
