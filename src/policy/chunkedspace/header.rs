use crate::util::conversions::raw_align_up;
use crate::util::Address;
use crate::vm::VMBinding;
use atomic::Atomic;
use std::sync::atomic::Ordering;

/// The header at the base of every chunk in a [`super::ChunkedSpace`]. Both chunk kinds share
/// the layout. A zero `next` means this is the last chunk of its list.
#[repr(C)]
pub(super) struct ChunkHeader {
    pub next: Address,
    /// End of the occupied bytes. For an unaligned chunk this is the end of its object.
    pub top: Address,
    /// End of the chunk memory.
    pub end: Address,
}

static_assertions::const_assert!(std::mem::size_of::<ChunkHeader>() <= 4 * crate::util::constants::BYTES_IN_WORD);

/// Offset of the first object from the chunk base.
pub(super) fn object_start_offset<VM: VMBinding>() -> usize {
    raw_align_up(std::mem::size_of::<ChunkHeader>(), VM::MIN_ALIGNMENT)
}

/// Field accessors for the header of the chunk based at `chunk`. They go through a raw
/// pointer and never hand out a reference into chunk memory. Callers must pass the base of a
/// live chunk whose space is not accessed from another thread at the same time.
impl ChunkHeader {
    #[inline(always)]
    fn ptr(chunk: Address) -> *mut ChunkHeader {
        chunk.to_mut_ptr::<ChunkHeader>()
    }

    #[inline(always)]
    pub unsafe fn next(chunk: Address) -> Address {
        (*Self::ptr(chunk)).next
    }

    #[inline(always)]
    pub unsafe fn set_next(chunk: Address, next: Address) {
        (*Self::ptr(chunk)).next = next;
    }

    #[inline(always)]
    pub unsafe fn top(chunk: Address) -> Address {
        (*Self::ptr(chunk)).top
    }

    #[inline(always)]
    pub unsafe fn set_top(chunk: Address, top: Address) {
        (*Self::ptr(chunk)).top = top;
    }

    #[inline(always)]
    pub unsafe fn end(chunk: Address) -> Address {
        (*Self::ptr(chunk)).end
    }
}

/// The head and tail of one list of chunks, linked through [`ChunkHeader::next`].
pub(super) struct ChunkList {
    first: Atomic<Address>,
    last: Atomic<Address>,
}

impl ChunkList {
    pub fn new() -> Self {
        ChunkList {
            first: Atomic::new(Address::ZERO),
            last: Atomic::new(Address::ZERO),
        }
    }

    #[inline(always)]
    pub fn first(&self) -> Option<Address> {
        self.first.load(Ordering::Acquire).non_zero()
    }

    #[inline(always)]
    pub fn last(&self) -> Option<Address> {
        self.last.load(Ordering::Acquire).non_zero()
    }

    /// Link `chunk` at the tail of the list.
    ///
    /// # Safety
    /// `chunk` must be a fresh chunk whose header is initialized with a zero `next`.
    pub unsafe fn append(&self, chunk: Address) {
        debug_assert!(ChunkHeader::next(chunk).is_zero());
        match self.last() {
            Some(last) => ChunkHeader::set_next(last, chunk),
            None => self.first.store(chunk, Ordering::Release),
        }
        self.last.store(chunk, Ordering::Release);
    }

    /// Iterate the chunk bases in list order.
    pub fn iter(&self) -> impl Iterator<Item = Address> + '_ {
        std::iter::successors(self.first(), |chunk| {
            unsafe { ChunkHeader::next(*chunk) }.non_zero()
        })
    }

    /// Forget all chunks. The caller is responsible for the memory.
    pub fn clear(&self) {
        self.first.store(Address::ZERO, Ordering::Release);
        self.last.store(Address::ZERO, Ordering::Release);
    }
}
