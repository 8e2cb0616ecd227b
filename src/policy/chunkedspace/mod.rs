//! A space made of linked chunks, in the style of a nursery or survivor space of a
//! generational copying collector. Small objects are bump-allocated in aligned chunks, large
//! objects each get an unaligned chunk. Chunks are only released when the space is dropped.

mod aligned_chunk;
mod header;
mod unaligned_chunk;

pub use self::aligned_chunk::AlignedChunk;
pub use self::unaligned_chunk::UnalignedChunk;

use self::header::{object_start_offset, ChunkList};
use crate::policy::space::Space;
use crate::util::constants::BYTES_IN_PAGE;
use crate::util::conversions::object_size_align_up;
use crate::util::log::{debug, trace};
use crate::util::options::Options;
use crate::util::{Address, ObjectReference};
use crate::vm::VMBinding;
use std::alloc::Layout;
use std::cell::Cell;
use std::marker::PhantomData;

/// Unaligned chunks are page aligned.
const UNALIGNED_CHUNK_ALIGNMENT: usize = BYTES_IN_PAGE;

/// Chunk headers are updated without synchronization, so a space is `!Sync`: allocation and
/// scanning happen on one thread. Chunk handles borrow the space and cannot outlive it.
pub struct ChunkedSpace<VM: VMBinding> {
    name: &'static str,
    aligned_chunk_size: usize,
    /// Objects larger than this go to an unaligned chunk. Never more than fits in an empty
    /// aligned chunk.
    large_object_threshold: usize,
    aligned: ChunkList,
    unaligned: ChunkList,
    _p: PhantomData<(VM, Cell<()>)>,
}

impl<VM: VMBinding> ChunkedSpace<VM> {
    pub fn new(name: &'static str, options: &Options) -> Self {
        debug_assert!(options.aligned_chunk_size.is_power_of_two());
        let usable = options.aligned_chunk_size - object_start_offset::<VM>();
        let large_object_threshold = options.large_object_threshold.min(usable);
        debug!(
            "Created space {}: aligned chunk size = {}, large object threshold = {}",
            name, options.aligned_chunk_size, large_object_threshold
        );
        ChunkedSpace {
            name,
            aligned_chunk_size: options.aligned_chunk_size,
            large_object_threshold,
            aligned: ChunkList::new(),
            unaligned: ChunkList::new(),
            _p: PhantomData,
        }
    }

    pub fn aligned_chunk_size(&self) -> usize {
        self.aligned_chunk_size
    }

    pub fn large_object_threshold(&self) -> usize {
        self.large_object_threshold
    }

    /// Allocate `size` bytes. The size is rounded up to [`VMBinding::MIN_ALIGNMENT`]. Small
    /// objects are bump-allocated in the last aligned chunk, which may append a new chunk.
    /// Large objects are placed in a new unaligned chunk.
    ///
    /// The memory is zeroed. The caller initializes the object so that
    /// [`crate::vm::ObjectModel::get_current_size`] reports `size` before the object can be
    /// walked.
    pub fn alloc(&self, size: usize) -> ObjectReference {
        let size = object_size_align_up(size, VM::MIN_ALIGNMENT);
        if size > self.large_object_threshold {
            return self.alloc_large(size);
        }
        if let Some(chunk) = self.last_aligned_chunk() {
            let result = chunk.bump(size);
            if !result.is_zero() {
                return ObjectReference::from_raw_address(result);
            }
        }
        let chunk = self.acquire_aligned_chunk();
        let result = chunk.bump(size);
        debug_assert!(!result.is_zero(), "{} bytes do not fit in an empty chunk", size);
        ObjectReference::from_raw_address(result)
    }

    /// Allocate `size` bytes in a new unaligned chunk, whatever the size.
    pub fn alloc_large(&self, size: usize) -> ObjectReference {
        let size = object_size_align_up(size, VM::MIN_ALIGNMENT);
        let chunk_size = object_start_offset::<VM>() + size;
        let start = Self::acquire_memory(chunk_size, UNALIGNED_CHUNK_ALIGNMENT);
        let chunk = unsafe {
            let chunk = UnalignedChunk::init::<VM>(start, chunk_size, size);
            self.unaligned.append(start);
            chunk
        };
        trace!("{}: appended {:?} for {} bytes", self.name, chunk, size);
        chunk.get_object::<VM>()
    }

    fn acquire_aligned_chunk(&self) -> AlignedChunk<'_> {
        let start = Self::acquire_memory(self.aligned_chunk_size, self.aligned_chunk_size);
        let chunk = unsafe {
            let chunk = AlignedChunk::init::<VM>(start, self.aligned_chunk_size);
            self.aligned.append(start);
            chunk
        };
        trace!("{}: appended {:?}", self.name, chunk);
        chunk
    }

    fn chunk_layout(size: usize, align: usize) -> Layout {
        Layout::from_size_align(size, align).expect("Invalid chunk layout")
    }

    fn acquire_memory(size: usize, align: usize) -> Address {
        let layout = Self::chunk_layout(size, align);
        let ptr = unsafe { std::alloc::alloc_zeroed(layout) };
        if ptr.is_null() {
            std::alloc::handle_alloc_error(layout);
        }
        Address::from_mut_ptr(ptr)
    }

    /// Iterate the aligned chunks in list order.
    pub fn aligned_chunks(&self) -> impl Iterator<Item = AlignedChunk<'_>> + '_ {
        self.aligned
            .iter()
            .map(|start| unsafe { AlignedChunk::from_start(start) })
    }

    /// Iterate the unaligned chunks in list order.
    pub fn unaligned_chunks(&self) -> impl Iterator<Item = UnalignedChunk<'_>> + '_ {
        self.unaligned
            .iter()
            .map(|start| unsafe { UnalignedChunk::from_start(start) })
    }

    /// Total bytes of chunk memory held by the space.
    pub fn reserved_bytes(&self) -> usize {
        let aligned: usize = self.aligned_chunks().map(|c| c.get_end() - c.start()).sum();
        let unaligned: usize = self.unaligned_chunks().map(|c| c.get_end() - c.start()).sum();
        aligned + unaligned
    }

    /// Bytes occupied by objects.
    pub fn used_bytes(&self) -> usize {
        let aligned: usize = self
            .aligned_chunks()
            .map(|c| c.get_top() - c.get_object_start::<VM>())
            .sum();
        let unaligned: usize = self
            .unaligned_chunks()
            .map(|c| c.get_end() - c.get_object_start::<VM>())
            .sum();
        aligned + unaligned
    }
}

impl<VM: VMBinding> Space<VM> for ChunkedSpace<VM> {
    type AlignedChunk<'a> = AlignedChunk<'a> where Self: 'a;
    type UnalignedChunk<'a> = UnalignedChunk<'a> where Self: 'a;

    fn get_name(&self) -> &'static str {
        self.name
    }

    #[inline(always)]
    fn first_aligned_chunk(&self) -> Option<AlignedChunk<'_>> {
        self.aligned.first().map(|start| unsafe { AlignedChunk::from_start(start) })
    }

    #[inline(always)]
    fn last_aligned_chunk(&self) -> Option<AlignedChunk<'_>> {
        self.aligned.last().map(|start| unsafe { AlignedChunk::from_start(start) })
    }

    #[inline(always)]
    fn first_unaligned_chunk(&self) -> Option<UnalignedChunk<'_>> {
        self.unaligned.first().map(|start| unsafe { UnalignedChunk::from_start(start) })
    }

    #[inline(always)]
    fn last_unaligned_chunk(&self) -> Option<UnalignedChunk<'_>> {
        self.unaligned.last().map(|start| unsafe { UnalignedChunk::from_start(start) })
    }
}

impl<VM: VMBinding> Drop for ChunkedSpace<VM> {
    fn drop(&mut self) {
        let chunks: Vec<(Address, usize, usize)> = self
            .aligned_chunks()
            .map(|c| (c.start(), c.get_end() - c.start(), self.aligned_chunk_size))
            .chain(
                self.unaligned_chunks()
                    .map(|c| (c.start(), c.get_end() - c.start(), UNALIGNED_CHUNK_ALIGNMENT)),
            )
            .collect();
        self.aligned.clear();
        self.unaligned.clear();
        for (start, size, align) in chunks {
            unsafe { std::alloc::dealloc(start.to_mut_ptr(), Self::chunk_layout(size, align)) };
        }
    }
}
