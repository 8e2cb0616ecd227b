use super::ScanError;
use crate::policy::chunk::{AlignedHeapChunk, UnalignedHeapChunk};
use crate::policy::space::Space;
use crate::util::log::{debug, error, trace};
use crate::util::rust_util::unlikely;
use crate::util::Address;
use crate::vm::{Collection, ObjectVisitor, VMBinding};
use std::marker::PhantomData;

/// The scan position in the aligned chunks of a space: everything in `chunk` below `top`, and
/// everything in the chunks before it, has been scanned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AlignedFrontier<C> {
    pub chunk: C,
    pub top: Address,
}

/// Applies an [`ObjectVisitor`] to every object that appeared in a space since a snapshot.
///
/// [`GreyObjectsWalker::set_scan_start`] takes the snapshot: everything in the space at that
/// point is black (or at least not this walker's business), everything appended afterwards is
/// grey. [`GreyObjectsWalker::walk_grey_objects`] then visits grey objects, which may copy more
/// objects into the same space, until the space stops growing.
///
/// New objects only ever show up at the tail of the space: at the top of the last aligned
/// chunk, in newly appended aligned chunks, or in newly appended unaligned chunks. The walker
/// relies on that, and on being the only walker of the space.
pub struct GreyObjectsWalker<'a, VM: VMBinding, S: Space<VM> + 'a> {
    space: &'a S,
    /// `None` if the space had no aligned chunk at the snapshot.
    aligned: Option<AlignedFrontier<S::AlignedChunk<'a>>>,
    /// `None` if the space had no unaligned chunk at the snapshot.
    unaligned: Option<S::UnalignedChunk<'a>>,
    _p: PhantomData<VM>,
}

impl<'a, VM: VMBinding, S: Space<VM> + 'a> GreyObjectsWalker<'a, VM, S> {
    /// Create a walker with a snapshot of `space` taken now.
    pub fn new(space: &'a S) -> Self {
        let mut walker = GreyObjectsWalker {
            space,
            aligned: None,
            unaligned: None,
            _p: PhantomData,
        };
        walker.set_scan_start(space);
        walker
    }

    /// Take a snapshot of `space`. All objects in the space are now considered black, and
    /// objects appended from now on are grey. The caller must make sure nothing is allocated
    /// into the space while the snapshot is taken.
    pub fn set_scan_start(&mut self, space: &'a S) {
        self.space = space;
        self.aligned = space.last_aligned_chunk().map(|chunk| AlignedFrontier {
            chunk,
            top: chunk.get_top(),
        });
        self.unaligned = space.last_unaligned_chunk();
        trace!(
            "[GreyObjectsWalker::set_scan_start: space: {} aligned: {:?} unaligned: {:?}]",
            space.get_name(),
            self.aligned,
            self.unaligned
        );
    }

    /// Has the space grown since the frontier was last moved?
    #[inline(always)]
    pub fn have_grey_objects(&self) -> bool {
        let aligned_grown = match self.aligned {
            Some(frontier) => {
                Some(frontier.chunk) != self.space.last_aligned_chunk()
                    || frontier.top != frontier.chunk.get_top()
            }
            None => self.space.last_aligned_chunk().is_some(),
        };
        aligned_grown || self.unaligned != self.space.last_unaligned_chunk()
    }

    /// Visit all grey objects, including the ones the visitor itself causes to be appended,
    /// until there are none left. Afterwards the frontier is at the tail of the space.
    ///
    /// If a chunk cannot be walked, or the visitor fails, the error is reported to
    /// [`Collection::report_fatal_error`] and no further chunk is visited.
    #[inline(never)]
    pub fn walk_grey_objects<V: ObjectVisitor>(&mut self, visitor: &mut V) {
        let mut iterations = 0usize;
        while self.have_grey_objects() {
            self.walk_aligned_grey_objects(visitor);
            self.walk_unaligned_grey_objects(visitor);
            iterations += 1;
        }
        debug!(
            "{}: grey objects walked in {} iteration(s), frontier: {:?} {:?}",
            self.space.get_name(),
            iterations,
            self.aligned,
            self.unaligned
        );
    }

    #[inline(always)]
    fn walk_aligned_grey_objects<V: ObjectVisitor>(&mut self, visitor: &mut V) {
        let (mut chunk, mut offset) = match self.aligned {
            Some(frontier) => (frontier.chunk, frontier.top),
            // Nothing was in the aligned chunks at the snapshot. Walk from the beginning.
            None => match self.space.first_aligned_chunk() {
                Some(first) => (first, first.get_object_start()),
                None => return,
            },
        };
        loop {
            if unlikely(!chunk.walk_objects_from(offset, visitor)) {
                Self::report_fatal_error(ScanError::AlignedChunkWalk {
                    space: self.space.get_name(),
                    chunk: chunk.start(),
                    offset,
                    top: chunk.get_top(),
                });
            }
            match chunk.get_next() {
                Some(next) => {
                    chunk = next;
                    offset = next.get_object_start();
                }
                None => break,
            }
        }

        // Visiting may have moved the top of the last chunk, so read it again.
        let frontier = AlignedFrontier {
            chunk,
            top: chunk.get_top(),
        };
        debug_assert!(
            self.aligned
                .map_or(true, |old| old.chunk != frontier.chunk || old.top <= frontier.top),
            "aligned frontier moved backward from {:?} to {:?}",
            self.aligned,
            frontier
        );
        self.aligned = Some(frontier);
    }

    #[inline(always)]
    fn walk_unaligned_grey_objects<V: ObjectVisitor>(&mut self, visitor: &mut V) {
        // Only chunks after the snapshot chunk are grey. An unaligned chunk never grows.
        let first_grey = match self.unaligned {
            Some(chunk) => chunk.get_next(),
            None => self.space.first_unaligned_chunk(),
        };
        let Some(mut chunk) = first_grey else {
            return;
        };
        loop {
            if unlikely(!chunk.walk_objects_from(chunk.get_object_start(), visitor)) {
                Self::report_fatal_error(ScanError::UnalignedChunkWalk {
                    space: self.space.get_name(),
                    chunk: chunk.start(),
                });
            }
            match chunk.get_next() {
                Some(next) => chunk = next,
                None => break,
            }
        }
        self.unaligned = Some(chunk);
    }

    #[cold]
    fn report_fatal_error(error: ScanError) -> ! {
        error!("{}", error);
        VM::VMCollection::report_fatal_error(error)
    }

    /// The space this walker snapshots.
    pub fn space(&self) -> &'a S {
        self.space
    }

    /// The current frontier in the aligned chunks.
    pub fn aligned_frontier(&self) -> Option<AlignedFrontier<S::AlignedChunk<'a>>> {
        self.aligned
    }

    /// The last unaligned chunk that has been scanned, or was present at the snapshot.
    pub fn unaligned_frontier(&self) -> Option<S::UnalignedChunk<'a>> {
        self.unaligned
    }
}
