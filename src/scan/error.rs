use crate::util::Address;
use std::fmt;

/// An unrecoverable inconsistency found while walking grey objects. Either a chunk walk did
/// not end exactly at the chunk's recorded end, or the visitor failed on an object. Both mean
/// the heap cannot be trusted any more.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanError {
    /// Walking an aligned chunk from `offset` did not end at `top`.
    AlignedChunkWalk {
        space: &'static str,
        chunk: Address,
        offset: Address,
        top: Address,
    },
    /// Walking the object of an unaligned chunk failed.
    UnalignedChunkWalk { space: &'static str, chunk: Address },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::AlignedChunkWalk {
                space,
                chunk,
                offset,
                top,
            } => write!(
                f,
                "Failed to walk grey objects in aligned chunk {} of space {} from {} to top {}",
                chunk, space, offset, top
            ),
            ScanError::UnalignedChunkWalk { space, chunk } => write!(
                f,
                "Failed to walk the grey object in unaligned chunk {} of space {}",
                chunk, space
            ),
        }
    }
}

impl std::error::Error for ScanError {}
