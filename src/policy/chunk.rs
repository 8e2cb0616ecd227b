//! The chunk contracts a space exposes to the scan frontier.
//!
//! A space hands out chunk handles. A handle is a small `Copy` value (usually the chunk's base
//! address) that borrows the space, so the frontier can keep handles across a whole drain while
//! the space keeps growing, but never past the space's lifetime.

use crate::util::Address;
use crate::vm::{ObjectVisitor, VMBinding};
use std::fmt::Debug;

/// A chunk that holds many objects laid out contiguously, with an allocation top that marks
/// the end of the occupied bytes. New objects only ever appear at the top.
pub trait AlignedHeapChunk<VM: VMBinding>: Copy + Eq + Debug {
    /// The base address of the chunk. Only used to identify the chunk in diagnostics.
    fn start(self) -> Address;
    /// The current allocation top. It only grows while a space is being scanned.
    fn get_top(self) -> Address;
    /// The chunk appended after this one, if any.
    fn get_next(self) -> Option<Self>;
    /// The address of the first object in the chunk, past any header.
    fn get_object_start(self) -> Address;
    /// Apply `visitor` to each object from `offset` up to the top of the chunk, in increasing
    /// address order. `offset` must be an object boundary in `[get_object_start(), get_top()]`.
    ///
    /// Returns `true` if the walk ended exactly at the top, `false` if the visitor failed or
    /// the object sizes did not add up to the top.
    fn walk_objects_from<V: ObjectVisitor>(self, offset: Address, visitor: &mut V) -> bool;
}

/// A chunk that holds exactly one (typically large) object.
pub trait UnalignedHeapChunk<VM: VMBinding>: Copy + Eq + Debug {
    /// The base address of the chunk. Only used to identify the chunk in diagnostics.
    fn start(self) -> Address;
    /// The chunk appended after this one, if any.
    fn get_next(self) -> Option<Self>;
    /// The address of the single object in the chunk.
    fn get_object_start(self) -> Address;
    /// Apply `visitor` to the object at `offset`, which must be [`Self::get_object_start`].
    /// Returns `true` on success.
    fn walk_objects_from<V: ObjectVisitor>(self, offset: Address, visitor: &mut V) -> bool;
}
