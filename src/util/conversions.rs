use crate::util::constants::*;
use crate::util::Address;

/* Alignment */

pub fn is_address_aligned(addr: Address) -> bool {
    addr.is_aligned_to(BYTES_IN_ADDRESS)
}

pub const fn raw_align_up(val: usize, align: usize) -> usize {
    // See https://github.com/rust-lang/rust/blob/e620d0f337d0643c757bab791fc7d88d63217704/src/libcore/alloc.rs#L192
    val.wrapping_add(align).wrapping_sub(1) & !align.wrapping_sub(1)
}

pub const fn raw_align_down(val: usize, align: usize) -> usize {
    val & !align.wrapping_sub(1)
}

pub const fn raw_is_aligned(val: usize, align: usize) -> bool {
    val & align.wrapping_sub(1) == 0
}

/// Round an allocation request up to a whole, aligned object size of at least
/// [`MIN_OBJECT_SIZE`]. A size within `align` of `usize::MAX` wraps to zero, which chunk walks
/// treat as a corrupt object.
pub const fn object_size_align_up(size: usize, align: usize) -> usize {
    let size = if size < MIN_OBJECT_SIZE {
        MIN_OBJECT_SIZE
    } else {
        size
    };
    raw_align_up(size, align)
}
