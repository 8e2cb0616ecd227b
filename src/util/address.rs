use bytemuck::NoUninit;

use std::fmt;
use std::ops::*;

/// A raw machine address inside a chunked space: a chunk base, a chunk top or end, or a walk
/// cursor. Arithmetic on it is plain integer arithmetic. Only reading and writing memory
/// through it is unsafe.
///
/// The zero address doubles as "no chunk" in chunk headers, see [`Address::non_zero`].
#[repr(transparent)]
#[derive(Copy, Clone, Eq, Hash, PartialOrd, Ord, PartialEq, NoUninit)]
pub struct Address(usize);

impl Add<usize> for Address {
    type Output = Address;
    fn add(self, bytes: usize) -> Address {
        Address(self.0 + bytes)
    }
}

impl AddAssign<usize> for Address {
    fn add_assign(&mut self, bytes: usize) {
        self.0 += bytes;
    }
}

impl Sub<usize> for Address {
    type Output = Address;
    fn sub(self, bytes: usize) -> Address {
        Address(self.0 - bytes)
    }
}

/// The number of bytes from `other` up to `self`, for example the free bytes between a top
/// and a chunk end. `self` must not be below `other`.
impl Sub<Address> for Address {
    type Output = usize;
    fn sub(self, other: Address) -> usize {
        debug_assert!(
            self.0 >= other.0,
            "cannot subtract {} from the lower address {}",
            other,
            self
        );
        self.0 - other.0
    }
}

impl Address {
    pub const ZERO: Self = Address(0);

    pub fn from_mut_ptr<T>(ptr: *mut T) -> Address {
        Address(ptr as usize)
    }

    /// # Safety
    /// Nothing guarantees that memory exists at the result. Meant for fixed addresses in tests.
    pub const unsafe fn from_usize(raw: usize) -> Address {
        Address(raw)
    }

    /// # Safety
    /// `self` must point to a readable, suitably aligned `T`.
    #[inline(always)]
    pub unsafe fn load<T: Copy>(self) -> T {
        *(self.0 as *mut T)
    }

    /// Overwrite the bytes at `self` with `value`, without dropping what was there.
    ///
    /// # Safety
    /// `self` must point to writable memory, suitably aligned for `T`.
    #[inline(always)]
    pub unsafe fn store<T>(self, value: T) {
        (self.0 as *mut T).write(value);
    }

    #[inline(always)]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `align` must be a power of two.
    pub const fn align_up(self, align: usize) -> Address {
        use crate::util::conversions;
        Address(conversions::raw_align_up(self.0, align))
    }

    /// `align` must be a power of two.
    pub const fn align_down(self, align: usize) -> Address {
        use crate::util::conversions;
        Address(conversions::raw_align_down(self.0, align))
    }

    pub const fn is_aligned_to(self, align: usize) -> bool {
        use crate::util::conversions;
        conversions::raw_is_aligned(self.0, align)
    }

    pub fn to_mut_ptr<T>(self) -> *mut T {
        self.0 as *mut T
    }

    /// `None` for the zero address. Used to read the `next` link of a chunk.
    #[inline(always)]
    pub fn non_zero(self) -> Option<Address> {
        if self.is_zero() {
            None
        } else {
            Some(self)
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// The address of the first byte of an object in a chunk. A chunk walk turns its cursor into
/// an object reference directly, and the [`crate::vm::ObjectModel`] reads the object's size
/// through it. It supports no arithmetic.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, Hash, PartialOrd, Ord, PartialEq, NoUninit)]
pub struct ObjectReference(usize);

impl ObjectReference {
    pub const NULL: ObjectReference = ObjectReference(0);

    pub fn to_raw_address(self) -> Address {
        Address(self.0)
    }

    pub fn from_raw_address(addr: Address) -> ObjectReference {
        ObjectReference(addr.0)
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Debug for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::util::{Address, ObjectReference};

    fn addr(raw: usize) -> Address {
        unsafe { Address::from_usize(raw) }
    }

    #[test]
    fn align_up() {
        assert_eq!(addr(0x10).align_up(0x10), addr(0x10));
        assert_eq!(addr(0x11).align_up(0x10), addr(0x20));
        assert_eq!(addr(0x20).align_up(0x10), addr(0x20));
    }

    #[test]
    fn align_down() {
        assert_eq!(addr(0x10).align_down(0x10), addr(0x10));
        assert_eq!(addr(0x11).align_down(0x10), addr(0x10));
    }

    #[test]
    fn is_aligned_to() {
        assert!(addr(0x10).is_aligned_to(0x10));
        assert!(!addr(0x11).is_aligned_to(0x10));
        assert!(addr(0x10).is_aligned_to(0x8));
        assert!(!addr(0x10).is_aligned_to(0x20));
    }

    #[test]
    fn bytes_between_top_and_end() {
        let top = addr(0x1040);
        let end = addr(0x2000);
        assert_eq!(end - top, 0xfc0);
        assert_eq!(top + (end - top), end);
        assert_eq!(end - 0xfc0usize, top);
    }

    #[test]
    fn non_zero() {
        assert_eq!(Address::ZERO.non_zero(), None);
        assert_eq!(addr(0x40).non_zero(), Some(addr(0x40)));
    }

    #[test]
    fn object_reference_roundtrip() {
        let o = ObjectReference::from_raw_address(addr(0x2000));
        assert_eq!(o.to_raw_address(), addr(0x2000));
        assert!(!o.is_null());
        assert!(ObjectReference::NULL.is_null());
        assert_eq!(format!("{}", o), "0x2000");
    }
}
