//! A minimal VM binding for tests and benchmarks.
//!
//! Objects store their size in bytes in their first word. The fatal-error reporter records the
//! error for the current thread and then panics, so a test can catch the unwind and check what
//! was reported.

use crate::policy::chunkedspace::ChunkedSpace;
use crate::scan::ScanError;
use crate::util::options::Options;
use crate::util::ObjectReference;
use crate::vm::{Collection, ObjectModel, VMBinding};
use std::cell::RefCell;

#[derive(Default)]
pub struct MockVM;

impl VMBinding for MockVM {
    type VMObjectModel = MockObjectModel;
    type VMCollection = MockCollection;
}

pub struct MockObjectModel;

impl ObjectModel<MockVM> for MockObjectModel {
    fn get_current_size(object: ObjectReference) -> usize {
        object_size(object)
    }
}

pub struct MockCollection;

thread_local! {
    static FATAL_ERRORS: RefCell<Vec<ScanError>> = const { RefCell::new(Vec::new()) };
}

impl Collection<MockVM> for MockCollection {
    fn report_fatal_error(error: ScanError) -> ! {
        FATAL_ERRORS.with(|errors| errors.borrow_mut().push(error.clone()));
        panic!("{}", error)
    }
}

/// The fatal errors reported on this thread since the last [`reset_fatal_errors`].
pub fn fatal_errors() -> Vec<ScanError> {
    FATAL_ERRORS.with(|errors| errors.borrow().clone())
}

pub fn reset_fatal_errors() {
    FATAL_ERRORS.with(|errors| errors.borrow_mut().clear());
}

/// Small chunks, so that tests cross chunk boundaries quickly.
pub fn test_options() -> Options {
    let mut options = Options::default();
    options.set_from_str("aligned_chunk_size", "4096");
    options.set_from_str("large_object_threshold", "1024");
    options
}

pub fn object_size(object: ObjectReference) -> usize {
    unsafe { object.to_raw_address().load::<usize>() }
}

/// Allocate an object and record its size in its first word.
pub fn alloc_object(space: &ChunkedSpace<MockVM>, size: usize) -> ObjectReference {
    let object = space.alloc(size);
    init_object(object, size)
}

/// Allocate an object in its own unaligned chunk and record its size in its first word.
pub fn alloc_large_object(space: &ChunkedSpace<MockVM>, size: usize) -> ObjectReference {
    let object = space.alloc_large(size);
    init_object(object, size)
}

fn init_object(object: ObjectReference, size: usize) -> ObjectReference {
    unsafe { object.to_raw_address().store::<usize>(size) };
    object
}
