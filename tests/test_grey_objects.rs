//! Drains a chunked space through the public API, with a binding that knows nothing about
//! the crate's own test helpers.

extern crate greywalk;

use greywalk::policy::chunkedspace::ChunkedSpace;
use greywalk::policy::space::Space;
use greywalk::util::options::Options;
use greywalk::util::ObjectReference;
use greywalk::vm::{Collection, ObjectModel, VMBinding};
use greywalk::GreyObjectsWalker;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};

/// Objects are two words: the size, then the number of children still to copy.
#[derive(Default)]
struct TestVM;

struct TestObjectModel;

impl ObjectModel<TestVM> for TestObjectModel {
    fn get_current_size(object: ObjectReference) -> usize {
        unsafe { object.to_raw_address().load::<usize>() }
    }
}

struct TestCollection;

// Use the default: panic.
impl Collection<TestVM> for TestCollection {}

impl VMBinding for TestVM {
    type VMObjectModel = TestObjectModel;
    type VMCollection = TestCollection;
    const MIN_ALIGNMENT: usize = 16;
}

fn options(chunk_size: usize, large_object_threshold: usize) -> Options {
    let mut options = Options::default();
    assert!(options.set_from_camelcase_str("alignedChunkSize", &chunk_size.to_string()));
    assert!(options.set_from_camelcase_str(
        "largeObjectThreshold",
        &large_object_threshold.to_string()
    ));
    options
}

fn new_object(space: &ChunkedSpace<TestVM>, size: usize) -> ObjectReference {
    let object = space.alloc(size);
    unsafe { object.to_raw_address().store::<usize>(size) };
    object
}

#[test]
fn random_growth_is_visited_exactly_once() {
    for seed in 0..8u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let space = ChunkedSpace::<TestVM>::new("random", &options(8192, 2048));

        let black: HashSet<_> = (0..rng.random_range(0..50))
            .map(|_| new_object(&space, rng.random_range(16..4096)))
            .collect();

        let mut walker = GreyObjectsWalker::new(&space);
        let mut grey = HashSet::new();
        for _ in 0..rng.random_range(1..20) {
            grey.insert(new_object(&space, rng.random_range(16..4096)));
        }

        let mut copies_left: usize = 500;
        let mut visits: HashMap<ObjectReference, usize> = HashMap::new();
        walker.walk_grey_objects(&mut |object: ObjectReference| {
            *visits.entry(object).or_default() += 1;
            let children = rng.random_range(0..4usize).min(copies_left);
            copies_left -= children;
            for _ in 0..children {
                grey.insert(new_object(&space, rng.random_range(16..4096)));
            }
            true
        });

        assert!(!walker.have_grey_objects(), "seed {}", seed);
        assert!(visits.values().all(|n| *n == 1), "seed {}", seed);
        let visited: HashSet<_> = visits.keys().copied().collect();
        assert_eq!(visited, grey, "seed {}", seed);
        assert!(visited.is_disjoint(&black), "seed {}", seed);
    }
}

#[test]
fn objects_follow_address_order_within_a_chunk() {
    let space = ChunkedSpace::<TestVM>::new("order", &options(8192, 2048));
    new_object(&space, 100);
    let mut walker = GreyObjectsWalker::new(&space);
    for i in 1..200 {
        new_object(&space, 16 * (i % 7 + 1));
    }

    let mut visited = vec![];
    walker.walk_grey_objects(&mut |object: ObjectReference| {
        visited.push(object);
        true
    });
    assert_eq!(visited.len(), 199);
    let chunk_of = |o: &ObjectReference| o.to_raw_address().align_down(8192);
    for pair in visited.windows(2) {
        if chunk_of(&pair[0]) == chunk_of(&pair[1]) {
            assert!(pair[0] < pair[1]);
        }
    }
    let chunk_order: Vec<_> = space.aligned_chunks().map(|c| c.start()).collect();
    let mut seen_order: Vec<_> = visited.iter().map(chunk_of).collect();
    seen_order.dedup();
    assert_eq!(seen_order, chunk_order);
}

#[test]
fn second_drain_without_growth_is_empty() {
    let space = ChunkedSpace::<TestVM>::new("idle", &options(8192, 2048));
    let mut walker = GreyObjectsWalker::new(&space);
    new_object(&space, 64);
    new_object(&space, 4096);

    let mut first = 0;
    walker.walk_grey_objects(&mut |_: ObjectReference| {
        first += 1;
        true
    });
    assert_eq!(first, 2);

    let mut second = 0;
    walker.walk_grey_objects(&mut |_: ObjectReference| {
        second += 1;
        true
    });
    assert_eq!(second, 0);
    assert_eq!(walker.unaligned_frontier(), space.last_unaligned_chunk());
}

#[test]
#[should_panic(expected = "Failed to walk the grey object in unaligned chunk")]
fn default_fatal_reporter_panics() {
    let space = ChunkedSpace::<TestVM>::new("fatal", &options(8192, 2048));
    let mut walker = GreyObjectsWalker::new(&space);
    new_object(&space, 4096);
    walker.walk_grey_objects(&mut |_: ObjectReference| false);
}

#[test]
fn drain_with_logging_enabled() {
    // Another test binary may have installed a logger already.
    let _ = greywalk::util::logger::try_init();
    let space = ChunkedSpace::<TestVM>::new("logged", &options(8192, 2048));
    let mut walker = GreyObjectsWalker::new(&space);
    new_object(&space, 64);
    let mut visited = 0;
    walker.walk_grey_objects(&mut |_: ObjectReference| {
        visited += 1;
        true
    });
    assert_eq!(visited, 1);
}
