use criterion::{BatchSize, Criterion};

use greywalk::policy::chunkedspace::ChunkedSpace;
use greywalk::util::test_util::mock_vm::*;
use greywalk::util::ObjectReference;
use greywalk::GreyObjectsWalker;

const OBJECTS: usize = 10_000;

pub fn bench(c: &mut Criterion) {
    let options = test_options();

    // Polled once per work packet by a collector, so it has to stay cheap.
    c.bench_function("have_grey_objects", |b| {
        let space = ChunkedSpace::<MockVM>::new("bench", &options);
        let walker = GreyObjectsWalker::new(&space);
        alloc_object(&space, 32);
        b.iter(|| walker.have_grey_objects())
    });

    c.bench_function("walk_grey_objects", |b| {
        b.iter_batched(
            || {
                let space = ChunkedSpace::<MockVM>::new("bench", &options);
                alloc_object(&space, 32);
                space
            },
            |space| {
                let mut walker = GreyObjectsWalker::new(&space);
                for i in 0..OBJECTS {
                    if i % 1000 == 0 {
                        alloc_large_object(&space, 2048);
                    } else {
                        alloc_object(&space, 16 + (i % 8) * 8);
                    }
                }
                let mut visited = 0;
                walker.walk_grey_objects(&mut |_: ObjectReference| {
                    visited += 1;
                    true
                });
                assert_eq!(visited, OBJECTS);
            },
            BatchSize::SmallInput,
        )
    });
}
