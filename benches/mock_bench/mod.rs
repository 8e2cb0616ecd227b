use criterion::Criterion;

pub mod grey_objects;

pub fn bench(c: &mut Criterion) {
    grey_objects::bench(c);
}
