//! Spaces, and the chunks they are made of.
//!
//! A space is an append-only collection of chunks representing one generation (or part of
//! one). The scan frontier only depends on the [`space::Space`] and [`chunk`] traits.

pub mod chunk;
pub mod chunkedspace;
pub mod space;
