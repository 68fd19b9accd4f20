//! Iterate over independent Keccak states either serially or, with the `parallel` feature, on the
//! rayon thread pool. Call sites import `prelude::*` and are written once against the rayon names.

#![no_std]

#[cfg(feature = "parallel")]
pub mod prelude {
    pub use rayon::prelude::*;
}

#[cfg(not(feature = "parallel"))]
mod serial;

#[cfg(not(feature = "parallel"))]
pub mod prelude {
    pub use core::iter::{
        ExactSizeIterator as IndexedParallelIterator, Iterator as ParallelIterator,
    };

    pub use super::serial::*;
}
