//! The Keccak-f[1600] permutation and the state-access primitives that a sponge or duplex layer
//! drives it with.
//!
//! Four interchangeable strategies implement [`KeccakF1600State`]:
//!
//! - [`CompactState`]: looped rounds, round constants clocked from the LFSR as it goes.
//! - [`ReferenceState`]: the textbook step mappings over the wire bytes, with `trace` events for
//!   every intermediate value.
//! - [`Interleaved32State`]: bit-interleaved lanes and 32-bit operations only.
//! - [`OptimizedState`]: unrolled fused rounds, optionally on lane-complemented state.
//!
//! All of them produce the same bytes for the same calls. [`DefaultState`] picks one according
//! to the enabled Cargo features.

#![no_std]

mod batch;
mod compact;
mod complement;
mod constants;
mod error;
mod interleave;
mod interleaved32;
mod optimized;
mod reference;
mod state;

pub use batch::*;
pub use compact::*;
pub use complement::COMPLEMENTED_LANES;
pub use constants::*;
pub use error::*;
pub use interleave::*;
pub use interleaved32::*;
pub use optimized::{Optimized, OptimizedLaneComplementing, OptimizedState};
pub use reference::*;
pub use state::KeccakF1600State;

/// Rounds in one Keccak-f[1600] permutation.
pub const NUM_ROUNDS: usize = 24;

/// Lanes in the state, a 5 x 5 grid.
pub const NUM_LANES: usize = 25;

/// Bytes in one 64-bit lane.
pub const LANE_BYTES: usize = 8;

/// Bytes in the wire form of the state.
pub const STATE_BYTES: usize = NUM_LANES * LANE_BYTES;

/// Bits in the state, the width `b` of Keccak-f[1600].
pub const STATE_BITS: usize = 8 * STATE_BYTES;

/// The strategy selected by the `compact`, `bit-interleaving` and `lane-complementing` features.
#[cfg(feature = "compact")]
pub type DefaultState = CompactState;

/// The strategy selected by the `compact`, `bit-interleaving` and `lane-complementing` features.
#[cfg(all(feature = "bit-interleaving", not(feature = "compact")))]
pub type DefaultState = Interleaved32State;

/// The strategy selected by the `compact`, `bit-interleaving` and `lane-complementing` features.
#[cfg(not(any(feature = "compact", feature = "bit-interleaving")))]
pub type DefaultState = OptimizedState<{ cfg!(feature = "lane-complementing") }>;
