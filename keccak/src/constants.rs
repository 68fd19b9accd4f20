//! Round constants and rotation offsets of Keccak-f[1600].
//!
//! Neither table is typed in by hand: both are produced at compile time by the two generator
//! algorithms from the Keccak reference.

use core::fmt;

use crate::interleave::to_bit_interleaving_const;
use crate::{NUM_LANES, NUM_ROUNDS};

/// Linear index of lane `(x, y)`, with both coordinates taken mod 5.
#[inline(always)]
#[must_use]
pub const fn lane_index(x: usize, y: usize) -> usize {
    (x % 5) + 5 * (y % 5)
}

/// The 8-bit LFSR with feedback polynomial `x^8 + x^6 + x^5 + x^4 + 1`, seeded with `0x01`.
///
/// Each output bit is the low bit of the register before it is clocked. Seven output bits make one
/// round constant, placed at bit positions `2^j - 1` for `j` in `0..7`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lfsr86540(u8);

impl Lfsr86540 {
    #[must_use]
    pub const fn new() -> Self {
        Self(0x01)
    }

    /// Clocks the register once and returns the bit it emitted.
    #[inline]
    pub const fn next_bit(&mut self) -> bool {
        let bit = self.0 & 0x01 != 0;
        self.0 = if self.0 & 0x80 != 0 {
            (self.0 << 1) ^ 0x71
        } else {
            self.0 << 1
        };
        bit
    }

    /// Consumes seven output bits and assembles the next round constant.
    #[inline]
    pub const fn next_round_constant(&mut self) -> u64 {
        let mut rc = 0;
        let mut j = 0;
        while j < 7 {
            if self.next_bit() {
                rc ^= 1 << ((1 << j) - 1);
            }
            j += 1;
        }
        rc
    }
}

impl Default for Lfsr86540 {
    fn default() -> Self {
        Self::new()
    }
}

const fn round_constants() -> [u64; NUM_ROUNDS] {
    let mut lfsr = Lfsr86540::new();
    let mut rc = [0; NUM_ROUNDS];
    let mut round = 0;
    while round < NUM_ROUNDS {
        rc[round] = lfsr.next_round_constant();
        round += 1;
    }
    rc
}

/// Walks the orbit `(x, y) -> (y, 2x + 3y)` from `(1, 0)` and returns, for each of the 24 steps,
/// the lane visited and its triangular-number offset `(t + 1)(t + 2) / 2 mod 64`.
const fn rho_orbit() -> [(usize, u32); NUM_ROUNDS] {
    let mut orbit = [(0, 0); NUM_ROUNDS];
    let (mut x, mut y) = (1, 0);
    let mut t = 0;
    while t < NUM_ROUNDS {
        orbit[t] = (lane_index(x, y), (((t + 1) * (t + 2) / 2) % 64) as u32);
        (x, y) = (y, (2 * x + 3 * y) % 5);
        t += 1;
    }
    orbit
}

const fn rho_offsets() -> [u32; NUM_LANES] {
    let orbit = rho_orbit();
    let mut offsets = [0; NUM_LANES];
    let mut t = 0;
    while t < NUM_ROUNDS {
        offsets[orbit[t].0] = orbit[t].1;
        t += 1;
    }
    offsets
}

const fn rho_pi_chain() -> [(usize, u32); NUM_ROUNDS] {
    let orbit = rho_orbit();
    let mut chain = [(0, 0); NUM_ROUNDS];
    let mut t = 0;
    while t < NUM_ROUNDS {
        chain[t] = (orbit[(t + 1) % NUM_ROUNDS].0, orbit[t].1);
        t += 1;
    }
    chain
}

const fn interleaved_round_constants() -> [[u32; 2]; NUM_ROUNDS] {
    let mut rc = [[0; 2]; NUM_ROUNDS];
    let mut round = 0;
    while round < NUM_ROUNDS {
        rc[round] = to_bit_interleaving_const(ROUND_CONSTANTS[round]);
        round += 1;
    }
    rc
}

/// The iota constants, one per round.
pub const ROUND_CONSTANTS: [u64; NUM_ROUNDS] = round_constants();

/// The rho rotation amounts, indexed by [`lane_index`]. Lane `(0, 0)` is never rotated.
pub const RHO_OFFSETS: [u32; NUM_LANES] = rho_offsets();

/// The combined rho and pi walk.
///
/// Pi moves the lane at orbit step `t` to the lane at step `t + 1`, so rho and pi can be applied
/// together by walking the orbit once. Entry `t` is `(destination lane, rotation of the lane
/// arriving there)`; the walk starts from lane 1 and the last entry lands back on lane 1.
pub const RHO_PI_CHAIN: [(usize, u32); NUM_ROUNDS] = rho_pi_chain();

/// [`ROUND_CONSTANTS`] in bit-interleaved form, `[even, odd]` per round.
pub const INTERLEAVED_ROUND_CONSTANTS: [[u32; 2]; NUM_ROUNDS] = interleaved_round_constants();

/// Prints the constant tables in the layout of the Keccak team's intermediate-value files.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantTables {
    interleaved: bool,
}

impl ConstantTables {
    #[must_use]
    pub const fn new() -> Self {
        Self { interleaved: false }
    }

    /// Print round constants as `even:odd` half-lanes instead of 64-bit words.
    #[must_use]
    pub const fn interleaved() -> Self {
        Self { interleaved: true }
    }
}

impl fmt::Display for ConstantTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for round in 0..NUM_ROUNDS {
            write!(f, "RC[{round:02}][0][0] = ")?;
            if self.interleaved {
                let [even, odd] = INTERLEAVED_ROUND_CONSTANTS[round];
                writeln!(f, "{even:08X}:{odd:08X}")?;
            } else {
                writeln!(f, "{:016X}", ROUND_CONSTANTS[round])?;
            }
        }
        writeln!(f)?;
        for y in 0..5 {
            for x in 0..5 {
                writeln!(f, "RhoOffset[{x}][{y}] = {:2}", RHO_OFFSETS[lane_index(x, y)])?;
            }
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::string::ToString;

    use super::*;

    // FIPS 202, table of iota constants.
    const PUBLISHED_ROUND_CONSTANTS: [u64; 24] = [
        0x0000000000000001,
        0x0000000000008082,
        0x800000000000808A,
        0x8000000080008000,
        0x000000000000808B,
        0x0000000080000001,
        0x8000000080008081,
        0x8000000000008009,
        0x000000000000008A,
        0x0000000000000088,
        0x0000000080008009,
        0x000000008000000A,
        0x000000008000808B,
        0x800000000000008B,
        0x8000000000008089,
        0x8000000000008003,
        0x8000000000008002,
        0x8000000000000080,
        0x000000000000800A,
        0x800000008000000A,
        0x8000000080008081,
        0x8000000000008080,
        0x0000000080000001,
        0x8000000080008008,
    ];

    #[test]
    fn round_constants_match_published_list() {
        assert_eq!(ROUND_CONSTANTS, PUBLISHED_ROUND_CONSTANTS);
    }

    #[test]
    fn round_constants_only_use_bit_positions_two_pow_j_minus_one() {
        let allowed = (0..7).fold(0u64, |acc, j| acc | 1 << ((1 << j) - 1));
        for rc in ROUND_CONSTANTS {
            assert_eq!(rc & !allowed, 0);
        }
    }

    #[test]
    fn lfsr_is_reusable_as_a_stream() {
        let mut lfsr = Lfsr86540::default();
        for expected in ROUND_CONSTANTS {
            assert_eq!(lfsr.next_round_constant(), expected);
        }
    }

    #[test]
    fn rho_offsets_match_published_table() {
        // Indexed by x + 5y.
        let published: [u32; 25] = [
            0, 1, 62, 28, 27, //
            36, 44, 6, 55, 20, //
            3, 10, 43, 25, 39, //
            41, 45, 15, 21, 8, //
            18, 2, 61, 56, 14,
        ];
        assert_eq!(RHO_OFFSETS, published);
        assert!(RHO_OFFSETS.iter().all(|&r| r < 64));
    }

    #[test]
    fn rho_orbit_visits_every_non_origin_lane_once() {
        let mut seen = [false; NUM_LANES];
        let (mut x, mut y) = (1usize, 0usize);
        for _ in 0..24 {
            let lane = lane_index(x, y);
            assert_ne!(lane, 0, "orbit must avoid the origin");
            assert!(!seen[lane], "lane {lane} visited twice");
            seen[lane] = true;
            (x, y) = (y, (2 * x + 3 * y) % 5);
        }
        assert_eq!((x, y), (1, 0), "orbit must close after 24 steps");
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn rho_pi_chain_matches_compact_tables() {
        let destinations: [usize; 24] = [
            10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
        ];
        let rotations: [u32; 24] = [
            1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20,
            44,
        ];
        for (t, &(lane, rot)) in RHO_PI_CHAIN.iter().enumerate() {
            assert_eq!(lane, destinations[t]);
            assert_eq!(rot, rotations[t]);
        }
    }

    #[test]
    fn display_uses_reference_layout() {
        let text = ConstantTables::new().to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("RC[00][0][0] = 0000000000000001"));
        assert_eq!(lines.next(), Some("RC[01][0][0] = 0000000000008082"));
        assert!(text.contains("RC[23][0][0] = 8000000080008008"));
        assert!(text.contains("RhoOffset[0][0] =  0"));
        assert!(text.contains("RhoOffset[2][0] = 62"));
        assert!(text.contains("RhoOffset[4][4] = 14"));

        let interleaved = ConstantTables::interleaved().to_string();
        assert!(interleaved.starts_with("RC[00][0][0] = 00000001:00000000\n"));
    }
}
