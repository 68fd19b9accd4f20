//! The textbook strategy: the state is the 200-byte wire buffer itself, and each permutation
//! converts it to words and applies the five step mappings one after another, exactly as they are
//! written in the Keccak reference.
//!
//! Intermediate values are reported as `trace` events, so a subscriber at that level reproduces
//! the Keccak team's intermediate-value listings.

use core::fmt;

use tracing::{instrument, trace};

use crate::constants::{RHO_OFFSETS, ROUND_CONSTANTS, lane_index};
use crate::state::{KeccakF1600State, debug_check_lane_bytes, debug_check_lanes};
use crate::{LANE_BYTES, NUM_LANES, NUM_ROUNDS, STATE_BITS, STATE_BYTES};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceState {
    bytes: [u8; STATE_BYTES],
}

impl Default for ReferenceState {
    fn default() -> Self {
        Self::new()
    }
}

impl KeccakF1600State for ReferenceState {
    const NAME: &'static str = "reference";

    fn new() -> Self {
        Self {
            bytes: [0; STATE_BYTES],
        }
    }

    fn xor_bytes_in_lane(&mut self, lane: usize, data: &[u8], offset: usize) {
        debug_check_lane_bytes(lane, offset, data.len());
        let start = lane * LANE_BYTES + offset;
        for (s, d) in self.bytes[start..start + data.len()].iter_mut().zip(data) {
            *s ^= d;
        }
    }

    fn xor_lanes(&mut self, data: &[u8], lane_count: usize) {
        debug_check_lanes(data.len(), lane_count);
        let len = lane_count * LANE_BYTES;
        for (s, d) in self.bytes[..len].iter_mut().zip(&data[..len]) {
            *s ^= d;
        }
    }

    fn complement_bit(&mut self, position: usize) {
        debug_assert!(position < STATE_BITS);
        self.bytes[position / 8] ^= 1 << (position % 8);
    }

    fn permute(&mut self) {
        trace!(state = %ByteDump(&self.bytes), "input of permutation");
        let mut words = from_bytes_to_words(&self.bytes);
        keccak_f1600_on_words(&mut words);
        self.bytes = from_words_to_bytes(&words);
        trace!(state = %ByteDump(&self.bytes), "state after permutation");
    }

    fn extract_bytes_in_lane(&self, lane: usize, out: &mut [u8], offset: usize) {
        debug_check_lane_bytes(lane, offset, out.len());
        let start = lane * LANE_BYTES + offset;
        out.copy_from_slice(&self.bytes[start..start + out.len()]);
    }

    fn extract_lanes(&self, out: &mut [u8], lane_count: usize) {
        debug_check_lanes(out.len(), lane_count);
        let len = lane_count * LANE_BYTES;
        out[..len].copy_from_slice(&self.bytes[..len]);
    }
}

fn from_bytes_to_words(bytes: &[u8; STATE_BYTES]) -> [u64; NUM_LANES] {
    let mut words = [0u64; NUM_LANES];
    for (i, word) in words.iter_mut().enumerate() {
        for j in 0..LANE_BYTES {
            *word |= (bytes[i * LANE_BYTES + j] as u64) << (8 * j);
        }
    }
    words
}

fn from_words_to_bytes(words: &[u64; NUM_LANES]) -> [u8; STATE_BYTES] {
    let mut bytes = [0u8; STATE_BYTES];
    for (i, word) in words.iter().enumerate() {
        for j in 0..LANE_BYTES {
            bytes[i * LANE_BYTES + j] = (word >> (8 * j)) as u8;
        }
    }
    bytes
}

#[instrument(name = "reference permutation", level = "trace", skip_all)]
fn keccak_f1600_on_words(a: &mut [u64; NUM_LANES]) {
    trace!(state = %LaneDump(a), "same, with lanes as 64-bit words");
    for round in 0..NUM_ROUNDS {
        trace!(round, "round");
        theta(a);
        trace!(state = %LaneDump(a), "after theta");
        rho(a);
        trace!(state = %LaneDump(a), "after rho");
        pi(a);
        trace!(state = %LaneDump(a), "after pi");
        chi(a);
        trace!(state = %LaneDump(a), "after chi");
        iota(a, round);
        trace!(state = %LaneDump(a), "after iota");
    }
}

fn theta(a: &mut [u64; NUM_LANES]) {
    let mut c = [0u64; 5];
    for x in 0..5 {
        for y in 0..5 {
            c[x] ^= a[lane_index(x, y)];
        }
    }
    let mut d = [0u64; 5];
    for x in 0..5 {
        d[x] = c[(x + 1) % 5].rotate_left(1) ^ c[(x + 4) % 5];
    }
    for x in 0..5 {
        for y in 0..5 {
            a[lane_index(x, y)] ^= d[x];
        }
    }
}

fn rho(a: &mut [u64; NUM_LANES]) {
    for (lane, &offset) in a.iter_mut().zip(&RHO_OFFSETS) {
        *lane = lane.rotate_left(offset);
    }
}

fn pi(a: &mut [u64; NUM_LANES]) {
    let temp = *a;
    for x in 0..5 {
        for y in 0..5 {
            a[lane_index(y, 2 * x + 3 * y)] = temp[lane_index(x, y)];
        }
    }
}

fn chi(a: &mut [u64; NUM_LANES]) {
    let mut c = [0u64; 5];
    for y in 0..5 {
        for x in 0..5 {
            c[x] = a[lane_index(x, y)] ^ (!a[lane_index(x + 1, y)] & a[lane_index(x + 2, y)]);
        }
        for x in 0..5 {
            a[lane_index(x, y)] = c[x];
        }
    }
}

fn iota(a: &mut [u64; NUM_LANES], round: usize) {
    a[lane_index(0, 0)] ^= ROUND_CONSTANTS[round];
}

/// Formats a state as 25 hex words, five per line.
struct LaneDump<'a>(&'a [u64; NUM_LANES]);

impl fmt::Display for LaneDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, lane) in self.0.iter().enumerate() {
            let sep = if i % 5 == 4 { "\n" } else { " " };
            write!(f, "{lane:016X}{sep}")?;
        }
        Ok(())
    }
}

/// Formats a state as 200 hex bytes, 16 per line.
struct ByteDump<'a>(&'a [u8; STATE_BYTES]);

impl fmt::Display for ByteDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            let sep = if i % 16 == 15 { "\n" } else { " " };
            write!(f, "{byte:02X}{sep}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::format;

    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn word_conversion_round_trips() {
        let mut rng = SmallRng::seed_from_u64(200);
        let mut bytes = [0u8; STATE_BYTES];
        rng.fill(&mut bytes[..]);
        let words = from_bytes_to_words(&bytes);
        assert_eq!(words[3], u64::from_le_bytes(bytes[24..32].try_into().unwrap()));
        assert_eq!(from_words_to_bytes(&words), bytes);
    }

    #[test]
    fn pi_is_a_derangement_of_non_origin_lanes() {
        let mut a: [u64; NUM_LANES] = core::array::from_fn(|i| i as u64);
        pi(&mut a);
        assert_eq!(a[0], 0);
        for (i, &lane) in a.iter().enumerate().skip(1) {
            assert_ne!(lane, i as u64, "lane {i} stayed in place");
        }
        let mut sorted = a;
        sorted.sort_unstable();
        assert_eq!(sorted, core::array::from_fn(|i| i as u64));
    }

    #[test]
    fn chi_on_single_row() {
        // Row 0 = [1, 0, 1, 0, 0] as 1-bit lanes: out[x] = a[x] ^ (!a[x+1] & a[x+2]).
        let mut a = [0u64; NUM_LANES];
        a[0] = 1;
        a[2] = 1;
        chi(&mut a);
        assert_eq!(&a[..5], &[0, 0, 1, 1, 0]);
    }

    #[test]
    fn lane_dump_is_five_words_per_line() {
        let lanes = [0xABu64; NUM_LANES];
        let text = format!("{}", LaneDump(&lanes));
        assert_eq!(text.lines().count(), 5);
        assert!(text.starts_with("00000000000000AB 00000000000000AB"));
    }
}
