//! The 32-bit strategy. Every lane is held as a bit-interleaved pair of 32-bit words
//! (see [`crate::interleave`]), so the whole permutation runs on 32-bit operations only.
//! Lanes are converted on the way in and out of the state; the permutation never converts.

use crate::constants::{INTERLEAVED_ROUND_CONSTANTS, RHO_OFFSETS, lane_index};
use crate::interleave::{from_bit_interleaving, rotl64_interleaved, to_bit_interleaving};
use crate::state::{
    KeccakF1600State, copy_lane_bytes, debug_check_lane_bytes, debug_check_lanes, partial_lane,
    read_lane, write_lane,
};
use crate::{NUM_LANES, NUM_ROUNDS, STATE_BITS};

/// Half-lanes `2 * i` (even bits) and `2 * i + 1` (odd bits) together hold lane `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interleaved32State {
    halves: [u32; 2 * NUM_LANES],
}

impl Interleaved32State {
    #[inline(always)]
    fn xor_lane(&mut self, lane: usize, value: u64) {
        let [even, odd] = to_bit_interleaving(value);
        self.halves[2 * lane] ^= even;
        self.halves[2 * lane + 1] ^= odd;
    }

    #[inline(always)]
    fn lane(&self, lane: usize) -> u64 {
        from_bit_interleaving([self.halves[2 * lane], self.halves[2 * lane + 1]])
    }
}

impl Default for Interleaved32State {
    fn default() -> Self {
        Self::new()
    }
}

impl KeccakF1600State for Interleaved32State {
    const NAME: &'static str = "interleaved32";

    fn new() -> Self {
        Self {
            halves: [0; 2 * NUM_LANES],
        }
    }

    fn xor_bytes_in_lane(&mut self, lane: usize, data: &[u8], offset: usize) {
        debug_check_lane_bytes(lane, offset, data.len());
        self.xor_lane(lane, partial_lane(data, offset));
    }

    fn xor_lanes(&mut self, data: &[u8], lane_count: usize) {
        debug_check_lanes(data.len(), lane_count);
        for lane in 0..lane_count {
            self.xor_lane(lane, read_lane(data, lane));
        }
    }

    fn complement_bit(&mut self, position: usize) {
        debug_assert!(position < STATE_BITS);
        let lane = position / 64;
        let half = position % 2;
        let bit_in_half = (position % 64) / 2;
        self.halves[2 * lane + half] ^= 1 << bit_in_half;
    }

    fn permute(&mut self) {
        keccak_f1600_on_half_lanes(&mut self.halves);
    }

    fn extract_bytes_in_lane(&self, lane: usize, out: &mut [u8], offset: usize) {
        debug_check_lane_bytes(lane, offset, out.len());
        copy_lane_bytes(self.lane(lane), out, offset);
    }

    fn extract_lanes(&self, out: &mut [u8], lane_count: usize) {
        debug_check_lanes(out.len(), lane_count);
        for lane in 0..lane_count {
            write_lane(out, lane, self.lane(lane));
        }
    }
}

#[inline(always)]
const fn index(x: usize, y: usize, z: usize) -> usize {
    2 * lane_index(x, y) + z
}

fn keccak_f1600_on_half_lanes(a: &mut [u32; 2 * NUM_LANES]) {
    for round in 0..NUM_ROUNDS {
        theta(a);
        rho(a);
        pi(a);
        chi(a);
        iota(a, round);
    }
}

fn theta(a: &mut [u32; 2 * NUM_LANES]) {
    let mut c = [[0u32; 2]; 5];
    for x in 0..5 {
        for z in 0..2 {
            for y in 0..5 {
                c[x][z] ^= a[index(x, y, z)];
            }
        }
    }
    for x in 0..5 {
        let mut d = rotl64_interleaved(c[(x + 1) % 5], 1);
        for z in 0..2 {
            d[z] ^= c[(x + 4) % 5][z];
        }
        for y in 0..5 {
            for z in 0..2 {
                a[index(x, y, z)] ^= d[z];
            }
        }
    }
}

fn rho(a: &mut [u32; 2 * NUM_LANES]) {
    for (lane, &offset) in RHO_OFFSETS.iter().enumerate() {
        let [even, odd] = rotl64_interleaved([a[2 * lane], a[2 * lane + 1]], offset);
        a[2 * lane] = even;
        a[2 * lane + 1] = odd;
    }
}

fn pi(a: &mut [u32; 2 * NUM_LANES]) {
    let temp = *a;
    for x in 0..5 {
        for y in 0..5 {
            for z in 0..2 {
                a[index(y, 2 * x + 3 * y, z)] = temp[index(x, y, z)];
            }
        }
    }
}

fn chi(a: &mut [u32; 2 * NUM_LANES]) {
    let mut c = [[0u32; 2]; 5];
    for y in 0..5 {
        for x in 0..5 {
            for z in 0..2 {
                c[x][z] = a[index(x, y, z)] ^ (!a[index(x + 1, y, z)] & a[index(x + 2, y, z)]);
            }
        }
        for x in 0..5 {
            for z in 0..2 {
                a[index(x, y, z)] = c[x][z];
            }
        }
    }
}

fn iota(a: &mut [u32; 2 * NUM_LANES], round: usize) {
    let [even, odd] = INTERLEAVED_ROUND_CONSTANTS[round];
    a[index(0, 0, 0)] ^= even;
    a[index(0, 0, 1)] ^= odd;
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use tiny_keccak::keccakf;

    use super::*;
    use crate::constants::ROUND_CONSTANTS;
    use crate::interleave::to_bit_interleaving_const;

    #[test]
    fn interleaved_round_constants_are_interleaved_round_constants() {
        for (rc, halves) in ROUND_CONSTANTS.iter().zip(&INTERLEAVED_ROUND_CONSTANTS) {
            assert_eq!(*halves, to_bit_interleaving(*rc));
            assert_eq!(*halves, to_bit_interleaving_const(*rc));
        }
    }

    #[test]
    fn test_vs_tiny_keccak() {
        let mut rng = SmallRng::seed_from_u64(32);
        for _ in 0..16 {
            let input: [u64; NUM_LANES] = core::array::from_fn(|_| rng.random());
            let mut expected = input;
            keccakf(&mut expected);

            let mut state = Interleaved32State::new();
            for (i, &lane) in input.iter().enumerate() {
                state.xor_lane(i, lane);
            }
            state.permute();
            let computed: [u64; NUM_LANES] = core::array::from_fn(|i| state.lane(i));
            assert_eq!(computed, expected);
        }
    }

    #[test]
    fn complement_bit_matches_wire_position() {
        let mut rng = SmallRng::seed_from_u64(1600);
        for _ in 0..200 {
            let position = rng.random_range(0..STATE_BITS);
            let mut state = Interleaved32State::new();
            state.complement_bit(position);
            let bytes = state.to_bytes();
            for (i, &byte) in bytes.iter().enumerate() {
                let expected = if i == position / 8 { 1 << (position % 8) } else { 0 };
                assert_eq!(byte, expected, "position {position}, byte {i}");
            }
        }
    }
}
