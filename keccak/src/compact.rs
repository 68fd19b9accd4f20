//! The low-footprint strategy.
//!
//! Lanes are kept as plain words. The permutation loops instead of unrolling, walks the rho-pi
//! orbit with a single temporary, and clocks the round-constant LFSR as it goes rather than
//! reading a table.

use crate::constants::{Lfsr86540, RHO_PI_CHAIN};
use crate::state::{
    KeccakF1600State, copy_lane_bytes, debug_check_lane_bytes, debug_check_lanes, partial_lane,
    read_lane, write_lane,
};
use crate::{NUM_LANES, NUM_ROUNDS, STATE_BITS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompactState {
    lanes: [u64; NUM_LANES],
}

impl Default for CompactState {
    fn default() -> Self {
        Self::new()
    }
}

impl KeccakF1600State for CompactState {
    const NAME: &'static str = "compact";

    fn new() -> Self {
        Self {
            lanes: [0; NUM_LANES],
        }
    }

    fn xor_bytes_in_lane(&mut self, lane: usize, data: &[u8], offset: usize) {
        debug_check_lane_bytes(lane, offset, data.len());
        self.lanes[lane] ^= partial_lane(data, offset);
    }

    fn xor_lanes(&mut self, data: &[u8], lane_count: usize) {
        debug_check_lanes(data.len(), lane_count);
        for (i, lane) in self.lanes[..lane_count].iter_mut().enumerate() {
            *lane ^= read_lane(data, i);
        }
    }

    fn complement_bit(&mut self, position: usize) {
        debug_assert!(position < STATE_BITS);
        self.lanes[position / 64] ^= 1 << (position % 64);
    }

    fn permute(&mut self) {
        keccak_f1600_compact(&mut self.lanes);
    }

    fn extract_bytes_in_lane(&self, lane: usize, out: &mut [u8], offset: usize) {
        debug_check_lane_bytes(lane, offset, out.len());
        copy_lane_bytes(self.lanes[lane], out, offset);
    }

    fn extract_lanes(&self, out: &mut [u8], lane_count: usize) {
        debug_check_lanes(out.len(), lane_count);
        for (i, &lane) in self.lanes[..lane_count].iter().enumerate() {
            write_lane(out, i, lane);
        }
    }
}

fn keccak_f1600_compact(state: &mut [u64; NUM_LANES]) {
    let mut lfsr = Lfsr86540::new();
    let mut bc = [0u64; 5];

    for _ in 0..NUM_ROUNDS {
        // Theta
        for x in 0..5 {
            bc[x] = state[x] ^ state[5 + x] ^ state[10 + x] ^ state[15 + x] ^ state[20 + x];
        }
        for x in 0..5 {
            let d = bc[(x + 4) % 5] ^ bc[(x + 1) % 5].rotate_left(1);
            for y in (0..NUM_LANES).step_by(5) {
                state[y + x] ^= d;
            }
        }

        // Rho and pi
        let mut carried = state[1];
        for &(dest, rotation) in &RHO_PI_CHAIN {
            let displaced = state[dest];
            state[dest] = carried.rotate_left(rotation);
            carried = displaced;
        }

        // Chi
        for y in (0..NUM_LANES).step_by(5) {
            bc.copy_from_slice(&state[y..y + 5]);
            for x in 0..5 {
                state[y + x] = bc[x] ^ (!bc[(x + 1) % 5] & bc[(x + 2) % 5]);
            }
        }

        // Iota
        state[0] ^= lfsr.next_round_constant();
    }
}
