//! The optimized 64-bit strategy.
//!
//! Each round is written out lane by lane with theta, rho, pi, chi and iota fused, reading from
//! one lane array and writing the other, so pi needs no copy of its own. Two rounds per loop
//! iteration bring the state back to the first array.
//!
//! With `LANE_COMPLEMENTING` the lanes of [`crate::COMPLEMENTED_LANES`] are stored inverted (see
//! [`crate::complement`]) and chi uses the matching AND/OR forms.

use crate::complement::{COMPLEMENT_MASK, apply_pattern};
use crate::constants::ROUND_CONSTANTS;
use crate::state::{
    KeccakF1600State, copy_lane_bytes, debug_check_lane_bytes, debug_check_lanes, partial_lane,
    read_lane, write_lane,
};
use crate::{LANE_BYTES, NUM_LANES, NUM_ROUNDS, STATE_BITS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptimizedState<const LANE_COMPLEMENTING: bool> {
    lanes: [u64; NUM_LANES],
}

/// The optimized strategy without lane complementing.
pub type Optimized = OptimizedState<false>;

/// The optimized strategy with lane complementing.
pub type OptimizedLaneComplementing = OptimizedState<true>;

impl<const LANE_COMPLEMENTING: bool> OptimizedState<LANE_COMPLEMENTING> {
    /// Converts a stored lane to its logical value or back.
    #[inline(always)]
    const fn unmask(lane: usize, value: u64) -> u64 {
        if LANE_COMPLEMENTING {
            value ^ COMPLEMENT_MASK[lane]
        } else {
            value
        }
    }
}

impl<const LANE_COMPLEMENTING: bool> Default for OptimizedState<LANE_COMPLEMENTING> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LANE_COMPLEMENTING: bool> KeccakF1600State for OptimizedState<LANE_COMPLEMENTING> {
    const NAME: &'static str = if LANE_COMPLEMENTING {
        "optimized-lane-complementing"
    } else {
        "optimized"
    };

    fn new() -> Self {
        let mut lanes = [0; NUM_LANES];
        if LANE_COMPLEMENTING {
            apply_pattern(&mut lanes);
        }
        Self { lanes }
    }

    // XOR commutes with complementing, so none of the XOR operations look at the pattern.

    fn xor_bytes_in_lane(&mut self, lane: usize, data: &[u8], offset: usize) {
        debug_check_lane_bytes(lane, offset, data.len());
        self.lanes[lane] ^= partial_lane(data, offset);
    }

    fn xor_lanes(&mut self, data: &[u8], lane_count: usize) {
        debug_check_lanes(data.len(), lane_count);
        let data = &data[..lane_count * LANE_BYTES];
        // SAFETY: every bit pattern is a valid `u64`.
        let (head, words, _) = unsafe { data.align_to::<u64>() };
        if cfg!(target_endian = "little") && head.is_empty() {
            for (lane, word) in self.lanes.iter_mut().zip(words) {
                *lane ^= word;
            }
        } else {
            for (i, &byte) in data.iter().enumerate() {
                self.lanes[i / LANE_BYTES] ^= (byte as u64) << (8 * (i % LANE_BYTES));
            }
        }
    }

    fn complement_bit(&mut self, position: usize) {
        debug_assert!(position < STATE_BITS);
        self.lanes[position / 64] ^= 1 << (position % 64);
    }

    fn permute(&mut self) {
        keccak_f1600::<LANE_COMPLEMENTING>(&mut self.lanes);
    }

    fn extract_bytes_in_lane(&self, lane: usize, out: &mut [u8], offset: usize) {
        debug_check_lane_bytes(lane, offset, out.len());
        copy_lane_bytes(Self::unmask(lane, self.lanes[lane]), out, offset);
    }

    fn extract_lanes(&self, out: &mut [u8], lane_count: usize) {
        debug_check_lanes(out.len(), lane_count);
        for (i, &lane) in self.lanes[..lane_count].iter().enumerate() {
            write_lane(out, i, Self::unmask(i, lane));
        }
    }

    fn xor_permute_extract(
        &mut self,
        input: &[u8],
        in_lanes: usize,
        out: &mut [u8],
        out_lanes: usize,
    ) {
        debug_check_lanes(input.len(), in_lanes);
        debug_check_lanes(out.len(), out_lanes);

        let mut a = self.lanes;
        for (i, lane) in a[..in_lanes].iter_mut().enumerate() {
            *lane ^= read_lane(input, i);
        }
        keccak_f1600::<LANE_COMPLEMENTING>(&mut a);
        self.lanes = a;
        for (i, &lane) in a[..out_lanes].iter().enumerate() {
            write_lane(out, i, Self::unmask(i, lane));
        }
    }
}

/// Applies Keccak-f[1600] to lanes in stored form.
#[inline]
pub(crate) fn keccak_f1600<const LANE_COMPLEMENTING: bool>(a: &mut [u64; NUM_LANES]) {
    let mut e = [0u64; NUM_LANES];
    for round in (0..NUM_ROUNDS).step_by(2) {
        theta_rho_pi_chi_iota::<LANE_COMPLEMENTING>(a, &mut e, ROUND_CONSTANTS[round]);
        theta_rho_pi_chi_iota::<LANE_COMPLEMENTING>(&e, a, ROUND_CONSTANTS[round + 1]);
    }
}

/// One full round from `a` into `e`.
///
/// Output row `y` of chi is fed by the lanes that pi moves there, `a[(x + 3y) % 5, x]` for
/// `x = 0..5`, each rotated by its rho offset.
#[inline(always)]
fn theta_rho_pi_chi_iota<const LANE_COMPLEMENTING: bool>(
    a: &[u64; NUM_LANES],
    e: &mut [u64; NUM_LANES],
    rc: u64,
) {
    let c0 = a[0] ^ a[5] ^ a[10] ^ a[15] ^ a[20];
    let c1 = a[1] ^ a[6] ^ a[11] ^ a[16] ^ a[21];
    let c2 = a[2] ^ a[7] ^ a[12] ^ a[17] ^ a[22];
    let c3 = a[3] ^ a[8] ^ a[13] ^ a[18] ^ a[23];
    let c4 = a[4] ^ a[9] ^ a[14] ^ a[19] ^ a[24];

    let d0 = c4 ^ c1.rotate_left(1);
    let d1 = c0 ^ c2.rotate_left(1);
    let d2 = c1 ^ c3.rotate_left(1);
    let d3 = c2 ^ c4.rotate_left(1);
    let d4 = c3 ^ c0.rotate_left(1);

    // Row 0 from lanes 0, 6, 12, 18, 24.
    let b0 = a[0] ^ d0;
    let b1 = (a[6] ^ d1).rotate_left(44);
    let b2 = (a[12] ^ d2).rotate_left(43);
    let b3 = (a[18] ^ d3).rotate_left(21);
    let b4 = (a[24] ^ d4).rotate_left(14);
    if LANE_COMPLEMENTING {
        e[0] = b0 ^ (b1 | b2) ^ rc;
        e[1] = b1 ^ (!b2 | b3);
        e[2] = b2 ^ (b3 & b4);
        e[3] = b3 ^ (b4 | b0);
        e[4] = b4 ^ (b0 & b1);
    } else {
        e[0] = b0 ^ (!b1 & b2) ^ rc;
        e[1] = b1 ^ (!b2 & b3);
        e[2] = b2 ^ (!b3 & b4);
        e[3] = b3 ^ (!b4 & b0);
        e[4] = b4 ^ (!b0 & b1);
    }

    // Row 1 from lanes 3, 9, 10, 16, 22.
    let b0 = (a[3] ^ d3).rotate_left(28);
    let b1 = (a[9] ^ d4).rotate_left(20);
    let b2 = (a[10] ^ d0).rotate_left(3);
    let b3 = (a[16] ^ d1).rotate_left(45);
    let b4 = (a[22] ^ d2).rotate_left(61);
    if LANE_COMPLEMENTING {
        e[5] = b0 ^ (b1 | b2);
        e[6] = b1 ^ (b2 & b3);
        e[7] = b2 ^ (b3 | !b4);
        e[8] = b3 ^ (b4 | b0);
        e[9] = b4 ^ (b0 & b1);
    } else {
        e[5] = b0 ^ (!b1 & b2);
        e[6] = b1 ^ (!b2 & b3);
        e[7] = b2 ^ (!b3 & b4);
        e[8] = b3 ^ (!b4 & b0);
        e[9] = b4 ^ (!b0 & b1);
    }

    // Row 2 from lanes 1, 7, 13, 19, 20.
    let b0 = (a[1] ^ d1).rotate_left(1);
    let b1 = (a[7] ^ d2).rotate_left(6);
    let b2 = (a[13] ^ d3).rotate_left(25);
    let b3 = (a[19] ^ d4).rotate_left(8);
    let b4 = (a[20] ^ d0).rotate_left(18);
    if LANE_COMPLEMENTING {
        e[10] = b0 ^ (b1 | b2);
        e[11] = b1 ^ (b2 & b3);
        e[12] = b2 ^ (!b3 & b4);
        e[13] = !b3 ^ (b4 | b0);
        e[14] = b4 ^ (b0 & b1);
    } else {
        e[10] = b0 ^ (!b1 & b2);
        e[11] = b1 ^ (!b2 & b3);
        e[12] = b2 ^ (!b3 & b4);
        e[13] = b3 ^ (!b4 & b0);
        e[14] = b4 ^ (!b0 & b1);
    }

    // Row 3 from lanes 4, 5, 11, 17, 23.
    let b0 = (a[4] ^ d4).rotate_left(27);
    let b1 = (a[5] ^ d0).rotate_left(36);
    let b2 = (a[11] ^ d1).rotate_left(10);
    let b3 = (a[17] ^ d2).rotate_left(15);
    let b4 = (a[23] ^ d3).rotate_left(56);
    if LANE_COMPLEMENTING {
        e[15] = b0 ^ (b1 & b2);
        e[16] = b1 ^ (b2 | b3);
        e[17] = b2 ^ (!b3 | b4);
        e[18] = !b3 ^ (b4 & b0);
        e[19] = b4 ^ (b0 | b1);
    } else {
        e[15] = b0 ^ (!b1 & b2);
        e[16] = b1 ^ (!b2 & b3);
        e[17] = b2 ^ (!b3 & b4);
        e[18] = b3 ^ (!b4 & b0);
        e[19] = b4 ^ (!b0 & b1);
    }

    // Row 4 from lanes 2, 8, 14, 15, 21.
    let b0 = (a[2] ^ d2).rotate_left(62);
    let b1 = (a[8] ^ d3).rotate_left(55);
    let b2 = (a[14] ^ d4).rotate_left(39);
    let b3 = (a[15] ^ d0).rotate_left(41);
    let b4 = (a[21] ^ d1).rotate_left(2);
    if LANE_COMPLEMENTING {
        e[20] = b0 ^ (!b1 & b2);
        e[21] = !b1 ^ (b2 | b3);
        e[22] = b2 ^ (b3 & b4);
        e[23] = b3 ^ (b4 | b0);
        e[24] = b4 ^ (b0 & b1);
    } else {
        e[20] = b0 ^ (!b1 & b2);
        e[21] = b1 ^ (!b2 & b3);
        e[22] = b2 ^ (!b3 & b4);
        e[23] = b3 ^ (!b4 & b0);
        e[24] = b4 ^ (!b0 & b1);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use tiny_keccak::keccakf;

    use super::*;
    use crate::complement::COMPLEMENTED_LANES;
    use crate::constants::{RHO_OFFSETS, lane_index};

    #[test]
    fn unrolled_rotations_match_rho_offsets() {
        // (source lane, rotation) in the order the round body reads them.
        #[rustfmt::skip]
        let reads: [(usize, u32); 25] = [
            (0, 0), (6, 44), (12, 43), (18, 21), (24, 14),
            (3, 28), (9, 20), (10, 3), (16, 45), (22, 61),
            (1, 1), (7, 6), (13, 25), (19, 8), (20, 18),
            (4, 27), (5, 36), (11, 10), (17, 15), (23, 56),
            (2, 62), (8, 55), (14, 39), (15, 41), (21, 2),
        ];
        for y in 0..5 {
            for x in 0..5 {
                let source = lane_index(x + 3 * y, x);
                assert_eq!(reads[5 * y + x], (source, RHO_OFFSETS[source]));
            }
        }
    }

    #[test]
    fn test_vs_tiny_keccak() {
        let mut rng = SmallRng::seed_from_u64(64);
        for _ in 0..32 {
            let input: [u64; NUM_LANES] = core::array::from_fn(|_| rng.random());
            let mut expected = input;
            keccakf(&mut expected);

            let mut plain = input;
            keccak_f1600::<false>(&mut plain);
            assert_eq!(plain, expected);

            let mut complemented = input;
            apply_pattern(&mut complemented);
            keccak_f1600::<true>(&mut complemented);
            apply_pattern(&mut complemented);
            assert_eq!(complemented, expected);
        }
    }

    #[test]
    fn complemented_state_starts_with_ones_but_reads_as_zero() {
        let state = OptimizedLaneComplementing::new();
        for (i, &lane) in state.lanes.iter().enumerate() {
            let expected = if COMPLEMENTED_LANES.contains(&i) { u64::MAX } else { 0 };
            assert_eq!(lane, expected);
        }
        assert_eq!(state.to_bytes(), [0u8; 200]);
    }

    #[test]
    fn complement_pattern_survives_a_round() {
        // A round keeps stored and logical values related by the same pattern.
        let mut rng = SmallRng::seed_from_u64(5);
        let logical: [u64; NUM_LANES] = core::array::from_fn(|_| rng.random());
        let mut stored = logical;
        apply_pattern(&mut stored);

        let mut plain_out = [0; NUM_LANES];
        let mut stored_out = [0; NUM_LANES];
        theta_rho_pi_chi_iota::<false>(&logical, &mut plain_out, ROUND_CONSTANTS[0]);
        theta_rho_pi_chi_iota::<true>(&stored, &mut stored_out, ROUND_CONSTANTS[0]);
        apply_pattern(&mut stored_out);
        assert_eq!(stored_out, plain_out);
    }

    #[test]
    fn xor_lanes_is_alignment_independent() {
        let mut rng = SmallRng::seed_from_u64(8);
        let mut buffer = [0u8; 208];
        rng.fill(&mut buffer[..]);

        let mut expected = Optimized::new();
        for lane in 0..NUM_LANES {
            let mut chunk = [0u8; 8];
            chunk.copy_from_slice(&buffer[lane * 8..lane * 8 + 8]);
            expected.xor_bytes_in_lane(lane, &chunk, 0);
        }

        for shift in 0..8 {
            let data = &buffer[shift..shift + 200];
            let mut via_lanes = OptimizedLaneComplementing::new();
            via_lanes.xor_lanes(data, NUM_LANES);
            let mut via_bytes = OptimizedLaneComplementing::new();
            for lane in 0..NUM_LANES {
                via_bytes.xor_bytes_in_lane(lane, &data[lane * 8..lane * 8 + 8], 0);
            }
            assert_eq!(via_lanes.to_bytes(), via_bytes.to_bytes(), "shift {shift}");
            assert_eq!(&via_lanes.to_bytes()[..], data);
        }
        assert_eq!(&expected.to_bytes()[..], &buffer[..200]);
    }
}
