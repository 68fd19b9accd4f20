//! Lane complementing.
//!
//! A state kept in this representation stores the lanes of [`COMPLEMENTED_LANES`] inverted. With
//! that pattern at the start of every round, the chi step can be written with AND/OR and a single
//! NOT per row instead of five AND-NOTs, and the pattern at the end of the round is the same one.
//! Nothing outside the state type ever sees stored lanes: extraction undoes the pattern.

use crate::NUM_LANES;

/// Lanes `(1,0)`, `(2,0)`, `(3,1)`, `(2,2)`, `(2,3)`, `(0,4)` in linear order.
pub const COMPLEMENTED_LANES: [usize; 6] = [1, 2, 8, 12, 17, 20];

const fn mask() -> [u64; NUM_LANES] {
    let mut mask = [0; NUM_LANES];
    let mut i = 0;
    while i < COMPLEMENTED_LANES.len() {
        mask[COMPLEMENTED_LANES[i]] = u64::MAX;
        i += 1;
    }
    mask
}

/// `u64::MAX` on complemented lanes, `0` elsewhere. XOR with it converts between logical and
/// stored form in either direction.
pub(crate) const COMPLEMENT_MASK: [u64; NUM_LANES] = mask();

/// Toggles the complement pattern over a full lane array.
#[inline]
pub(crate) fn apply_pattern(lanes: &mut [u64; NUM_LANES]) {
    for &lane in &COMPLEMENTED_LANES {
        lanes[lane] = !lanes[lane];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_matches_lane_list() {
        let set = COMPLEMENT_MASK
            .iter()
            .enumerate()
            .filter(|&(_, &m)| m == u64::MAX)
            .map(|(i, _)| i);
        assert!(set.eq(COMPLEMENTED_LANES.iter().copied()));
        assert_eq!(COMPLEMENT_MASK.iter().filter(|&&m| m == 0).count(), 19);
    }

    #[test]
    fn pattern_is_an_involution() {
        let mut lanes: [u64; NUM_LANES] = core::array::from_fn(|i| (i as u64) * 0x0101_0101);
        let original = lanes;
        apply_pattern(&mut lanes);
        for i in 0..NUM_LANES {
            assert_eq!(lanes[i], original[i] ^ COMPLEMENT_MASK[i]);
        }
        apply_pattern(&mut lanes);
        assert_eq!(lanes, original);
    }
}
