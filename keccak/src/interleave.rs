//! Bit interleaving: a 64-bit lane `L` is stored as two 32-bit halves, `even` holding bits
//! `L[0], L[2], ..., L[62]` and `odd` holding bits `L[1], L[3], ..., L[63]`. A 64-bit rotation then
//! becomes two 32-bit rotations, which is what makes the 32-bit strategy possible.

/// Splits a lane into `[even, odd]` halves by a cascade of delta swaps.
#[inline]
#[must_use]
pub const fn to_bit_interleaving(lane: u64) -> [u32; 2] {
    let mut x = lane;
    x = delta_swap(x, 1, 0x2222_2222_2222_2222);
    x = delta_swap(x, 2, 0x0C0C_0C0C_0C0C_0C0C);
    x = delta_swap(x, 4, 0x00F0_00F0_00F0_00F0);
    x = delta_swap(x, 8, 0x0000_FF00_0000_FF00);
    x = delta_swap(x, 16, 0x0000_0000_FFFF_0000);
    [x as u32, (x >> 32) as u32]
}

/// Inverse of [`to_bit_interleaving`].
#[inline]
#[must_use]
pub const fn from_bit_interleaving([even, odd]: [u32; 2]) -> u64 {
    let mut x = (even as u64) | ((odd as u64) << 32);
    x = delta_swap(x, 16, 0x0000_0000_FFFF_0000);
    x = delta_swap(x, 8, 0x0000_FF00_0000_FF00);
    x = delta_swap(x, 4, 0x00F0_00F0_00F0_00F0);
    x = delta_swap(x, 2, 0x0C0C_0C0C_0C0C_0C0C);
    x = delta_swap(x, 1, 0x2222_2222_2222_2222);
    x
}

/// Swaps the bits selected by `mask` with the bits `shift` positions above them.
#[inline(always)]
const fn delta_swap(x: u64, shift: u32, mask: u64) -> u64 {
    let t = (x ^ (x >> shift)) & mask;
    x ^ t ^ (t << shift)
}

/// Bit-by-bit form of [`to_bit_interleaving`], used to derive the interleaved round constants.
#[must_use]
pub const fn to_bit_interleaving_const(lane: u64) -> [u32; 2] {
    let mut halves = [0u32; 2];
    let mut i = 0;
    while i < 64 {
        let bit = ((lane >> i) & 1) as u32;
        halves[i % 2] |= bit << (i / 2);
        i += 1;
    }
    halves
}

/// Bit-by-bit form of [`from_bit_interleaving`].
#[must_use]
pub const fn from_bit_interleaving_const(halves: [u32; 2]) -> u64 {
    let mut lane = 0u64;
    let mut i = 0;
    while i < 64 {
        let bit = ((halves[i % 2] >> (i / 2)) & 1) as u64;
        lane |= bit << i;
        i += 1;
    }
    lane
}

/// Rotates the interleaved lane left by `offset` bits of the underlying 64-bit lane.
///
/// An even amount rotates both halves by `offset / 2`. An odd amount also swaps the halves: the
/// new even half is the old odd half rotated by `(offset + 1) / 2`, the new odd half is the old
/// even half rotated by `(offset - 1) / 2`.
#[inline(always)]
#[must_use]
pub const fn rotl64_interleaved([even, odd]: [u32; 2], offset: u32) -> [u32; 2] {
    debug_assert!(offset < 64);
    if offset % 2 == 0 {
        [even.rotate_left(offset / 2), odd.rotate_left(offset / 2)]
    } else {
        [odd.rotate_left(offset.div_ceil(2)), even.rotate_left(offset / 2)]
    }
}
