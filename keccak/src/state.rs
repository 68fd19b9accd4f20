//! The contract every strategy implements: the state-access primitives a sponge or duplex layer
//! calls once per block, plus the permutation itself.

use crate::error::{StateAccessError, StateAccessResult};
use crate::{LANE_BYTES, NUM_LANES, STATE_BITS, STATE_BYTES};

/// A Keccak-f[1600] state in some internal representation.
///
/// The externally visible form is always the 200-byte wire layout: lane `i` occupies bytes
/// `8 * i..8 * i + 8`, little-endian. Every implementation produces identical bytes for identical
/// call sequences, whatever it keeps internally.
///
/// The plain methods are the hot path. Their preconditions (stated on each method) are checked by
/// `debug_assert!` only; an out-of-range slice index still panics in release builds. The `try_*`
/// methods validate everything first and leave the state untouched on error.
pub trait KeccakF1600State: Clone + Send + Sync {
    /// Short identifier of the strategy, for logs and benchmark names.
    const NAME: &'static str;

    /// A state holding the all-zero logical value.
    fn new() -> Self;

    /// Resets to the all-zero logical value.
    fn initialize(&mut self) {
        *self = Self::new();
    }

    /// XORs `data` into bytes `offset..offset + data.len()` of lane `lane`.
    ///
    /// Requires `lane < 25` and `offset + data.len() <= 8`.
    fn xor_bytes_in_lane(&mut self, lane: usize, data: &[u8], offset: usize);

    /// XORs the first `lane_count` whole lanes of `data` into the state.
    ///
    /// Requires `lane_count <= 25` and `data.len() >= 8 * lane_count`. `data` may have any
    /// alignment.
    fn xor_lanes(&mut self, data: &[u8], lane_count: usize);

    /// Flips bit `position` of the wire form (bit `position % 8` of byte `position / 8`).
    ///
    /// Requires `position < 1600`.
    fn complement_bit(&mut self, position: usize);

    /// Applies the 24 rounds of Keccak-f[1600].
    fn permute(&mut self);

    /// Copies bytes `offset..offset + out.len()` of lane `lane` into `out`.
    ///
    /// Requires `lane < 25` and `offset + out.len() <= 8`.
    fn extract_bytes_in_lane(&self, lane: usize, out: &mut [u8], offset: usize);

    /// Copies the first `lane_count` lanes into `out`.
    ///
    /// Requires `lane_count <= 25` and `out.len() >= 8 * lane_count`.
    fn extract_lanes(&self, out: &mut [u8], lane_count: usize);

    /// `xor_lanes(input, in_lanes)`, then `permute()`, then `extract_lanes(out, out_lanes)`.
    ///
    /// Strategies override this to skip intermediate copies; the result never differs.
    fn xor_permute_extract(
        &mut self,
        input: &[u8],
        in_lanes: usize,
        out: &mut [u8],
        out_lanes: usize,
    ) {
        self.xor_lanes(input, in_lanes);
        self.permute();
        self.extract_lanes(out, out_lanes);
    }

    /// A state whose logical value is `bytes`.
    fn from_bytes(bytes: &[u8; STATE_BYTES]) -> Self {
        let mut state = Self::new();
        state.xor_lanes(bytes, NUM_LANES);
        state
    }

    /// The logical value in wire form.
    fn to_bytes(&self) -> [u8; STATE_BYTES] {
        let mut bytes = [0; STATE_BYTES];
        self.extract_lanes(&mut bytes, NUM_LANES);
        bytes
    }

    fn try_xor_bytes_in_lane(
        &mut self,
        lane: usize,
        data: &[u8],
        offset: usize,
    ) -> StateAccessResult<()> {
        check_lane_bytes(lane, offset, data.len())?;
        self.xor_bytes_in_lane(lane, data, offset);
        Ok(())
    }

    fn try_xor_lanes(&mut self, data: &[u8], lane_count: usize) -> StateAccessResult<()> {
        check_lanes(data.len(), lane_count)?;
        self.xor_lanes(data, lane_count);
        Ok(())
    }

    fn try_complement_bit(&mut self, position: usize) -> StateAccessResult<()> {
        if position >= STATE_BITS {
            return Err(StateAccessError::BitPosition(position));
        }
        self.complement_bit(position);
        Ok(())
    }

    fn try_extract_bytes_in_lane(
        &self,
        lane: usize,
        out: &mut [u8],
        offset: usize,
    ) -> StateAccessResult<()> {
        check_lane_bytes(lane, offset, out.len())?;
        self.extract_bytes_in_lane(lane, out, offset);
        Ok(())
    }

    fn try_extract_lanes(&self, out: &mut [u8], lane_count: usize) -> StateAccessResult<()> {
        check_lanes(out.len(), lane_count)?;
        self.extract_lanes(out, lane_count);
        Ok(())
    }

    fn try_xor_permute_extract(
        &mut self,
        input: &[u8],
        in_lanes: usize,
        out: &mut [u8],
        out_lanes: usize,
    ) -> StateAccessResult<()> {
        check_lanes(input.len(), in_lanes)?;
        check_lanes(out.len(), out_lanes)?;
        self.xor_permute_extract(input, in_lanes, out, out_lanes);
        Ok(())
    }
}

pub(crate) fn check_lane_bytes(lane: usize, offset: usize, length: usize) -> StateAccessResult<()> {
    if lane >= NUM_LANES {
        return Err(StateAccessError::LanePosition(lane));
    }
    if offset >= LANE_BYTES || length > LANE_BYTES - offset {
        return Err(StateAccessError::LaneByteRange { offset, length });
    }
    Ok(())
}

pub(crate) fn check_lanes(len: usize, lane_count: usize) -> StateAccessResult<()> {
    if lane_count > NUM_LANES {
        return Err(StateAccessError::LaneCount(lane_count));
    }
    let required = lane_count * LANE_BYTES;
    if len < required {
        return Err(StateAccessError::BufferTooShort { len, required });
    }
    Ok(())
}

#[inline(always)]
pub(crate) fn debug_check_lane_bytes(lane: usize, offset: usize, length: usize) {
    debug_assert!(
        check_lane_bytes(lane, offset, length).is_ok(),
        "lane {lane}: {length} bytes at offset {offset} do not fit"
    );
}

#[inline(always)]
pub(crate) fn debug_check_lanes(len: usize, lane_count: usize) {
    debug_assert!(
        check_lanes(len, lane_count).is_ok(),
        "{lane_count} lanes do not fit the state or a {len}-byte buffer"
    );
}

/// Reads lane `index` of a wire-form buffer.
#[inline(always)]
pub(crate) fn read_lane(data: &[u8], index: usize) -> u64 {
    let mut bytes = [0; LANE_BYTES];
    bytes.copy_from_slice(&data[index * LANE_BYTES..(index + 1) * LANE_BYTES]);
    u64::from_le_bytes(bytes)
}

/// Writes `lane` as lane `index` of a wire-form buffer.
#[inline(always)]
pub(crate) fn write_lane(out: &mut [u8], index: usize, lane: u64) {
    out[index * LANE_BYTES..(index + 1) * LANE_BYTES].copy_from_slice(&lane.to_le_bytes());
}

/// Places `data` at byte `offset` of an otherwise zero lane.
#[inline(always)]
pub(crate) fn partial_lane(data: &[u8], offset: usize) -> u64 {
    let mut bytes = [0; LANE_BYTES];
    bytes[offset..offset + data.len()].copy_from_slice(data);
    u64::from_le_bytes(bytes)
}

/// Copies bytes `offset..offset + out.len()` of `lane` into `out`.
#[inline(always)]
pub(crate) fn copy_lane_bytes(lane: u64, out: &mut [u8], offset: usize) {
    let len = out.len();
    out.copy_from_slice(&lane.to_le_bytes()[offset..offset + len]);
}
