//! Many independent states at once. With the `parallel` feature the states are spread over the
//! rayon pool; otherwise they are processed in order.

use kf_maybe_rayon::prelude::*;
use tracing::instrument;

use crate::LANE_BYTES;
use crate::error::{StateAccessError, StateAccessResult};
use crate::state::{KeccakF1600State, check_lanes};

/// Permutes every state in `states`.
#[instrument(level = "debug", skip_all, fields(states = states.len()))]
pub fn permute_all<S: KeccakF1600State>(states: &mut [S]) {
    states.par_iter_mut().for_each(|state| state.permute());
}

/// Runs [`KeccakF1600State::xor_permute_extract`] on every state.
///
/// State `i` absorbs `in_lanes` lanes from `inputs[i * in_lanes * 8..]` and writes `out_lanes`
/// lanes to `outputs[i * out_lanes * 8..]`. Both buffers must be exactly `states.len()` strides
/// long; otherwise [`StateAccessError::BatchLength`] is returned and nothing is touched.
#[instrument(
    level = "debug",
    skip_all,
    fields(states = states.len(), in_lanes = in_lanes, out_lanes = out_lanes)
)]
pub fn xor_permute_extract_all<S: KeccakF1600State>(
    states: &mut [S],
    inputs: &[u8],
    in_lanes: usize,
    outputs: &mut [u8],
    out_lanes: usize,
) -> StateAccessResult<()> {
    let in_stride = in_lanes * LANE_BYTES;
    let out_stride = out_lanes * LANE_BYTES;
    check_lanes(in_stride, in_lanes)?;
    check_lanes(out_stride, out_lanes)?;
    check_batch_len(inputs.len(), states.len() * in_stride)?;
    check_batch_len(outputs.len(), states.len() * out_stride)?;

    if out_lanes == 0 {
        states.par_iter_mut().enumerate().for_each(|(i, state)| {
            let input = &inputs[i * in_stride..(i + 1) * in_stride];
            state.xor_permute_extract(input, in_lanes, &mut [], 0);
        });
    } else {
        states
            .par_iter_mut()
            .zip(outputs.par_chunks_exact_mut(out_stride))
            .enumerate()
            .for_each(|(i, (state, out))| {
                let input = &inputs[i * in_stride..(i + 1) * in_stride];
                state.xor_permute_extract(input, in_lanes, out, out_lanes);
            });
    }
    Ok(())
}

fn check_batch_len(len: usize, required: usize) -> StateAccessResult<()> {
    if len != required {
        return Err(StateAccessError::BatchLength { len, required });
    }
    Ok(())
}
