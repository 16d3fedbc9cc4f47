//! Chroma averaging and 4-bit index quantization.
//!
//! `chroma_index_of`/`chroma_of_index` play the role of spec.md's
//! external "chroma-index quantization table": a documented black box
//! with domain `[-0.5, 0.5]` and codomain `0..=15`. Its exact tabulation
//! is an open question in the external contract (any two conforming
//! implementations must share the same table to be bit-exact); this
//! crate settles it as a uniform 16-level quantizer over the domain,
//! which is exactly invertible to within one quantization step and
//! requires no literal table to keep in sync across modules.

use crate::block::{BitBlock, YPbPrBlock};
use crate::pixpack::{PB_WIDTH, PR_WIDTH};

const CHROMA_MIN: f32 = -0.5;
const CHROMA_MAX: f32 = 0.5;
const CHROMA_LEVELS: u32 = 1 << PB_WIDTH; // PB_WIDTH == PR_WIDTH == 4

/// Map a Pb or Pr value to its 4-bit index. Inputs outside `[-0.5, 0.5]`
/// are clamped here (the core pipeline does not clamp before calling
/// this).
pub fn chroma_index_of(value: f32) -> u32 {
    let clamped = value.clamp(CHROMA_MIN, CHROMA_MAX);
    #[cfg(feature = "debug-logging")]
    if clamped != value {
        log::warn!("chroma value {value} clamped to {clamped} before indexing");
    }
    let max_index = CHROMA_LEVELS - 1;
    let scaled = (clamped - CHROMA_MIN) / (CHROMA_MAX - CHROMA_MIN) * max_index as f32;
    scaled.trunc() as u32
}

/// Recover an approximate Pb or Pr value from its 4-bit index.
pub fn chroma_of_index(index: u32) -> f32 {
    let max_index = CHROMA_LEVELS - 1;
    let index = index.min(max_index);
    CHROMA_MIN + (index as f32 / max_index as f32) * (CHROMA_MAX - CHROMA_MIN)
}

/// Average the Pb/Pr channels of a block's 4 pixels and quantize them
/// into `bit.pb`/`bit.pr`, leaving the luma fields untouched.
pub fn quantize_chroma(block: YPbPrBlock, bit: &mut BitBlock) {
    let pixels = block.as_array();
    let pb_avg = pixels.iter().map(|p| p.pb).sum::<f32>() / 4.0;
    let pr_avg = pixels.iter().map(|p| p.pr).sum::<f32>() / 4.0;

    bit.pb = chroma_index_of(pb_avg);
    bit.pr = chroma_index_of(pr_avg);
    debug_assert!(bit.pb < (1 << PB_WIDTH));
    debug_assert!(bit.pr < (1 << PR_WIDTH));
}

/// Recover the shared Pb/Pr value for all four pixels in a block from
/// quantized indices, leaving luma untouched.
pub fn dequantize_chroma(bit: &BitBlock, block: &mut YPbPrBlock) {
    let pb = chroma_of_index(bit.pb);
    let pr = chroma_of_index(bit.pr);

    for px in [
        &mut block.top_l,
        &mut block.top_r,
        &mut block.bot_l,
        &mut block.bot_r,
    ] {
        px.pb = pb;
        px.pr = pr;
    }
}
