//! 2x2 Hadamard-style DCT on luma, and quantization of its coefficients.

use crate::block::{BitBlock, YPbPrBlock};
use crate::pixpack::{A_WIDTH, B_WIDTH, C_WIDTH, D_WIDTH};

const A_MIN: f32 = 0.0;
const A_MAX: f32 = 1.0;
const BCD_MIN: f32 = -0.3;
const BCD_MAX: f32 = 0.3;

/// The four DCT coefficients for one block's luma values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Cosine {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
}

fn forward_dct(block: YPbPrBlock) -> Cosine {
    let y1 = block.top_l.luma;
    let y2 = block.top_r.luma;
    let y3 = block.bot_l.luma;
    let y4 = block.bot_r.luma;

    Cosine {
        a: (y4 + y3 + y2 + y1) / 4.0,
        b: (y4 + y3 - y2 - y1) / 4.0,
        c: (y4 - y3 + y2 - y1) / 4.0,
        d: (y4 - y3 - y2 + y1) / 4.0,
    }
}

fn inverse_dct(cosine: Cosine, block: &mut YPbPrBlock) {
    let Cosine { a, b, c, d } = cosine;
    block.top_l.luma = a - b - c + d;
    block.top_r.luma = a - b + c - d;
    block.bot_l.luma = a + b - c - d;
    block.bot_r.luma = a + b + c + d;
}

fn fit_range(value: f32, min: f32, max: f32) -> f32 {
    value.clamp(min, max)
}

fn quantize_a(value: f32, width: u32) -> u32 {
    let max = (1u64 << width) - 1;
    let clamped = fit_range(value, A_MIN, A_MAX);
    #[cfg(feature = "debug-logging")]
    if clamped != value {
        log::warn!("DC luma coefficient {value} clamped to {clamped}");
    }
    (clamped * max as f32).trunc() as u32
}

fn dequantize_a(value: u32, width: u32) -> f32 {
    let max = (1u64 << width) - 1;
    let scaled = value as f32 / max as f32;
    fit_range(scaled, A_MIN, A_MAX)
}

fn quantize_bcd(value: f32, width: u32) -> i32 {
    let max = (1u64 << (width - 1)) - 1;
    let clamped = fit_range(value, BCD_MIN, BCD_MAX);
    #[cfg(feature = "debug-logging")]
    if clamped != value {
        log::warn!("AC gradient coefficient {value} clamped to {clamped}");
    }
    (clamped * max as f32 / BCD_MAX).trunc() as i32
}

fn dequantize_bcd(value: i32, width: u32) -> f32 {
    let max = (1u64 << (width - 1)) - 1;
    let scaled = value as f32 * BCD_MAX / max as f32;
    fit_range(scaled, BCD_MIN, BCD_MAX)
}

/// Run the forward DCT on `block`'s luma values and quantize the
/// coefficients into `bit.a`/`bit.b`/`bit.c`/`bit.d`, leaving the chroma
/// fields untouched.
pub fn quantize_luma(block: YPbPrBlock, bit: &mut BitBlock) {
    let cosine = forward_dct(block);

    bit.a = quantize_a(cosine.a, A_WIDTH);
    bit.b = quantize_bcd(cosine.b, B_WIDTH);
    bit.c = quantize_bcd(cosine.c, C_WIDTH);
    bit.d = quantize_bcd(cosine.d, D_WIDTH);
}

/// Recover luma values for all four pixels in a block from quantized DCT
/// coefficients, leaving chroma untouched.
pub fn dequantize_luma(bit: &BitBlock, block: &mut YPbPrBlock) {
    let cosine = Cosine {
        a: dequantize_a(bit.a, A_WIDTH),
        b: dequantize_bcd(bit.b, B_WIDTH),
        c: dequantize_bcd(bit.c, C_WIDTH),
        d: dequantize_bcd(bit.d, D_WIDTH),
    };
    inverse_dct(cosine, block);
}
