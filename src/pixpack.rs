//! Codeword packer: `BitBlock` <-> 32-bit codeword, plus the byte-level
//! accessors the writer/reader use to define the on-wire byte order.
//!
//! Field widths total exactly 32 bits and are declared once here; every
//! other module that needs a width imports these constants rather than
//! repeating a literal.

use crate::bitpack;
use crate::block::BitBlock;
use crate::error::CodecResult;

pub const A_WIDTH: u32 = 6;
pub const B_WIDTH: u32 = 6;
pub const C_WIDTH: u32 = 6;
pub const D_WIDTH: u32 = 6;
pub const PB_WIDTH: u32 = 4;
pub const PR_WIDTH: u32 = 4;

const BITS_IN_BYTE: u32 = 8;
const CODEWORD_BITS: u32 = 32;

const _WIDTHS_SUM_TO_CODEWORD: () = assert!(
    A_WIDTH + B_WIDTH + C_WIDTH + D_WIDTH + PB_WIDTH + PR_WIDTH == CODEWORD_BITS
);

/// Pack a bit block's fields into a 32-bit codeword.
///
/// Fields are written at increasing `lsb` in the order Pr, Pb, d, c, b, a,
/// which places them (from most to least significant bit) as
/// `a | b | c | d | Pb | Pr`.
pub fn pack(bit: &BitBlock) -> CodecResult<u32> {
    let mut lsb = 0u32;
    let mut word = 0u64;

    word = bitpack::new_u(word, PR_WIDTH, lsb, bit.pr as u64)?;
    lsb += PR_WIDTH;

    word = bitpack::new_u(word, PB_WIDTH, lsb, bit.pb as u64)?;
    lsb += PB_WIDTH;

    word = bitpack::new_s(word, D_WIDTH, lsb, bit.d as i64)?;
    lsb += D_WIDTH;

    word = bitpack::new_s(word, C_WIDTH, lsb, bit.c as i64)?;
    lsb += C_WIDTH;

    word = bitpack::new_s(word, B_WIDTH, lsb, bit.b as i64)?;
    lsb += B_WIDTH;

    word = bitpack::new_u(word, A_WIDTH, lsb, bit.a as u64)?;
    lsb += A_WIDTH;

    debug_assert_eq!(lsb, CODEWORD_BITS);
    Ok(word as u32)
}

/// Unpack a 32-bit codeword into a bit block, reading fields in the same
/// order `pack` wrote them.
pub fn unpack(codeword: u32) -> BitBlock {
    let word = codeword as u64;
    let mut lsb = 0u32;

    let pr = bitpack::get_u(word, PR_WIDTH, lsb) as u32;
    lsb += PR_WIDTH;

    let pb = bitpack::get_u(word, PB_WIDTH, lsb) as u32;
    lsb += PB_WIDTH;

    let d = bitpack::get_s(word, D_WIDTH, lsb) as i32;
    lsb += D_WIDTH;

    let c = bitpack::get_s(word, C_WIDTH, lsb) as i32;
    lsb += C_WIDTH;

    let b = bitpack::get_s(word, B_WIDTH, lsb) as i32;
    lsb += B_WIDTH;

    let a = bitpack::get_u(word, A_WIDTH, lsb) as u32;
    lsb += A_WIDTH;

    debug_assert_eq!(lsb, CODEWORD_BITS);

    BitBlock { a, b, c, d, pb, pr }
}

/// Extract byte `index` of `codeword`; `index == 0` is the least
/// significant byte.
pub fn extract_byte(codeword: u32, index: u32) -> u8 {
    bitpack::get_u(codeword as u64, BITS_IN_BYTE, index * BITS_IN_BYTE) as u8
}

/// Return `codeword` with byte `index` replaced by `byte`.
pub fn store_byte(byte: u8, codeword: u32, index: u32) -> u32 {
    let updated = bitpack::new_u(
        codeword as u64,
        BITS_IN_BYTE,
        index * BITS_IN_BYTE,
        byte as u64,
    )
    .expect("a single byte always fits in an 8-bit field");
    updated as u32
}
