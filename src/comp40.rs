//! COMP40 stream I/O: the compressed-image header and codeword byte
//! stream.

use std::io::{Read, Write};

use byteorder::ReadBytesExt;

use crate::error::{CodecError, CodecResult};
use crate::pixpack::{extract_byte, store_byte};

const HEADER_PREFIX: &str = "COMP40 Compressed image format 2\n";

/// Write the COMP40 header: the literal format prefix, the dimensions,
/// and a trailing newline.
pub fn write_header<W: Write>(output: &mut W, width: usize, height: usize) -> CodecResult<()> {
    write!(output, "{}{} {}\n", HEADER_PREFIX, width, height)?;
    Ok(())
}

/// Parse the COMP40 header, requiring the literal prefix, whitespace-
/// separated decimal width/height, and a single trailing newline.
pub fn read_header<R: Read>(input: &mut R) -> CodecResult<(usize, usize)> {
    let mut prefix = vec![0u8; HEADER_PREFIX.len()];
    input.read_exact(&mut prefix)?;
    if prefix != HEADER_PREFIX.as_bytes() {
        return Err(CodecError::InvalidInput(format!(
            "expected COMP40 header prefix {:?}",
            HEADER_PREFIX
        )));
    }

    let (width, delimiter) = read_decimal(input)?;
    check_byte(delimiter, b' ')?;
    let (height, delimiter) = read_decimal(input)?;
    check_byte(delimiter, b'\n')?;

    Ok((width, height))
}

/// Read a decimal number, returning it along with the single non-digit
/// byte that terminated it (already consumed from `input`).
fn read_decimal<R: Read>(input: &mut R) -> CodecResult<(usize, u8)> {
    let mut value = 0usize;
    let mut saw_digit = false;
    loop {
        let byte = input.read_u8()?;
        match byte {
            b'0'..=b'9' => {
                saw_digit = true;
                value = value * 10 + (byte - b'0') as usize;
            }
            _ if saw_digit => return Ok((value, byte)),
            _ => {
                return Err(CodecError::InvalidInput(
                    "expected a decimal number in COMP40 header".into(),
                ))
            }
        }
    }
}

fn check_byte(byte: u8, expected: u8) -> CodecResult<()> {
    if byte != expected {
        return Err(CodecError::InvalidInput(format!(
            "expected byte {:?} in COMP40 header, got {:?}",
            expected as char, byte as char
        )));
    }
    Ok(())
}

/// Read exactly `num_blocks` codewords, reassembling each from 4 bytes
/// in most-significant-byte-first order.
pub fn read_codewords<R: Read>(input: &mut R, num_blocks: usize) -> CodecResult<Vec<u32>> {
    let mut codewords = Vec::with_capacity(num_blocks);
    for _ in 0..num_blocks {
        let mut codeword = 0u32;
        for index in (0..4u32).rev() {
            let byte = input.read_u8()?;
            codeword = store_byte(byte, codeword, index);
        }
        codewords.push(codeword);
    }
    Ok(codewords)
}

/// Write each codeword as 4 bytes, most-significant byte first.
pub fn write_codewords<W: Write>(output: &mut W, codewords: &[u32]) -> CodecResult<()> {
    let mut buf = Vec::with_capacity(codewords.len() * 4);
    for &codeword in codewords {
        for index in (0..4u32).rev() {
            buf.push(extract_byte(codeword, index));
        }
    }
    output.write_all(&buf)?;
    Ok(())
}
