//! Pipeline driver: wires PPM I/O, color-space conversion, chroma/luma
//! quantization, codeword packing, and COMP40 stream I/O into the two
//! top-level operations, `compress` and `decompress`.

use std::io::{Read, Write};

use log::{debug, info, trace};

use crate::block::{block_grid_dims, block_origin, BitBlock, RgbBlock};
use crate::chroma::{dequantize_chroma, quantize_chroma};
use crate::colorspace::{block_rgb_to_ypbpr, block_ypbpr_to_rgb, truncate_to_sample};
use crate::comp40;
use crate::error::CodecResult;
use crate::luma::{dequantize_luma, quantize_luma};
use crate::pixpack::{pack, unpack};
use crate::ppm::{read_ppm, write_ppm};

/// Read a PPM image from `input`, compress it, and write the COMP40
/// stream to `output`.
pub fn compress<R: Read, W: Write>(input: &mut R, output: &mut W) -> CodecResult<()> {
    let image = read_ppm(input)?;
    info!(
        "compressing {}x{} image ({} blocks)",
        image.width,
        image.height,
        (image.width / 2) * (image.height / 2)
    );

    let (block_rows, block_cols) = block_grid_dims(image.width, image.height);
    let mut codewords = Vec::with_capacity(block_rows * block_cols);

    for block_row in 0..block_rows {
        for block_col in 0..block_cols {
            let (row, col) = block_origin(block_row, block_col);
            let rgb_block = RgbBlock::new(
                image.pixel(row, col),
                image.pixel(row, col + 1),
                image.pixel(row + 1, col),
                image.pixel(row + 1, col + 1),
            );
            trace!("block ({block_row}, {block_col}): color-space conversion");
            let ypbpr_block = block_rgb_to_ypbpr(rgb_block);

            let mut bit = BitBlock::default();
            trace!("block ({block_row}, {block_col}): luma quantization");
            quantize_luma(ypbpr_block, &mut bit);
            trace!("block ({block_row}, {block_col}): chroma quantization");
            quantize_chroma(ypbpr_block, &mut bit);

            trace!("block ({block_row}, {block_col}): pack");
            codewords.push(pack(&bit)?);
        }
    }
    debug!("packed {} codewords", codewords.len());

    comp40::write_header(output, image.width, image.height)?;
    comp40::write_codewords(output, &codewords)?;
    Ok(())
}

/// Read a COMP40 stream from `input`, decompress it, and write the
/// resulting PPM image to `output`.
pub fn decompress<R: Read, W: Write>(input: &mut R, output: &mut W) -> CodecResult<()> {
    let (width, height) = comp40::read_header(input)?;
    let (block_rows, block_cols) = block_grid_dims(width, height);
    info!(
        "decompressing {}x{} image ({} blocks)",
        width,
        height,
        block_rows * block_cols
    );

    let codewords = comp40::read_codewords(input, block_rows * block_cols)?;
    debug!("read {} codewords", codewords.len());

    let mut pixels = vec![crate::block::RgbPixel::default(); width * height];
    let max_sample = 255.0f32;

    for block_row in 0..block_rows {
        for block_col in 0..block_cols {
            let codeword = codewords[block_row * block_cols + block_col];
            trace!("block ({block_row}, {block_col}): unpack");
            let bit = unpack(codeword);

            let mut ypbpr_block = crate::block::YPbPrBlock::default();
            trace!("block ({block_row}, {block_col}): luma dequantization");
            dequantize_luma(&bit, &mut ypbpr_block);
            trace!("block ({block_row}, {block_col}): chroma dequantization");
            dequantize_chroma(&bit, &mut ypbpr_block);

            trace!("block ({block_row}, {block_col}): inverse color-space conversion");
            let rgb_block = block_ypbpr_to_rgb(ypbpr_block, max_sample).map(|px| {
                crate::block::RgbPixel {
                    r: truncate_to_sample(px.r) as f32,
                    g: truncate_to_sample(px.g) as f32,
                    b: truncate_to_sample(px.b) as f32,
                }
            });

            let (row, col) = block_origin(block_row, block_col);
            let corners = rgb_block.as_array();
            pixels[row * width + col] = corners[0];
            pixels[row * width + col + 1] = corners[1];
            pixels[(row + 1) * width + col] = corners[2];
            pixels[(row + 1) * width + col + 1] = corners[3];
        }
    }

    write_ppm(output, width, height, &pixels)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_ppm(width: usize, height: usize, fill: (u8, u8, u8)) -> Vec<u8> {
        let mut data = format!("P6\n{} {}\n255\n", width, height).into_bytes();
        for _ in 0..(width * height) {
            data.push(fill.0);
            data.push(fill.1);
            data.push(fill.2);
        }
        data
    }

    fn rms_error(a: &[u8], b: &[u8]) -> f64 {
        assert_eq!(a.len(), b.len());
        let sum_sq: f64 = a
            .iter()
            .zip(b.iter())
            .map(|(&x, &y)| {
                let diff = x as f64 - y as f64;
                diff * diff
            })
            .sum();
        (sum_sq / a.len() as f64).sqrt() / 255.0
    }

    fn raster_of(ppm: &[u8]) -> Vec<u8> {
        // Skip the three header lines (magic, dims, max sample).
        let mut lines_seen = 0;
        let mut i = 0;
        while lines_seen < 3 {
            if ppm[i] == b'\n' {
                lines_seen += 1;
            }
            i += 1;
        }
        ppm[i..].to_vec()
    }

    #[test]
    fn mid_gray_round_trip_has_low_rms_error() {
        let input = make_ppm(4, 4, (128, 128, 128));
        let mut compressed = Vec::new();
        compress(&mut &input[..], &mut compressed).unwrap();

        let mut restored = Vec::new();
        decompress(&mut &compressed[..], &mut restored).unwrap();

        let original_raster = raster_of(&input);
        let restored_raster = raster_of(&restored);
        assert!(rms_error(&original_raster, &restored_raster) <= 0.02);
    }

    #[test]
    fn odd_dimensions_are_trimmed_before_compression() {
        let input = make_ppm(3, 3, (10, 20, 30));
        let mut compressed = Vec::new();
        compress(&mut &input[..], &mut compressed).unwrap();

        let (width, height) = comp40::read_header(&mut &compressed[..]).unwrap();
        assert_eq!((width, height), (2, 2));
    }

    #[test]
    fn pure_red_round_trip_stays_close() {
        let input = make_ppm(2, 2, (255, 0, 0));
        let mut compressed = Vec::new();
        compress(&mut &input[..], &mut compressed).unwrap();

        let mut restored = Vec::new();
        decompress(&mut &compressed[..], &mut restored).unwrap();

        let restored_raster = raster_of(&restored);
        for &channel in &[restored_raster[0]] {
            assert!((channel as i32 - 255).abs() <= 2);
        }
    }

    #[test]
    fn rejects_truncated_codeword_stream() {
        let input = make_ppm(4, 4, (0, 0, 0));
        let mut compressed = Vec::new();
        compress(&mut &input[..], &mut compressed).unwrap();
        compressed.truncate(compressed.len() - 1);

        let mut restored = Vec::new();
        assert!(decompress(&mut &compressed[..], &mut restored).is_err());
    }
}
