//! RGB <-> YPbPr color-space conversion, using ITU-R BT.601 coefficients.

use crate::block::{RgbBlock, RgbPixel, YPbPrBlock, YPbPrPixel};

/// Convert one pixel from scaled `[0, 1]` RGB to YPbPr.
pub fn rgb_to_ypbpr(px: RgbPixel) -> YPbPrPixel {
    let RgbPixel { r, g, b } = px;
    YPbPrPixel {
        luma: 0.299000 * r + 0.587000 * g + 0.114000 * b,
        pb: -0.168736 * r - 0.331264 * g + 0.500000 * b,
        pr: 0.500000 * r - 0.418688 * g - 0.081312 * b,
    }
}

/// Convert one pixel from YPbPr back to RGB, scaled to `[0, max_sample]`
/// and clamped. Per the codec's external contract, channels are truncated
/// toward zero (not rounded) when stored back into integer samples; this
/// function returns the truncated-but-still-float value so the caller can
/// cast straight to an integer sample.
pub fn ypbpr_to_rgb(px: YPbPrPixel, max_sample: f32) -> RgbPixel {
    let YPbPrPixel { luma, pb, pr } = px;

    let r = luma + 1.402000 * pr;
    let g = luma - 0.344136 * pb - 0.714136 * pr;
    let b = luma + 1.772000 * pb;

    RgbPixel {
        r: scale_and_clamp(r, max_sample),
        g: scale_and_clamp(g, max_sample),
        b: scale_and_clamp(b, max_sample),
    }
}

fn scale_and_clamp(value: f32, max_sample: f32) -> f32 {
    (value * max_sample).clamp(0.0, max_sample)
}

/// Truncate a scaled RGB channel toward zero into an integer sample.
pub fn truncate_to_sample(value: f32) -> u32 {
    value.trunc() as u32
}

pub fn block_rgb_to_ypbpr(block: RgbBlock) -> YPbPrBlock {
    block.map(rgb_to_ypbpr)
}

pub fn block_ypbpr_to_rgb(block: YPbPrBlock, max_sample: f32) -> RgbBlock {
    block.map(|px| ypbpr_to_rgb(px, max_sample))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn round_trip_within_tolerance() {
        let samples = [
            (0.0, 0.0, 0.0),
            (1.0, 1.0, 1.0),
            (0.5, 0.5, 0.5),
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (0.25, 0.75, 0.1),
        ];
        for &(r, g, b) in &samples {
            let rgb = RgbPixel { r, g, b };
            let ypbpr = rgb_to_ypbpr(rgb);
            let back = ypbpr_to_rgb(ypbpr, 1.0);
            assert!(approx(back.r, r, 1e-4), "r: {} vs {}", back.r, r);
            assert!(approx(back.g, g, 1e-4), "g: {} vs {}", back.g, g);
            assert!(approx(back.b, b, 1e-4), "b: {} vs {}", back.b, b);
        }
    }

    #[test]
    fn gray_maps_to_pure_luma() {
        let rgb = RgbPixel {
            r: 0.5,
            g: 0.5,
            b: 0.5,
        };
        let ypbpr = rgb_to_ypbpr(rgb);
        assert!(approx(ypbpr.luma, 0.5, 1e-4));
        assert!(approx(ypbpr.pb, 0.0, 1e-4));
        assert!(approx(ypbpr.pr, 0.0, 1e-4));
    }

    #[test]
    fn truncation_is_toward_zero() {
        assert_eq!(truncate_to_sample(127.999), 127);
        assert_eq!(truncate_to_sample(0.999), 0);
    }

    #[test]
    fn out_of_range_inverse_is_clamped() {
        let extreme = YPbPrPixel {
            luma: 1.0,
            pb: 0.5,
            pr: 0.5,
        };
        let rgb = ypbpr_to_rgb(extreme, 255.0);
        assert!(rgb.r <= 255.0 && rgb.r >= 0.0);
        assert!(rgb.g <= 255.0 && rgb.g >= 0.0);
        assert!(rgb.b <= 255.0 && rgb.b >= 0.0);
    }
}
