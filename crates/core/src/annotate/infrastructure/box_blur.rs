//! Separable mean (box) blur over interleaved byte buffers.

use crate::shared::region::Region;

/// In-place separable mean blur over a packed `width × height × channels`
/// buffer. Windows clamp at the buffer border.
///
/// Even kernel sizes follow the usual anchor convention: a window of
/// `[-(k-1)/2, k/2]` around each pixel.
pub fn mean_blur(data: &mut [u8], width: usize, height: usize, channels: usize, kernel: usize) {
    if kernel <= 1 || width == 0 || height == 0 {
        return;
    }
    let left = ((kernel - 1) / 2) as isize;
    let inv = 1.0f32 / kernel as f32;

    let mut temp = vec![0.0f32; width * height * channels];

    // Horizontal pass: data → temp
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for k in 0..kernel {
                    let sx = (x as isize + k as isize - left).clamp(0, (width - 1) as isize)
                        as usize;
                    sum += f32::from(data[(y * width + sx) * channels + c]);
                }
                temp[(y * width + x) * channels + c] = sum * inv;
            }
        }
    }

    // Vertical pass: temp → data
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for k in 0..kernel {
                    let sy = (y as isize + k as isize - left).clamp(0, (height - 1) as isize)
                        as usize;
                    sum += temp[(sy * width + x) * channels + c];
                }
                data[(y * width + x) * channels + c] =
                    (sum * inv).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Blurs `region` of `src` with a `kernel × kernel` mean filter and writes
/// the result into the same rectangle of `dst`.
///
/// `src` and `dst` must describe equally sized `frame_width`-wide interleaved
/// buffers, and `region` must already be clamped to them. Reading from a
/// separate `src` keeps the blur input independent of anything already drawn
/// into `dst`.
pub fn mean_blur_region(
    src: &[u8],
    dst: &mut [u8],
    frame_width: usize,
    channels: usize,
    region: &Region,
    kernel: usize,
) {
    debug_assert_eq!(src.len(), dst.len());
    debug_assert!(region.x >= 0 && region.y >= 0 && region.width > 0 && region.height > 0);

    let rx = region.x as usize;
    let ry = region.y as usize;
    let rw = region.width as usize;
    let rh = region.height as usize;
    let row_bytes = rw * channels;

    let mut roi = vec![0u8; rw * rh * channels];
    for row in 0..rh {
        let s = ((ry + row) * frame_width + rx) * channels;
        roi[row * row_bytes..(row + 1) * row_bytes].copy_from_slice(&src[s..s + row_bytes]);
    }

    mean_blur(&mut roi, rw, rh, channels, kernel);

    for row in 0..rh {
        let d = ((ry + row) * frame_width + rx) * channels;
        dst[d..d + row_bytes].copy_from_slice(&roi[row * row_bytes..(row + 1) * row_bytes]);
    }
}
