//! Rectangle outlines and text labels drawn directly into a frame.

use crate::shared::frame::Frame;
use crate::shared::region::Region;

use super::font;

/// Pixel scale applied to label glyphs.
const LABEL_SCALE: usize = 2;
/// Blank columns between glyphs, before scaling.
const GLYPH_SPACING: usize = 1;

/// Draws a `thickness`-px outline along the inside of the region boundary.
///
/// The stroke never spills outside the region: it covers the outermost ring
/// of the region's own pixels. Portions of the region outside the frame are
/// clipped.
pub fn rect_outline(frame: &mut Frame, region: &Region, color: [u8; 3], thickness: i32) {
    let Some(r) = region.clamped_to(frame.width(), frame.height()) else {
        return;
    };
    let t = thickness.clamp(0, r.width.min(r.height));
    if t == 0 {
        return;
    }

    let (x1, y1) = (r.x as usize, r.y as usize);
    let (x2, y2) = ((r.x + r.width) as usize, (r.y + r.height) as usize); // exclusive
    let t = t as usize;

    let mut arr = frame.as_ndarray_mut();
    let mut paint = |x: usize, y: usize| {
        for (c, &v) in color.iter().enumerate() {
            arr[[y, x, c]] = v;
        }
    };

    // Top and bottom bands, full width.
    for y in (y1..y1 + t).chain(y2 - t..y2) {
        for x in x1..x2 {
            paint(x, y);
        }
    }
    // Left and right bands, between the horizontal ones.
    for y in y1 + t..y2 - t {
        for x in (x1..x1 + t).chain(x2 - t..x2) {
            paint(x, y);
        }
    }
}

/// Draws `text` with its bottom-left corner at (`x`, `baseline_y`).
///
/// Glyph pixels falling outside the frame are clipped; there is no layout
/// or collision handling beyond that.
pub fn label(frame: &mut Frame, text: &str, x: i32, baseline_y: i32, color: [u8; 3]) {
    let scale = LABEL_SCALE as i32;
    let advance = ((font::GLYPH_WIDTH + GLYPH_SPACING) * LABEL_SCALE) as i32;
    let top = baseline_y - (font::GLYPH_HEIGHT * LABEL_SCALE) as i32;
    let (fw, fh) = (frame.width() as i32, frame.height() as i32);

    let mut arr = frame.as_ndarray_mut();
    let mut pen_x = x;
    for ch in text.chars() {
        if let Some(rows) = font::glyph(ch) {
            for (gy, row) in rows.iter().enumerate() {
                for gx in 0..font::GLYPH_WIDTH {
                    if row & (1 << (font::GLYPH_WIDTH - 1 - gx)) == 0 {
                        continue;
                    }
                    for sy in 0..scale {
                        for sx in 0..scale {
                            let px = pen_x + gx as i32 * scale + sx;
                            let py = top + gy as i32 * scale + sy;
                            if px < 0 || py < 0 || px >= fw || py >= fh {
                                continue;
                            }
                            for (c, &v) in color.iter().enumerate() {
                                arr[[py as usize, px as usize, c]] = v;
                            }
                        }
                    }
                }
            }
        }
        pen_x += advance;
    }
}

/// Rendered pixel width of `text`.
pub fn label_width(text: &str) -> usize {
    text.chars().count() * (font::GLYPH_WIDTH + GLYPH_SPACING) * LABEL_SCALE
}

/// Rendered pixel height of any label.
pub fn label_height() -> usize {
    font::GLYPH_HEIGHT * LABEL_SCALE
}
