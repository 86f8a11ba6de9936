use crate::annotate::domain::frame_annotator::FrameAnnotator;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

use super::{box_blur, draw};

/// Mean-blur kernel applied to each detected region.
const BLUR_KERNEL: usize = 10;
/// Stroke width of the region outline.
const STROKE_THICKNESS: i32 = 2;
/// Outline color (RGB): blue.
const STROKE_COLOR: [u8; 3] = [0, 0, 255];
/// Label color (RGB): red.
const LABEL_COLOR: [u8; 3] = [255, 0, 0];
/// Text drawn above each region.
const LABEL_TEXT: &str = "License Plate";
/// Label offset up and left of the region's top-left corner, in pixels.
const LABEL_OFFSET: i32 = 3;

/// Draws the plate annotation: obfuscating blur, outline, text label.
///
/// The blur input for every region is the frame content as decoded, never
/// pixels another annotation step already painted, so overlapping regions
/// cannot smear each other's strokes or labels.
#[derive(Default)]
pub struct PlateAnnotator;

impl PlateAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl FrameAnnotator for PlateAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        regions: &[Region],
    ) -> Result<(), Box<dyn std::error::Error>> {
        if regions.is_empty() {
            return Ok(());
        }

        let frame_width = frame.width() as usize;
        let channels = frame.channels() as usize;
        // Snapshot of the frame before any of this frame's annotations land;
        // all region blurs read from it.
        let original = frame.data().to_vec();

        for region in regions {
            let Some(clamped) = region.clamped_to(frame.width(), frame.height()) else {
                continue;
            };
            box_blur::mean_blur_region(
                &original,
                frame.data_mut(),
                frame_width,
                channels,
                &clamped,
                BLUR_KERNEL,
            );
            draw::rect_outline(frame, &clamped, STROKE_COLOR, STROKE_THICKNESS);
            draw::label(
                frame,
                LABEL_TEXT,
                region.x - LABEL_OFFSET,
                region.y - LABEL_OFFSET,
                LABEL_COLOR,
            );
        }
        Ok(())
    }
}
