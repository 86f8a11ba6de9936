use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for drawing the per-region annotation onto a frame.
///
/// Implementations mutate the frame in place and must leave every pixel
/// untouched when `regions` is empty.
pub trait FrameAnnotator: Send {
    fn annotate(
        &self,
        frame: &mut Frame,
        regions: &[Region],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
