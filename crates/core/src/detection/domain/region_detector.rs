use crate::shared::frame::GrayFrame;
use crate::shared::region::Region;

/// Multi-scale search parameters handed to the detector on every call.
///
/// These are fixed for the lifetime of a playback run; the loop passes the
/// same values on every invocation regardless of frame content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorConfig {
    /// Per-scale image shrink ratio used by the multi-scale search.
    pub scale_factor: f64,
    /// Overlapping raw candidates required before a region is confirmed.
    pub min_neighbors: i32,
    /// Smallest detectable region edge, in pixels.
    pub min_size: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.2,
            min_neighbors: 5,
            min_size: 25,
        }
    }
}

/// Domain interface for plate-region detection.
///
/// The detection algorithm itself is an external capability backed by a
/// pre-trained classifier artifact; implementations adapt that capability.
/// `&mut self` because backends may keep internal scratch state.
pub trait RegionDetector: Send {
    /// Returns the detected regions for one grayscale frame, in whatever
    /// order the backend produces them. The order carries no meaning.
    fn detect(
        &mut self,
        gray: &GrayFrame,
        config: &DetectorConfig,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}
