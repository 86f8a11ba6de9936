use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Reads frames from a video source in decode order.
///
/// Implementations own the I/O details (container, codec); the pipeline
/// only ever sees `Frame` and `VideoMetadata`. A frame item of `Err` means
/// the stream broke mid-decode; iterator exhaustion means the stream ended.
/// The loop treats both as the end of playback.
pub trait VideoReader: Send {
    /// Opens a video file and returns its metadata.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>>;

    /// Returns an iterator over frames in decode order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the reader.
    fn close(&mut self);
}
