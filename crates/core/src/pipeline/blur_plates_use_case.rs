use std::path::Path;

use crate::annotate::domain::frame_annotator::FrameAnnotator;
use crate::detection::domain::region_detector::{DetectorConfig, RegionDetector};
use crate::display::domain::frame_display::FrameDisplay;
use crate::shared::constants::{KEY_POLL_TIMEOUT_MS, QUIT_KEY};
use crate::video::domain::video_reader::VideoReader;

/// What a playback run did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Frames annotated and handed to the display.
    pub frames_presented: usize,
    /// True when the quit key ended playback before the stream ran out.
    pub interrupted: bool,
}

/// The frame-processing loop: read → detect → annotate → present → poll.
///
/// Single-threaded and blocking; the per-iteration key poll is the only
/// cancellation point. End-of-stream and a mid-stream read failure both end
/// playback gracefully and are not distinguished beyond the log text.
pub struct BlurPlatesUseCase {
    reader: Box<dyn VideoReader>,
    detector: Box<dyn RegionDetector>,
    annotator: Box<dyn FrameAnnotator>,
    display: Box<dyn FrameDisplay>,
    config: DetectorConfig,
}

impl BlurPlatesUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        detector: Box<dyn RegionDetector>,
        annotator: Box<dyn FrameAnnotator>,
        display: Box<dyn FrameDisplay>,
    ) -> Self {
        Self {
            reader,
            detector,
            annotator,
            display,
            config: DetectorConfig::default(),
        }
    }

    /// Runs playback to completion.
    ///
    /// A failed open returns before the display is ever touched. Once the
    /// loop has been entered, the reader and the display are released
    /// exactly once on every path out of it, including propagated detector
    /// and display errors.
    pub fn execute(&mut self, input: &Path) -> Result<PlaybackReport, Box<dyn std::error::Error>> {
        let metadata = self
            .reader
            .open(input)
            .map_err(|e| format!("could not open video {}: {e}", input.display()))?;
        log::info!(
            "opened {} ({}x{}, {:.1} fps, {} frames, codec {})",
            input.display(),
            metadata.width,
            metadata.height,
            metadata.fps,
            metadata.total_frames,
            metadata.codec
        );

        let result = self.run_loop();
        self.reader.close();
        self.display.close_all();

        if let Ok(report) = &result {
            log::info!(
                "playback finished: {} frames presented{}",
                report.frames_presented,
                if report.interrupted {
                    ", interrupted by user"
                } else {
                    ""
                }
            );
        }
        result
    }

    fn run_loop(&mut self) -> Result<PlaybackReport, Box<dyn std::error::Error>> {
        let Self {
            reader,
            detector,
            annotator,
            display,
            config,
        } = self;

        let mut frames = reader.frames();
        let mut presented = 0usize;

        let interrupted = loop {
            let mut frame = match frames.next() {
                Some(Ok(frame)) => frame,
                Some(Err(e)) => {
                    log::warn!("failed to read video frame: {e}");
                    break false;
                }
                None => {
                    log::info!("end of video stream");
                    break false;
                }
            };

            let gray = frame.to_gray();
            let regions = detector.detect(&gray, config)?;
            if !regions.is_empty() {
                log::debug!("frame {}: {} plate region(s)", frame.index(), regions.len());
            }

            annotator.annotate(&mut frame, &regions)?;
            display.show(&frame)?;
            presented += 1;

            if let Some(key) = display.poll_key(KEY_POLL_TIMEOUT_MS)? {
                if (key & 0xff) as u8 == QUIT_KEY {
                    log::info!("quit key pressed");
                    break true;
                }
            }
        };

        Ok(PlaybackReport {
            frames_presented: presented,
            interrupted,
        })
    }
}
