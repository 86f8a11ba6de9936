use opencv::core::{Mat, CV_8UC3};
use opencv::prelude::*;
use opencv::{highgui, imgproc};

use crate::display::domain::frame_display::FrameDisplay;
use crate::shared::constants::WINDOW_TITLE;
use crate::shared::frame::Frame;

/// Live playback window backed by OpenCV's highgui.
///
/// The window is created lazily on the first `show`, so a pipeline that
/// fails before its first frame never opens one.
pub struct HighguiDisplay {
    window_created: bool,
}

impl HighguiDisplay {
    pub fn new() -> Self {
        Self {
            window_created: false,
        }
    }
}

impl Default for HighguiDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDisplay for HighguiDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if !self.window_created {
            highgui::named_window(WINDOW_TITLE, highgui::WINDOW_AUTOSIZE)?;
            self.window_created = true;
        }

        let mut rgb = unsafe {
            Mat::new_rows_cols(frame.height() as i32, frame.width() as i32, CV_8UC3)?
        };
        rgb.data_bytes_mut()?.copy_from_slice(frame.data());

        // highgui expects BGR ordering.
        let mut bgr = Mat::default();
        imgproc::cvt_color_def(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR)?;

        highgui::imshow(WINDOW_TITLE, &bgr)?;
        Ok(())
    }

    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<i32>, Box<dyn std::error::Error>> {
        let key = highgui::wait_key(timeout_ms)?;
        Ok((key >= 0).then_some(key))
    }

    fn close_all(&mut self) {
        if self.window_created {
            if let Err(e) = highgui::destroy_all_windows() {
                log::warn!("failed to close display windows: {e}");
            }
            self.window_created = false;
        }
    }
}
