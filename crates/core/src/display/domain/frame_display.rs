use crate::shared::frame::Frame;

/// Domain interface for the live playback surface and its key input.
///
/// `poll_key` blocks up to the given timeout; that wait is also where the
/// windowing backend gets to pump its event queue, so the loop must call it
/// every iteration.
pub trait FrameDisplay: Send {
    /// Renders one frame to the playback surface.
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Waits up to `timeout_ms` for a key press. `None` when no key arrived
    /// within the window.
    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<i32>, Box<dyn std::error::Error>>;

    /// Tears down any windows the display created.
    fn close_all(&mut self);
}
