pub const CASCADE_MODEL_NAME: &str = "haarcascade_russian_plate_number.xml";
pub const CASCADE_MODEL_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/haarcascades/haarcascade_russian_plate_number.xml";

/// Title of the live playback window.
pub const WINDOW_TITLE: &str = "Video";

/// Key that ends playback early.
pub const QUIT_KEY: u8 = b'q';

/// How long each iteration blocks waiting for a key press, in milliseconds.
/// This wait is also where the display backend pumps its event queue.
pub const KEY_POLL_TIMEOUT_MS: i32 = 25;
