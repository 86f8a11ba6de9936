//! License plate detection and blurring for live video playback.
//!
//! Domain interfaces live under the `domain` submodules; adapters for the
//! external capabilities (ffmpeg decoding, OpenCV cascade detection, highgui
//! display) live under `infrastructure`.

pub mod annotate;
pub mod detection;
pub mod display;
pub mod pipeline;
pub mod shared;
pub mod video;
