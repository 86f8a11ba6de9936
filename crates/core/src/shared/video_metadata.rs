#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Frame count as reported by the container; 0 when unknown.
    pub total_frames: usize,
    pub codec: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let meta = VideoMetadata {
            width: 1920,
            height: 1080,
            fps: 30.0,
            total_frames: 900,
            codec: "h264".to_string(),
        };
        assert_eq!(meta.width, 1920);
        assert_eq!(meta.height, 1080);
        assert_eq!(meta.total_frames, 900);
        assert_eq!(meta.codec, "h264");
    }

    #[test]
    fn test_clone_compares_equal() {
        let meta = VideoMetadata {
            width: 640,
            height: 480,
            fps: 24.0,
            total_frames: 0,
            codec: "mpeg4".to_string(),
        };
        assert_eq!(meta.clone(), meta);
    }
}
