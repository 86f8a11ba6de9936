use std::path::Path;

use opencv::core::{Mat, Size, Vector, CV_8UC1};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::region_detector::{DetectorConfig, RegionDetector};
use crate::shared::frame::GrayFrame;
use crate::shared::region::Region;

/// Pre-trained cascade classifier backend (OpenCV objdetect).
///
/// The classifier artifact is loaded once at construction; after that,
/// detection is a pure function of the grayscale input and the fixed
/// configuration.
pub struct CascadeClassifierDetector {
    classifier: CascadeClassifier,
}

// Safety: the detector is driven from one thread at a time; the classifier's
// internal pointers are never shared across threads.
unsafe impl Send for CascadeClassifierDetector {}

impl CascadeClassifierDetector {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let classifier = CascadeClassifier::new(&model_path.to_string_lossy())?;
        if classifier.empty()? {
            return Err(format!(
                "cascade model at {} loaded empty",
                model_path.display()
            )
            .into());
        }
        Ok(Self { classifier })
    }
}

impl RegionDetector for CascadeClassifierDetector {
    fn detect(
        &mut self,
        gray: &GrayFrame,
        config: &DetectorConfig,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        let mut mat = unsafe {
            Mat::new_rows_cols(gray.height() as i32, gray.width() as i32, CV_8UC1)?
        };
        mat.data_bytes_mut()?.copy_from_slice(gray.data());

        let min = config.min_size as i32;
        let mut hits = Vector::<opencv::core::Rect>::new();
        self.classifier.detect_multi_scale(
            &mat,
            &mut hits,
            config.scale_factor,
            config.min_neighbors,
            0,
            Size::new(min, min),
            // No upper size bound: a zero size disables the max-size filter.
            Size::new(0, 0),
        )?;

        Ok(hits
            .iter()
            .map(|r| Region::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_errors() {
        let result = CascadeClassifierDetector::new(Path::new("/nonexistent/cascade.xml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_bogus_model_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("not_a_cascade.xml");
        std::fs::write(&path, b"<not-a-cascade/>").unwrap();
        assert!(CascadeClassifierDetector::new(&path).is_err());
    }
}
