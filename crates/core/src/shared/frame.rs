use ndarray::{ArrayView3, ArrayViewMut3};

/// A decoded video frame: contiguous RGB bytes in row-major order.
///
/// Pixel format conversion happens at the I/O boundaries; everything past
/// the reader works on tightly packed `height × width × channels` bytes and
/// mutates the frame in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Position of this frame in decode order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Reduces the frame to single-channel luminance, the input format the
    /// detector expects.
    ///
    /// Integer BT.601 weighting: `y = (299 R + 587 G + 114 B + 500) / 1000`.
    pub fn to_gray(&self) -> GrayFrame {
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize);
        for px in self.data.chunks_exact(self.channels as usize) {
            let y = (299 * u32::from(px[0]) + 587 * u32::from(px[1]) + 114 * u32::from(px[2])
                + 500)
                / 1000;
            data.push(y as u8);
        }
        GrayFrame {
            data,
            width: self.width,
            height: self.height,
        }
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

/// Single-channel luminance view of one frame.
///
/// Recomputed every iteration; carries no identity across frames.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl GrayFrame {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(r: u8, g: u8, b: u8) -> Frame {
        let data: Vec<u8> = [r, g, b].repeat(4); // 2x2
        Frame::new(data, 2, 2, 3, 0)
    }

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_data_mut_allows_modification() {
        let mut frame = Frame::new(vec![0u8; 6], 2, 1, 3, 0);
        frame.data_mut()[0] = 255;
        assert_eq!(frame.data()[0], 255);
    }

    #[test]
    fn test_clone_is_independent() {
        let frame = Frame::new(vec![100u8; 12], 2, 2, 3, 0);
        let mut cloned = frame.clone();
        cloned.data_mut()[0] = 0;
        assert_eq!(frame.data()[0], 100);
        assert_eq!(cloned.data()[0], 0);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 3, 0);
    }

    #[test]
    fn test_as_ndarray_shape_and_access() {
        let mut data = vec![0u8; 12];
        data[6] = 255; // row=1, col=0, R
        let frame = Frame::new(data, 2, 2, 3, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 2, 3]);
        assert_eq!(arr[[1, 0, 0]], 255);
        assert_eq!(arr[[1, 0, 1]], 0);
    }

    #[test]
    fn test_as_ndarray_mut_modification() {
        let mut frame = Frame::new(vec![0u8; 12], 2, 2, 3, 0);
        {
            let mut arr = frame.as_ndarray_mut();
            arr[[0, 1, 2]] = 128;
        }
        assert_eq!(frame.as_ndarray()[[0, 1, 2]], 128);
    }

    #[test]
    fn test_to_gray_dimensions() {
        let frame = Frame::new(vec![0u8; 4 * 2 * 3], 4, 2, 3, 0);
        let gray = frame.to_gray();
        assert_eq!(gray.width(), 4);
        assert_eq!(gray.height(), 2);
        assert_eq!(gray.data().len(), 8);
    }

    #[test]
    fn test_to_gray_extremes() {
        assert!(solid_frame(255, 255, 255)
            .to_gray()
            .data()
            .iter()
            .all(|&y| y == 255));
        assert!(solid_frame(0, 0, 0).to_gray().data().iter().all(|&y| y == 0));
    }

    #[test]
    fn test_to_gray_channel_weights() {
        // (299*255 + 500) / 1000 = 76, (587*255 + 500) / 1000 = 150,
        // (114*255 + 500) / 1000 = 29
        assert_eq!(solid_frame(255, 0, 0).to_gray().data()[0], 76);
        assert_eq!(solid_frame(0, 255, 0).to_gray().data()[0], 150);
        assert_eq!(solid_frame(0, 0, 255).to_gray().data()[0], 29);
    }

    #[test]
    fn test_to_gray_is_deterministic() {
        let frame = Frame::new((0..48).collect(), 4, 4, 3, 0);
        assert_eq!(frame.to_gray(), frame.to_gray());
    }
}
