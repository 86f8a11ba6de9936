use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;

/// Decodes video frames via ffmpeg-next (libavformat + libavcodec).
///
/// Every decoded frame is converted to tightly packed RGB24 before it is
/// handed to the pipeline.
pub struct FfmpegReader {
    input_ctx: Option<ffmpeg_next::format::context::Input>,
    stream_index: usize,
}

// Safety: the reader is driven from one thread at a time; the raw pointers
// inside the ffmpeg contexts are never shared across threads.
unsafe impl Send for FfmpegReader {}

impl FfmpegReader {
    pub fn new() -> Self {
        Self {
            input_ctx: None,
            stream_index: 0,
        }
    }
}

impl Default for FfmpegReader {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoReader for FfmpegReader {
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let ictx = ffmpeg_next::format::input(path)?;
        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or("no video stream found")?;
        self.stream_index = stream.index();

        let decoder = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?
            .decoder()
            .video()?;

        let rate = stream.rate();
        let fps = if rate.denominator() != 0 {
            rate.numerator() as f64 / rate.denominator() as f64
        } else {
            0.0
        };

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            fps,
            total_frames: stream.frames().max(0) as usize,
            codec: decoder
                .codec()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
        };

        self.input_ctx = Some(ictx);
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        let Some(ictx) = self.input_ctx.as_mut() else {
            return Box::new(std::iter::once(Err("video reader is not open".into())));
        };

        match DecodeIter::new(ictx, self.stream_index) {
            Ok(iter) => Box::new(iter),
            Err(e) => Box::new(std::iter::once(Err(e))),
        }
    }

    fn close(&mut self) {
        self.input_ctx = None;
    }
}

/// Pull-based decoder: one frame per `next()` call, nothing buffered beyond
/// the packet currently in flight.
struct DecodeIter<'a> {
    ictx: &'a mut ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    stream_index: usize,
    width: u32,
    height: u32,
    next_index: usize,
    flushed: bool,
    done: bool,
}

impl<'a> DecodeIter<'a> {
    fn new(
        ictx: &'a mut ffmpeg_next::format::context::Input,
        stream_index: usize,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or("no video stream found")?;
        let decoder = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?
            .decoder()
            .video()?;

        let width = decoder.width();
        let height = decoder.height();
        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGB24,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )?;

        Ok(Self {
            ictx,
            decoder,
            scaler,
            stream_index,
            width,
            height,
            next_index: 0,
            flushed: false,
            done: false,
        })
    }

    /// Pulls one decoded frame out of the codec, if it has one ready.
    fn drain(&mut self) -> Option<Result<Frame, Box<dyn std::error::Error>>> {
        let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
        if self.decoder.receive_frame(&mut decoded).is_err() {
            return None;
        }

        let mut rgb = ffmpeg_next::util::frame::video::Video::empty();
        if let Err(e) = self.scaler.run(&decoded, &mut rgb) {
            return Some(Err(Box::new(e)));
        }

        let frame = Frame::new(
            pack_rgb(&rgb, self.width, self.height),
            self.width,
            self.height,
            3,
            self.next_index,
        );
        self.next_index += 1;
        Some(Ok(frame))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = Result<Frame, Box<dyn std::error::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Some(item) = self.drain() {
            return Some(item);
        }

        if self.flushed {
            self.done = true;
            return None;
        }

        loop {
            let Some((stream, packet)) = self.ictx.packets().next() else {
                // Container exhausted: flush the codec for buffered frames.
                let _ = self.decoder.send_eof();
                self.flushed = true;
                let item = self.drain();
                if item.is_none() {
                    self.done = true;
                }
                return item;
            };

            if stream.index() != self.stream_index {
                continue;
            }

            if self.decoder.send_packet(&packet).is_err() {
                continue;
            }

            if let Some(item) = self.drain() {
                return Some(item);
            }
        }
    }
}

/// Copies pixel data out of an ffmpeg frame into a contiguous RGB buffer.
///
/// ffmpeg rows may carry padding at the end (stride > width * 3); strip it
/// so downstream indexing can assume a tightly packed layout.
fn pack_rgb(rgb: &ffmpeg_next::util::frame::video::Video, width: u32, height: u32) -> Vec<u8> {
    let stride = rgb.stride(0);
    let data = rgb.data(0);
    let row_bytes = width as usize * 3;

    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * stride;
        pixels.extend_from_slice(&data[start..start + row_bytes]);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::path::PathBuf;

    /// Encodes `num_frames` flat gray frames into an MPEG4 container so the
    /// reader has something real to decode.
    fn write_test_video(path: &Path, num_frames: usize, width: u32, height: u32, fps: i32) {
        ffmpeg_next::init().unwrap();

        let mut octx = ffmpeg_next::format::output(path).unwrap();
        let global_header = octx
            .format()
            .flags()
            .contains(ffmpeg_next::format::Flags::GLOBAL_HEADER);

        let codec = ffmpeg_next::encoder::find(ffmpeg_next::codec::Id::MPEG4).unwrap();
        let mut ost = octx.add_stream(Some(codec)).unwrap();

        let mut encoder_ctx = ffmpeg_next::codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()
            .unwrap();
        encoder_ctx.set_width(width);
        encoder_ctx.set_height(height);
        encoder_ctx.set_format(ffmpeg_next::format::Pixel::YUV420P);
        encoder_ctx.set_time_base(ffmpeg_next::Rational(1, fps));
        encoder_ctx.set_frame_rate(Some(ffmpeg_next::Rational(fps, 1)));
        if global_header {
            encoder_ctx.set_flags(ffmpeg_next::codec::Flags::GLOBAL_HEADER);
        }

        let mut encoder = encoder_ctx
            .open_with(ffmpeg_next::Dictionary::new())
            .unwrap();
        ost.set_parameters(&encoder);
        octx.write_header().unwrap();

        let ost_time_base = octx.stream(0).unwrap().time_base();
        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            ffmpeg_next::format::Pixel::RGB24,
            width,
            height,
            ffmpeg_next::format::Pixel::YUV420P,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .unwrap();

        let mut flush = |encoder: &mut ffmpeg_next::encoder::Video,
                         octx: &mut ffmpeg_next::format::context::Output| {
            let mut encoded = ffmpeg_next::Packet::empty();
            while encoder.receive_packet(&mut encoded).is_ok() {
                encoded.set_stream(0);
                encoded.rescale_ts(ffmpeg_next::Rational(1, fps), ost_time_base);
                encoded.write_interleaved(octx).unwrap();
            }
        };

        for i in 0..num_frames {
            let mut rgb = ffmpeg_next::util::frame::video::Video::new(
                ffmpeg_next::format::Pixel::RGB24,
                width,
                height,
            );
            let value = ((i * 40) % 256) as u8;
            let stride = rgb.stride(0);
            let data = rgb.data_mut(0);
            for row in 0..height as usize {
                let start = row * stride;
                data[start..start + width as usize * 3].fill(value);
            }

            let mut yuv = ffmpeg_next::util::frame::video::Video::empty();
            scaler.run(&rgb, &mut yuv).unwrap();
            yuv.set_pts(Some(i as i64));

            encoder.send_frame(&yuv).unwrap();
            flush(&mut encoder, &mut octx);
        }

        encoder.send_eof().unwrap();
        flush(&mut encoder, &mut octx);
        octx.write_trailer().unwrap();
    }

    fn test_video(dir: &Path, frames: usize) -> PathBuf {
        let path = dir.join("test.mp4");
        write_test_video(&path, frames, 160, 120, 30);
        path
    }

    #[test]
    fn test_open_returns_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = test_video(dir.path(), 5);

        let mut reader = FfmpegReader::new();
        let meta = reader.open(&path).unwrap();
        assert_eq!(meta.width, 160);
        assert_eq!(meta.height, 120);
        assert_relative_eq!(meta.fps, 30.0);
    }

    #[test]
    fn test_open_nonexistent_errors() {
        let mut reader = FfmpegReader::new();
        assert!(reader.open(Path::new("/nonexistent/test.mp4")).is_err());
    }

    #[test]
    fn test_frames_yields_every_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = test_video(dir.path(), 5);

        let mut reader = FfmpegReader::new();
        reader.open(&path).unwrap();

        let frames: Vec<_> = reader.frames().collect();
        assert_eq!(frames.len(), 5);
        assert!(frames.iter().all(|f| f.is_ok()));
    }

    #[test]
    fn test_frames_are_indexed_in_decode_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = test_video(dir.path(), 5);

        let mut reader = FfmpegReader::new();
        reader.open(&path).unwrap();

        for (i, frame) in reader.frames().map(|f| f.unwrap()).enumerate() {
            assert_eq!(frame.index(), i);
        }
    }

    #[test]
    fn test_frames_are_packed_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = test_video(dir.path(), 2);

        let mut reader = FfmpegReader::new();
        reader.open(&path).unwrap();

        let frame = reader.frames().next().unwrap().unwrap();
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.data().len(), 160 * 120 * 3);
    }

    #[test]
    fn test_frames_before_open_yields_error() {
        let mut reader = FfmpegReader::new();
        let result = reader.frames().next().unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_close_then_frames_yields_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = test_video(dir.path(), 2);

        let mut reader = FfmpegReader::new();
        reader.open(&path).unwrap();
        reader.close();
        assert!(reader.frames().next().unwrap().is_err());
    }

    #[test]
    fn test_close_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = test_video(dir.path(), 1);

        let mut reader = FfmpegReader::new();
        reader.open(&path).unwrap();
        reader.close();
        reader.close();
    }
}
