use std::path::PathBuf;
use std::process;

use clap::Parser;

use plateguard_core::annotate::infrastructure::plate_annotator::PlateAnnotator;
use plateguard_core::detection::infrastructure::cascade_detector::CascadeClassifierDetector;
use plateguard_core::display::infrastructure::highgui_display::HighguiDisplay;
use plateguard_core::pipeline::blur_plates_use_case::BlurPlatesUseCase;
use plateguard_core::shared::constants::{CASCADE_MODEL_NAME, CASCADE_MODEL_URL};
use plateguard_core::shared::model_resolver;
use plateguard_core::video::infrastructure::ffmpeg_reader::FfmpegReader;

/// License plate detection and blurring over a live video window.
///
/// Plays the input video in a window, blurring every detected plate region
/// as it goes. Press `q` to stop.
#[derive(Parser)]
#[command(name = "plate-blur")]
struct Cli {
    /// Input video file.
    #[arg(default_value = "vid.mp4")]
    input: PathBuf,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    log::info!("Resolving cascade model: {CASCADE_MODEL_NAME}");
    let model_path = model_resolver::resolve(
        CASCADE_MODEL_NAME,
        CASCADE_MODEL_URL,
        None,
        Some(Box::new(download_progress)),
    )?;
    eprintln!();

    let mut use_case = BlurPlatesUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(CascadeClassifierDetector::new(&model_path)?),
        Box::new(PlateAnnotator::new()),
        Box::new(HighguiDisplay::new()),
    );

    let report = use_case.execute(&cli.input)?;
    log::info!("Presented {} frames", report.frames_presented);
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading cascade model... {pct}%");
    } else {
        eprint!("\rDownloading cascade model... {downloaded} bytes");
    }
}
