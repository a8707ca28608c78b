//! Convert a DICOM file into an RGBA image file.
use std::path::PathBuf;

use clap::Parser;
use dicom_bitmap::{
    BitmapLoader, DEFAULT_JPEG_QUALITY, DecodeOptions, LoadedImage, WindowLevel, fetch,
};
use tracing::{Level, error, info};

/// Decode an uncompressed DICOM image into a windowed bitmap
#[derive(Debug, Parser)]
#[command(version)]
struct App {
    /// Path or URL of the DICOM file to convert
    input: String,

    /// Path to the output image
    /// (default is to replace the input extension with `.png`)
    #[arg(short = 'o', long = "out")]
    output: Option<PathBuf>,

    /// Window center to use instead of the stored one
    #[arg(long = "window-center", requires = "window_width", allow_hyphen_values = true)]
    window_center: Option<f64>,

    /// Window width to use instead of the stored one
    #[arg(long = "window-width", requires = "window_center")]
    window_width: Option<f64>,

    /// Apply a 3x3 median filter before windowing
    #[arg(long = "median")]
    median: bool,

    /// Quality of JPEG output, from 1 to 100
    #[arg(
        long = "jpeg-quality",
        default_value_t = DEFAULT_JPEG_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    jpeg_quality: u8,

    /// Print a summary of the DICOM metadata
    #[arg(long = "info")]
    info: bool,

    /// Print more information about the decoding
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let app = App::parse();

    tracing_subscriber::fmt()
        .with_max_level(if app.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let mut options = DecodeOptions::new();
    if let (Some(center), Some(width)) = (app.window_center, app.window_width) {
        options = options.with_window(WindowLevel::new(center, width));
    }
    if app.median {
        options = options.with_median_filter();
    }

    let image = BitmapLoader::load_from_url(&app.input, options)
        .await
        .unwrap_or_else(|e| {
            error!("{e}");
            std::process::exit(-1);
        });

    if app.info {
        print_info(&image);
    }

    let output = app.output.unwrap_or_else(|| default_output(&app.input));

    image
        .bitmap()
        .save_with_quality(&output, app.jpeg_quality)
        .unwrap_or_else(|e| {
            error!("{e}");
            std::process::exit(-2);
        });

    info!("Image saved to {}", output.display());
}

/// The input with a `.png` extension. Remote inputs are named after the
/// last path segment and written to the working directory.
fn default_output(input: &str) -> PathBuf {
    let mut path = match fetch::local_path(input) {
        Some(path) => path,
        None => {
            let path = input.split(['?', '#']).next().unwrap_or_default();
            PathBuf::from(path.rsplit('/').next().unwrap_or_default())
        }
    };
    if path.file_name().is_none() || input.ends_with('/') {
        path.push("image");
    }
    path.set_extension("png");
    path
}

fn print_info(image: &LoadedImage) {
    let info = &image.info;
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    println!("Patient:     {} ({})", field(&info.patient_name), field(&info.patient_id));
    println!("Study:       {} {}", field(&info.study_date), field(&info.study_description));
    println!("Series:      {} {}", field(&info.series_number), field(&info.series_description));
    println!("Modality:    {}", field(&info.modality));
    println!("Orientation: {}", info.orientation);
    let layout = &image.frame.layout;
    println!(
        "Image:       {}x{} {}",
        layout.columns, layout.rows, layout.photometric_interpretation
    );
    if let Some(window) = image.frame.window {
        println!(
            "Window:      center {} width {} ({:?})",
            window.center, window.width, window.source
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::{App, default_output};
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn verify_cli() {
        App::command().debug_assert();
    }

    #[test]
    fn output_is_named_after_the_input() {
        assert_eq!(default_output("scans/ct.dcm"), PathBuf::from("scans/ct.png"));
        assert_eq!(default_output("file:///scans/ct.dcm"), PathBuf::from("/scans/ct.png"));
        assert_eq!(
            default_output("file://localhost/scans/ct.dcm"),
            PathBuf::from("/scans/ct.png")
        );
        assert_eq!(
            default_output("https://pacs.example/wado/ct.dcm?frame=1"),
            PathBuf::from("ct.png")
        );
    }

    #[test]
    fn empty_url_segment_falls_back_to_image() {
        assert_eq!(default_output("https://pacs.example/studies/"), PathBuf::from("image.png"));
        assert_eq!(default_output("file:///scans/"), PathBuf::from("/scans/image.png"));
    }
}
