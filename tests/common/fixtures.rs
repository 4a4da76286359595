use std::io::Write;

use anpr_reader::{AnprPipeline, AnprRun, PlateRecognizer, StepStatus, StepTimings, UploadedImage};
use image::{ImageBuffer, Rgb};
use tempfile::NamedTempFile;

/// Creates a 100x100 red test image and returns the temp file.
/// The file will be automatically cleaned up when dropped.
pub fn create_test_image() -> NamedTempFile {
    let img = ImageBuffer::from_fn(100, 100, |_, _| Rgb([255u8, 0u8, 0u8]));
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// Creates a plain text file with the given suffix
pub fn create_text_file(suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp text file");
    file.write_all(b"not an image at all")
        .expect("Failed to write temp text file");
    file
}

/// A small in-memory upload; the bytes need not decode
pub fn sample_image(name: &str) -> UploadedImage {
    UploadedImage::new(name, "image/png", vec![0x89u8, b'P', b'N', b'G', 1, 2, 3])
}

/// A pipeline with `sample_image("car.png")` loaded and no simulated delays
pub fn loaded_pipeline() -> AnprPipeline {
    let mut pipeline = AnprPipeline::new(StepTimings::instant());
    pipeline.select_image(sample_image("car.png"));
    pipeline
}

pub fn statuses(pipeline: &AnprPipeline) -> Vec<StepStatus> {
    pipeline.steps().iter().map(|s| s.status()).collect()
}

/// Recognizer that always fails, for the error path
#[derive(Debug, Clone, Copy)]
pub struct FailingRecognizer;

impl PlateRecognizer for FailingRecognizer {
    async fn recognize(&self, _image: &UploadedImage) -> anyhow::Result<AnprRun> {
        anyhow::bail!("model not loaded")
    }
}
