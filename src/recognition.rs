use std::future::Future;

use crate::models::{
    AnprRun, BoundingBox, CharacterResult, DetectionStage, PlateReading, RecognitionStage,
    StageResults, StageStatus,
};
use crate::upload::UploadedImage;

/// Service that turns an uploaded image into detection and recognition results
pub trait PlateRecognizer {
    fn recognize(&self, image: &UploadedImage) -> impl Future<Output = anyhow::Result<AnprRun>> + Send;
}

/// In-process recognizer that answers every request with the same demonstration payload
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRecognizer;

impl PlateRecognizer for MockRecognizer {
    fn recognize(&self, image: &UploadedImage) -> impl Future<Output = anyhow::Result<AnprRun>> + Send {
        let run = sample_run(image.data_uri());
        async move { Ok(run) }
    }
}

/// The fixed payload returned by [`MockRecognizer`], echoing `original_image`
pub fn sample_run(original_image: impl Into<String>) -> AnprRun {
    AnprRun {
        success: true,
        processing_time: 2.34,
        original_image: original_image.into(),
        steps: StageResults {
            detection: DetectionStage {
                status: StageStatus::Completed,
                detections: vec![BoundingBox {
                    x1: 245,
                    y1: 123,
                    x2: 387,
                    y2: 165,
                    confidence: 0.94,
                    class: "license_plate".to_string(),
                    class_id: 0,
                }],
                cropped_plates: vec!["/api/placeholder/150/50".to_string()],
                processing_time: 1.12,
            },
            recognition: RecognitionStage {
                status: StageStatus::Completed,
                results: vec![PlateReading {
                    license_plate: "AB1234CD".to_string(),
                    confidence: 0.87,
                    characters: sample_characters(),
                }],
                processing_time: 1.22,
            },
        },
    }
}

fn sample_characters() -> Vec<CharacterResult> {
    // (char, confidence, x1, x2); every glyph spans y 5..35
    const GLYPHS: [(char, f64, u32, u32); 8] = [
        ('A', 0.95, 10, 25),
        ('B', 0.92, 25, 40),
        ('1', 0.89, 45, 55),
        ('2', 0.91, 55, 65),
        ('3', 0.88, 65, 75),
        ('4', 0.93, 75, 85),
        ('C', 0.90, 90, 105),
        ('D', 0.85, 105, 120),
    ];

    GLYPHS
        .iter()
        .map(|&(character, confidence, x1, x2)| CharacterResult {
            character,
            confidence,
            bbox: BoundingBox {
                x1,
                y1: 5,
                x2,
                y2: 35,
                confidence,
                class: "char".to_string(),
                class_id: 0,
            },
        })
        .collect()
}
