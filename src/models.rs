use serde::{Deserialize, Serialize};

/// Bounding box in pixel coordinates of the source image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
    pub confidence: f64,
    pub class: String,
    pub class_id: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }
}

/// A single recognized character on a plate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterResult {
    #[serde(rename = "char")]
    pub character: char,
    pub confidence: f64,
    pub bbox: BoundingBox,
}

/// Text read from one detected plate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateReading {
    pub license_plate: String,
    pub confidence: f64,
    pub characters: Vec<CharacterResult>,
}

/// Stage status as reported inside a result payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Completed,
    Processing,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionStage {
    pub status: StageStatus,
    pub detections: Vec<BoundingBox>,
    /// References to the cropped plate images
    pub cropped_plates: Vec<String>,
    /// Seconds
    pub processing_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionStage {
    pub status: StageStatus,
    pub results: Vec<PlateReading>,
    /// Seconds
    pub processing_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResults {
    pub detection: DetectionStage,
    pub recognition: RecognitionStage,
}

/// Complete outcome of one recognition run.
///
/// Always assigned in one piece when a run finishes; never partially populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnprRun {
    pub success: bool,
    /// Total seconds, which may include time not attributed to either stage
    pub processing_time: f64,
    /// Reference to the image the run was made on (a data URI)
    pub original_image: String,
    pub steps: StageResults,
}

impl AnprRun {
    pub fn plates_detected(&self) -> usize {
        self.steps.detection.detections.len()
    }

    pub fn plates_recognized(&self) -> usize {
        self.steps.recognition.results.len()
    }
}
