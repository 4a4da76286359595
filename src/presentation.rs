//! View models for the ANPR page.
//!
//! Everything here is a pure function of the pipeline and its result, so the
//! GUI and the command line render the same numbers.

use std::fmt;

use crate::models::{AnprRun, BoundingBox, PlateReading};
use crate::pipeline::{AnprPipeline, PipelineStep, StepKind, StepStatus};

pub const PAGE_TITLE: &str = "ANPR - Automatic Number Plate Recognition";
pub const PAGE_SUBTITLE: &str =
    "Upload an image to detect and recognize license plates using YOLO11";

/// Colour bucket for a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub const HIGH_THRESHOLD: f64 = 0.9;
    pub const MEDIUM_THRESHOLD: f64 = 0.7;

    /// Boundary values belong to the higher bucket
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= Self::HIGH_THRESHOLD {
            ConfidenceLevel::High
        } else if confidence >= Self::MEDIUM_THRESHOLD {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }
}

/// Fixed-point text for `value`; exact ties round away from zero
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    format!("{:.*}", decimals, (value * factor).round() / factor)
}

/// `value` in [0, 1] as a percentage with `decimals` fraction digits
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{}%", format_fixed(value * 100.0, decimals))
}

/// Share of `total_time` spent in one stage, in percent.
///
/// Shares of different stages need not sum to 100.
pub fn stage_share(stage_time: f64, total_time: f64) -> f64 {
    if total_time > 0.0 {
        stage_time / total_time * 100.0
    } else {
        0.0
    }
}

pub fn format_seconds(seconds: f64) -> String {
    format!("{}s", seconds)
}

fn format_bbox(bbox: &BoundingBox) -> String {
    format!("({}, {}) - ({}, {})", bbox.x1, bbox.y1, bbox.x2, bbox.y2)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceBadge {
    pub text: String,
    pub level: ConfidenceLevel,
}

impl ConfidenceBadge {
    fn new(confidence: f64, decimals: usize) -> Self {
        Self {
            text: format_percent(confidence, decimals),
            level: ConfidenceLevel::from_confidence(confidence),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRow {
    pub label: String,
    pub confidence: ConfidenceBadge,
    pub bbox: String,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionCard {
    pub processing_time: String,
    pub rows: Vec<DetectionRow>,
    pub cropped_plates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterTile {
    pub character: char,
    pub confidence: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlateView {
    pub plate: String,
    pub confidence: ConfidenceBadge,
    pub characters: Vec<CharacterTile>,
}

impl From<&PlateReading> for PlateView {
    fn from(reading: &PlateReading) -> Self {
        Self {
            plate: reading.license_plate.clone(),
            confidence: ConfidenceBadge::new(reading.confidence, 1),
            characters: reading
                .characters
                .iter()
                .map(|c| CharacterTile {
                    character: c.character,
                    confidence: format_percent(c.confidence, 0),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionCard {
    pub processing_time: String,
    pub plates: Vec<PlateView>,
}

/// One bar of the performance breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct ShareBar {
    pub label: &'static str,
    /// Percent of the total time, unrounded
    pub percent: f64,
}

impl ShareBar {
    pub fn text(&self) -> String {
        format!("{}%", format_fixed(self.percent, 1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub total_time: String,
    pub plates_detected: usize,
    pub plates_recognized: usize,
    pub success: bool,
    pub breakdown: [ShareBar; 2],
}

impl SummaryCard {
    pub fn status(&self) -> &'static str {
        if self.success { "Success" } else { "Failed" }
    }
}

/// Everything shown below the pipeline once a run has finished
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub detection: DetectionCard,
    pub recognition: RecognitionCard,
    pub summary: SummaryCard,
}

impl ResultView {
    pub fn from_run(run: &AnprRun) -> Self {
        let detection = &run.steps.detection;
        let recognition = &run.steps.recognition;

        Self {
            detection: DetectionCard {
                processing_time: format_seconds(detection.processing_time),
                rows: detection
                    .detections
                    .iter()
                    .enumerate()
                    .map(|(i, d)| DetectionRow {
                        label: format!("Plate {}", i + 1),
                        confidence: ConfidenceBadge::new(d.confidence, 1),
                        bbox: format_bbox(d),
                        class: d.class.clone(),
                    })
                    .collect(),
                cropped_plates: detection.cropped_plates.clone(),
            },
            recognition: RecognitionCard {
                processing_time: format_seconds(recognition.processing_time),
                plates: recognition.results.iter().map(PlateView::from).collect(),
            },
            summary: SummaryCard {
                total_time: format_seconds(run.processing_time),
                plates_detected: run.plates_detected(),
                plates_recognized: run.plates_recognized(),
                success: run.success,
                breakdown: [
                    ShareBar {
                        label: "Detection",
                        percent: stage_share(detection.processing_time, run.processing_time),
                    },
                    ShareBar {
                        label: "Recognition",
                        percent: stage_share(recognition.processing_time, run.processing_time),
                    },
                ],
            },
        }
    }
}

pub fn render_result(run: Option<&AnprRun>) -> Option<ResultView> {
    run.map(ResultView::from_run)
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Detection Results ({})", self.detection.processing_time)?;
        for row in &self.detection.rows {
            writeln!(
                f,
                "  {}  {} [{}]",
                row.label,
                row.confidence.text,
                row.confidence.level.as_str()
            )?;
            writeln!(f, "    Bbox: {}", row.bbox)?;
            writeln!(f, "    Class: {}", row.class)?;
        }
        if !self.detection.cropped_plates.is_empty() {
            writeln!(f, "  Cropped Plates: {}", self.detection.cropped_plates.join(", "))?;
        }

        writeln!(f, "Recognition Results ({})", self.recognition.processing_time)?;
        for plate in &self.recognition.plates {
            writeln!(
                f,
                "  {}  {} [{}]",
                plate.plate,
                plate.confidence.text,
                plate.confidence.level.as_str()
            )?;
            let tiles: Vec<String> = plate
                .characters
                .iter()
                .map(|c| format!("{} {}", c.character, c.confidence))
                .collect();
            writeln!(f, "    {}", tiles.join("  "))?;
        }

        let summary = &self.summary;
        writeln!(f, "Processing Summary")?;
        writeln!(f, "  Total Time: {}", summary.total_time)?;
        writeln!(f, "  Plates Detected: {}", summary.plates_detected)?;
        writeln!(f, "  Plates Recognized: {}", summary.plates_recognized)?;
        writeln!(f, "  Status: {}", summary.status())?;
        for bar in &summary.breakdown {
            writeln!(f, "  {:<12} {}", bar.label, bar.text())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
    Outline,
}

impl From<StepStatus> for BadgeVariant {
    fn from(status: StepStatus) -> Self {
        match status {
            StepStatus::Completed => BadgeVariant::Default,
            StepStatus::Processing => BadgeVariant::Secondary,
            StepStatus::Error => BadgeVariant::Destructive,
            StepStatus::Pending => BadgeVariant::Outline,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepIcon {
    Done,
    Spinner,
    Alert,
    /// The step's own glyph, shown while pending
    Step(StepKind),
}

impl StepIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            StepIcon::Done => "✔",
            StepIcon::Spinner => "◌",
            StepIcon::Alert => "!",
            StepIcon::Step(StepKind::Upload) => "⇪",
            StepIcon::Step(StepKind::Detection) => "◎",
            StepIcon::Step(StepKind::Recognition) => "⚡",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub kind: StepKind,
    pub title: &'static str,
    pub description: &'static str,
    pub status: StepStatus,
    pub badge: BadgeVariant,
    pub icon: StepIcon,
}

impl From<&PipelineStep> for StepView {
    fn from(step: &PipelineStep) -> Self {
        let icon = match step.status() {
            StepStatus::Completed => StepIcon::Done,
            StepStatus::Processing => StepIcon::Spinner,
            StepStatus::Error => StepIcon::Alert,
            StepStatus::Pending => StepIcon::Step(step.kind()),
        };
        Self {
            kind: step.kind(),
            title: step.title(),
            description: step.description(),
            status: step.status(),
            badge: step.status().into(),
            icon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessButton {
    pub label: &'static str,
    pub enabled: bool,
}

/// The whole page derived from the current pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub image_name: Option<String>,
    /// Only offered once an image is loaded
    pub process_button: Option<ProcessButton>,
    pub steps: Vec<StepView>,
    pub results: Option<ResultView>,
}

impl PageView {
    pub fn has_image(&self) -> bool {
        self.image_name.is_some()
    }

    pub fn from_pipeline(pipeline: &AnprPipeline) -> Self {
        let running = pipeline.is_running();
        let process_button = pipeline.image().map(|_| ProcessButton {
            label: if running { "Processing..." } else { "Process Image" },
            enabled: !running,
        });

        Self {
            title: PAGE_TITLE,
            subtitle: PAGE_SUBTITLE,
            image_name: pipeline.image().map(|i| i.name().to_string()),
            process_button,
            steps: pipeline.steps().iter().map(StepView::from).collect(),
            results: render_result(pipeline.result()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::StepTimings;
    use crate::recognition::sample_run;
    use crate::upload::UploadedImage;

    fn loaded_pipeline() -> AnprPipeline {
        let mut pipeline = AnprPipeline::new(StepTimings::instant());
        pipeline.select_image(UploadedImage::new("car.png", "image/png", vec![1u8, 2, 3]));
        pipeline
    }

    #[test]
    fn test_confidence_buckets() {
        assert_eq!(ConfidenceLevel::from_confidence(0.94), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(0.75), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_confidence(0.5), ConfidenceLevel::Low);
    }

    #[test]
    fn test_confidence_boundaries_go_up() {
        assert_eq!(ConfidenceLevel::from_confidence(0.9), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(0.7), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_confidence(0.6999), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_confidence(0.0), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_confidence(1.0), ConfidenceLevel::High);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.94, 1), "94.0%");
        assert_eq!(format_percent(0.87, 1), "87.0%");
        assert_eq!(format_percent(0.95, 0), "95%");
        assert_eq!(format_percent(0.85, 0), "85%");
    }

    #[test]
    fn test_format_percent_ties_round_up() {
        // 0.845 * 100 is exactly 84.5 in f64
        assert_eq!(format_percent(0.845, 0), "85%");
        assert_eq!(format_percent(0.125, 0), "13%");
        assert_eq!(format_fixed(2.25, 1), "2.3");
        assert_eq!(format_fixed(47.86324786324787, 1), "47.9");
    }

    #[test]
    fn test_stage_share() {
        let detection = stage_share(1.12, 2.34);
        let recognition = stage_share(1.22, 2.34);
        assert_eq!(format!("{:.1}", detection), "47.9");
        assert_eq!(format!("{:.1}", recognition), "52.1");
    }

    #[test]
    fn test_stage_share_zero_total() {
        assert_eq!(stage_share(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_result_view_from_sample_run() {
        let view = ResultView::from_run(&sample_run("data:image/png;base64,AA=="));

        assert_eq!(view.detection.processing_time, "1.12s");
        assert_eq!(view.detection.rows.len(), 1);
        let row = &view.detection.rows[0];
        assert_eq!(row.label, "Plate 1");
        assert_eq!(row.confidence.text, "94.0%");
        assert_eq!(row.confidence.level, ConfidenceLevel::High);
        assert_eq!(row.bbox, "(245, 123) - (387, 165)");
        assert_eq!(row.class, "license_plate");
        assert_eq!(view.detection.cropped_plates, vec!["/api/placeholder/150/50"]);

        assert_eq!(view.recognition.processing_time, "1.22s");
        let plate = &view.recognition.plates[0];
        assert_eq!(plate.plate, "AB1234CD");
        assert_eq!(plate.confidence.level, ConfidenceLevel::Medium);
        assert_eq!(plate.characters.len(), 8);
        assert_eq!(plate.characters[0].character, 'A');
        assert_eq!(plate.characters[0].confidence, "95%");
        assert_eq!(plate.characters[7].confidence, "85%");

        assert_eq!(view.summary.total_time, "2.34s");
        assert_eq!(view.summary.plates_detected, 1);
        assert_eq!(view.summary.plates_recognized, 1);
        assert_eq!(view.summary.status(), "Success");
        assert_eq!(view.summary.breakdown[0].text(), "47.9%");
        assert_eq!(view.summary.breakdown[1].text(), "52.1%");
    }

    #[test]
    fn test_failed_run_status() {
        let mut run = sample_run("");
        run.success = false;
        assert_eq!(ResultView::from_run(&run).summary.status(), "Failed");
    }

    #[test]
    fn test_render_result_absent() {
        assert!(render_result(None).is_none());
    }

    #[test]
    fn test_text_report() {
        let report = ResultView::from_run(&sample_run("")).to_string();
        assert!(report.contains("AB1234CD  87.0% [medium]"));
        assert!(report.contains("Bbox: (245, 123) - (387, 165)"));
        assert!(report.contains("Status: Success"));
        assert!(report.contains("47.9%"));
    }

    #[test]
    fn test_step_badges_and_icons() {
        let mut pipeline = loaded_pipeline();
        pipeline.start_run().unwrap();
        let page = PageView::from_pipeline(&pipeline);

        assert_eq!(page.steps[0].badge, BadgeVariant::Secondary);
        assert_eq!(page.steps[0].icon, StepIcon::Spinner);
        assert_eq!(page.steps[1].badge, BadgeVariant::Outline);
        assert_eq!(page.steps[1].icon, StepIcon::Step(StepKind::Detection));
        assert_eq!(BadgeVariant::from(StepStatus::Completed), BadgeVariant::Default);
        assert_eq!(BadgeVariant::from(StepStatus::Error), BadgeVariant::Destructive);
    }

    #[test]
    fn test_page_idle_has_no_button() {
        let page = PageView::from_pipeline(&AnprPipeline::default());
        assert_eq!(page.title, "ANPR - Automatic Number Plate Recognition");
        assert!(page.subtitle.contains("YOLO11"));
        assert!(!page.has_image());
        assert!(page.process_button.is_none());
        assert!(page.results.is_none());
        assert_eq!(page.steps.len(), 3);
    }

    #[test]
    fn test_page_process_button_states() {
        let mut pipeline = loaded_pipeline();
        let page = PageView::from_pipeline(&pipeline);
        assert_eq!(
            page.process_button,
            Some(ProcessButton {
                label: "Process Image",
                enabled: true
            })
        );

        pipeline.start_run().unwrap();
        let page = PageView::from_pipeline(&pipeline);
        assert_eq!(
            page.process_button,
            Some(ProcessButton {
                label: "Processing...",
                enabled: false
            })
        );
    }
}
