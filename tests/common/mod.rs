mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from anpr_reader for tests
pub use anpr_reader::{
    Advance, AnprPipeline, AnprRun, MockRecognizer, PipelineError, PipelineState, PlateRecognizer,
    StepKind, StepStatus, StepTimings, UploadSource, UploadedImage,
};
