pub mod layout;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod presentation;
pub mod recognition;
pub mod routes;
pub mod settings;
pub mod upload;

pub use models::{AnprRun, BoundingBox, CharacterResult, PlateReading};
pub use pipeline::{
    Advance, AnprPipeline, PipelineError, PipelineState, PipelineStep, RunId, StepKind,
    StepStatus, StepTick, StepTimings,
};
pub use presentation::{ConfidenceLevel, PageView, ResultView};
pub use recognition::{MockRecognizer, PlateRecognizer};
pub use routes::Route;
pub use settings::{Theme, ThemeSettings};
pub use upload::{UploadSource, UploadedImage};

#[cfg(feature = "gui")]
pub mod gui;
