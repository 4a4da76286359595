use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::AnprRun;
use crate::recognition::PlateRecognizer;
use crate::upload::UploadedImage;

/// Number of steps in every run
pub const STEP_COUNT: usize = 3;

/// Status of one pipeline step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Processing,
    Completed,
    /// Part of the model, but no transition currently produces it
    Error,
}

impl StepStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::Processing => "processing",
            StepStatus::Completed => "completed",
            StepStatus::Error => "error",
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three fixed phases of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Upload,
    Detection,
    Recognition,
}

impl StepKind {
    pub const ALL: [StepKind; STEP_COUNT] =
        [StepKind::Upload, StepKind::Detection, StepKind::Recognition];

    pub fn id(self) -> &'static str {
        match self {
            StepKind::Upload => "upload",
            StepKind::Detection => "detection",
            StepKind::Recognition => "recognition",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            StepKind::Upload => "Image Upload",
            StepKind::Detection => "License Plate Detection",
            StepKind::Recognition => "Character Recognition",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StepKind::Upload => "Loading and validating image",
            StepKind::Detection => "Running YOLO11 model to detect license plates",
            StepKind::Recognition => "Extracting text from detected license plates",
        }
    }
}

/// Descriptor of one step together with its current status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStep {
    kind: StepKind,
    status: StepStatus,
}

impl PipelineStep {
    fn pending(kind: StepKind) -> Self {
        Self {
            kind,
            status: StepStatus::Pending,
        }
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    pub fn status(&self) -> StepStatus {
        self.status
    }
}

/// The step list every fresh or reset pipeline starts from
pub fn initial_steps() -> [PipelineStep; STEP_COUNT] {
    StepKind::ALL.map(PipelineStep::pending)
}

/// Simulated duration of each step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTimings {
    pub upload: Duration,
    pub detection: Duration,
    pub recognition: Duration,
}

impl StepTimings {
    /// No delays at all (tests, scripted runs)
    pub fn instant() -> Self {
        Self {
            upload: Duration::ZERO,
            detection: Duration::ZERO,
            recognition: Duration::ZERO,
        }
    }

    pub fn for_step(&self, kind: StepKind) -> Duration {
        match kind {
            StepKind::Upload => self.upload,
            StepKind::Detection => self.detection,
            StepKind::Recognition => self.recognition,
        }
    }

    pub fn total(&self) -> Duration {
        self.upload + self.detection + self.recognition
    }
}

impl Default for StepTimings {
    fn default() -> Self {
        Self {
            upload: Duration::from_millis(500),
            detection: Duration::from_millis(1500),
            recognition: Duration::from_millis(1200),
        }
    }
}

/// Identifies one run; ticks and results for any other run are rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A step that has just been marked `processing` and should be completed after `delay`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTick {
    pub run: RunId,
    pub index: usize,
    pub kind: StepKind,
    pub delay: Duration,
}

/// What follows a completed step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next(StepTick),
    /// Every step is completed; the run is waiting for [`AnprPipeline::finish`]
    AwaitingResult(RunId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("no image has been selected")]
    NoImage,

    #[error("a run is already in progress")]
    AlreadyRunning,

    #[error("run {0} is no longer current")]
    StaleRun(RunId),

    #[error("run {0} still has steps outstanding")]
    StepsOutstanding(RunId),

    #[error("recognition failed: {message}")]
    Recognizer { message: String },
}

/// Coarse state of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    ImageLoaded,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    ImageLoaded {
        image: UploadedImage,
    },
    Running {
        image: UploadedImage,
        run: RunId,
        /// Index of the step currently processing; `STEP_COUNT` once all are done
        current: usize,
    },
    Completed {
        image: UploadedImage,
        result: Arc<AnprRun>,
    },
}

/// State machine behind the upload and processing page.
///
/// Owns the uploaded image, the fixed step list and the final result.
/// Steps advance strictly in order and at most one run is in flight.
#[derive(Debug, Clone)]
pub struct AnprPipeline {
    phase: Phase,
    steps: [PipelineStep; STEP_COUNT],
    timings: StepTimings,
    runs_started: u64,
}

impl Default for AnprPipeline {
    fn default() -> Self {
        Self::new(StepTimings::default())
    }
}

impl AnprPipeline {
    pub fn new(timings: StepTimings) -> Self {
        Self {
            phase: Phase::Idle,
            steps: initial_steps(),
            timings,
            runs_started: 0,
        }
    }

    pub fn state(&self) -> PipelineState {
        match self.phase {
            Phase::Idle => PipelineState::Idle,
            Phase::ImageLoaded { .. } => PipelineState::ImageLoaded,
            Phase::Running { .. } => PipelineState::Running,
            Phase::Completed { .. } => PipelineState::Completed,
        }
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        match &self.phase {
            Phase::Idle => None,
            Phase::ImageLoaded { image }
            | Phase::Running { image, .. }
            | Phase::Completed { image, .. } => Some(image),
        }
    }

    pub fn steps(&self) -> &[PipelineStep; STEP_COUNT] {
        &self.steps
    }

    pub fn result(&self) -> Option<&AnprRun> {
        match &self.phase {
            Phase::Completed { result, .. } => Some(result.as_ref()),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn current_run(&self) -> Option<RunId> {
        match &self.phase {
            Phase::Running { run, .. } => Some(*run),
            _ => None,
        }
    }

    pub fn timings(&self) -> StepTimings {
        self.timings
    }

    /// Store a new upload, discarding any result and resetting every step.
    ///
    /// A run still in flight is abandoned: its later ticks are stale.
    pub fn select_image(&mut self, image: UploadedImage) {
        if let Phase::Running { run, .. } = &self.phase {
            tracing::debug!("Run {} abandoned by new upload", run);
        }
        tracing::debug!("Image selected: {}", image.name());
        self.steps = initial_steps();
        self.phase = Phase::ImageLoaded { image };
    }

    /// Return to `Idle`. Returns false if there was no image to clear.
    pub fn clear_image(&mut self) -> bool {
        if matches!(self.phase, Phase::Idle) {
            return false;
        }
        if let Phase::Running { run, .. } = &self.phase {
            tracing::debug!("Run {} abandoned by clear", run);
        }
        self.steps = initial_steps();
        self.phase = Phase::Idle;
        tracing::debug!("Image cleared");
        true
    }

    /// Begin a run: reset the steps and mark the first one `processing`.
    ///
    /// Rejected while another run is in flight or when no image is loaded.
    pub fn start_run(&mut self) -> Result<StepTick, PipelineError> {
        let image = match &self.phase {
            Phase::Idle => return Err(PipelineError::NoImage),
            Phase::Running { run, .. } => {
                tracing::debug!("Ignoring start request while run {} is in flight", run);
                return Err(PipelineError::AlreadyRunning);
            }
            Phase::ImageLoaded { image } | Phase::Completed { image, .. } => image.clone(),
        };

        self.runs_started += 1;
        let run = RunId(self.runs_started);

        self.steps = initial_steps();
        self.steps[0].status = StepStatus::Processing;
        self.phase = Phase::Running {
            image,
            run,
            current: 0,
        };

        tracing::debug!("Run {} started", run);
        Ok(self.tick(run, 0))
    }

    /// Mark the step named by `tick` completed and move on to the next one.
    ///
    /// A tick from an abandoned run, or for a step other than the one
    /// currently processing, changes nothing.
    pub fn complete_step(&mut self, tick: StepTick) -> Result<Advance, PipelineError> {
        let current = match &mut self.phase {
            Phase::Running { run, current, .. } if *run == tick.run && *current == tick.index => {
                current
            }
            _ => return Err(PipelineError::StaleRun(tick.run)),
        };

        let index = *current;
        *current += 1;
        let next = *current;

        self.steps[index].status = StepStatus::Completed;
        tracing::debug!("Run {}: {} completed", tick.run, self.steps[index].id());

        if next < STEP_COUNT {
            self.steps[next].status = StepStatus::Processing;
            Ok(Advance::Next(self.tick(tick.run, next)))
        } else {
            Ok(Advance::AwaitingResult(tick.run))
        }
    }

    /// Assign the result of a run whose steps have all completed
    pub fn finish(&mut self, run: RunId, result: AnprRun) -> Result<(), PipelineError> {
        let image = match &self.phase {
            Phase::Running {
                run: active,
                current,
                image,
            } if *active == run => {
                if *current < STEP_COUNT {
                    return Err(PipelineError::StepsOutstanding(run));
                }
                image.clone()
            }
            _ => return Err(PipelineError::StaleRun(run)),
        };

        self.phase = Phase::Completed {
            image,
            result: Arc::new(result),
        };
        tracing::debug!("Run {} finished", run);
        Ok(())
    }

    /// Drop an in-flight run and go back to `ImageLoaded` with pending steps
    pub fn abort(&mut self, run: RunId) -> bool {
        let image = match &self.phase {
            Phase::Running {
                run: active, image, ..
            } if *active == run => image.clone(),
            _ => return false,
        };
        self.steps = initial_steps();
        self.phase = Phase::ImageLoaded { image };
        tracing::debug!("Run {} aborted", run);
        true
    }

    /// Drive a whole run: each step is held `processing` for its simulated
    /// duration, then the recognizer's answer is assigned atomically.
    pub async fn run<R: PlateRecognizer>(&mut self, recognizer: &R) -> Result<(), PipelineError> {
        self.run_observed(recognizer, |_| {}).await
    }

    /// Same as [`run`](Self::run), calling `observe` after every step status change
    pub async fn run_observed<R, F>(
        &mut self,
        recognizer: &R,
        mut observe: F,
    ) -> Result<(), PipelineError>
    where
        R: PlateRecognizer,
        F: FnMut(&PipelineStep),
    {
        let mut tick = self.start_run()?;
        let run = tick.run;
        observe(&self.steps[tick.index]);

        loop {
            tokio::time::sleep(tick.delay).await;
            let finished = tick.index;
            let advance = self.complete_step(tick)?;
            observe(&self.steps[finished]);

            match advance {
                Advance::Next(next) => {
                    observe(&self.steps[next.index]);
                    tick = next;
                }
                Advance::AwaitingResult(_) => break,
            }
        }

        let image = self.image().cloned().ok_or(PipelineError::StaleRun(run))?;
        match recognizer.recognize(&image).await {
            Ok(result) => self.finish(run, result),
            Err(e) => {
                tracing::warn!("Run {}: recognizer failed: {:#}", run, e);
                self.abort(run);
                Err(PipelineError::Recognizer {
                    message: format!("{:#}", e),
                })
            }
        }
    }

    fn tick(&self, run: RunId, index: usize) -> StepTick {
        let kind = self.steps[index].kind;
        StepTick {
            run,
            index,
            kind,
            delay: self.timings.for_step(kind),
        }
    }
}
