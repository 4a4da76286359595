use std::convert::Infallible;
use std::path::PathBuf;

use iced::{
    Alignment::Center,
    Element, Font, Length, Task,
    widget::{button, column, container, image::Handle, mouse_area, row, text},
};
use rfd::AsyncFileDialog;

use crate::{
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::{card, confidence_badge, info_badge, share_bar, step_row},
    },
    models::AnprRun,
    pipeline::{Advance, AnprPipeline, RunId, StepTick, StepTimings},
    presentation::{PageView, ResultView},
    recognition::{MockRecognizer, PlateRecognizer},
    upload::{self, UploadSource, UploadedImage},
};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

#[derive(Debug, Clone)]
pub struct AnprPageScreen {
    pipeline: AnprPipeline,
    recognizer: MockRecognizer,
    /// Decoded lazily by the renderer; rebuilt only when the upload changes
    preview: Option<Handle>,
    reads_started: u64,
    /// The only file read whose answer is still wanted
    pending_read: Option<ReadId>,
}

/// Identifies one file read; answers for any other read are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadId(u64);

#[derive(Debug, Clone)]
pub enum AnprPageMessage {
    PickImage,
    FileDropped(PathBuf),
    ImageRead(ReadId, Option<UploadedImage>),
    RemoveImage,
    Process,
    StepElapsed(StepTick),
    Recognized(RunId, Result<AnprRun, String>),
}

impl AnprPageScreen {
    pub fn new(timings: StepTimings) -> Self {
        Self {
            pipeline: AnprPipeline::new(timings),
            recognizer: MockRecognizer,
            preview: None,
            reads_started: 0,
            pending_read: None,
        }
    }

    /// Start tracking a new file read, superseding any read still pending
    fn begin_read(&mut self) -> ReadId {
        self.reads_started += 1;
        let read = ReadId(self.reads_started);
        self.pending_read = Some(read);
        read
    }

    fn schedule(tick: StepTick) -> Task<ScreenMessage<Self>> {
        Task::perform(tokio::time::sleep(tick.delay), move |_| {
            ScreenMessage::ScreenMessage(AnprPageMessage::StepElapsed(tick))
        })
    }

    fn recognize(&self, run: RunId) -> Task<ScreenMessage<Self>> {
        let Some(image) = self.pipeline.image().cloned() else {
            return Task::none();
        };
        let recognizer = self.recognizer;
        Task::perform(
            async move {
                recognizer
                    .recognize(&image)
                    .await
                    .map_err(|e| format!("{:#}", e))
            },
            move |result| ScreenMessage::ScreenMessage(AnprPageMessage::Recognized(run, result)),
        )
    }

    fn upload_card(&self, page: &PageView) -> Element<'_, ScreenMessage<Self>> {
        let drop_zone: Element<'_, ScreenMessage<Self>> = match &self.preview {
            Some(handle) => column![
                mouse_area(iced::widget::image(handle.clone()).height(256))
                    .on_press(ScreenMessage::ScreenMessage(AnprPageMessage::PickImage)),
                button("Remove Image")
                    .style(button::secondary)
                    .on_press(ScreenMessage::ScreenMessage(AnprPageMessage::RemoveImage)),
            ]
            .spacing(16)
            .align_x(Center)
            .into(),
            None => mouse_area(
                container(
                    column![
                        text("⇪").size(40),
                        text("Drop your image here").size(18),
                        text("or click to browse"),
                    ]
                    .spacing(8)
                    .align_x(Center),
                )
                .padding(32)
                .center_x(Length::Fill),
            )
            .on_press(ScreenMessage::ScreenMessage(AnprPageMessage::PickImage))
            .into(),
        };

        let mut content = column![container(drop_zone).padding(8).center_x(Length::Fill)].spacing(16);

        if let Some(process) = page.process_button {
            content = content.push(
                button(text(process.label))
                    .width(Length::Fill)
                    .on_press_maybe(
                        process
                            .enabled
                            .then_some(ScreenMessage::ScreenMessage(AnprPageMessage::Process)),
                    ),
            );
        }

        card(
            "Image Upload",
            "Upload an image containing license plates for recognition",
            content,
        )
    }

    fn pipeline_card<'a>(page: &PageView) -> Element<'a, ScreenMessage<Self>> {
        let steps = page
            .steps
            .iter()
            .fold(column![].spacing(12), |col, step| col.push(step_row(step)));

        card(
            "Processing Pipeline",
            "Step-by-step ANPR processing using YOLO11",
            steps,
        )
    }

    fn result_cards<'a>(results: ResultView) -> Element<'a, ScreenMessage<Self>> {
        let detection = &results.detection;
        let detection_rows = detection.rows.iter().fold(column![].spacing(12), |col, row| {
            col.push(
                container(
                    column![
                        row![
                            text(row.label.clone()).width(Length::Fill),
                            confidence_badge(&row.confidence),
                        ]
                        .align_y(Center),
                        text(format!("Bbox: {}", row.bbox)).size(12),
                        text(format!("Class: {}", row.class)).size(12),
                    ]
                    .spacing(4),
                )
                .padding(12)
                .style(container::rounded_box),
            )
        });
        let cropped = detection
            .cropped_plates
            .iter()
            .fold(column![text("Cropped Plates:")].spacing(4), |col, plate| {
                col.push(text(plate.clone()).size(12).font(Font::MONOSPACE))
            });

        let detection_card = card(
            "Detection Results",
            "License plate detection using YOLO11",
            column![
                row![
                    text("Processing Time:").width(Length::Fill),
                    info_badge(&detection.processing_time),
                ],
                detection_rows,
                cropped,
            ]
            .spacing(16),
        );

        let recognition = &results.recognition;
        let plates = recognition.plates.iter().fold(column![].spacing(16), |col, plate| {
            let tiles = plate.characters.chunks(4).fold(column![].spacing(8), |grid, chunk| {
                grid.push(chunk.iter().fold(row![].spacing(8), |r, tile| {
                    r.push(
                        container(
                            column![
                                text(tile.character.to_string()).font(Font::MONOSPACE).size(18),
                                text(tile.confidence.clone()).size(12),
                            ]
                            .align_x(Center),
                        )
                        .padding(8)
                        .width(Length::Fill)
                        .style(container::rounded_box),
                    )
                }))
            });
            col.push(
                column![
                    container(
                        row![
                            text(plate.plate.clone())
                                .font(Font::MONOSPACE)
                                .size(22)
                                .width(Length::Fill),
                            confidence_badge(&plate.confidence),
                        ]
                        .align_y(Center),
                    )
                    .padding(16)
                    .style(container::bordered_box),
                    text("Character Analysis:"),
                    tiles,
                ]
                .spacing(8),
            )
        });

        let recognition_card = card(
            "Recognition Results",
            "Character recognition from detected plates",
            column![
                row![
                    text("Processing Time:").width(Length::Fill),
                    info_badge(&recognition.processing_time),
                ],
                plates,
            ]
            .spacing(16),
        );

        let summary = &results.summary;
        let breakdown = summary
            .breakdown
            .iter()
            .fold(column![text("Performance Breakdown:")].spacing(8), |col, bar| {
                col.push(share_bar(bar))
            });
        let summary_card = card(
            "Processing Summary",
            "Overall processing statistics",
            column![
                row![text("Total Time:").width(Length::Fill), info_badge(&summary.total_time)],
                row![
                    text("Plates Detected:").width(Length::Fill),
                    info_badge(&summary.plates_detected.to_string()),
                ],
                row![
                    text("Plates Recognized:").width(Length::Fill),
                    info_badge(&summary.plates_recognized.to_string()),
                ],
                row![text("Status:").width(Length::Fill), info_badge(summary.status())],
                breakdown,
            ]
            .spacing(12),
        );

        row![detection_card, recognition_card, summary_card]
            .spacing(24)
            .into()
    }
}

impl Screen for AnprPageScreen {
    type Message = AnprPageMessage;
    type ParentMessage = Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let page = PageView::from_pipeline(&self.pipeline);

        let mut content = column![
            column![text(page.title).size(30), text(page.subtitle)].spacing(8),
            row![self.upload_card(&page), Self::pipeline_card(&page)].spacing(32),
        ]
        .spacing(32)
        .padding(32);

        if let Some(results) = page.results {
            content = content.push(Self::result_cards(results));
        }

        content.into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            AnprPageMessage::PickImage => {
                let read = self.begin_read();
                Task::perform(
                    async {
                        let handle = AsyncFileDialog::new()
                            .set_title("Select an image")
                            .add_filter("Images", IMAGE_EXTENSIONS)
                            .pick_file()
                            .await;
                        upload::read_upload_async(
                            handle.map(|h| h.path().to_path_buf()),
                            UploadSource::Picker,
                        )
                        .await
                    },
                    move |image| ScreenMessage::ScreenMessage(AnprPageMessage::ImageRead(read, image)),
                )
            }
            AnprPageMessage::FileDropped(path) => {
                // One drop of several files arrives as a burst; only the first is read
                if self.pending_read.is_some() {
                    tracing::debug!("Ignoring dropped file {:?}: a read is in flight", path);
                    return Task::none();
                }
                let read = self.begin_read();
                Task::perform(
                    upload::read_upload_async(Some(path), UploadSource::Drop),
                    move |image| ScreenMessage::ScreenMessage(AnprPageMessage::ImageRead(read, image)),
                )
            }
            AnprPageMessage::ImageRead(read, image) => {
                if self.pending_read != Some(read) {
                    tracing::debug!("Dropping superseded file read");
                    return Task::none();
                }
                self.pending_read = None;
                if let Some(image) = image {
                    self.preview = Some(Handle::from_bytes(image.bytes().to_vec()));
                    self.pipeline.select_image(image);
                }
                Task::none()
            }
            AnprPageMessage::RemoveImage => {
                self.pending_read = None;
                self.pipeline.clear_image();
                self.preview = None;
                Task::none()
            }
            AnprPageMessage::Process => match self.pipeline.start_run() {
                Ok(tick) => Self::schedule(tick),
                Err(e) => {
                    tracing::debug!("Process request ignored: {}", e);
                    Task::none()
                }
            },
            AnprPageMessage::StepElapsed(tick) => match self.pipeline.complete_step(tick) {
                Ok(Advance::Next(next)) => Self::schedule(next),
                Ok(Advance::AwaitingResult(run)) => self.recognize(run),
                Err(e) => {
                    tracing::debug!("Step tick ignored: {}", e);
                    Task::none()
                }
            },
            AnprPageMessage::Recognized(run, Ok(result)) => {
                if let Err(e) = self.pipeline.finish(run, result) {
                    tracing::debug!("Result ignored: {}", e);
                }
                Task::none()
            }
            AnprPageMessage::Recognized(run, Err(e)) => {
                tracing::warn!("Recognition failed for run {}: {}", run, e);
                self.pipeline.abort(run);
                Task::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineState;
    use crate::routes::Route;
    use crate::settings::{FilePreferenceStore, ThemeSettings};

    fn app_state(dir: &tempfile::TempDir) -> AppState {
        AppState::new(ThemeSettings::load(FilePreferenceStore::new(dir.path())), Route::Anpr)
    }

    fn image(name: &str) -> UploadedImage {
        UploadedImage::new(name, "image/png", vec![1u8, 2, 3])
    }

    #[test]
    fn test_multi_file_drop_keeps_first_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut state = app_state(&dir);
        let mut screen = AnprPageScreen::new(StepTimings::instant());

        let _ = screen.update(AnprPageMessage::FileDropped(PathBuf::from("a.png")), &mut state);
        let first = screen.pending_read.expect("read started");
        let _ = screen.update(AnprPageMessage::FileDropped(PathBuf::from("b.png")), &mut state);
        assert_eq!(screen.pending_read, Some(first));

        let _ = screen.update(AnprPageMessage::ImageRead(first, Some(image("a.png"))), &mut state);
        assert_eq!(screen.pipeline.image().map(|i| i.name()), Some("a.png"));
        assert!(screen.pending_read.is_none());
    }

    #[test]
    fn test_superseded_read_is_dropped() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut state = app_state(&dir);
        let mut screen = AnprPageScreen::new(StepTimings::instant());

        let _ = screen.update(AnprPageMessage::FileDropped(PathBuf::from("a.png")), &mut state);
        let stale = screen.pending_read.expect("read started");
        let _ = screen.update(AnprPageMessage::PickImage, &mut state);
        let latest = screen.pending_read.expect("picker read started");
        assert_ne!(stale, latest);

        let _ = screen.update(AnprPageMessage::ImageRead(stale, Some(image("a.png"))), &mut state);
        assert_eq!(screen.pipeline.state(), PipelineState::Idle);

        let _ = screen.update(AnprPageMessage::ImageRead(latest, Some(image("b.png"))), &mut state);
        assert_eq!(screen.pipeline.image().map(|i| i.name()), Some("b.png"));
    }

    #[test]
    fn test_read_finishing_after_remove_is_dropped() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut state = app_state(&dir);
        let mut screen = AnprPageScreen::new(StepTimings::instant());

        let _ = screen.update(AnprPageMessage::PickImage, &mut state);
        let read = screen.pending_read.expect("read started");
        let _ = screen.update(AnprPageMessage::RemoveImage, &mut state);

        let _ = screen.update(AnprPageMessage::ImageRead(read, Some(image("a.png"))), &mut state);
        assert_eq!(screen.pipeline.state(), PipelineState::Idle);
        assert!(screen.preview.is_none());
    }

    #[test]
    fn test_rejected_drop_frees_the_next_drop() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut state = app_state(&dir);
        let mut screen = AnprPageScreen::new(StepTimings::instant());

        let _ = screen.update(AnprPageMessage::FileDropped(PathBuf::from("notes.txt")), &mut state);
        let read = screen.pending_read.expect("read started");
        let _ = screen.update(AnprPageMessage::ImageRead(read, None), &mut state);
        assert!(screen.pending_read.is_none());

        let _ = screen.update(AnprPageMessage::FileDropped(PathBuf::from("car.png")), &mut state);
        assert!(screen.pending_read.is_some_and(|r| r != read));
    }
}
