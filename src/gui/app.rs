use std::path::PathBuf;

use iced::{Element, Event, Subscription, Task, Theme, event, window};

use super::screens::{ScreenData, ScreenMessage, anpr_page::AnprPageMessage};
use super::{AppState, Message, widgets};
use crate::routes::Route;
use crate::settings::{self, FilePreferenceStore, ThemeSettings};

pub struct AnprApp {
    state: AppState,
    screen: ScreenData,
}

impl AnprApp {
    pub fn new(settings_dir: PathBuf, route: Route) -> (Self, Task<Message>) {
        let config = settings::load_config(&settings_dir);
        let theme = ThemeSettings::load(FilePreferenceStore::new(settings_dir));

        (
            Self {
                state: AppState::new(theme, route),
                screen: ScreenData::for_route(route, config.simulation.timings()),
            },
            Task::none(),
        )
    }

    pub fn title(&self) -> String {
        "ANPR Reader - Automatic Number Plate Recognition".to_string()
    }

    pub fn theme(&self) -> Theme {
        match self.state.theme.theme() {
            settings::Theme::Light => Theme::Light,
            settings::Theme::Dark => Theme::Dark,
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ToggleTheme => {
                if let Err(e) = self.state.theme.toggle() {
                    tracing::warn!("Failed to save theme preference: {:#}", e);
                }
                Task::none()
            }
            Message::ToggleMenu => {
                self.state.shell.toggle_mobile_menu();
                Task::none()
            }
            Message::Navigate(path) => {
                self.state.shell.close_mobile_menu();
                match Route::resolve(path) {
                    Some(route) => self.state.route = route,
                    None => tracing::debug!("No page at {}", path),
                }
                Task::none()
            }
            Message::FileDropped(path) => self.screen.update(
                Message::AnprPage(ScreenMessage::ScreenMessage(AnprPageMessage::FileDropped(
                    path,
                ))),
                &mut self.state,
            ),
            message @ Message::AnprPage(_) => self.screen.update(message, &mut self.state),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        widgets::layout(&self.state, self.screen.view())
    }
}
