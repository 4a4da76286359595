pub mod anpr_page;

use iced::{Element, Task};

use crate::{
    gui::{AppState, Message},
    pipeline::StepTimings,
    routes::Route,
};

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug;
    type ParentMessage: std::fmt::Debug;
    fn view(&self) -> Element<'_, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    AnprPage(anpr_page::AnprPageScreen),
}

impl ScreenData {
    pub fn for_route(route: Route, timings: StepTimings) -> Self {
        match route {
            Route::Anpr => ScreenData::AnprPage(anpr_page::AnprPageScreen::new(timings)),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match self {
            ScreenData::AnprPage(screen) => screen.view().map(Message::AnprPage),
        }
    }

    pub fn update(&mut self, message: Message, state: &mut AppState) -> Task<Message> {
        match (self, message) {
            (ScreenData::AnprPage(page), Message::AnprPage(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::AnprPage),
                ScreenMessage::ParentMessage(never) => match never {},
            },
            _ => Task::none(),
        }
    }
}
