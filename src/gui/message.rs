use std::path::PathBuf;

use crate::gui::screens::{ScreenMessage, anpr_page::AnprPageScreen};

#[derive(Debug, Clone)]
pub enum Message {
    AnprPage(ScreenMessage<AnprPageScreen>),
    FileDropped(PathBuf),
    ToggleTheme,
    ToggleMenu,
    Navigate(&'static str),
}
