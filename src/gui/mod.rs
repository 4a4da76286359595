mod app;
mod message;
mod screens;
mod state;
mod widgets;

pub use app::AnprApp;
pub use message::Message;
pub use state::AppState;

use std::path::PathBuf;

use crate::routes::Route;

/// Open the main window and block until it is closed
pub fn run(settings_dir: PathBuf, route: Route) -> anyhow::Result<()> {
    iced::application(
        move || AnprApp::new(settings_dir.clone(), route),
        AnprApp::update,
        AnprApp::view,
    )
    .title(AnprApp::title)
    .theme(AnprApp::theme)
    .subscription(AnprApp::subscription)
    .run()
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}
