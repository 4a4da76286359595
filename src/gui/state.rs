use crate::layout::LayoutShell;
use crate::routes::Route;
use crate::settings::{FilePreferenceStore, ThemeSettings};

/// State shared by every screen
#[derive(Debug)]
pub struct AppState {
    pub theme: ThemeSettings<FilePreferenceStore>,
    pub shell: LayoutShell,
    pub route: Route,
}

impl AppState {
    pub fn new(theme: ThemeSettings<FilePreferenceStore>, route: Route) -> Self {
        Self {
            theme,
            shell: LayoutShell::default(),
            route,
        }
    }
}
