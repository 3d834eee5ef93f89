use super::content::PanelId;
use super::external::{LinkTarget, open_link};
use super::window_manager::WindowManager;
use crate::engine::assets::site_manifest::SiteManifest;
use crate::engine::camera::viewport_camera::StageActionEvent;
use crate::engine::core::view_state::{ViewMode, ViewStateMachine};
use bevy::prelude::*;

/// Every user-level command the desktop understands. Emitted by the in-app UI
/// and by the host page bridge.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum DesktopAction {
    ReturnToRoom,
    OpenPanel(PanelId),
    ClosePanel(PanelId),
    ToggleMinimize(PanelId),
    ToggleMaximize(PanelId),
    FocusPanel(PanelId),
    TaskbarClick(PanelId),
    OpenExternal(String),
    DownloadResume,
    OpenResumeFullscreen,
}

impl DesktopAction {
    /// Spotify is a link; every other icon opens its window.
    pub fn for_icon(panel: PanelId, site: &SiteManifest) -> Self {
        if panel.has_window() {
            DesktopAction::OpenPanel(panel)
        } else {
            DesktopAction::OpenExternal(site.spotify_url.clone())
        }
    }

    pub fn is_window_action(&self) -> bool {
        matches!(
            self,
            DesktopAction::OpenPanel(_)
                | DesktopAction::ClosePanel(_)
                | DesktopAction::ToggleMinimize(_)
                | DesktopAction::ToggleMaximize(_)
                | DesktopAction::FocusPanel(_)
                | DesktopAction::TaskbarClick(_)
        )
    }
}

/// Apply a window action to the manager. Returns false when nothing changed.
pub fn apply_window_action(windows: &mut WindowManager, action: &DesktopAction) -> bool {
    match *action {
        DesktopAction::OpenPanel(panel) => windows.open_panel(panel).is_some(),
        DesktopAction::ClosePanel(panel) => windows.close_panel(panel).is_some(),
        DesktopAction::ToggleMinimize(panel) => windows.toggle_minimize(panel),
        DesktopAction::ToggleMaximize(panel) => windows.toggle_maximize(panel),
        DesktopAction::FocusPanel(panel) => windows.focus(panel),
        DesktopAction::TaskbarClick(panel) => windows.taskbar_click(panel),
        _ => false,
    }
}

/// Route desktop actions to the window manager, the view state machine, or the browser.
pub fn handle_desktop_actions(
    mut actions: EventReader<DesktopAction>,
    mut windows: ResMut<WindowManager>,
    mut view: ResMut<ViewStateMachine>,
    mut stage_actions: EventWriter<StageActionEvent>,
    site: Res<SiteManifest>,
) {
    for action in actions.read() {
        if action.is_window_action() {
            if view.mode() != ViewMode::Desktop {
                debug!("Ignoring {:?} outside the desktop", action);
                continue;
            }
            if apply_window_action(&mut windows, action) {
                info!("Applied {:?}", action);
            } else {
                debug!("{:?} had no effect", action);
            }
            continue;
        }

        let link = match action {
            DesktopAction::ReturnToRoom => {
                if let Some(stage) = view.begin_return() {
                    stage_actions.write(StageActionEvent(stage));
                }
                None
            }
            DesktopAction::OpenExternal(url) => Some((url.clone(), LinkTarget::NewTab)),
            DesktopAction::DownloadResume => Some((
                site.resume_url.clone(),
                LinkTarget::Download(site.resume_file_name.clone()),
            )),
            DesktopAction::OpenResumeFullscreen => Some((site.resume_url.clone(), LinkTarget::NewTab)),
            _ => None,
        };

        if let Some((url, target)) = link {
            match open_link(&url, &target) {
                Ok(()) => info!("Opened {} ({:?})", url, target),
                Err(e) => error!("{}", e),
            }
        }
    }
}
