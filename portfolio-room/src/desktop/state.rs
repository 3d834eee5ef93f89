use super::content::PanelId;
use super::sequencer::{Fade, OverlaySequence};
use bevy::prelude::*;

/// Full-screen desktop container; hidden outside the desktop view.
#[derive(Component)]
pub struct DesktopRoot;

/// Area above the taskbar that holds the window frames.
#[derive(Component)]
pub struct WindowLayer;

#[derive(Component)]
pub struct DesktopIcon(pub PanelId);

#[derive(Component)]
pub struct WindowFrame(pub PanelId);

/// Drag handle of a window.
#[derive(Component)]
pub struct TitleBar(pub PanelId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeKind {
    Minimize,
    Maximize,
    Close,
}

#[derive(Component)]
pub struct ChromeButton {
    pub panel: PanelId,
    pub kind: ChromeKind,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeButton {
    Download,
    OpenFullscreen,
}

#[derive(Component)]
pub struct TaskbarEntries;

#[derive(Component)]
pub struct TaskbarEntryButton(pub PanelId);

#[derive(Component)]
pub struct ReturnButton;

#[derive(Component)]
pub struct ClockText;

#[derive(Component)]
pub struct NotificationBanner;

/// Boot or shutdown overlay root.
#[derive(Component)]
pub struct SequenceOverlay;

#[derive(Component)]
pub struct SequenceProgressFill;

/// Colour a button returns to when not hovered or pressed.
#[derive(Component, Clone, Copy)]
pub struct IdleColor(pub Color);

/// Unfaded background colour; the drawn colour is this scaled by desktop opacity.
#[derive(Component, Clone, Copy)]
pub struct FadeBackground(pub Color);

/// Unfaded text colour.
#[derive(Component, Clone, Copy)]
pub struct FadeText(pub Color);

/// Visibility and opacity of the desktop UI as a whole.
#[derive(Resource, Debug, Default)]
pub struct DesktopUi {
    pub visible: bool,
    pub opacity: f32,
    pub fade: Option<Fade>,
}

/// The overlay currently playing, if any.
#[derive(Resource, Default)]
pub struct ActiveSequence {
    pub sequence: Option<OverlaySequence>,
    pub overlay: Option<Entity>,
}

/// Welcome banner auto-dismiss timer.
#[derive(Resource, Default)]
pub struct NotificationState {
    pub timer: Option<Timer>,
    pub banner: Option<Entity>,
}
