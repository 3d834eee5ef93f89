use super::actions::DesktopAction;
use super::state::*;
use super::window_manager::WindowManager;
use crate::engine::assets::site_manifest::SiteManifest;
use crate::engine::core::view_state::{ViewMode, ViewStateMachine};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::desktop::{BUTTON_HOVERED, BUTTON_PRESSED};

// Hover and press feedback for every desktop button
pub fn button_feedback(
    mut q: Query<(&Interaction, &IdleColor, &mut FadeBackground), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, idle, mut colour) in &mut q {
        colour.0 = match *interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVERED,
            Interaction::None => idle.0,
        };
    }
}

pub fn icon_interaction(
    q: Query<(&Interaction, &DesktopIcon), (Changed<Interaction>, With<Button>)>,
    site: Res<SiteManifest>,
    mut actions: EventWriter<DesktopAction>,
) {
    for (interaction, icon) in &q {
        if *interaction == Interaction::Pressed {
            actions.write(DesktopAction::for_icon(icon.0, &site));
        }
    }
}

pub fn chrome_button_interaction(
    q: Query<(&Interaction, &ChromeButton), (Changed<Interaction>, With<Button>)>,
    mut actions: EventWriter<DesktopAction>,
) {
    for (interaction, chrome) in &q {
        if *interaction != Interaction::Pressed {
            continue;
        }
        actions.write(match chrome.kind {
            ChromeKind::Minimize => DesktopAction::ToggleMinimize(chrome.panel),
            ChromeKind::Maximize => DesktopAction::ToggleMaximize(chrome.panel),
            ChromeKind::Close => DesktopAction::ClosePanel(chrome.panel),
        });
    }
}

pub fn taskbar_interaction(
    entries: Query<(&Interaction, &TaskbarEntryButton), (Changed<Interaction>, With<Button>)>,
    power: Query<&Interaction, (Changed<Interaction>, With<ReturnButton>)>,
    mut actions: EventWriter<DesktopAction>,
) {
    for (interaction, entry) in &entries {
        if *interaction == Interaction::Pressed {
            actions.write(DesktopAction::TaskbarClick(entry.0));
        }
    }
    if power.iter().any(|i| *i == Interaction::Pressed) {
        actions.write(DesktopAction::ReturnToRoom);
    }
}

pub fn resume_button_interaction(
    q: Query<(&Interaction, &ResumeButton), (Changed<Interaction>, With<Button>)>,
    mut actions: EventWriter<DesktopAction>,
) {
    for (interaction, button) in &q {
        if *interaction == Interaction::Pressed {
            actions.write(match button {
                ResumeButton::Download => DesktopAction::DownloadResume,
                ResumeButton::OpenFullscreen => DesktopAction::OpenResumeFullscreen,
            });
        }
    }
}

// Clicking anywhere on a window brings it to the front
pub fn window_focus_interaction(
    q: Query<(&Interaction, &WindowFrame), Changed<Interaction>>,
    mut actions: EventWriter<DesktopAction>,
) {
    for (interaction, frame) in &q {
        if *interaction == Interaction::Pressed {
            actions.write(DesktopAction::FocusPanel(frame.0));
        }
    }
}

/// Title bar drag. Pressing focuses; movement only applies to restored windows.
/// Leaving the desktop view drops any drag in progress.
pub fn title_bar_drag(
    bars: Query<(&Interaction, &TitleBar), Changed<Interaction>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    view: Res<ViewStateMachine>,
    mut windows: ResMut<WindowManager>,
) {
    if view.mode() != ViewMode::Desktop {
        if windows.is_dragging() {
            windows.end_drag();
        }
        return;
    }
    let Ok(window) = window_query.single() else {
        return;
    };
    let cursor = window.cursor_position();

    for (interaction, bar) in &bars {
        if *interaction == Interaction::Pressed {
            if let Some(cursor) = cursor {
                windows.begin_drag(bar.0, cursor);
            }
        }
    }

    if !windows.is_dragging() {
        return;
    }
    if !mouse_button.pressed(MouseButton::Left) {
        windows.end_drag();
        return;
    }
    if let Some(cursor) = cursor {
        windows.drag_to(cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::content::PanelId;
    use crate::engine::camera::transition::CameraPose;

    fn room_view() -> ViewStateMachine {
        ViewStateMachine::new(CameraPose::new(Vec3::new(0.0, 1.5, 4.0), Vec3::ZERO))
    }

    fn desktop_view() -> ViewStateMachine {
        let mut view = room_view();
        view.begin_enter(CameraPose::new(Vec3::new(0.0, 1.0, 1.0), Vec3::new(0.0, 1.0, 0.0)));
        view.on_camera_arrived();
        view.on_boot_finished();
        assert_eq!(view.mode(), ViewMode::Desktop);
        view
    }

    fn app_with_drag(view: ViewStateMachine) -> App {
        let mut windows = WindowManager::default();
        windows.open_panel(PanelId::About);
        windows.toggle_maximize(PanelId::About);
        assert!(windows.begin_drag(PanelId::About, Vec2::new(400.0, 300.0)));

        let mut mouse = ButtonInput::<MouseButton>::default();
        mouse.press(MouseButton::Left);

        let mut app = App::new();
        app.insert_resource(windows)
            .insert_resource(view)
            .insert_resource(mouse)
            .add_systems(Update, title_bar_drag);
        app.world_mut().spawn((Window::default(), PrimaryWindow));
        app
    }

    #[test]
    fn drag_continues_on_the_desktop() {
        let mut app = app_with_drag(desktop_view());
        app.update();
        assert!(app.world().resource::<WindowManager>().is_dragging());
    }

    #[test]
    fn drag_is_dropped_outside_the_desktop() {
        let mut app = app_with_drag(room_view());
        app.update();
        assert!(!app.world().resource::<WindowManager>().is_dragging());
    }
}
