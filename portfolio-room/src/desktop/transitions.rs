use super::clock::{TaskbarClock, current_clock_text};
use super::sequencer::{Fade, OverlaySequence, SequenceKind};
use super::state::*;
use super::window_manager::WindowManager;
use crate::engine::assets::site_manifest::SiteManifest;
use crate::engine::camera::viewport_camera::StageActionEvent;
use crate::engine::core::view_state::{StageAction, ViewStateMachine};
use bevy::prelude::*;
use constants::desktop::{OVERLAY_BACKGROUND, PROGRESS_FILL};
use constants::sequencer::NOTIFICATION_DISMISS_SECONDS;

/// Start overlays, fades and window teardown for the desktop-side stage actions.
pub fn apply_desktop_stage_actions(
    mut commands: Commands,
    mut events: EventReader<StageActionEvent>,
    mut ui: ResMut<DesktopUi>,
    mut active: ResMut<ActiveSequence>,
    mut windows: ResMut<WindowManager>,
    mut notification: ResMut<NotificationState>,
    mut clock: ResMut<TaskbarClock>,
    root: Query<Entity, With<DesktopRoot>>,
    site: Res<SiteManifest>,
) {
    for StageActionEvent(action) in events.read() {
        match action {
            StageAction::StartBoot => start_sequence(&mut commands, &mut active, OverlaySequence::boot()),
            StageAction::RevealDesktop => {
                ui.visible = true;
                ui.opacity = 0.0;
                ui.fade = Some(Fade::fade_in());
                clock.text = current_clock_text();
                clock.timer.reset();
                if let Ok(root) = root.single() {
                    show_notification(&mut commands, &mut notification, root, &site.welcome_message());
                }
                info!("Desktop revealed");
            }
            StageAction::FadeOutDesktop => {
                ui.fade = Some(Fade::fade_out_from(ui.opacity));
            }
            StageAction::CloseDesktopAndShutdown => {
                let closed = windows.close_all();
                info!("Closed {} window(s) for shutdown", closed.len());
                dismiss_notification(&mut commands, &mut notification);
                ui.visible = false;
                ui.opacity = 0.0;
                ui.fade = None;
                start_sequence(&mut commands, &mut active, OverlaySequence::shutdown());
            }
            StageAction::MoveCamera(_) | StageAction::EnableOrbit => {}
        }
    }
}

fn start_sequence(commands: &mut Commands, active: &mut ActiveSequence, sequence: OverlaySequence) {
    if let Some(previous) = active.overlay.take() {
        commands.entity(previous).despawn();
    }
    active.overlay = Some(spawn_sequence_overlay(commands, &sequence));
    active.sequence = Some(sequence);
    debug!("{:?} sequence started", sequence.kind());
}

fn spawn_sequence_overlay(commands: &mut Commands, sequence: &OverlaySequence) -> Entity {
    commands
        .spawn((
            SequenceOverlay,
            Name::new("SequenceOverlay"),
            GlobalZIndex(100),
            BackgroundColor(OVERLAY_BACKGROUND),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(18.0),
                ..default()
            },
        ))
        .with_children(|overlay| {
            overlay.spawn((
                Text::new(sequence.label()),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            if sequence.progress().is_some() {
                overlay
                    .spawn((
                        BackgroundColor(Color::srgb(0.18, 0.18, 0.20)),
                        Node {
                            width: Val::Px(260.0),
                            height: Val::Px(8.0),
                            overflow: Overflow::clip(),
                            ..default()
                        },
                    ))
                    .with_children(|track| {
                        track.spawn((
                            SequenceProgressFill,
                            BackgroundColor(PROGRESS_FILL),
                            Node {
                                width: Val::Percent(0.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                        ));
                    });
            }
        })
        .id()
}

/// Advance the boot/shutdown overlay and report completion to the state machine.
pub fn drive_sequence_overlay(
    mut commands: Commands,
    time: Res<Time>,
    mut active: ResMut<ActiveSequence>,
    mut view: ResMut<ViewStateMachine>,
    mut stage_actions: EventWriter<StageActionEvent>,
    mut fills: Query<&mut Node, With<SequenceProgressFill>>,
    mut backgrounds: Query<&mut BackgroundColor>,
    children: Query<&Children>,
    mut texts: Query<&mut TextColor>,
) {
    let Some(sequence) = active.sequence.as_mut() else {
        return;
    };
    sequence.advance(time.delta_secs());
    let sequence = *sequence;

    if let Some(progress) = sequence.progress() {
        for mut node in &mut fills {
            node.width = Val::Percent(progress * 100.0);
        }
    }

    if let Some(overlay) = active.overlay {
        let alpha = sequence.alpha();
        for entity in std::iter::once(overlay).chain(children.iter_descendants(overlay)) {
            if let Ok(mut colour) = backgrounds.get_mut(entity) {
                colour.0.set_alpha(alpha);
            }
            if let Ok(mut colour) = texts.get_mut(entity) {
                colour.0.set_alpha(alpha);
            }
        }
    }

    if !sequence.is_finished() {
        return;
    }

    if let Some(overlay) = active.overlay.take() {
        commands.entity(overlay).despawn();
    }
    active.sequence = None;

    let next = match sequence.kind() {
        SequenceKind::Boot => view.on_boot_finished(),
        SequenceKind::Shutdown => view.on_shutdown_finished(),
    };
    if let Some(action) = next {
        stage_actions.write(StageActionEvent(action));
    }
}

/// Step the desktop fade; a finished fade-out tells the state machine the desktop is hidden.
pub fn drive_desktop_fade(
    time: Res<Time>,
    mut ui: ResMut<DesktopUi>,
    mut view: ResMut<ViewStateMachine>,
    mut stage_actions: EventWriter<StageActionEvent>,
) {
    let Some(mut fade) = ui.fade else {
        return;
    };
    ui.opacity = fade.advance(time.delta_secs());

    if !fade.is_finished() {
        ui.fade = Some(fade);
        return;
    }
    ui.fade = None;

    if !fade.is_fading_in() {
        if let Some(action) = view.on_desktop_hidden() {
            stage_actions.write(StageActionEvent(action));
        }
    }
}

fn show_notification(commands: &mut Commands, state: &mut NotificationState, root: Entity, message: &str) {
    dismiss_notification(commands, state);

    let text_colour = Color::WHITE;
    let banner = commands
        .spawn((
            NotificationBanner,
            Name::new("Notification"),
            ZIndex(2),
            BackgroundColor(Color::srgba(0.10, 0.11, 0.13, 0.92)),
            FadeBackground(Color::srgba(0.10, 0.11, 0.13, 0.92)),
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(16.0),
                top: Val::Px(16.0),
                max_width: Val::Px(360.0),
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            },
        ))
        .with_children(|banner| {
            banner.spawn((
                Text::new(message),
                TextFont {
                    font_size: 15.0,
                    ..default()
                },
                TextColor(text_colour),
                FadeText(text_colour),
            ));
        })
        .id();
    commands.entity(root).add_child(banner);

    state.banner = Some(banner);
    state.timer = Some(Timer::from_seconds(NOTIFICATION_DISMISS_SECONDS, TimerMode::Once));
}

fn dismiss_notification(commands: &mut Commands, state: &mut NotificationState) {
    if let Some(banner) = state.banner.take() {
        commands.entity(banner).despawn();
    }
    state.timer = None;
}

pub fn dismiss_notification_after_delay(
    mut commands: Commands,
    time: Res<Time>,
    mut state: ResMut<NotificationState>,
) {
    let Some(timer) = state.timer.as_mut() else {
        return;
    };
    if timer.tick(time.delta()).finished() {
        dismiss_notification(&mut commands, &mut state);
    }
}

/// Refresh the clock text once per tick. Only scheduled while the desktop is up.
pub fn tick_taskbar_clock(
    time: Res<Time>,
    mut clock: ResMut<TaskbarClock>,
    mut texts: Query<&mut Text, With<ClockText>>,
) {
    let ticked = clock.bypass_change_detection().timer.tick(time.delta()).just_finished();
    if ticked {
        clock.text = current_clock_text();
    }
    if !clock.is_changed() {
        return;
    }
    for mut text in &mut texts {
        text.0 = clock.text.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::transition::CameraPose;
    use crate::engine::core::view_state::ViewMode;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    const FRAME: Duration = Duration::from_millis(125);

    fn desktop_app(view: ViewStateMachine) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
            .insert_resource(view)
            .init_resource::<DesktopUi>()
            .init_resource::<ActiveSequence>()
            .init_resource::<WindowManager>()
            .init_resource::<NotificationState>()
            .init_resource::<TaskbarClock>()
            .init_resource::<SiteManifest>()
            .add_event::<StageActionEvent>()
            .add_systems(
                Update,
                (
                    apply_desktop_stage_actions,
                    drive_sequence_overlay,
                    drive_desktop_fade,
                    dismiss_notification_after_delay,
                )
                    .chain(),
            );
        app.world_mut().spawn((DesktopRoot, Node::default()));
        app
    }

    fn booting_view() -> ViewStateMachine {
        let mut view = ViewStateMachine::new(CameraPose::new(Vec3::new(0.0, 1.5, 4.0), Vec3::ZERO));
        view.begin_enter(CameraPose::new(Vec3::new(0.0, 1.0, 1.0), Vec3::new(0.0, 1.0, 0.0)));
        view.on_camera_arrived();
        view
    }

    fn desktop_view() -> ViewStateMachine {
        let mut view = booting_view();
        view.on_boot_finished();
        view
    }

    fn update_until(app: &mut App, max_frames: usize, done: impl Fn(&World) -> bool) -> bool {
        for _ in 0..max_frames {
            app.update();
            if done(app.world()) {
                return true;
            }
        }
        false
    }

    #[test]
    fn boot_reveals_desktop_then_fades_in_over_half_a_second() {
        let mut app = desktop_app(booting_view());
        app.world_mut().send_event(StageActionEvent(StageAction::StartBoot));

        app.update();
        assert!(app.world().resource::<ActiveSequence>().sequence.is_some());
        assert!(!app.world().resource::<DesktopUi>().visible);

        assert!(update_until(&mut app, 40, |world| world.resource::<DesktopUi>().visible));
        assert_eq!(app.world().resource::<ViewStateMachine>().mode(), ViewMode::Desktop);
        assert!(app.world().resource::<ActiveSequence>().sequence.is_none());

        // Reveal frame already stepped the fade once.
        let ui = app.world().resource::<DesktopUi>();
        assert!((ui.opacity - 0.25).abs() < 1e-5);
        assert!(ui.fade.is_some());

        app.update();
        app.update();
        assert!((app.world().resource::<DesktopUi>().opacity - 0.75).abs() < 1e-5);

        app.update();
        let ui = app.world().resource::<DesktopUi>();
        assert_eq!(ui.opacity, 1.0);
        assert!(ui.fade.is_none());

        let mut overlays = app.world_mut().query_filtered::<Entity, With<SequenceOverlay>>();
        assert_eq!(overlays.iter(app.world()).count(), 0);
    }

    #[test]
    fn welcome_notification_dismisses_itself() {
        let mut app = desktop_app(desktop_view());
        app.world_mut().send_event(StageActionEvent(StageAction::RevealDesktop));

        app.update();
        assert!(app.world().resource::<NotificationState>().banner.is_some());
        let mut banners = app.world_mut().query_filtered::<Entity, With<NotificationBanner>>();
        assert_eq!(banners.iter(app.world()).count(), 1);

        // Still up halfway through.
        for _ in 0..20 {
            app.update();
        }
        assert!(app.world().resource::<NotificationState>().banner.is_some());

        assert!(update_until(&mut app, 30, |world| {
            world.resource::<NotificationState>().banner.is_none()
        }));
        app.update();
        assert_eq!(banners.iter(app.world()).count(), 0);
    }

    #[test]
    fn clock_text_refreshes_once_per_tick() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
            .insert_resource(TaskbarClock {
                timer: Timer::from_seconds(1.0, TimerMode::Repeating),
                text: "stale".to_string(),
            })
            .add_systems(Update, tick_taskbar_clock);
        let label = app.world_mut().spawn((ClockText, Text::new(""))).id();

        // First frame copies the existing text; half a second later nothing has ticked.
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(app.world().get::<Text>(label).unwrap().0, "stale");

        for _ in 0..5 {
            app.update();
        }
        let text = &app.world().get::<Text>(label).unwrap().0;
        assert_ne!(text, "stale");
        assert_eq!(text, &app.world().resource::<TaskbarClock>().text);
    }
}
