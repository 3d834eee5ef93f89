use super::content::PanelId;
use super::state::*;
use super::window_manager::{TaskbarEntry, WindowManager, WindowRecord};
use bevy::prelude::*;
use constants::desktop::*;

const TEXT_LIGHT: Color = Color::srgb(1.0, 1.0, 1.0);
const TEXT_DARK: Color = Color::srgb(0.12, 0.12, 0.14);

fn label(value: impl Into<String>, font_size: f32, color: Color) -> impl Bundle {
    (
        Text::new(value),
        TextFont { font_size, ..default() },
        TextColor(color),
        FadeText(color),
    )
}

fn background(color: Color) -> impl Bundle {
    (BackgroundColor(color), FadeBackground(color))
}

fn button(color: Color) -> impl Bundle {
    (Button, BackgroundColor(color), FadeBackground(color), IdleColor(color))
}

// Spawns the hidden desktop: icon column, window layer and taskbar
pub fn spawn_desktop_ui(mut commands: Commands) {
    commands
        .spawn((
            DesktopRoot,
            Name::new("Desktop"),
            GlobalZIndex(10),
            background(DESKTOP_BACKGROUND),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                display: Display::None,
                ..default()
            },
        ))
        .with_children(|root| {
            root.spawn((
                Name::new("Icons"),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(16.0),
                    top: Val::Px(16.0),
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(12.0),
                    ..default()
                },
            ))
            .with_children(|icons| {
                for panel in PanelId::ALL {
                    spawn_icon(icons, panel);
                }
            });

            root.spawn((
                WindowLayer,
                Name::new("Windows"),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(0.0),
                    right: Val::Px(0.0),
                    top: Val::Px(0.0),
                    bottom: Val::Px(TASKBAR_HEIGHT),
                    ..default()
                },
            ));

            root.spawn((
                Name::new("Taskbar"),
                ZIndex(1),
                background(TASKBAR_BACKGROUND),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(0.0),
                    right: Val::Px(0.0),
                    bottom: Val::Px(0.0),
                    height: Val::Px(TASKBAR_HEIGHT),
                    padding: UiRect::axes(Val::Px(8.0), Val::Px(6.0)),
                    column_gap: Val::Px(8.0),
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    ..default()
                },
            ))
            .with_children(|taskbar| {
                taskbar
                    .spawn((
                        ReturnButton,
                        Name::new("ReturnButton"),
                        button(Color::srgb(0.55, 0.14, 0.14)),
                        Node {
                            height: Val::Percent(100.0),
                            padding: UiRect::horizontal(Val::Px(12.0)),
                            align_items: AlignItems::Center,
                            ..default()
                        },
                    ))
                    .with_children(|btn| {
                        btn.spawn(label("Power off", 15.0, TEXT_LIGHT));
                    });

                taskbar.spawn((
                    TaskbarEntries,
                    Name::new("TaskbarEntries"),
                    Node {
                        height: Val::Percent(100.0),
                        flex_grow: 1.0,
                        column_gap: Val::Px(6.0),
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        overflow: Overflow::clip_x(),
                        ..default()
                    },
                ));

                taskbar.spawn((ClockText, Name::new("Clock"), label("", 15.0, TEXT_LIGHT)));
            });
        });
}

fn spawn_icon(parent: &mut ChildSpawnerCommands, panel: PanelId) {
    let content = panel.content();
    parent
        .spawn((
            DesktopIcon(panel),
            Name::new(format!("Icon_{}", panel.as_str())),
            button(Color::NONE),
            Node {
                width: Val::Px(88.0),
                padding: UiRect::all(Val::Px(6.0)),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(4.0),
                ..default()
            },
        ))
        .with_children(|icon| {
            icon.spawn(label(content.icon, 26.0, TEXT_LIGHT));
            icon.spawn(label(content.title, 13.0, TEXT_LIGHT));
        });
}

fn apply_bounds(node: &mut Node, window: &WindowRecord) {
    node.left = Val::Px(window.bounds.min.x);
    node.top = Val::Px(window.bounds.min.y);
    node.width = Val::Px(window.bounds.width());
    node.height = Val::Px(window.bounds.height());
    node.display = if window.minimized { Display::None } else { Display::Flex };
}

fn spawn_window_frame(commands: &mut Commands, layer: Entity, window: &WindowRecord) -> Entity {
    let panel = window.panel;
    let content = panel.content();
    let mut node = Node {
        position_type: PositionType::Absolute,
        flex_direction: FlexDirection::Column,
        border: UiRect::all(Val::Px(1.0)),
        overflow: Overflow::clip(),
        ..default()
    };
    apply_bounds(&mut node, window);

    let frame = commands
        .spawn((
            WindowFrame(panel),
            Name::new(format!("Window_{}", panel.as_str())),
            Interaction::default(),
            bevy::ui::FocusPolicy::Block,
            ZIndex(window.z_order as i32),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.35)),
            background(WINDOW_BACKGROUND),
            node,
        ))
        .with_children(|frame| {
            frame
                .spawn((
                    TitleBar(panel),
                    Name::new("TitleBar"),
                    Interaction::default(),
                    bevy::ui::FocusPolicy::Block,
                    background(TITLE_BAR_ACTIVE),
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(TITLE_BAR_HEIGHT),
                        padding: UiRect::horizontal(Val::Px(8.0)),
                        column_gap: Val::Px(4.0),
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::SpaceBetween,
                        ..default()
                    },
                ))
                .with_children(|bar| {
                    bar.spawn(label(format!("{} {}", content.icon, content.title), 15.0, TEXT_LIGHT));
                    bar.spawn(Node {
                        column_gap: Val::Px(4.0),
                        flex_direction: FlexDirection::Row,
                        ..default()
                    })
                    .with_children(|buttons| {
                        for (kind, text) in [
                            (ChromeKind::Minimize, "_"),
                            (ChromeKind::Maximize, "[ ]"),
                            (ChromeKind::Close, "X"),
                        ] {
                            spawn_chrome_button(buttons, panel, kind, text);
                        }
                    });
                });

            frame
                .spawn((
                    Name::new("Body"),
                    Node {
                        flex_grow: 1.0,
                        padding: UiRect::all(Val::Px(16.0)),
                        row_gap: Val::Px(12.0),
                        flex_direction: FlexDirection::Column,
                        overflow: Overflow::clip_y(),
                        ..default()
                    },
                ))
                .with_children(|body| {
                    if let Some(text) = content.body {
                        body.spawn(label(text, 16.0, TEXT_DARK));
                    }
                    if panel == PanelId::Resume {
                        spawn_resume_buttons(body);
                    }
                });
        })
        .id();

    commands.entity(layer).add_child(frame);
    frame
}

fn spawn_chrome_button(parent: &mut ChildSpawnerCommands, panel: PanelId, kind: ChromeKind, text: &str) {
    let idle = match kind {
        ChromeKind::Close => Color::srgb(0.70, 0.20, 0.20),
        _ => Color::srgba(1.0, 1.0, 1.0, 0.15),
    };
    parent
        .spawn((
            ChromeButton { panel, kind },
            button(idle),
            Node {
                width: Val::Px(26.0),
                height: Val::Px(22.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|btn| {
            btn.spawn(label(text, 13.0, TEXT_LIGHT));
        });
}

fn spawn_resume_buttons(parent: &mut ChildSpawnerCommands) {
    parent
        .spawn(Node {
            column_gap: Val::Px(8.0),
            flex_direction: FlexDirection::Row,
            ..default()
        })
        .with_children(|row| {
            for (action, text) in [
                (ResumeButton::Download, "Download"),
                (ResumeButton::OpenFullscreen, "Open Fullscreen"),
            ] {
                row.spawn((
                    action,
                    button(TITLE_BAR_ACTIVE),
                    Node {
                        height: Val::Px(32.0),
                        padding: UiRect::horizontal(Val::Px(14.0)),
                        align_items: AlignItems::Center,
                        ..default()
                    },
                ))
                .with_children(|btn| {
                    btn.spawn(label(text, 15.0, TEXT_LIGHT));
                });
            }
        });
}

/// Mirror the window manager onto frame entities: spawn new, despawn closed, restyle the rest.
pub fn sync_window_frames(
    mut commands: Commands,
    mut windows: ResMut<WindowManager>,
    layer: Query<Entity, With<WindowLayer>>,
    mut frames: Query<(Entity, &WindowFrame, &mut Node, &mut ZIndex)>,
    mut title_bars: Query<(&TitleBar, &mut FadeBackground)>,
) {
    if !windows.is_changed() {
        return;
    }

    for (entity, frame, mut node, mut z_index) in &mut frames {
        // A panel closed and reopened in one frame already points at a new entity.
        match windows.get(frame.0).filter(|w| w.entity == Some(entity)) {
            Some(window) => {
                apply_bounds(&mut node, window);
                *z_index = ZIndex(window.z_order as i32);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    let focused = windows.focused();
    for (bar, mut colour) in &mut title_bars {
        colour.0 = if focused == Some(bar.0) { TITLE_BAR_ACTIVE } else { TITLE_BAR_INACTIVE };
    }

    let Ok(layer) = layer.single() else {
        return;
    };
    let pending: Vec<WindowRecord> = windows.windows().filter(|w| w.entity.is_none()).cloned().collect();
    for window in pending {
        let entity = spawn_window_frame(&mut commands, layer, &window);
        windows.bypass_change_detection().set_entity(window.panel, entity);
    }
}

/// Rebuild taskbar entries from the window manager.
pub fn sync_taskbar(
    mut commands: Commands,
    windows: Res<WindowManager>,
    container: Query<Entity, With<TaskbarEntries>>,
    entries: Query<Entity, With<TaskbarEntryButton>>,
    mut shown: Local<Vec<TaskbarEntry>>,
) {
    if !windows.is_changed() {
        return;
    }
    let current = windows.taskbar_entries();
    if *shown == current {
        return;
    }
    let Ok(container) = container.single() else {
        return;
    };
    for entity in &entries {
        commands.entity(entity).despawn();
    }

    commands.entity(container).with_children(|bar| {
        for entry in current.iter().copied() {
            let colour = if entry.active { TASKBAR_ENTRY_ACTIVE } else { TASKBAR_ENTRY };
            let content = entry.panel.content();
            bar.spawn((
                TaskbarEntryButton(entry.panel),
                button(colour),
                Node {
                    height: Val::Percent(100.0),
                    min_width: Val::Px(120.0),
                    padding: UiRect::horizontal(Val::Px(10.0)),
                    align_items: AlignItems::Center,
                    border: UiRect::bottom(Val::Px(if entry.active { 2.0 } else { 0.0 })),
                    ..default()
                },
                BorderColor(PROGRESS_FILL),
            ))
            .with_children(|btn| {
                btn.spawn(label(format!("{} {}", content.icon, content.title), 14.0, TEXT_LIGHT));
            });
        }
    });
    *shown = current;
}

fn faded(colour: Color, opacity: f32) -> Color {
    colour.with_alpha(colour.alpha() * opacity)
}

/// Push desktop visibility and opacity onto every faded node.
pub fn apply_desktop_opacity(
    ui: Res<DesktopUi>,
    mut root: Query<&mut Node, With<DesktopRoot>>,
    mut backgrounds: Query<(Ref<FadeBackground>, &mut BackgroundColor)>,
    mut texts: Query<(Ref<FadeText>, &mut TextColor)>,
) {
    if ui.is_changed() {
        if let Ok(mut node) = root.single_mut() {
            node.display = if ui.visible { Display::Flex } else { Display::None };
        }
    }
    for (base, mut colour) in &mut backgrounds {
        if ui.is_changed() || base.is_changed() {
            colour.0 = faded(base.0, ui.opacity);
        }
    }
    for (base, mut colour) in &mut texts {
        if ui.is_changed() || base.is_changed() {
            colour.0 = faded(base.0, ui.opacity);
        }
    }
}

/// Keep maximised windows filling the desktop when the browser window resizes.
pub fn update_desktop_area(
    mut resized: EventReader<bevy::window::WindowResized>,
    mut windows: ResMut<WindowManager>,
) {
    if let Some(event) = resized.read().last() {
        let area = Rect::new(0.0, 0.0, event.width, (event.height - TASKBAR_HEIGHT).max(0.0));
        windows.set_desktop_area(area);
        debug!("Desktop area resized to {:?}", area.size());
    }
}

/// Size the desktop to the primary window at startup.
pub fn init_desktop_area(
    windows_query: Query<&Window, With<bevy::window::PrimaryWindow>>,
    mut windows: ResMut<WindowManager>,
) {
    if let Ok(window) = windows_query.single() {
        let area = Rect::new(0.0, 0.0, window.width(), (window.height() - TASKBAR_HEIGHT).max(0.0));
        windows.set_desktop_area(area);
    }
}
