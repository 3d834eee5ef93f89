//! In-page desktop shown on the monitor after the camera flies in.
//!
//! Owns the content windows, the taskbar and the boot/shutdown overlays
//! that bracket the desktop view.
//!
//! ## Flow
//!
//! ```text
//! StageAction::StartBoot        -> boot overlay (progress 0..1, fade out)
//!   └─> on_boot_finished        -> StageAction::RevealDesktop (fade in, welcome banner)
//! DesktopAction::ReturnToRoom   -> StageAction::FadeOutDesktop
//!   └─> on_desktop_hidden       -> StageAction::CloseDesktopAndShutdown
//!         └─> shutdown overlay  -> on_shutdown_finished -> camera returns
//! ```
//!
//! Window state lives in the plain `WindowManager` resource; UI entities are
//! rebuilt from it whenever it changes.

/// Desktop actions shared by the UI and the host page bridge.
pub mod actions;

/// Taskbar clock text.
pub mod clock;

/// Fixed panel table.
pub mod content;

/// Browser tabs and downloads.
pub mod external;

/// Button and title bar handlers.
pub mod interactions;

/// Boot/shutdown overlay timing and desktop fades.
pub mod sequencer;

/// Components and resources for the desktop UI.
pub mod state;

/// Stage-action driven overlays, fades, notification and clock systems.
pub mod transitions;

/// Spawning and syncing desktop UI entities.
pub mod ui;

/// Window collection, z-order, drag and taskbar projection.
pub mod window_manager;

use crate::engine::core::app_state::AppState;
use crate::engine::core::view_state::{ViewMode, in_view_mode};
use bevy::prelude::*;

use actions::{DesktopAction, handle_desktop_actions};
use clock::TaskbarClock;
use interactions::{
    button_feedback, chrome_button_interaction, icon_interaction, resume_button_interaction,
    taskbar_interaction, title_bar_drag, window_focus_interaction,
};
use state::{ActiveSequence, DesktopUi, NotificationState};
use transitions::{
    apply_desktop_stage_actions, dismiss_notification_after_delay, drive_desktop_fade,
    drive_sequence_overlay, tick_taskbar_clock,
};
use ui::{
    apply_desktop_opacity, init_desktop_area, spawn_desktop_ui, sync_taskbar, sync_window_frames,
    update_desktop_area,
};
use window_manager::WindowManager;

// Registers the desktop shell, its resources and systems.
pub struct DesktopPlugin;

impl Plugin for DesktopPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WindowManager>()
            .init_resource::<DesktopUi>()
            .init_resource::<ActiveSequence>()
            .init_resource::<NotificationState>()
            .init_resource::<TaskbarClock>()
            .add_event::<DesktopAction>()
            .add_systems(Startup, (spawn_desktop_ui, init_desktop_area))
            .add_systems(
                Update,
                (
                    // Stage sequencing
                    apply_desktop_stage_actions,
                    drive_sequence_overlay,
                    drive_desktop_fade,
                    dismiss_notification_after_delay,
                    tick_taskbar_clock.run_if(in_view_mode(ViewMode::Desktop)),
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(
                Update,
                (
                    // Input
                    (
                        button_feedback,
                        icon_interaction,
                        chrome_button_interaction,
                        taskbar_interaction,
                        resume_button_interaction,
                        window_focus_interaction,
                        title_bar_drag,
                    ),
                    handle_desktop_actions,
                    // UI mirror
                    update_desktop_area,
                    sync_window_frames,
                    sync_taskbar,
                    apply_desktop_opacity,
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            );
    }
}
