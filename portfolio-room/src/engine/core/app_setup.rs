use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::camera::{HOME_CAMERA_POSITION, HOME_CAMERA_TARGET};
// Crate engine modules
use crate::engine::assets::site_manifest::SiteManifest;
use crate::engine::camera::transition::CameraPose;
use crate::engine::camera::viewport_camera::{
    CameraArrived, CameraTransition, StageActionEvent, ViewportCamera, apply_camera_actions,
    camera_controller, drive_camera_transition, handle_camera_arrival,
};
use crate::engine::core::app_state::{
    AppState, FpsText, transition_to_running, update_loading_frontend,
};
use crate::engine::core::view_state::ViewStateMachine;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::environment::check_environment_loading;
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::room_loader::{RoomScene, check_room_load_failure, index_room_scene};
use crate::engine::scene::classifier::ClassifierConfig;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::room_click::handle_room_click;
use crate::engine::systems::view_notifications::view_mode_notification_system;
// Desktop shell
use crate::desktop::DesktopPlugin;
// Web RPC
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers SiteManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SiteManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(DesktopPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<RoomScene>()
        .init_resource::<ClassifierConfig>()
        .init_resource::<ViewportCamera>()
        .init_resource::<CameraTransition>()
        .insert_resource(SiteManifest::default())
        .insert_resource(ViewStateMachine::new(CameraPose::new(
            HOME_CAMERA_POSITION,
            HOME_CAMERA_TARGET,
        )))
        .add_event::<CameraArrived>()
        .add_event::<StageActionEvent>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                // Loading phase systems
                load_manifest_system,
                check_room_load_failure,
                index_room_scene,
                check_environment_loading,
                update_loading_frontend,
                transition_to_running,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        );

    let runtime_systems = (
        // Room interaction and camera sequencing
        (
            handle_room_click,
            camera_controller,
            drive_camera_transition,
            handle_camera_arrival,
            apply_camera_actions,
        )
            .chain(),
        // Host page notifications
        fps_notification_system,
        view_mode_notification_system,
    );

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 2_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

fn spawn_room_camera(commands: &mut Commands) {
    commands.spawn((
        Name::new("RoomCamera"),
        Camera3d::default(),
        CameraPose::new(HOME_CAMERA_POSITION, HOME_CAMERA_TARGET).transform(),
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);
    spawn_room_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands.spawn((
        Text::new("FPS: "),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(1., 0., 0.)),
        GlobalZIndex(200),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            right: Val::Px(12.0),
            ..default()
        },
        FpsText,
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: "info,wgpu=error,naga=warn".into(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
