use super::progress::LoadingProgress;
use crate::engine::assets::site_manifest::EnvironmentFiles;
use bevy::asset::LoadState;
use bevy::prelude::*;

/// Environment map handles while they load.
#[derive(Resource)]
pub struct EnvironmentLoad {
    pub diffuse: Handle<Image>,
    pub specular: Handle<Image>,
    pub camera: Entity,
}

/// Attach the environment map to the camera, or fall back straight away.
pub fn load_environment(
    commands: &mut Commands,
    asset_server: &AssetServer,
    camera: Entity,
    files: Option<&EnvironmentFiles>,
) {
    let Some(files) = files else {
        info!("No environment map configured, using default lighting");
        spawn_fallback_lighting(commands);
        commands.insert_resource(EnvironmentReady);
        return;
    };

    let diffuse: Handle<Image> = asset_server.load(&files.diffuse);
    let specular: Handle<Image> = asset_server.load(&files.specular);
    commands.entity(camera).insert(EnvironmentMapLight {
        diffuse_map: diffuse.clone(),
        specular_map: specular.clone(),
        intensity: files.intensity,
        ..default()
    });
    commands.insert_resource(EnvironmentLoad {
        diffuse,
        specular,
        camera,
    });
}

/// Marker inserted when lighting needs no further loading.
#[derive(Resource)]
pub struct EnvironmentReady;

/// Default lighting used when the environment map is missing or broken.
fn spawn_fallback_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.92, 0.92, 1.0),
        brightness: 600.0,
        ..default()
    });
    commands.spawn((
        Name::new("FallbackKeyLight"),
        PointLight {
            intensity: 400_000.0,
            range: 30.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(1.5, 3.5, 2.0),
    ));
}

pub fn check_environment_loading(
    mut commands: Commands,
    mut progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
    pending: Option<Res<EnvironmentLoad>>,
    ready: Option<Res<EnvironmentReady>>,
) {
    if progress.environment_ready {
        return;
    }
    if ready.is_some() {
        progress.environment_ready = true;
        return;
    }
    let Some(load) = pending else {
        return;
    };

    let states = [
        asset_server.get_load_state(&load.diffuse),
        asset_server.get_load_state(&load.specular),
    ];
    if states.iter().any(|s| matches!(s, Some(LoadState::Failed(_)))) {
        error!("Environment map failed to load, falling back to default lighting");
        commands.entity(load.camera).remove::<EnvironmentMapLight>();
        spawn_fallback_lighting(&mut commands);
    } else if states.iter().all(|s| matches!(s, Some(LoadState::Loaded))) {
        info!("Environment map loaded");
    } else {
        return;
    }

    commands.remove_resource::<EnvironmentLoad>();
    progress.environment_ready = true;
}
