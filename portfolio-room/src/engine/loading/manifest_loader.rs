use super::environment::load_environment;
use super::progress::LoadingProgress;
use super::room_loader::{RoomScene, spawn_room};
use crate::engine::assets::site_manifest::SiteManifest;
use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::SITE_MANIFEST_PATH;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<SiteManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading site manifest from {}", SITE_MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(SITE_MANIFEST_PATH));
}

/// Wait for the manifest, then kick off the room model and environment loads.
/// A missing or malformed manifest falls back to built-in defaults.
pub fn load_manifest_system(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    mut room: ResMut<RoomScene>,
    manifest_loader: Res<ManifestLoader>,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<SiteManifest>>,
    camera: Query<Entity, With<Camera3d>>,
) {
    if loading_progress.manifest_loaded {
        return;
    }
    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    let manifest = if let Some(manifest) = manifests.get(handle) {
        info!("Site manifest loaded for {}", manifest.owner_name);
        manifest.clone()
    } else if matches!(asset_server.get_load_state(handle), Some(LoadState::Failed(_))) {
        error!("Failed to load {}, using defaults", SITE_MANIFEST_PATH);
        SiteManifest::default()
    } else {
        return;
    };

    spawn_room(&mut commands, &asset_server, &mut room, &manifest.model);
    if let Ok(camera) = camera.single() {
        load_environment(&mut commands, &asset_server, camera, manifest.environment.as_ref());
    }
    commands.insert_resource(manifest);
    loading_progress.manifest_loaded = true;
}
