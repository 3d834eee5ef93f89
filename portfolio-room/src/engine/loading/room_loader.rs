use super::progress::LoadingProgress;
use crate::engine::scene::classifier::{ClassifierConfig, Selection, classify_and_tag};
use crate::engine::scene::scene_graph::{NodeId, SceneGraph, WorldBounds};
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::asset::{AssetLoadError, LoadState};
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::scene::SceneInstanceReady;

/// Handles and root entity of the spawned room model.
#[derive(Resource, Default)]
pub struct RoomScene {
    /// Whole glTF file. Parse errors are reported here, not on the scene label.
    pub model: Option<Handle<Gltf>>,
    pub handle: Option<Handle<Scene>>,
    pub root: Option<Entity>,
}

/// What the graph builder needs to know about one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityInfo {
    pub name: String,
    pub is_mesh: bool,
    pub bounds: Option<WorldBounds>,
}

pub fn spawn_room(commands: &mut Commands, asset_server: &AssetServer, room: &mut RoomScene, model_path: &str) {
    info!("Loading room model from {}", model_path);
    let model = asset_server.load(model_path.to_string());
    let handle = asset_server.load(GltfAssetLabel::Scene(0).from_asset(model_path.to_string()));
    let root = commands
        .spawn((Name::new("Room"), SceneRoot(handle.clone())))
        .observe(on_room_ready)
        .id();
    room.model = Some(model);
    room.handle = Some(handle);
    room.root = Some(root);
}

fn on_room_ready(_trigger: Trigger<SceneInstanceReady>, mut progress: ResMut<LoadingProgress>) {
    info!("Room scene instanced");
    progress.room_spawned = true;
}

/// A failed model leaves the room empty and the loading pipeline moving.
pub fn check_room_load_failure(
    room: Res<RoomScene>,
    asset_server: Res<AssetServer>,
    mut progress: ResMut<LoadingProgress>,
) {
    if progress.room_spawned || progress.room_failed {
        return;
    }
    let (Some(model), Some(scene)) = (&room.model, &room.handle) else {
        return;
    };
    let states = [asset_server.get_load_state(model), asset_server.get_load_state(scene)];
    if let Some(err) = first_load_error(&states) {
        error!("Failed to load room model: {}", err);
        progress.room_failed = true;
    }
}

fn first_load_error(states: &[Option<LoadState>]) -> Option<&AssetLoadError> {
    states.iter().find_map(|state| match state {
        Some(LoadState::Failed(err)) => Some(err.as_ref()),
        _ => None,
    })
}

/// World-space box around a mesh's local AABB.
pub fn world_bounds(aabb: &Aabb, transform: &GlobalTransform) -> Option<WorldBounds> {
    let center = Vec3::from(aabb.center);
    let half = Vec3::from(aabb.half_extents);
    let corners = (0..8).map(|i| {
        let sign = Vec3::new(
            if i & 1 == 0 { -1.0 } else { 1.0 },
            if i & 2 == 0 { -1.0 } else { 1.0 },
            if i & 4 == 0 { -1.0 } else { 1.0 },
        );
        transform.transform_point(center + half * sign)
    });
    WorldBounds::from_points(corners)
}

/// glTF primitives hang under the named node; match on both names.
fn mesh_display_name(own: &str, node: Option<&Name>) -> String {
    match node {
        Some(node) if !own.starts_with(node.as_str()) => format!("{}/{}", node.as_str(), own),
        _ => own.to_string(),
    }
}

/// Depth-first pre-order walk from `root`. Meshes without bounds are kept as groups.
pub fn build_scene_graph(
    root: Entity,
    children_of: impl Fn(Entity) -> Vec<Entity>,
    describe: impl Fn(Entity) -> EntityInfo,
) -> SceneGraph {
    let mut graph = SceneGraph::new();
    let mut stack: Vec<(Entity, Option<NodeId>)> = vec![(root, None)];

    while let Some((entity, parent)) = stack.pop() {
        let info = describe(entity);
        let id = match (info.is_mesh, info.bounds) {
            (true, Some(bounds)) => graph.add_mesh(info.name, bounds, parent),
            _ => graph.add_group(info.name, parent),
        };
        graph.set_entity(id, entity);

        // Reverse so the first child is popped first.
        for child in children_of(entity).into_iter().rev() {
            stack.push((child, Some(id)));
        }
    }

    graph.finalize_bounds();
    graph
}

/// Index the spawned room once every mesh has bounds, then pick the interactive object.
pub fn index_room_scene(
    mut commands: Commands,
    room: Res<RoomScene>,
    mut progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    config: Res<ClassifierConfig>,
    children: Query<&Children>,
    names: Query<&Name>,
    parents: Query<&ChildOf>,
    meshes: Query<(Option<&Aabb>, &GlobalTransform), With<Mesh3d>>,
) {
    if progress.scene_indexed {
        return;
    }
    if progress.room_failed {
        warn!("Room model unavailable, the room will not be interactive");
        commands.insert_resource(SceneGraph::new());
        progress.scene_indexed = true;
        return;
    }
    if !progress.room_spawned {
        return;
    }
    let Some(root) = room.root else {
        return;
    };

    // Aabb is computed in PostUpdate; wait a frame if any mesh is still missing one.
    let pending = children
        .iter_descendants(root)
        .filter_map(|e| meshes.get(e).ok())
        .any(|(aabb, _)| aabb.is_none());
    if pending {
        return;
    }

    let mut graph = build_scene_graph(
        root,
        |entity| children.get(entity).map(|c| c.to_vec()).unwrap_or_default(),
        |entity| {
            let name = names.get(entity).map(|n| n.as_str().to_string()).unwrap_or_default();
            match meshes.get(entity) {
                Ok((aabb, transform)) => EntityInfo {
                    name: mesh_display_name(&name, parents.get(entity).ok().and_then(|p| names.get(p.parent()).ok())),
                    is_mesh: true,
                    bounds: aabb.and_then(|a| world_bounds(a, transform)),
                },
                Err(_) => EntityInfo {
                    name,
                    is_mesh: false,
                    bounds: None,
                },
            }
        },
    );
    info!("Indexed room scene: {} nodes, {} meshes", graph.len(), graph.meshes().count());

    let notification = match classify_and_tag(&mut graph, &config) {
        Some(selection) => {
            let node = graph.node(selection.node());
            let name = node.map(|n| n.name.clone()).unwrap_or_default();
            let center = node.and_then(|n| n.bounds).map(|b| b.center()).unwrap_or_default();
            match selection {
                Selection::Scored { score, .. } => {
                    info!("Interactive object: {} (score {}) at {:?}", name, score, center)
                }
                Selection::Fallback { .. } => {
                    info!("Interactive object (fallback): {} at {:?}", name, center)
                }
            }
            serde_json::json!({
                "found": true,
                "name": name,
                "fallback": matches!(selection, Selection::Fallback { .. }),
                "center": [center.x, center.y, center.z],
            })
        }
        None => {
            warn!("No interactive object found; clicks will be ignored");
            serde_json::json!({ "found": false })
        }
    };
    rpc_interface.send_notification("interactive_object", notification);

    commands.insert_resource(graph);
    progress.scene_indexed = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::io::AssetReaderError;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn failure_on_either_handle_fails_the_room() {
        let failed = LoadState::Failed(Arc::new(AssetLoadError::AssetReaderError(
            AssetReaderError::NotFound(PathBuf::from("models/room.glb")),
        )));

        assert!(first_load_error(&[Some(LoadState::Loading), Some(LoadState::Loading)]).is_none());
        assert!(first_load_error(&[Some(failed.clone()), Some(LoadState::Loading)]).is_some());
        assert!(first_load_error(&[Some(LoadState::Loaded), Some(failed)]).is_some());
        assert!(first_load_error(&[None, None]).is_none());
    }

    #[test]
    fn failed_room_indexes_an_empty_scene() {
        let mut app = App::new();
        app.insert_resource(LoadingProgress {
            manifest_loaded: true,
            room_failed: true,
            environment_ready: true,
            ..default()
        })
        .init_resource::<RoomScene>()
        .init_resource::<WebRpcInterface>()
        .init_resource::<ClassifierConfig>()
        .add_systems(Update, index_room_scene);

        app.update();

        let graph = app.world().resource::<SceneGraph>();
        assert_eq!(graph.len(), 0);
        assert_eq!(graph.interactive(), None);
        let progress = app.world().resource::<LoadingProgress>();
        assert!(progress.scene_indexed);
        assert!(progress.is_complete());
    }

    #[test]
    fn world_bounds_follow_translation_and_scale() {
        let aabb = Aabb::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0));
        let transform = GlobalTransform::from(
            Transform::from_xyz(0.0, 1.0, 0.0).with_scale(Vec3::new(0.25, 0.15, 0.025)),
        );
        let bounds = world_bounds(&aabb, &transform).unwrap();
        assert!(bounds.center().abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), 1e-5));
        assert!(bounds.size().abs_diff_eq(Vec3::new(0.5, 0.3, 0.05), 1e-5));
    }

    #[test]
    fn mesh_names_carry_their_node_name() {
        assert_eq!(mesh_display_name("Cube.001", Some(&Name::new("Monitor_01"))), "Monitor_01/Cube.001");
        assert_eq!(mesh_display_name("Monitor_01.0", Some(&Name::new("Monitor_01"))), "Monitor_01.0");
        assert_eq!(mesh_display_name("Chair", None), "Chair");
    }

    #[test]
    fn walk_is_pre_order_and_groups_union_children() {
        let root = Entity::from_raw(0);
        let desk = Entity::from_raw(1);
        let monitor = Entity::from_raw(2);
        let lamp = Entity::from_raw(3);

        let tree: HashMap<Entity, Vec<Entity>> =
            HashMap::from([(root, vec![desk, lamp]), (desk, vec![monitor])]);
        let info: HashMap<Entity, EntityInfo> = HashMap::from([
            (root, EntityInfo { name: "Room".into(), is_mesh: false, bounds: None }),
            (desk, EntityInfo { name: "Desk".into(), is_mesh: false, bounds: None }),
            (
                monitor,
                EntityInfo {
                    name: "Monitor".into(),
                    is_mesh: true,
                    bounds: Some(WorldBounds::new(Vec3::new(0.0, 0.8, 0.0), Vec3::new(0.5, 1.1, 0.1))),
                },
            ),
            (
                lamp,
                EntityInfo {
                    name: "Lamp".into(),
                    is_mesh: true,
                    bounds: Some(WorldBounds::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(2.2, 1.5, 0.2))),
                },
            ),
        ]);

        let graph = build_scene_graph(
            root,
            |e| tree.get(&e).cloned().unwrap_or_default(),
            |e| info[&e].clone(),
        );

        let names: Vec<&str> = (0..graph.len())
            .filter_map(|i| graph.node(NodeId(i)))
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["Room", "Desk", "Monitor", "Lamp"]);

        let desk_node = graph.find_by_entity(desk).unwrap();
        let desk_bounds = graph.node(desk_node).unwrap().bounds.unwrap();
        assert_eq!(desk_bounds.max, Vec3::new(0.5, 1.1, 0.1));

        let root_bounds = graph.node(NodeId(0)).unwrap().bounds.unwrap();
        assert_eq!(root_bounds.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(root_bounds.max, Vec3::new(2.2, 1.5, 0.2));
    }
}
