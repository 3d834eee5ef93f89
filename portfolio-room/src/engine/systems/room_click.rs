use crate::engine::camera::transition::compute_target_pose;
use crate::engine::camera::viewport_camera::StageActionEvent;
use crate::engine::core::view_state::ViewStateMachine;
use crate::engine::scene::picking::{PointerQuery, RayHit, test_hit};
use crate::engine::scene::scene_graph::SceneGraph;
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Pointer travel (logical px) above which a press counts as an orbit drag.
const CLICK_SLOP: f32 = 4.0;

/// Separate a click from an orbit drag using where the button went down.
pub fn is_click(pressed_at: Vec2, released_at: Vec2) -> bool {
    pressed_at.distance(released_at) <= CLICK_SLOP
}

/// Triangle-accurate hit among the bounding-box candidates.
fn cast_against_candidates(
    ray_cast: &mut MeshRayCast,
    graph: &SceneGraph,
    ray: &Ray3d,
    candidates: &[RayHit],
) -> Option<RayHit> {
    let entities: Vec<Entity> = candidates
        .iter()
        .filter_map(|candidate| graph.node(candidate.node)?.entity)
        .collect();
    let filter = |entity: Entity| entities.contains(&entity);
    let settings = MeshRayCastSettings::default().with_filter(&filter);

    let (entity, hit) = ray_cast.cast_ray(*ray, &settings).first()?;
    Some(RayHit {
        node: graph.find_by_entity(*entity)?,
        point: hit.point,
        distance: hit.distance,
    })
}

/// Left click in the room: hit-test against the scene and fly to the computer on a hit.
pub fn handle_room_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    graph: Option<Res<SceneGraph>>,
    mut view: ResMut<ViewStateMachine>,
    mut ray_cast: MeshRayCast,
    mut stage_actions: EventWriter<StageActionEvent>,
    mut pressed_at: Local<Option<Vec2>>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) {
        *pressed_at = Some(cursor);
        return;
    }
    if !mouse_button.just_released(MouseButton::Left) {
        return;
    }
    let Some(start) = pressed_at.take() else {
        return;
    };
    if !is_click(start, cursor) {
        return;
    }

    let Some(graph) = graph else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let query = PointerQuery {
        cursor,
        viewport_size: camera.logical_viewport_size().unwrap_or(window.size()),
        world_from_clip: camera_transform.compute_matrix() * camera.clip_from_view().inverse(),
    };
    let Some(hit) = test_hit(&query, &graph, view.mode(), |ray, candidates| {
        cast_against_candidates(&mut ray_cast, &graph, ray, candidates)
    }) else {
        debug!("Click at {:?} missed the interactive object", cursor);
        return;
    };

    let object_center = graph
        .interactive()
        .and_then(|id| graph.node(id))
        .and_then(|node| node.bounds)
        .map(|bounds| bounds.center());
    let target = compute_target_pose(camera_transform.translation(), object_center, hit.point);

    info!("Interactive object clicked at {:?}", hit.point);
    if let Some(action) = view.begin_enter(target) {
        stage_actions.write(StageActionEvent(action));
    }
}
