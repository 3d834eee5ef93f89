use super::ray::{ray_from_ndc, ray_hits_bounds};
use super::scene_graph::{NodeId, SceneGraph};
use crate::engine::core::view_state::ViewMode;
use bevy::prelude::*;

/// Pointer position plus the camera data needed to cast a ray.
#[derive(Debug, Clone, Copy)]
pub struct PointerQuery {
    /// Logical pixels, origin top-left.
    pub cursor: Vec2,
    pub viewport_size: Vec2,
    pub world_from_clip: Mat4,
}

/// Nearest intersection along the pointer ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub node: NodeId,
    pub point: Vec3,
    pub distance: f32,
}

/// Confirmed click on the interactive object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerHit {
    pub node: NodeId,
    pub point: Vec3,
}

/// Map a cursor to [-1, 1] on both axes with y pointing up.
pub fn pointer_to_ndc(cursor: Vec2, viewport_size: Vec2) -> Option<Vec2> {
    if viewport_size.x <= 0.0 || viewport_size.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        cursor.x / viewport_size.x * 2.0 - 1.0,
        -(cursor.y / viewport_size.y * 2.0 - 1.0),
    ))
}

/// Every mesh the ray passes through, nearest first.
pub fn intersect_scene(ray: &Ray3d, graph: &SceneGraph) -> Vec<RayHit> {
    let mut hits: Vec<RayHit> = graph
        .meshes()
        .filter_map(|(node, scene_node)| {
            let distance = ray_hits_bounds(ray, scene_node.bounds.as_ref()?)?;
            Some(RayHit {
                node,
                point: ray.get_point(distance),
                distance,
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Whether the node or any ancestor is the interactive object.
pub fn resolves_to_interactive(graph: &SceneGraph, node: NodeId) -> bool {
    let interactive = graph.interactive();
    graph.ancestors(node).any(|id| {
        Some(id) == interactive || graph.node(id).is_some_and(|n| n.is_interactive)
    })
}

/// Test a click against the room. Only answers while the room view is active.
///
/// Bounding boxes give the candidates, nearest first. `narrow_phase` picks the
/// real hit among them, usually with a triangle ray cast.
pub fn test_hit(
    query: &PointerQuery,
    graph: &SceneGraph,
    mode: ViewMode,
    narrow_phase: impl FnOnce(&Ray3d, &[RayHit]) -> Option<RayHit>,
) -> Option<PointerHit> {
    if mode != ViewMode::Room {
        return None;
    }
    let ndc = pointer_to_ndc(query.cursor, query.viewport_size)?;
    let ray = ray_from_ndc(ndc, query.world_from_clip)?;
    let candidates = intersect_scene(&ray, graph);
    if candidates.is_empty() {
        return None;
    }
    let nearest = narrow_phase(&ray, &candidates)?;

    resolves_to_interactive(graph, nearest.node).then_some(PointerHit {
        node: nearest.node,
        point: nearest.point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::scene_graph::WorldBounds;

    fn bounds_only(_: &Ray3d, candidates: &[RayHit]) -> Option<RayHit> {
        candidates.first().copied()
    }

    fn camera_query(cursor: Vec2) -> PointerQuery {
        let view = Transform::from_xyz(0.0, 1.0, 5.0).looking_at(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        let projection = Mat4::perspective_infinite_reverse_rh(0.8, 1.0, 0.1);
        PointerQuery {
            cursor,
            viewport_size: Vec2::new(800.0, 800.0),
            world_from_clip: view.compute_matrix() * projection.inverse(),
        }
    }

    /// Room with a desk group holding a computer group with a screen child.
    fn room() -> (SceneGraph, NodeId, NodeId) {
        let mut graph = SceneGraph::new();
        let root = graph.add_group("Room", None);
        let computer = graph.add_group("Computer", Some(root));
        let screen = graph.add_mesh(
            "Glass",
            WorldBounds::from_center_size(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.6, 0.4, 0.05)),
            Some(computer),
        );
        graph.add_mesh(
            "Wall",
            WorldBounds::from_center_size(Vec3::new(0.0, 1.5, -2.0), Vec3::new(6.0, 3.0, 0.1)),
            Some(root),
        );
        graph.finalize_bounds();
        graph.tag_interactive(computer);
        (graph, computer, screen)
    }

    #[test]
    fn ndc_inverts_y() {
        let ndc = pointer_to_ndc(Vec2::new(0.0, 0.0), Vec2::new(200.0, 100.0)).unwrap();
        assert_eq!(ndc, Vec2::new(-1.0, 1.0));
        let ndc = pointer_to_ndc(Vec2::new(200.0, 100.0), Vec2::new(200.0, 100.0)).unwrap();
        assert_eq!(ndc, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn click_on_child_mesh_hits_interactive_parent() {
        let (graph, _, screen) = room();
        let hit = test_hit(&camera_query(Vec2::new(400.0, 400.0)), &graph, ViewMode::Room, bounds_only).unwrap();
        assert_eq!(hit.node, screen);
        assert!((hit.point.z - 0.025).abs() < 1e-3);
    }

    #[test]
    fn click_on_wall_misses() {
        let (graph, _, _) = room();
        let query = camera_query(Vec2::new(200.0, 300.0));

        let ndc = pointer_to_ndc(query.cursor, query.viewport_size).unwrap();
        let ray = ray_from_ndc(ndc, query.world_from_clip).unwrap();
        let nearest = intersect_scene(&ray, &graph)[0];
        assert_eq!(graph.node(nearest.node).unwrap().name, "Wall");

        assert_eq!(test_hit(&query, &graph, ViewMode::Room, bounds_only), None);
    }

    #[test]
    fn narrow_phase_sees_through_hollow_bounds() {
        let (mut graph, _, screen) = room();
        // Chair back in front of the screen; its box covers the ray but its mesh does not.
        graph.add_mesh(
            "Chair",
            WorldBounds::from_center_size(Vec3::new(0.0, 1.0, 1.0), Vec3::new(0.5, 1.0, 0.5)),
            None,
        );
        let query = camera_query(Vec2::new(400.0, 400.0));

        assert_eq!(test_hit(&query, &graph, ViewMode::Room, bounds_only), None);

        let mut seen = Vec::new();
        let hit = test_hit(&query, &graph, ViewMode::Room, |_, candidates| {
            seen = candidates.iter().map(|c| graph.node(c.node).unwrap().name.clone()).collect();
            candidates.iter().find(|c| graph.node(c.node).unwrap().name != "Chair").copied()
        })
        .unwrap();
        assert_eq!(seen, vec!["Chair", "Glass", "Wall"]);
        assert_eq!(hit.node, screen);
    }

    #[test]
    fn narrow_phase_skipped_without_candidates() {
        let (graph, _, _) = room();
        let mut called = false;
        let hit = test_hit(&camera_query(Vec2::new(400.0, 790.0)), &graph, ViewMode::Room, |_, _| {
            called = true;
            None
        });
        assert_eq!(hit, None);
        assert!(!called);
    }

    #[test]
    fn click_on_empty_space_misses() {
        let (graph, _, _) = room();
        assert_eq!(test_hit(&camera_query(Vec2::new(400.0, 790.0)), &graph, ViewMode::Room, bounds_only), None);
    }

    #[test]
    fn ignored_outside_room_mode() {
        let (graph, _, _) = room();
        let query = camera_query(Vec2::new(400.0, 400.0));
        for mode in [ViewMode::TransitioningIn, ViewMode::Desktop, ViewMode::TransitioningOut] {
            assert_eq!(test_hit(&query, &graph, mode, bounds_only), None);
        }
    }

    #[test]
    fn no_interactive_object_always_misses() {
        let mut graph = SceneGraph::new();
        graph.add_mesh(
            "Glass",
            WorldBounds::from_center_size(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.6, 0.4, 0.05)),
            None,
        );
        assert_eq!(test_hit(&camera_query(Vec2::new(400.0, 400.0)), &graph, ViewMode::Room, bounds_only), None);
    }
}
